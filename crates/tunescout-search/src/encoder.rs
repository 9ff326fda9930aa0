//! Multi-hot encoding over a frozen vocabulary.

use tunescout_core::{TuneCorpus, Vocabulary};

const WORD_BITS: usize = u64::BITS as usize;

/// A fixed-width binary vector, one bit per vocabulary term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedVector {
    words: Vec<u64>,
    dims: usize,
}

impl EncodedVector {
    /// An all-zero vector of `dims` dimensions.
    pub fn zeros(dims: usize) -> Self {
        Self {
            words: vec![0; dims.div_ceil(WORD_BITS)],
            dims,
        }
    }

    fn set(&mut self, index: usize) {
        self.words[index / WORD_BITS] |= 1 << (index % WORD_BITS);
    }

    pub fn is_set(&self, index: usize) -> bool {
        index < self.dims && self.words[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    /// Number of dimensions (vocabulary size).
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Size of the intersection and of the union of two vectors' set bits.
    pub(crate) fn overlap(&self, other: &Self) -> (u32, u32) {
        self.words
            .iter()
            .zip(&other.words)
            .fold((0, 0), |(inter, union), (a, b)| {
                (inter + (a & b).count_ones(), union + (a | b).count_ones())
            })
    }
}

/// The result of encoding a tag set: the vector plus any tags the vocabulary
/// does not know. Unknown tags contribute nothing to the vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    pub vector: EncodedVector,
    pub unknown: Vec<String>,
}

/// The encoded corpus: one row per tune, in corpus order.
#[derive(Debug, Clone)]
pub struct EncodedMatrix {
    rows: Vec<EncodedVector>,
    dims: usize,
}

impl EncodedMatrix {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn row(&self, index: usize) -> Option<&EncodedVector> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[EncodedVector] {
        &self.rows
    }
}

/// Maps tags to dimensions of a fixed vocabulary.
#[derive(Debug, Clone)]
pub struct AttributeEncoder {
    vocabulary: Vocabulary,
}

impl AttributeEncoder {
    /// Fix the dimension of every vocabulary term for the lifetime of the
    /// encoder.
    pub fn fit(vocabulary: &Vocabulary) -> Self {
        Self {
            vocabulary: vocabulary.clone(),
        }
    }

    pub fn dims(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Encode a set of tags. Repeated tags are harmless.
    pub fn encode<'a>(&self, tags: impl IntoIterator<Item = &'a str>) -> Encoding {
        let mut vector = EncodedVector::zeros(self.dims());
        let mut unknown = Vec::new();
        for tag in tags {
            match self.vocabulary.index_of(tag) {
                Some(index) => vector.set(index),
                None => {
                    if !unknown.iter().any(|u| u == tag) {
                        unknown.push(tag.to_string());
                    }
                }
            }
        }
        Encoding { vector, unknown }
    }

    /// Encode every tune in the corpus once.
    pub fn encode_corpus(&self, corpus: &TuneCorpus) -> EncodedMatrix {
        let rows: Vec<EncodedVector> = corpus
            .iter()
            .map(|tune| self.encode(tune.tags()).vector)
            .collect();
        log::debug!(
            "Encoded {} tunes over {} tags",
            rows.len(),
            self.dims()
        );
        EncodedMatrix {
            rows,
            dims: self.dims(),
        }
    }
}
