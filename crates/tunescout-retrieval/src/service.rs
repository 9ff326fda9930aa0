//! The retrieval service: request text in, reference tunes out.
//!
//! The corpus, its description and its encoded matrix are built once in
//! [`RetrievalService::new`] and only read afterwards. Each request goes
//! through the translator, then every filter it yields is encoded, scored
//! against the whole matrix, and cut to the configured top-K. Per-filter
//! results are concatenated in filter order without cross-filter
//! de-duplication.

use serde::Serialize;
use tunescout_core::render::{describe_tune, notation_header};
use tunescout_core::{AttributeFilter, CorpusDescription, TuneCorpus, TuneRecord};
use tunescout_search::{AttributeEncoder, EncodedMatrix, SimilarityRanker};

use crate::config::Config;
use crate::error::{RetrievalError, RetrievalResult};
use crate::translate::{QueryTranslator, Translation};

/// A selected tune with its similarity score and description sentence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub tune: TuneRecord,
    pub score: f64,
    pub description: String,
}

impl RankedResult {
    /// The tune's notation-header block.
    pub fn render(&self) -> String {
        notation_header(&self.tune)
    }
}

/// The ranking produced for one filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterRanking {
    pub filter: AttributeFilter,
    /// Filter values absent from the vocabulary; they were ignored.
    pub unknown_tags: Vec<String>,
    pub results: Vec<RankedResult>,
}

#[derive(Debug)]
pub struct RetrievalService<T> {
    corpus: TuneCorpus,
    description: CorpusDescription,
    encoder: AttributeEncoder,
    matrix: EncodedMatrix,
    ranker: SimilarityRanker,
    translator: T,
}

impl<T: QueryTranslator> RetrievalService<T> {
    /// Fit the encoder to the corpus vocabulary and encode the corpus.
    pub fn new(corpus: TuneCorpus, translator: T, top_k: usize) -> Self {
        let encoder = AttributeEncoder::fit(corpus.vocabulary());
        let matrix = encoder.encode_corpus(&corpus);
        let description = corpus.describe();
        log::info!(
            "Retrieval service initialized with {} tunes in database",
            corpus.len()
        );
        Self {
            corpus,
            description,
            encoder,
            matrix,
            ranker: SimilarityRanker::new(top_k),
            translator,
        }
    }

    /// Load the configured corpus and build the service around it.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Corpus`] if the corpus cannot be loaded and
    /// [`RetrievalError::Config`] if `top_k` is zero.
    pub fn from_config(config: &Config, translator: T) -> RetrievalResult<Self> {
        if config.top_k == 0 {
            return Err(RetrievalError::Config("top_k must be at least 1".to_string()));
        }
        let corpus = TuneCorpus::load(&config.database_path, config.malformed_mode)?;
        Ok(Self::new(corpus, translator, config.top_k))
    }

    pub fn corpus(&self) -> &TuneCorpus {
        &self.corpus
    }

    pub fn description(&self) -> &CorpusDescription {
        &self.description
    }

    pub fn top_k(&self) -> usize {
        self.ranker.k()
    }

    /// Rank the corpus against a single filter.
    ///
    /// Filter values missing from the vocabulary are logged, reported in
    /// [`FilterRanking::unknown_tags`], and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns an error only if the encoded corpus no longer matches the
    /// corpus it was built from.
    pub fn rank_filter(&self, filter: &AttributeFilter) -> RetrievalResult<FilterRanking> {
        let encoding = self.encoder.encode(filter.tags());
        for tag in &encoding.unknown {
            log::warn!("{} not in database", tag);
        }

        let ranked = self.ranker.rank(&encoding.vector, &self.matrix)?;
        let results = ranked
            .into_iter()
            .map(|r| {
                let tune = self
                    .corpus
                    .get(r.index)
                    .ok_or(RetrievalError::RowOutOfRange {
                        index: r.index,
                        len: self.corpus.len(),
                    })?;
                Ok(RankedResult {
                    description: describe_tune(tune),
                    tune: tune.clone(),
                    score: r.score,
                })
            })
            .collect::<RetrievalResult<Vec<_>>>()?;

        log::debug!("Filter {} selected {} tunes", filter, results.len());
        Ok(FilterRanking {
            filter: filter.clone(),
            unknown_tags: encoding.unknown,
            results,
        })
    }

    /// Translate `query` and rank the corpus for each resulting filter.
    ///
    /// Returns `Ok(None)` when the request maps to no filter or when
    /// translation fails for any reason; callers should treat that as "no
    /// references available".
    pub async fn retrieve_rankings(&self, query: &str) -> RetrievalResult<Option<Vec<FilterRanking>>> {
        let filters = match self.translator.translate(query, &self.description).await {
            Ok(Translation::Filters(filters)) if !filters.is_empty() => filters,
            Ok(Translation::Filters(_)) => {
                log::debug!("Translator returned no filters for {:?}", query);
                return Ok(None);
            }
            Ok(Translation::NotApplicable) => {
                log::debug!("Request {:?} does not call for reference tunes", query);
                return Ok(None);
            }
            Err(e) => {
                log::warn!("Query translation failed, continuing without references: {}", e);
                return Ok(None);
            }
        };

        let rankings = filters
            .iter()
            .map(|filter| self.rank_filter(filter))
            .collect::<RetrievalResult<Vec<_>>>()?;
        Ok(Some(rankings))
    }

    /// Translate `query` and return every filter's top-K, in filter order.
    pub async fn retrieve(&self, query: &str) -> RetrievalResult<Option<Vec<RankedResult>>> {
        let rankings = self.retrieve_rankings(query).await?;
        Ok(rankings.map(|rankings| {
            rankings
                .into_iter()
                .flat_map(|ranking| ranking.results)
                .collect()
        }))
    }

    /// Retrieve and render the references as one text block.
    pub async fn references(&self, query: &str) -> RetrievalResult<Option<String>> {
        let results = self.retrieve(query).await?;
        Ok(results.map(|results| render_references(&results)))
    }
}

/// Render results as reference text: for each tune its description line,
/// the notation-header block, then a blank line.
pub fn render_references(results: &[RankedResult]) -> String {
    results
        .iter()
        .map(|result| format!("{}\n{}\n", result.description, result.render()))
        .collect()
}
