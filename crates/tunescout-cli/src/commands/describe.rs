use anyhow::{Context, Result};
use tunescout_core::TuneCorpus;
use tunescout_retrieval::Config;

/// Show corpus statistics.
pub fn describe_corpus(config: &Config, prompt: bool) -> Result<()> {
    let corpus = TuneCorpus::load(&config.database_path, config.malformed_mode)
        .with_context(|| format!("Failed to load corpus {}", config.database_path.display()))?;
    let description = corpus.describe();

    if prompt {
        println!("{description}");
        return Ok(());
    }

    println!("Corpus: {}", config.database_path.display());
    println!("  Tunes: {}", description.tune_count);
    println!("  Vocabulary terms: {}", corpus.vocabulary().len());
    println!("  Types ({}): {}", description.types.len(), description.types.join(", "));
    println!("  Keys ({}): {}", description.keys.len(), description.keys.join(", "));
    println!("  Modes ({}): {}", description.modes.len(), description.modes.join(", "));
    println!("  Meters ({}): {}", description.meters.len(), description.meters.join(", "));

    Ok(())
}
