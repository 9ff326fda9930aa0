use anyhow::{Context, Result};
use tunescout_core::AttributeFilter;
use tunescout_retrieval::{Config, FilterRanking, NullTranslator, RetrievalService};

/// Rank the corpus against an explicit filter.
pub fn run_rank(config: &Config, filter: &AttributeFilter, json: bool) -> Result<()> {
    let service = RetrievalService::from_config(config, NullTranslator)
        .with_context(|| format!("Failed to load corpus {}", config.database_path.display()))?;
    let ranking = service.rank_filter(filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ranking)?);
    } else {
        print!("{}", format_ranking(&ranking));
    }

    Ok(())
}

fn format_ranking(ranking: &FilterRanking) -> String {
    let mut lines = vec![format!("Filter: {}", ranking.filter)];
    lines.extend(
        ranking
            .unknown_tags
            .iter()
            .map(|tag| format!("  (ignored: '{tag}' is not in the corpus)")),
    );
    lines.push(String::new());
    lines.extend(ranking.results.iter().enumerate().map(|(rank, result)| {
        let tune = &result.tune;
        format!(
            "{:>3}. {:.3}  {}  [{}, {}, {}]",
            rank + 1,
            result.score,
            tune.name(),
            tune.tune_type(),
            tune.key_mode(),
            tune.meter()
        )
    }));
    lines.push(String::new());
    lines.join("\n")
}
