use anyhow::{Context, Result};
use tunescout_retrieval::{Config, OpenAiTranslator, RetrievalService};

/// Translate a request and print the reference tunes it selects.
pub async fn run_query(config: &Config, text: &str, json: bool) -> Result<()> {
    let translator = OpenAiTranslator::from_config(config).context(
        "Query translation needs an OpenAI API key.\n\
         Set TUNESCOUT_OPENAI_API_KEY or run 'tunescout config set openai_api_key <key>'",
    )?;
    let service = RetrievalService::from_config(config, translator)
        .with_context(|| format!("Failed to load corpus {}", config.database_path.display()))?;

    if json {
        let rankings = service.retrieve_rankings(text).await?;
        println!("{}", serde_json::to_string_pretty(&rankings)?);
        return Ok(());
    }

    match service.references(text).await? {
        Some(references) => {
            println!("I found these reference tunes:\n");
            print!("{references}");
        }
        None => println!("No reference tunes found."),
    }

    Ok(())
}
