use anyhow::{Context, Result};
use tunescout_retrieval::{config, Config};

/// Keys accepted by `config get` and `config set`.
const KEYS: &[&str] = &[
    "openai_api_key",
    "database_path",
    "top_k",
    "model",
    "api_base",
    "request_timeout_secs",
    "max_retries",
    "malformed_mode",
];

/// Keys whose values are written as TOML integers.
const INTEGER_KEYS: &[&str] = &["top_k", "request_timeout_secs", "max_retries"];

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!("Unknown config key: {}\n\nValid keys: {}", key, KEYS.join(", "))
}

/// Mask all but the last four characters of a secret.
fn redact(secret: &str) -> String {
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{tail}")
}

/// Show the current effective configuration.
pub fn show_config() -> Result<()> {
    let mut config = Config::load()?;
    config.openai_api_key = config.openai_api_key.as_deref().map(redact);

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    if config.openai_api_key.is_none() {
        println!("# openai_api_key = <not set>");
    }
    print!(
        "{}",
        toml::to_string_pretty(&config).context("Failed to render configuration")?
    );

    println!("\nPriority: CLI args > ENV vars (TUNESCOUT_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value.
pub fn get_config(key: Option<String>) -> Result<()> {
    if let Some(key) = key {
        let config = Config::load()?;
        let table = toml::Value::try_from(&config).context("Failed to render configuration")?;

        match table.get(&key) {
            Some(toml::Value::String(s)) => println!("{s}"),
            Some(value) => println!("{value}"),
            None if KEYS.contains(&key.as_str()) => println!("<not set>"),
            None => return Err(unknown_key(&key)),
        }
    } else {
        let config_path = config::config_file_path();

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            print!("{}", contents);
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'tunescout config init' to create it.");
        }
    }

    Ok(())
}

/// Set a value in the config file, keeping its comments and layout.
pub fn set_config(key: &str, value: &str) -> Result<()> {
    let config_path = config::config_file_path();

    config::ensure_config_file()?;

    let contents = std::fs::read_to_string(&config_path)
        .context("Failed to read config file")?;
    let mut doc = contents
        .parse::<toml_edit::DocumentMut>()
        .context("Failed to parse config file")?;

    doc[key] = parse_value(key, value)?;

    std::fs::write(&config_path, doc.to_string())
        .context("Failed to write config file")?;

    println!("✓ Updated {} = {}", key, value);
    println!("  in {}", config_path.display());

    Ok(())
}

fn parse_value(key: &str, value: &str) -> Result<toml_edit::Item> {
    if !KEYS.contains(&key) {
        return Err(unknown_key(key));
    }
    if INTEGER_KEYS.contains(&key) {
        let number: i64 = value
            .parse()
            .with_context(|| format!("{key} must be a whole number, got {value:?}"))?;
        anyhow::ensure!(number >= 0, "{key} must not be negative");
        return Ok(toml_edit::value(number));
    }
    if key == "malformed_mode" {
        anyhow::ensure!(
            matches!(value, "fail" | "skip"),
            "malformed_mode must be \"fail\" or \"skip\""
        );
    }
    Ok(toml_edit::value(value))
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    let config_path = config::config_file_path();
    println!("{}", config_path.display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure tunescout.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
