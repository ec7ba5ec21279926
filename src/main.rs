use memsift::cli::{Cli, Commands, ConfigAction};
use memsift::config::{Config, ConfigValidator};
use memsift::error::{MemsiftError, Result};
use memsift::extract::{scan_message, ExtractionEngine};
use memsift::id::WallClockIds;
use memsift::keywords::TopicTable;
use memsift::patterns::MatcherSet;
use memsift::storage::RecordStore;
use std::path::PathBuf;

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse_args();

    match cli.command {
        Commands::Scan {
            text,
            source,
            json,
            dry_run,
        } => {
            cmd_scan(cli.config, &text, source, json, dry_run)?;
        }
        Commands::Config { action } => {
            cmd_config(cli.config, action)?;
        }
    }

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("memsift=info"));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn cmd_scan(
    config_path: Option<PathBuf>,
    text: &str,
    source: Option<String>,
    json: bool,
    dry_run: bool,
) -> Result<()> {
    let config = load_config(config_path)?;

    let matchers = MatcherSet::with_kinds(&config.matchers.enabled_kinds())?;
    let engine = ExtractionEngine::new(
        matchers,
        TopicTable::default_topics(),
        Box::new(WallClockIds),
    );

    let source = source.unwrap_or_else(|| config.extraction.default_source.clone());
    let records = scan_message(&config.extraction, &engine, text, &source);

    if json {
        println!("{}", serde_json::to_string_pretty(&records).map_err(|e| {
            MemsiftError::Json {
                source: e,
                context: "Failed to serialize scan output".to_string(),
            }
        })?);
    } else {
        for record in &records {
            println!(
                "{:>8} {:<8} {}",
                record.category.to_string(),
                record.tier.to_string(),
                record.content
            );
        }
    }

    if dry_run {
        tracing::info!("Dry run: {} records extracted, none saved", records.len());
        return Ok(());
    }

    let data_dir = expand_path(&config.storage.data_dir)?;
    let store = RecordStore::new(data_dir.join("records"))?;
    let saved = store.save_all(&records);

    if saved > 0 {
        tracing::info!("Auto-saved {} records", saved);
    }
    if saved < records.len() {
        tracing::warn!("{} records failed to save", records.len() - saved);
    }

    Ok(())
}

fn cmd_config(config_path: Option<PathBuf>, action: ConfigAction) -> Result<()> {
    let path = match config_path {
        Some(p) => p,
        None => Config::default_path()?,
    };

    match action {
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                return Err(MemsiftError::Config(format!(
                    "Configuration already exists at {:?} (use --force to overwrite)",
                    path
                )));
            }
            Config::default().save(&path)?;
            println!("✓ Wrote default configuration to {:?}", path);
        }
        ConfigAction::Show => {
            let config = load_config(Some(path))?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Validate => {
            let config = Config::load(&path)?;
            ConfigValidator::validate(&config)?;
            println!("✓ Configuration is valid");
        }
    }

    Ok(())
}

/// Load the config from an explicit path, the default path, or fall back to
/// built-in defaults when no file exists yet
fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load(&path),
        None => {
            let path = Config::default_path()?;
            if path.exists() {
                Config::load(&path)
            } else {
                tracing::debug!("No config file at {:?}, using defaults", path);
                Ok(Config::default())
            }
        }
    }
}

/// Expand a leading ~ to the user's home directory
fn expand_path(path: &std::path::Path) -> Result<PathBuf> {
    let s = path.to_string_lossy();
    if let Some(rest) = s.strip_prefix("~/") {
        let home = dirs::home_dir()
            .ok_or_else(|| MemsiftError::Config("Cannot determine home directory".to_string()))?;
        Ok(home.join(rest))
    } else if s == "~" {
        dirs::home_dir()
            .ok_or_else(|| MemsiftError::Config("Cannot determine home directory".to_string()))
    } else {
        Ok(path.to_path_buf())
    }
}
