//! Command-line front end for the glossary.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

use crate::config::{GlossaryConfig, SourceKind};
use crate::glossary::{Glossary, GlossaryError};
use crate::markdown::render_markdown;
use crate::repository::{BundledRepository, SqliteRepository};
use crate::{debug, info};

#[derive(Debug, Parser)]
#[command(
    name = "glossary",
    version,
    about = "Query a terminology glossary and normalize text against it"
)]
pub struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Backend to read terms from (sqlite, remote, bundled)
    #[arg(long, global = true)]
    pub source: Option<SourceKind>,
    /// SQLite database file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
    /// JSON bundle file
    #[arg(long, global = true)]
    pub bundle: Option<PathBuf>,
    /// Glossary endpoint URL
    #[arg(long, global = true)]
    pub url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Query(QueryCommand),
    /// Load a JSON bundle into the SQLite database
    Import { bundle: PathBuf },
}

/// Commands answered by a glossary repository
#[derive(Debug, Subcommand)]
pub enum QueryCommand {
    /// Look up a term by its exact name
    Get { name: String },
    /// Find terms whose name or description contains QUERY
    Search { query: String },
    /// List terms carrying TAG
    Tag { tag: String },
    /// List every term
    List,
    /// Print the number of terms
    Count,
    /// List language codes that have translations
    Languages,
    /// Print the translation of NAME into LANGUAGE
    Translate { name: String, language: String },
    /// Rewrite alternative spellings to canonical terms; reads stdin without TEXT
    Normalize { text: Option<String> },
    /// Render the glossary as markdown
    ExportMarkdown {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Settings from the config file and environment, with flags applied last
    pub fn resolve_config(&self) -> Result<GlossaryConfig, GlossaryError> {
        let mut config = GlossaryConfig::load_or_default(self.config.as_deref())?;
        if let Some(source) = self.source {
            config.source = source;
        }
        if let Some(db) = &self.db {
            config.db_path = Some(db.clone());
        }
        if let Some(bundle) = &self.bundle {
            config.bundle_path = Some(bundle.clone());
        }
        if let Some(url) = &self.url {
            config.api_url = url.clone();
        }
        Ok(config)
    }
}

/// Run one command and return what should be printed
pub async fn run(cli: Cli) -> Result<String, GlossaryError> {
    let config = cli.resolve_config()?;
    debug!("Resolved config: {:?}", config);

    match cli.command {
        Command::Import { bundle } => import_bundle(&bundle, &config).await,
        Command::Query(command) => {
            let glossary = Glossary::from_config(&config).await?;
            execute(&glossary, command).await
        }
    }
}

/// Run a query command against an existing glossary
pub async fn execute(
    glossary: &Glossary,
    command: QueryCommand,
) -> Result<String, GlossaryError> {
    match command {
        QueryCommand::Get { name } => to_json(&glossary.get_term(&name).await?),
        QueryCommand::Search { query } => to_json(&glossary.search(&query).await?),
        QueryCommand::Tag { tag } => to_json(&glossary.get_by_tag(&tag).await?),
        QueryCommand::List => to_json(&glossary.get_all().await?),
        QueryCommand::Count => Ok(glossary.count().await?.to_string()),
        QueryCommand::Languages => to_json(&glossary.languages().await?),
        QueryCommand::Translate { name, language } => Ok(glossary
            .translate(&name, &language)
            .await?
            .unwrap_or_default()),
        QueryCommand::Normalize { text } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin().await?,
            };
            glossary.normalize_text(&text).await
        }
        QueryCommand::ExportMarkdown { output } => {
            let terms = glossary.get_all().await?;
            let document = render_markdown(&terms);
            match output {
                Some(path) => {
                    write_file(&path, &document).await?;
                    info!("Wrote {} terms to {}", terms.len(), path.display());
                    Ok(format!("Wrote {} terms to {}", terms.len(), path.display()))
                }
                None => Ok(document),
            }
        }
    }
}

async fn import_bundle(bundle: &Path, config: &GlossaryConfig) -> Result<String, GlossaryError> {
    let source = BundledRepository::from_path(bundle)?;
    let db_path = config.resolved_db_path()?;
    let repository = SqliteRepository::create(&db_path).await?;

    let imported = repository.import_terms(source.snapshot().terms()).await?;
    Ok(format!("Imported {} terms into {}", imported, db_path.display()))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, GlossaryError> {
    serde_json::to_string_pretty(value).map_err(|e| GlossaryError::Io(e.to_string()))
}

async fn read_stdin() -> Result<String, GlossaryError> {
    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .map_err(|e| GlossaryError::Io(format!("Failed to read stdin: {}", e)))?;
    Ok(strip_line_ending(input))
}

/// Drop the single newline a shell pipe appends
fn strip_line_ending(mut input: String) -> String {
    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
    input
}

async fn write_file(path: &Path, content: &str) -> Result<(), GlossaryError> {
    tokio::fs::write(path, content)
        .await
        .map_err(|e| GlossaryError::Io(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
