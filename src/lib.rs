// Enable coverage attribute on nightly for explicit exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod cli;
pub mod config;
pub mod glossary;
pub mod markdown;
pub mod normalizer;
pub mod repository;
pub mod term;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

pub use config::{ConfigError, GlossaryConfig, SourceKind};
pub use glossary::{Glossary, GlossaryError};
pub use markdown::render_markdown;
pub use normalizer::{normalize, InvalidTermError, Normalizer};
pub use repository::{
    BundledRepository, RemoteRepository, RepositoryError, SqliteRepository, TermRepository,
    TermSnapshot,
};
pub use term::Term;
