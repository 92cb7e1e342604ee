//! Term repositories.
//!
//! Every backend implements the same read contract, [`TermRepository`], and is
//! chosen when the glossary is constructed:
//!
//! ```text
//! SqliteRepository   embedded database file (libsql)
//! RemoteRepository   glossary HTTP endpoint + in-memory cache
//! BundledRepository  static JSON file shipped with the application
//! ```

mod api;
mod bundled;
mod remote;
mod snapshot;
pub mod sqlite;
mod traits;

pub use api::{ApiAlternative, ApiResponse, ApiTerm, ApiTranslation};
pub use bundled::BundledRepository;
pub use remote::{RemoteRepository, DEFAULT_API_URL};
pub use snapshot::TermSnapshot;
pub use sqlite::SqliteRepository;
pub use traits::TermRepository;

/// Error types for repository operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// Could not open or reach the backing store
    #[error("Failed to connect to glossary store: {0}")]
    Connection(String),
    /// A database query failed
    #[error("Glossary query failed: {0}")]
    Query(String),
    /// Fetching the remote glossary failed
    #[error("Failed to fetch glossary: {0}")]
    Fetch(String),
    /// The payload could not be decoded into terms
    #[error("Failed to decode glossary data: {0}")]
    Decode(String),
    /// Reading a local file failed
    #[error("Failed to read glossary file: {0}")]
    Io(String),
    /// Writing terms failed
    #[error("Failed to persist terms: {0}")]
    Persistence(String),
}
