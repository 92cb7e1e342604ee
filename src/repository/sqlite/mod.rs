// SQLite repository using Turso/libsql.
//
// Reads the glossary database produced by the import tooling. The schema is
// created on `create`; existing files are opened as they are. Databases
// written before `terms.plural_form` existed are read without it.

mod schema;
mod terms;

use async_trait::async_trait;
use libsql::params::IntoParams;
use libsql::{Builder, Connection, Database, Rows};
use std::path::{Path, PathBuf};

use super::{RepositoryError, TermRepository};
use crate::term::Term;

pub use schema::initialize_schema;

/// Repository backed by an embedded SQLite database
pub struct SqliteRepository {
    _database: Database,
    connection: Connection,
    path: PathBuf,
    has_plural_form: bool,
}

impl SqliteRepository {
    /// Open an existing glossary database
    pub async fn open(path: &Path) -> Result<Self, RepositoryError> {
        if !path.exists() {
            return Err(RepositoryError::Connection(format!(
                "Glossary database not found at {}",
                path.display()
            )));
        }
        let mut repository = Self::connect(path).await?;
        repository.has_plural_form = repository.terms_column_exists("plural_form").await?;
        Ok(repository)
    }

    /// Open or create a glossary database and make sure its tables exist
    pub async fn create(path: &Path) -> Result<Self, RepositoryError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| RepositoryError::Io(e.to_string()))?;
        }
        let mut repository = Self::connect(path).await?;
        initialize_schema(&repository).await?;
        repository.has_plural_form = repository.terms_column_exists("plural_form").await?;
        Ok(repository)
    }

    async fn connect(path: &Path) -> Result<Self, RepositoryError> {
        crate::debug!("Opening glossary database at {:?}", path);

        let database = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        let connection = database
            .connect()
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        Ok(Self {
            _database: database,
            connection,
            path: path.to_path_buf(),
            has_plural_form: false,
        })
    }

    /// True when the `terms` table has a column called `name`
    async fn terms_column_exists(&self, name: &str) -> Result<bool, RepositoryError> {
        let mut rows = self.query("PRAGMA table_info(terms)", ()).await?;
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?
        {
            let column: String = row
                .get(1)
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            if column == name {
                return Ok(true);
            }
        }

        crate::info!("Glossary database at {:?} has no {} column", self.path, name);
        Ok(false)
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `terms` stores plural forms
    pub fn has_plural_form(&self) -> bool {
        self.has_plural_form
    }

    /// Execute a statement, returning the number of affected rows
    pub(crate) async fn execute(
        &self,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<u64, RepositoryError> {
        self.connection
            .execute(sql, params)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }

    /// Run a query and return its rows
    pub(crate) async fn query(
        &self,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<Rows, RepositoryError> {
        self.connection
            .query(sql, params)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }
}

#[async_trait]
impl TermRepository for SqliteRepository {
    async fn get_by_name(&self, name: &str) -> Result<Option<Term>, RepositoryError> {
        self.find_term_by_name(name).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Term>, RepositoryError> {
        self.search_terms(query).await
    }

    async fn get_by_tag(&self, tag: &str) -> Result<Vec<Term>, RepositoryError> {
        self.terms_with_tag(tag).await
    }

    async fn list_all(&self) -> Result<Vec<Term>, RepositoryError> {
        self.all_terms().await
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        self.count_terms().await
    }

    async fn languages(&self) -> Result<Vec<String>, RepositoryError> {
        self.language_codes().await
    }
}
