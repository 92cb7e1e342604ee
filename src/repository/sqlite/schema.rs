// Database schema definitions
//
// This module defines the SQLite schema for the glossary tables. Tables are
// created when missing; existing databases are never altered.

use super::SqliteRepository;
use crate::repository::RepositoryError;

/// SQL statements to create all tables (each as a separate string)
const CREATE_TABLES: &[&str] = &[
    // Canonical terms
    r#"CREATE TABLE IF NOT EXISTS terms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        term TEXT NOT NULL UNIQUE,
        description TEXT,
        case_sensitive BOOLEAN DEFAULT 0,
        translatable BOOLEAN DEFAULT 1,
        forbidden BOOLEAN DEFAULT 0,
        tags TEXT,
        plural_form TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )"#,
    // One translation per term and language
    r#"CREATE TABLE IF NOT EXISTS translations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        term_id INTEGER NOT NULL,
        language_code TEXT NOT NULL,
        translation TEXT,
        FOREIGN KEY (term_id) REFERENCES terms(id) ON DELETE CASCADE,
        UNIQUE(term_id, language_code)
    )"#,
    // Alternative spellings, kept in insertion order
    r#"CREATE TABLE IF NOT EXISTS alternative_words (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        term_id INTEGER NOT NULL,
        alternative TEXT NOT NULL,
        FOREIGN KEY (term_id) REFERENCES terms(id) ON DELETE CASCADE
    )"#,
    // Language-specific descriptions
    r#"CREATE TABLE IF NOT EXISTS additional_descriptions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        term_id INTEGER NOT NULL,
        language_code TEXT NOT NULL,
        description TEXT,
        FOREIGN KEY (term_id) REFERENCES terms(id) ON DELETE CASCADE,
        UNIQUE(term_id, language_code)
    )"#,
    r#"CREATE INDEX IF NOT EXISTS idx_terms_term ON terms(term)"#,
    r#"CREATE INDEX IF NOT EXISTS idx_translations_language ON translations(language_code)"#,
    r#"CREATE INDEX IF NOT EXISTS idx_terms_tags ON terms(tags)"#,
    r#"CREATE INDEX IF NOT EXISTS idx_alternative_words_term_id ON alternative_words(term_id)"#,
];

/// Initialize the database schema.
///
/// Creates all tables and indexes that don't exist yet.
pub async fn initialize_schema(repository: &SqliteRepository) -> Result<(), RepositoryError> {
    crate::debug!("Ensuring glossary schema exists in {:?}", repository.path());

    for statement in CREATE_TABLES {
        repository.execute(statement, ()).await?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
