// Term queries and writes using Turso/libsql
//
// Reads assemble a Term from the `terms` row plus its translations,
// alternative words and additional descriptions. Writes are used by the
// import path and tests; concurrent writers are not supported.

use libsql::{params, Row, Value};
use std::collections::BTreeMap;

use super::SqliteRepository;
use crate::repository::RepositoryError;
use crate::term::Term;

const TERM_COLUMNS: &str =
    "id, term, description, case_sensitive, translatable, forbidden, tags, plural_form";
const LEGACY_TERM_COLUMNS: &str =
    "id, term, description, case_sensitive, translatable, forbidden, tags, NULL AS plural_form";

fn load_err(e: libsql::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

fn persist_err(e: RepositoryError) -> RepositoryError {
    match e {
        RepositoryError::Query(msg) => RepositoryError::Persistence(msg),
        other => other,
    }
}

/// Escape LIKE wildcards so user input only matches literally
fn like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len() + 2);
    escaped.push('%');
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Decode a `terms` row; collections are filled in afterwards
fn term_from_row(row: &Row) -> Result<Term, RepositoryError> {
    let id: i64 = row.get(0).map_err(load_err)?;
    let term: String = row.get(1).map_err(load_err)?;
    let description: Option<String> = row.get(2).map_err(load_err)?;
    let case_sensitive: Option<i64> = row.get(3).map_err(load_err)?;
    let translatable: Option<i64> = row.get(4).map_err(load_err)?;
    let forbidden: Option<i64> = row.get(5).map_err(load_err)?;
    let tags: Option<String> = row.get(6).map_err(load_err)?;
    let plural_form: Option<String> = row.get(7).map_err(load_err)?;

    Ok(Term {
        id,
        term,
        description: description.unwrap_or_default(),
        case_sensitive: case_sensitive.unwrap_or(0) != 0,
        translatable: translatable.unwrap_or(1) != 0,
        forbidden: forbidden.unwrap_or(0) != 0,
        tags: tags.filter(|t| !t.trim().is_empty()),
        plural_form,
        translations: BTreeMap::new(),
        alternative_words: Vec::new(),
        additional_descriptions: BTreeMap::new(),
    })
}

impl SqliteRepository {
    /// Column list for `terms` reads, matching the layout of this database
    fn term_columns(&self) -> &'static str {
        if self.has_plural_form() {
            TERM_COLUMNS
        } else {
            LEGACY_TERM_COLUMNS
        }
    }

    /// Run a `terms` query and return fully populated terms in row order
    async fn load_terms(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<Term>, RepositoryError> {
        let mut rows = self.query(sql, params).await?;

        let mut terms = Vec::new();
        while let Some(row) = rows.next().await.map_err(load_err)? {
            terms.push(term_from_row(&row)?);
        }
        drop(rows);

        for term in &mut terms {
            self.populate(term).await?;
        }

        Ok(terms)
    }

    /// Fill translations, alternatives and localized descriptions
    async fn populate(&self, term: &mut Term) -> Result<(), RepositoryError> {
        term.translations = self
            .language_map(
                "SELECT language_code, translation FROM translations WHERE term_id = ?1",
                term.id,
            )
            .await?;
        term.additional_descriptions = self
            .language_map(
                "SELECT language_code, description FROM additional_descriptions \
                 WHERE term_id = ?1",
                term.id,
            )
            .await?;

        let mut rows = self
            .query(
                "SELECT alternative FROM alternative_words WHERE term_id = ?1 ORDER BY id",
                params![term.id],
            )
            .await?;
        while let Some(row) = rows.next().await.map_err(load_err)? {
            term.alternative_words.push(row.get(0).map_err(load_err)?);
        }

        Ok(())
    }

    /// Read `(language_code, text)` pairs, skipping NULL texts
    async fn language_map(
        &self,
        sql: &str,
        term_id: i64,
    ) -> Result<BTreeMap<String, String>, RepositoryError> {
        let mut rows = self.query(sql, params![term_id]).await?;

        let mut map = BTreeMap::new();
        while let Some(row) = rows.next().await.map_err(load_err)? {
            let code: String = row.get(0).map_err(load_err)?;
            let text: Option<String> = row.get(1).map_err(load_err)?;
            if let Some(text) = text {
                map.insert(code, text);
            }
        }
        Ok(map)
    }

    /// Get a term by its exact name
    pub(super) async fn find_term_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Term>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM terms WHERE term = ?1 ORDER BY id DESC LIMIT 1",
            self.term_columns()
        );
        Ok(self.load_terms(&sql, params![name.to_string()]).await?.pop())
    }

    /// Search canonical term and description
    ///
    /// SQLite's LIKE folds ASCII letters only, so non-ASCII case variants
    /// are not matched by this backend.
    pub(super) async fn search_terms(&self, query: &str) -> Result<Vec<Term>, RepositoryError> {
        let sql = format!(
            r#"SELECT {} FROM terms
               WHERE term LIKE ?1 ESCAPE '\' OR description LIKE ?1 ESCAPE '\'
               ORDER BY term, id"#,
            self.term_columns()
        );
        self.load_terms(&sql, params![like_pattern(query)]).await
    }

    /// Terms carrying `tag`. LIKE narrows the candidates, membership decides.
    pub(super) async fn terms_with_tag(&self, tag: &str) -> Result<Vec<Term>, RepositoryError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            r#"SELECT {} FROM terms WHERE tags LIKE ?1 ESCAPE '\' ORDER BY term, id"#,
            self.term_columns()
        );
        let candidates = self.load_terms(&sql, params![like_pattern(tag)]).await?;
        Ok(candidates.into_iter().filter(|t| t.has_tag(tag)).collect())
    }

    /// All terms ordered by name
    pub(super) async fn all_terms(&self) -> Result<Vec<Term>, RepositoryError> {
        let sql = format!("SELECT {} FROM terms ORDER BY term, id", self.term_columns());
        self.load_terms(&sql, ()).await
    }

    /// Number of terms
    pub(super) async fn count_terms(&self) -> Result<usize, RepositoryError> {
        let mut rows = self.query("SELECT COUNT(*) FROM terms", ()).await?;
        match rows.next().await.map_err(load_err)? {
            Some(row) => {
                let count: i64 = row.get(0).map_err(load_err)?;
                Ok(usize::try_from(count).unwrap_or(0))
            }
            None => Ok(0),
        }
    }

    /// Distinct language codes with a translation
    pub(super) async fn language_codes(&self) -> Result<Vec<String>, RepositoryError> {
        let mut rows = self
            .query(
                "SELECT DISTINCT language_code FROM translations \
                 WHERE translation IS NOT NULL ORDER BY language_code",
                (),
            )
            .await?;

        let mut codes = Vec::new();
        while let Some(row) = rows.next().await.map_err(load_err)? {
            codes.push(row.get(0).map_err(load_err)?);
        }
        Ok(codes)
    }

    /// Insert the base row of a term, keeping its id.
    ///
    /// An existing term with the same name or id is removed first, together
    /// with its translations and alternatives, so the last write wins.
    pub async fn insert_term(&self, term: &Term) -> Result<i64, RepositoryError> {
        let mut rows = self
            .query(
                "SELECT id FROM terms WHERE term = ?1 OR id = ?2",
                params![term.term.clone(), term.id],
            )
            .await?;
        let mut replaced = Vec::new();
        while let Some(row) = rows.next().await.map_err(load_err)? {
            replaced.push(row.get::<i64>(0).map_err(load_err)?);
        }
        drop(rows);

        for id in replaced {
            crate::debug!("Replacing existing term row {}", id);
            self.delete_term_rows(id).await?;
        }

        let mut columns =
            "id, term, description, case_sensitive, translatable, forbidden, tags".to_string();
        let mut values: Vec<Value> = vec![
            term.id.into(),
            term.term.clone().into(),
            term.description.clone().into(),
            Value::from(term.case_sensitive as i32),
            Value::from(term.translatable as i32),
            Value::from(term.forbidden as i32),
            term.tags.clone().into(),
        ];
        // Databases without the column keep every other field
        if self.has_plural_form() {
            columns.push_str(", plural_form");
            values.push(term.plural_form.clone().into());
        }

        let placeholders = (1..=values.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        self.execute(
            &format!("INSERT INTO terms ({}) VALUES ({})", columns, placeholders),
            values,
        )
        .await
        .map_err(persist_err)?;

        Ok(term.id)
    }

    /// Insert or replace the translation of a term into one language
    pub async fn insert_translation(
        &self,
        term_id: i64,
        language_code: &str,
        translation: &str,
    ) -> Result<(), RepositoryError> {
        self.execute(
            "INSERT OR REPLACE INTO translations (term_id, language_code, translation) \
             VALUES (?1, ?2, ?3)",
            params![term_id, language_code.to_string(), translation.to_string()],
        )
        .await
        .map_err(persist_err)?;
        Ok(())
    }

    /// Append an alternative spelling to a term
    pub async fn insert_alternative_word(
        &self,
        term_id: i64,
        alternative: &str,
    ) -> Result<(), RepositoryError> {
        self.execute(
            "INSERT INTO alternative_words (term_id, alternative) VALUES (?1, ?2)",
            params![term_id, alternative.to_string()],
        )
        .await
        .map_err(persist_err)?;
        Ok(())
    }

    /// Insert or replace a language-specific description
    pub async fn insert_additional_description(
        &self,
        term_id: i64,
        language_code: &str,
        description: &str,
    ) -> Result<(), RepositoryError> {
        self.execute(
            "INSERT OR REPLACE INTO additional_descriptions (term_id, language_code, description) \
             VALUES (?1, ?2, ?3)",
            params![term_id, language_code.to_string(), description.to_string()],
        )
        .await
        .map_err(persist_err)?;
        Ok(())
    }

    /// Write a complete term: base row and every collection
    pub async fn save_term(&self, term: &Term) -> Result<i64, RepositoryError> {
        let id = self.insert_term(term).await?;

        for (language_code, translation) in &term.translations {
            self.insert_translation(id, language_code, translation).await?;
        }
        for alternative in &term.alternative_words {
            self.insert_alternative_word(id, alternative).await?;
        }
        for (language_code, description) in &term.additional_descriptions {
            self.insert_additional_description(id, language_code, description)
                .await?;
        }

        Ok(id)
    }

    /// Write many terms in one transaction. Returns the number written.
    pub async fn import_terms(&self, terms: &[Term]) -> Result<usize, RepositoryError> {
        self.execute("BEGIN", ()).await.map_err(persist_err)?;

        for term in terms {
            if let Err(e) = self.save_term(term).await {
                if let Err(rollback) = self.execute("ROLLBACK", ()).await {
                    crate::warn!("Failed to roll back import: {}", rollback);
                }
                return Err(e);
            }
        }

        self.execute("COMMIT", ()).await.map_err(persist_err)?;
        crate::info!("Imported {} terms into {:?}", terms.len(), self.path());
        Ok(terms.len())
    }

    /// Remove every term and related row
    pub async fn clear_all_data(&self) -> Result<(), RepositoryError> {
        for table in ["alternative_words", "translations", "additional_descriptions", "terms"] {
            self.execute(&format!("DELETE FROM {}", table), ())
                .await
                .map_err(persist_err)?;
        }
        Ok(())
    }

    async fn delete_term_rows(&self, id: i64) -> Result<(), RepositoryError> {
        for table in ["alternative_words", "translations", "additional_descriptions"] {
            self.execute(
                &format!("DELETE FROM {} WHERE term_id = ?1", table),
                params![id],
            )
            .await
            .map_err(persist_err)?;
        }
        self.execute("DELETE FROM terms WHERE id = ?1", params![id])
            .await
            .map_err(persist_err)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "terms_test.rs"]
mod tests;
