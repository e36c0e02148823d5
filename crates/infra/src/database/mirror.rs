//! Local SQLite mirror of account state
//!
//! Keeps a copy of the account's corpora and a tagged list of test
//! questions. Tags are stored delimited as `|a|b|` so a single tag can be
//! matched with a substring search on `|tag|`.

use std::path::Path;
use std::sync::Arc;

use rusqlite::{params, Row};
use tracing::{info, instrument};
use vectara_core::CorpusAdmin;
use vectara_domain::{Corpus, Result, VectaraError};

use super::manager::DbManager;
use crate::errors::InfraError;

const TAG_DELIMITER: char = '|';

/// A question stored in the mirror
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredQuestion {
    pub id: i64,
    pub text: String,
    pub tags: Vec<String>,
}

pub struct MirrorStore {
    db: Arc<DbManager>,
}

impl MirrorStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Open a single-connection mirror at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(Arc::new(DbManager::new(path, 1)?)))
    }

    pub fn setup(&self) -> Result<()> {
        self.db.run_migrations()
    }

    pub fn drop_all(&self) -> Result<()> {
        self.db.drop_schema()
    }

    /// Insert or replace the local record of `corpus`.
    ///
    /// # Errors
    ///
    /// [`VectaraError::InvalidArgument`] when the corpus has no id.
    pub fn register_corpus(&self, corpus: &Corpus) -> Result<()> {
        let id = corpus_row_id(corpus)?;
        let conn = self.db.get_connection()?;
        conn.execute(
            "INSERT OR REPLACE INTO corpus (id, name, description) VALUES (?1, ?2, ?3)",
            params![id, corpus.name, corpus.description],
        )
        .map_err(InfraError::from)?;
        Ok(())
    }

    /// Mirrored corpora, sorted by name
    pub fn list_corpora(&self) -> Result<Vec<Corpus>> {
        let conn = self.db.get_connection()?;
        let mut stmt = conn
            .prepare("SELECT id, name, description FROM corpus ORDER BY name, id")
            .map_err(InfraError::from)?;
        let rows = stmt.query_map([], map_corpus_row).map_err(InfraError::from)?;

        let mut corpora = Vec::new();
        for row in rows {
            corpora.push(row.map_err(InfraError::from)?);
        }
        Ok(corpora)
    }

    /// Store a question and return its row id.
    pub fn add_question(&self, text: &str, tags: &[&str]) -> Result<i64> {
        let conn = self.db.get_connection()?;
        conn.execute(
            "INSERT INTO questions (question_text, tags) VALUES (?1, ?2)",
            params![text, encode_tags(tags)],
        )
        .map_err(InfraError::from)?;
        Ok(conn.last_insert_rowid())
    }

    /// Questions carrying exactly `tag`, oldest first
    pub fn questions_tagged(&self, tag: &str) -> Result<Vec<StoredQuestion>> {
        let needle = format!("{TAG_DELIMITER}{tag}{TAG_DELIMITER}");
        let conn = self.db.get_connection()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, question_text, tags FROM questions WHERE instr(tags, ?1) > 0 ORDER BY id",
            )
            .map_err(InfraError::from)?;
        let rows = stmt.query_map(params![needle], map_question_row).map_err(InfraError::from)?;

        let mut questions = Vec::new();
        for row in rows {
            questions.push(row.map_err(InfraError::from)?);
        }
        Ok(questions)
    }

    /// Replace the mirrored corpora with the account's current list.
    ///
    /// Runs in one transaction: a failed write leaves the previous mirror.
    #[instrument(skip(self, admin))]
    pub fn sync_corpora(&self, admin: &dyn CorpusAdmin) -> Result<usize> {
        let corpora = admin.list_corpora(None)?;

        let mut conn = self.db.get_connection()?;
        let tx = conn.transaction().map_err(InfraError::from)?;
        tx.execute("DELETE FROM corpus", []).map_err(InfraError::from)?;
        {
            let mut insert = tx
                .prepare("INSERT OR REPLACE INTO corpus (id, name, description) VALUES (?1, ?2, ?3)")
                .map_err(InfraError::from)?;
            for corpus in &corpora {
                insert
                    .execute(params![corpus_row_id(corpus)?, corpus.name, corpus.description])
                    .map_err(InfraError::from)?;
            }
        }
        tx.commit().map_err(InfraError::from)?;

        info!(count = corpora.len(), "Mirrored corpora");
        Ok(corpora.len())
    }
}

fn corpus_row_id(corpus: &Corpus) -> Result<i64> {
    let id = corpus.id.ok_or_else(|| {
        VectaraError::InvalidArgument(format!("corpus [{}] has no id to mirror", corpus.name))
    })?;
    i64::try_from(id)
        .map_err(|_| VectaraError::InvalidArgument(format!("corpus id {id} does not fit in SQLite")))
}

fn map_corpus_row(row: &Row<'_>) -> rusqlite::Result<Corpus> {
    let id: i64 = row.get(0)?;
    Ok(Corpus {
        id: u64::try_from(id).ok(),
        name: row.get(1)?,
        description: row.get(2)?,
        ..Corpus::default()
    })
}

fn map_question_row(row: &Row<'_>) -> rusqlite::Result<StoredQuestion> {
    let tags: String = row.get(2)?;
    Ok(StoredQuestion { id: row.get(0)?, text: row.get(1)?, tags: decode_tags(&tags) })
}

fn encode_tags(tags: &[&str]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    format!("{TAG_DELIMITER}{}{TAG_DELIMITER}", tags.join("|"))
}

fn decode_tags(stored: &str) -> Vec<String> {
    stored.split(TAG_DELIMITER).filter(|tag| !tag.is_empty()).map(str::to_string).collect()
}
