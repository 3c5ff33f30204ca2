//! Note Manager for StudyFlow.

use chrono::Utc;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::types::errors::NoteError;
use crate::types::note::Note;

pub trait NoteManagerTrait {
    fn add_note(&mut self, content: &str) -> Result<Note, NoteError>;
    fn list_notes(&self) -> Result<Vec<Note>, NoteError>;
    fn delete_note(&mut self, id: &str) -> Result<(), NoteError>;
}

pub struct NoteManager<'a> {
    conn: &'a Connection,
}

impl<'a> NoteManager<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl<'a> NoteManagerTrait for NoteManager<'a> {
    fn add_note(&mut self, content: &str) -> Result<Note, NoteError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(NoteError::InvalidInput("note content is empty".to_string()));
        }

        let note = Note {
            id: Uuid::new_v4().to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.conn
            .execute(
                "INSERT INTO notes (id, content, created_at) VALUES (?1, ?2, ?3)",
                params![note.id, note.content, note.created_at],
            )
            .map_err(|e| NoteError::DatabaseError(e.to_string()))?;
        Ok(note)
    }

    /// Newest first.
    fn list_notes(&self) -> Result<Vec<Note>, NoteError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, content, created_at FROM notes ORDER BY created_at DESC, rowid DESC")
            .map_err(|e| NoteError::DatabaseError(e.to_string()))?;
        let notes = stmt
            .query_map([], |row| {
                Ok(Note {
                    id: row.get(0)?,
                    content: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })
            .map_err(|e| NoteError::DatabaseError(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| NoteError::DatabaseError(e.to_string()))?;
        Ok(notes)
    }

    fn delete_note(&mut self, id: &str) -> Result<(), NoteError> {
        let affected = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id])
            .map_err(|e| NoteError::DatabaseError(e.to_string()))?;
        if affected == 0 {
            return Err(NoteError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
