//! Student storage access.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

use crate::students::model::StudentRecord;

/// Errors raised while loading student records.
#[derive(Debug, Error)]
pub enum MapperError {
    #[error("failed to read student file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse student file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate student id {0}")]
    DuplicateId(i64),
}

/// Lookup of student rows by primary key.
pub trait StudentMapper: Send + Sync {
    fn get_by_id(&self, id: i64) -> Option<StudentRecord>;
}

/// Concurrent in-memory student table.
#[derive(Debug, Clone, Default)]
pub struct MemoryStudentMapper {
    rows: Arc<DashMap<i64, StudentRecord>>,
}

impl MemoryStudentMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from records, rejecting repeated ids.
    pub fn from_records(records: Vec<StudentRecord>) -> Result<Self, MapperError> {
        let mapper = Self::new();
        for record in records {
            let id = record.id;
            if mapper.insert(record).is_some() {
                return Err(MapperError::DuplicateId(id));
            }
        }
        Ok(mapper)
    }

    /// Load a JSON array of records from disk.
    pub fn load_json(path: &Path) -> Result<Self, MapperError> {
        let shown = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| MapperError::Io {
            path: shown.clone(),
            source,
        })?;
        let records: Vec<StudentRecord> =
            serde_json::from_str(&content).map_err(|source| MapperError::Parse {
                path: shown.clone(),
                source,
            })?;

        let mapper = Self::from_records(records)?;
        tracing::info!(path = %shown, count = mapper.len(), "Student records loaded");
        Ok(mapper)
    }

    /// Insert or replace a row, returning the previous one.
    pub fn insert(&self, record: StudentRecord) -> Option<StudentRecord> {
        self.rows.insert(record.id, record)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl StudentMapper for MemoryStudentMapper {
    fn get_by_id(&self, id: i64) -> Option<StudentRecord> {
        self.rows.get(&id).map(|row| row.value().clone())
    }
}
