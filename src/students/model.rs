//! Student representations at each layer.
//!
//! Records come from storage, `Student` is the domain model, and
//! `StudentView` is what the HTTP API returns.

use serde::{Deserialize, Serialize};

/// Minimum score that counts as a pass.
pub const PASSING_SCORE: i32 = 60;

/// A student row as held by the mapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub score: i32,
}

/// Domain model of a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub score: i32,
}

impl Student {
    pub fn has_passed(&self) -> bool {
        self.score >= PASSING_SCORE
    }
}

impl From<StudentRecord> for Student {
    fn from(record: StudentRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            age: record.age,
            score: record.score,
        }
    }
}

/// JSON body returned by `GET /student/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentView {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub score: i32,
    pub passed: bool,
}

impl From<Student> for StudentView {
    fn from(student: Student) -> Self {
        let passed = student.has_passed();
        Self {
            id: student.id,
            name: student.name,
            age: student.age,
            score: student.score,
            passed,
        }
    }
}
