//! Student lookup service.

use std::sync::Arc;

use crate::students::mapper::StudentMapper;
use crate::students::model::Student;

/// Resolves students through a mapper and returns domain models.
#[derive(Clone)]
pub struct StudentService {
    mapper: Arc<dyn StudentMapper>,
}

impl StudentService {
    pub fn new(mapper: Arc<dyn StudentMapper>) -> Self {
        Self { mapper }
    }

    pub fn get_student(&self, id: i64) -> Option<Student> {
        let student = self.mapper.get_by_id(id).map(Student::from);
        tracing::debug!(id, found = student.is_some(), "Student lookup");
        student
    }
}
