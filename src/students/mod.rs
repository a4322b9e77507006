//! Student lookup subsystem.
//!
//! # Data Flow
//! ```text
//! GET /student/{id}
//!     → service.rs (StudentService::get_student)
//!     → mapper.rs (StudentMapper::get_by_id → StudentRecord)
//!     → model.rs (StudentRecord → Student → StudentView)
//! ```

pub mod mapper;
pub mod model;
pub mod service;

pub use mapper::{MapperError, MemoryStudentMapper, StudentMapper};
pub use model::{Student, StudentRecord, StudentView, PASSING_SCORE};
pub use service::StudentService;
