//! Parent-student and faculty-student relationship management.
//!
//! All multi-step invariant maintenance (the primary-contact swap, legacy
//! parent pointer sync, bulk writes) runs inside explicit transactions; the
//! schema's partial unique index backs up the one-primary-per-student rule
//! against concurrent writers.

pub mod model;
pub mod parent_student;
pub mod routes;
pub mod student_faculty;
