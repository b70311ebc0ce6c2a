// All repository functions are generic over `E: Executor<'e, Database = Postgres>`
// so they accept both a `&PgPool` (direct query) and a `&mut Transaction` (atomic operations).

pub mod faculty;
pub mod fee;
pub mod parent;
pub mod parent_student;
pub mod performance;
pub mod student;
pub mod student_faculty;
pub mod user;
