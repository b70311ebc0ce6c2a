//! Single integration test binary; each area lives in its own module.
//!
//! The database-backed tests are `#[ignore]`d by default and need a running
//! PostgreSQL (see `TEST_DATABASE_URL` in `common`):
//!
//! ```sh
//! cargo test --test integration -- --ignored
//! ```

mod common;

mod auth_tests;
mod fee_tests;
mod performance_tests;
