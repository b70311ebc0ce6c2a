//! Core domain rules for the school management system.
//!
//! This crate provides the pure calculations behind fee/payment status
//! derivation and exam grading, kept free of database and HTTP concerns so
//! they can be tested exhaustively in isolation.

pub mod fees;
pub mod grading;

pub use fees::PaymentStatus;
pub use grading::Grade;
