//! Core types and trait definitions for the Caixa sales and expense ledger.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store, API and client crates depend on it; reporting lives here as
//! pure functions over ledger records.

pub mod calendar;
pub mod catalog;
pub mod error;
pub mod expense;
pub mod money;
pub mod report;
pub mod sale;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
pub use money::Money;
