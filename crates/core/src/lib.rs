//! Domain logic for the chatbot flow builder.
//!
//! Everything in this crate is pure: no database, no HTTP. The `db` and
//! `api` crates call into it to validate requests before persisting them.

pub mod actions;
pub mod error;
pub mod inputs;
pub mod sequencing;
pub mod types;
pub mod validation;
