//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for in-place changes

pub mod action;
pub mod button;
pub mod group;
pub mod input;
pub mod project;
