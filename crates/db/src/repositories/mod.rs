//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod action_repo;
pub mod button_repo;
pub mod group_repo;
pub mod input_repo;
pub mod project_repo;
pub mod sequence_repo;

pub use action_repo::ActionRepo;
pub use button_repo::ButtonRepo;
pub use group_repo::GroupRepo;
pub use input_repo::InputRepo;
pub use project_repo::ProjectRepo;
pub use sequence_repo::{SequenceRepo, SequencedTable};
