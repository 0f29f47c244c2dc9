//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod location_repo;
pub mod machine_repo;

pub use location_repo::LocationRepo;
pub use machine_repo::MachineRepo;
