//! Domain logic shared by the store and the HTTP layer.
//!
//! This crate has no internal dependencies: it holds the id/time aliases,
//! the domain error type, the machine status derivation and the clock
//! abstraction that status derivation reads from.

pub mod clock;
pub mod error;
pub mod session;
pub mod types;
