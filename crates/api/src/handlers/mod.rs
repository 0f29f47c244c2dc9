pub mod locations;
pub mod machines;
