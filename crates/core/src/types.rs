/// All database primary keys are SQLite INTEGER rowids.
pub type DbId = i64;

/// Wall-clock time as whole seconds since the Unix epoch.
pub type UnixSeconds = i64;

/// Stored machine status override (see [`crate::session`]).
pub type MachineStatusId = i64;
