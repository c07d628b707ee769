//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and executes the operation against the database.

pub mod find;
pub mod new;
pub mod tags;

// Re-export execute functions for convenience
pub use find::execute as find;
pub use new::execute as new;
pub use tags::execute as tags;
