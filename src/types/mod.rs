// Tizim Scan shared type definitions
// Each submodule defines types used across the crate.

pub mod errors;
pub mod history;
pub mod scan;
pub mod transaction;
