//! Repository modules implementing persistence for EcoInspect entities.
//!
//! Each module adds methods to `EcoService` via `impl EcoService` blocks.

pub mod establishment;
pub mod inspection;
pub mod question;
pub mod report;
pub mod result;
