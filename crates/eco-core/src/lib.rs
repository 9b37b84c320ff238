//! # eco-core
//!
//! Core types and ID prefixes for EcoInspect.
//!
//! This crate provides the foundational types shared across all EcoInspect crates:
//! - Entity structs for the inspection domain (establishments, inspections,
//!   checklist questions, results, responses, conditional fields, utilities)
//! - Polarity, classification, verdict and lifecycle enums
//! - Submission input shapes consumed by validation, evaluation and storage
//! - ID prefix constants
//! - CLI response types

pub mod entities;
pub mod enums;
pub mod ids;
pub mod responses;
pub mod submission;
