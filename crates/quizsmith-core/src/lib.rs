//! quizsmith-core — Quiz generation pipeline, scoring engine, and attempt lifecycle.
//!
//! This crate defines the fundamental data model, the generation engine with
//! its quality gate, and the deterministic assessment logic that the entire
//! quizsmith system builds on.

pub mod attempt;
pub mod error;
pub mod generation;
pub mod model;
pub mod scoring;
pub mod store;
pub mod topics;
pub mod traits;
pub mod validate;
