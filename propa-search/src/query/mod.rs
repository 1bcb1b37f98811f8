//! Query engine: provider selection, fallback, predicates, ordering.

pub mod engine;
pub mod predicates;

pub use engine::QueryEngine;
