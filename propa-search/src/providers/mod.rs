//! Provider implementations.
//!
//! Each module provides a struct implementing [`crate::provider::DataProvider`].

pub mod datigov;
pub mod fixture;

pub use datigov::DatiGovProvider;
pub use fixture::StaticProvider;
