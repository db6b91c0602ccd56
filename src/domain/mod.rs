//! # Domain Layer
//!
//! Chat request/response models and the client-facing error taxonomy.
//! This layer is independent of transport and presentation concerns.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
