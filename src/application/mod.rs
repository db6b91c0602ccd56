//! # Application Layer
//!
//! Use cases coordinating the domain and connector layers.

pub mod use_cases;

pub use use_cases::*;
