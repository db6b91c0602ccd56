//! # Connector Layer
//!
//! External integrations implementing domain-facing interfaces:
//! - HTTP transport for the Rahalah chat backend (reqwest)

pub mod adapter;

pub use adapter::*;
