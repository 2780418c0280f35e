//! Infrastructure layer.
//!
//! Concrete implementations of the domain contracts:
//!
//! - [`persistence`] - PostgreSQL repositories and the in-memory store
//! - [`source`] - upstream country list fetchers (HTTP, file, static)

pub mod persistence;
pub mod source;
