//! Core components of the `cse-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`CseClient`] and its builder.
//! - The primary [`CseError`] type.
//! - The single request path ([`net::call`]) and response shape resolution ([`Payload`]).
//! - Serde helpers for the exchange's loosely typed numbers.

/// The main client (`CseClient`), builder, and defaults.
pub mod client;
pub(crate) mod de;
/// The primary error type (`CseError`) for the crate.
pub mod error;
/// The request path shared by every endpoint.
pub mod net;
/// Nested-key vs bare response shapes.
pub mod payload;

// convenient re-exports so most code can just `use crate::core::CseClient`
pub use client::{CseClient, CseClientBuilder};
pub use error::CseError;
pub use net::{ApiResponse, call};
pub use payload::Payload;
