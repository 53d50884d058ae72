//! `catalogx-core`: shared building blocks for the catalog crates.
//!
//! This crate contains **pure** primitives (no IO, no async, no HTTP).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::{Entity, ensure_unique_ids};
pub use error::DomainError;
pub use id::{ProductId, UserId};
pub use value_object::ValueObject;
