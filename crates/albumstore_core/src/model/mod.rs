//! Album domain model.
//!
//! # Responsibility
//! - Define the album read model and identifier rules.
//!
//! # Invariants
//! - An image has no identity outside its owning album's collection.

pub mod album;
