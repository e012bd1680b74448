//! Core use-case services.
//!
//! # Responsibility
//! - Validate identifiers and orchestrate album/image store calls.
//! - Keep boundary layers decoupled from storage details.

pub mod album_service;
