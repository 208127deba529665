//! # Scribe Core
//!
//! The domain layer of the Scribe blog backend.
//! This crate contains the blog and user entities, the storage ports and the
//! blog service with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::BlogService;
