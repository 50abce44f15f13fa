//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors and their [`error::ErrorKind`]
//! - [`clock::Clock`]: source of "today" for date-derived attributes

pub mod clock;
pub mod error;
pub mod string;
