//! External system integrations for fieldservice.
//!
//! - [`api`] - the field-service REST API: HTTP client, session and one
//!   service per resource
//! - [`artifact`] - persisting downloaded archives (download directory or
//!   cache plus share handler)
//!
//! # Design Pattern
//!
//! The export flow depends on two traits, [`api::ZipJobApi`] and
//! [`artifact::ArtifactSaver`], so it can be driven by fakes in tests.

pub mod api;
pub mod artifact;
