//! Docstack Server - HTTP front for the docstack storage layers.
//!
//! Error translation and routing live in `docstack-http`; this crate adds
//! configuration and process setup.

pub mod config;

pub use docstack_http::{jsonapi, router};
