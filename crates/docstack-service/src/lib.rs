//! Docstack Service — transport-agnostic error sources.
//!
//! This crate models the failure surface of the two storage layers the
//! HTTP transport has to report on:
//! - [`couchdb`]: structured errors returned by the CouchDB document store
//! - [`vfs`]: sentinel errors of the virtual filesystem, plus the generic
//!   existence predicates over arbitrary error chains
//!
//! **Zero transport dependencies** — mapping to HTTP lives in `docstack-http`.

pub mod couchdb;
pub mod vfs;

pub use couchdb::CouchError;
pub use vfs::VfsError;
