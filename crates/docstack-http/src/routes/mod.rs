//! HTTP API route handlers.

pub mod system;
