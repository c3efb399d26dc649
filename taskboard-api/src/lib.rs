//! # Taskboard API Server Library
//!
//! HTTP transport for taskboard. Handlers decode requests, call the
//! resource layer in `taskboard-shared`, and encode the results; the cache
//! and ownership rules all live below this crate.
//!
//! ## Modules
//!
//! - `app`: application state and router builder
//! - `config`: configuration management
//! - `error`: error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
