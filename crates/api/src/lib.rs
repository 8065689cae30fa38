//! HTTP server for the memorial site.
//!
//! Route handlers validate payloads and forward them to the hosted Data
//! Service; nothing is persisted in-process.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;
