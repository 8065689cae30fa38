//! Client for the hosted Data Service.
//!
//! The memorial site delegates authentication, relational storage, and
//! object storage to an external hosted provider. This crate wraps that
//! provider's HTTP surface behind the [`DataService`] trait so the rest of
//! the workspace never constructs a request itself -- handlers talk to the
//! trait, tests inject an in-memory fake.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use client::HostedDataService;
pub use config::DataServiceConfig;
pub use error::DataError;
pub use service::DataService;
