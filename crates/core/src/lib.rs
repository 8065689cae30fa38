//! Domain rules for the memorial site.
//!
//! Pure logic only: validation, name resolution, storage-key generation,
//! and pagination math. Everything that talks to the network lives in the
//! `keepsake-data` and `keepsake-api` crates.

pub mod error;
pub mod gallery;
pub mod pagination;
pub mod tribute;
pub mod types;
