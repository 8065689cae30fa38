pub mod auth;
pub mod eulogy;
pub mod gallery;
pub mod health;
pub mod tributes;
