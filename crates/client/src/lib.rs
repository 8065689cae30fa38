//! Visitor-side state machinery for the memorial site.
//!
//! Everything a page needs behind its widgets, kept free of any particular
//! UI toolkit: the HTTP client for the site's own endpoints, the multi-file
//! upload coordinator, the gallery viewer with its lightbox, and the
//! tribute form model.

pub mod api;
pub mod embeds;
pub mod form;
pub mod upload;
pub mod viewer;

pub use api::{ApiClient, ClientError};
pub use upload::UploadCoordinator;
pub use viewer::GalleryViewer;
