//! Gallery viewer: grid state plus the modal lightbox.
//!
//! The image list is fetched once; a fetch failure or an empty response
//! falls back to the built-in set so the page always has photos. Lightbox
//! navigation wraps at both ends, and the selected image is mirrored into a
//! shareable URL fragment so a link can pre-open the lightbox.

use crate::api::{ApiClient, GalleryEntry};

// ---------------------------------------------------------------------------
// Photos
// ---------------------------------------------------------------------------

/// One photo as the viewer renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryPhoto {
    pub id: String,
    pub src: String,
    pub alt: String,
    pub public_url: Option<String>,
}

impl GalleryPhoto {
    /// The URL to render: the hosted copy when there is one, the bundled
    /// asset otherwise.
    pub fn display_src(&self) -> &str {
        self.public_url.as_deref().unwrap_or(&self.src)
    }
}

impl From<GalleryEntry> for GalleryPhoto {
    fn from(entry: GalleryEntry) -> Self {
        Self {
            id: entry.id,
            src: entry.src,
            alt: entry.alt,
            public_url: entry.public_url,
        }
    }
}

/// Photos bundled with the site, shown whenever the backend has none.
pub fn builtin_photos() -> Vec<GalleryPhoto> {
    let bundled = [
        ("1", "/photos/portrait.jpg", "Portrait"),
        ("2", "/photos/family.jpg", "With family"),
        ("3", "/photos/garden.jpg", "In the garden"),
        ("4", "/photos/graduation.jpg", "Graduation day"),
        ("5", "/photos/memorial.jpg", "Memorial photo"),
    ];

    bundled
        .into_iter()
        .map(|(id, src, alt)| GalleryPhoto {
            id: id.to_string(),
            src: src.to_string(),
            alt: alt.to_string(),
            public_url: None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// Keys the lightbox reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Escape,
}

/// Grid plus lightbox state.
#[derive(Debug)]
pub struct GalleryViewer {
    photos: Vec<GalleryPhoto>,
    fallback: Vec<GalleryPhoto>,
    selected: Option<usize>,
    /// A fragment id seen before the photo list arrived; re-resolved after
    /// loading instead of being dropped.
    pending_fragment: Option<String>,
}

impl GalleryViewer {
    pub fn new() -> Self {
        Self::with_fallback(builtin_photos())
    }

    pub fn with_fallback(fallback: Vec<GalleryPhoto>) -> Self {
        Self {
            photos: Vec::new(),
            fallback,
            selected: None,
            pending_fragment: None,
        }
    }

    /// Fetch the gallery once. Failure and emptiness are both fallback
    /// cases -- the page shows its bundled photos either way.
    pub async fn load(&mut self, client: &ApiClient) {
        let fetched = match client.fetch_gallery().await {
            Ok(images) if !images.is_empty() => {
                images.into_iter().map(GalleryPhoto::from).collect()
            }
            Ok(_) => self.fallback.clone(),
            Err(err) => {
                tracing::warn!(error = %err, "Gallery fetch failed; using built-in photos");
                self.fallback.clone()
            }
        };

        self.set_photos(fetched);
    }

    /// Install a photo list directly (tests, server-rendered pages).
    pub fn set_photos(&mut self, photos: Vec<GalleryPhoto>) {
        // A selection that pointed into the old list is re-resolved by id.
        let selected_id = self.current().map(|p| p.id.clone());
        self.photos = photos;
        if let Some(id) = selected_id {
            self.selected = self.index_of(&id);
        }

        if let Some(fragment) = self.pending_fragment.take() {
            self.open_fragment(&fragment);
        }
    }

    pub fn photos(&self) -> &[GalleryPhoto] {
        &self.photos
    }

    pub fn is_lightbox_open(&self) -> bool {
        self.selected.is_some()
    }

    /// The photo currently shown in the lightbox.
    pub fn current(&self) -> Option<&GalleryPhoto> {
        self.selected.and_then(|i| self.photos.get(i))
    }

    /// `(position, total)` for the "3 / 7" counter.
    pub fn counter(&self) -> Option<(usize, usize)> {
        self.selected.map(|i| (i + 1, self.photos.len()))
    }

    /// The shareable fragment for the current selection (`#<id>` without
    /// the `#`).
    pub fn fragment(&self) -> Option<&str> {
        self.current().map(|p| p.id.as_str())
    }

    /// Open the lightbox on a photo by id.
    pub fn select(&mut self, id: &str) {
        if let Some(index) = self.index_of(id) {
            self.selected = Some(index);
        }
    }

    /// Open the lightbox from a URL fragment, best-effort.
    ///
    /// If the photo list hasn't arrived yet the fragment is remembered and
    /// resolved when it does; an id that never resolves is ignored.
    pub fn open_fragment(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        if self.photos.is_empty() {
            self.pending_fragment = Some(fragment.to_string());
            return;
        }
        self.select(fragment);
    }

    /// Close the lightbox and clear the fragment.
    pub fn close(&mut self) {
        self.selected = None;
    }

    /// Lightbox keyboard handling: arrows wrap around, escape closes.
    /// Ignored while the lightbox is closed.
    pub fn handle_key(&mut self, key: NavKey) {
        let Some(index) = self.selected else {
            return;
        };
        if self.photos.is_empty() {
            return;
        }

        let len = self.photos.len();
        match key {
            NavKey::Right => self.selected = Some((index + 1) % len),
            NavKey::Left => self.selected = Some((index + len - 1) % len),
            NavKey::Escape => self.selected = None,
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.photos.iter().position(|p| p.id == id)
    }
}

impl Default for GalleryViewer {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
