//! Tribute (guestbook entry) validation and author-name resolution.
//!
//! Used by the submission endpoint and by the visitor-side form so both
//! layers reject the same inputs.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum stored message length, in characters. Longer messages are
/// truncated, not rejected.
pub const MESSAGE_MAX_CHARS: usize = 5000;

/// Display name used for anonymous tributes, regardless of any stored name.
pub const ANONYMOUS_NAME: &str = "Anonymous";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a tribute submission.
///
/// - The message must be non-empty after trimming.
/// - A name is required unless the tribute is anonymous.
pub fn validate_submission(
    message: &str,
    is_anonymous: bool,
    name: Option<&str>,
) -> Result<(), CoreError> {
    if message.trim().is_empty() {
        return Err(CoreError::Validation("Message is required".to_string()));
    }

    if !is_anonymous && name.map_or(true, |n| n.trim().is_empty()) {
        return Err(CoreError::Validation(
            "Name is required unless publishing anonymously".to_string(),
        ));
    }

    Ok(())
}

/// Trim a message and truncate it to [`MESSAGE_MAX_CHARS`] characters.
///
/// Truncation counts characters, not bytes, so multi-byte input is never
/// split mid-codepoint.
pub fn normalize_message(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.chars().count() <= MESSAGE_MAX_CHARS {
        trimmed.to_string()
    } else {
        trimmed.chars().take(MESSAGE_MAX_CHARS).collect()
    }
}

// ---------------------------------------------------------------------------
// Author resolution
// ---------------------------------------------------------------------------

/// Resolve the display name stored on a tribute.
///
/// Anonymous tributes always resolve to [`ANONYMOUS_NAME`]. Otherwise the
/// priority order is: explicit name from the form, the authenticated
/// profile's full name, its short name, the email local-part, and finally
/// [`ANONYMOUS_NAME`] when nothing usable remains.
pub fn resolve_display_name(
    is_anonymous: bool,
    explicit_name: Option<&str>,
    profile_full_name: Option<&str>,
    profile_name: Option<&str>,
    email: Option<&str>,
) -> String {
    if is_anonymous {
        return ANONYMOUS_NAME.to_string();
    }

    non_blank(explicit_name)
        .or_else(|| non_blank(profile_full_name))
        .or_else(|| non_blank(profile_name))
        .or_else(|| email.and_then(email_local_part))
        .unwrap_or_else(|| ANONYMOUS_NAME.to_string())
}

/// Resolve the author photo URL: explicit form value first, then the
/// profile's `avatar_url`, then its `picture`.
pub fn resolve_photo_url(
    explicit_url: Option<&str>,
    avatar_url: Option<&str>,
    picture: Option<&str>,
) -> Option<String> {
    non_blank(explicit_url)
        .or_else(|| non_blank(avatar_url))
        .or_else(|| non_blank(picture))
}

/// The part of an email address before the `@`, if the address has one.
pub fn email_local_part(email: &str) -> Option<String> {
    let local = email.split('@').next().unwrap_or("");
    non_blank(Some(local))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
