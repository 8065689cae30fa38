//! Handlers for the tribute (guestbook) endpoints.
//!
//! Submission is open to everyone: signed-in visitors get their profile
//! name and photo prefilled server-side, strangers supply a name unless
//! they publish anonymously.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use keepsake_core::pagination::{PageParams, Pagination};
use keepsake_core::tribute;
use keepsake_data::models::{NewTribute, Tribute};

use crate::error::{AppError, AppResult};
use crate::extract::OptionalUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /api/tributes
// ---------------------------------------------------------------------------

/// Request body for tribute submission.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTributeRequest {
    pub message: String,
    #[serde(default)]
    pub is_anonymous: bool,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub tribute_photo_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitTributeResponse {
    pub success: bool,
    pub message: String,
    pub tribute: Tribute,
}

/// Submit a new tribute. It goes live immediately -- there is no moderation
/// queue and no update or delete path afterwards.
pub async fn submit_tribute(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Json(input): Json<SubmitTributeRequest>,
) -> AppResult<impl IntoResponse> {
    tribute::validate_submission(&input.message, input.is_anonymous, input.name.as_deref())?;

    let message = tribute::normalize_message(&input.message);

    let (user_id, email, metadata) = match &user {
        Some(u) => (Some(u.id), u.email.clone(), Some(&u.user_metadata)),
        None => (None, None, None),
    };

    let name = tribute::resolve_display_name(
        input.is_anonymous,
        input.name.as_deref(),
        metadata.and_then(|m| m.full_name.as_deref()),
        metadata.and_then(|m| m.name.as_deref()),
        email.as_deref(),
    );

    // Profile photos only apply to signed-in submitters.
    let photo_url = match metadata {
        Some(m) => tribute::resolve_photo_url(
            input.photo_url.as_deref(),
            m.avatar_url.as_deref(),
            m.picture.as_deref(),
        ),
        None => None,
    };

    let new = NewTribute {
        user_id,
        name,
        email,
        message,
        photo_url,
        tribute_photo_url: input.tribute_photo_url.clone(),
        is_anonymous: input.is_anonymous,
    };

    let saved = state
        .data
        .insert_tribute(&new)
        .await
        .map_err(|e| AppError::persistence("Failed to submit tribute", e))?;

    tracing::info!(
        tribute_id = %saved.id,
        anonymous = saved.is_anonymous,
        authenticated = user.is_some(),
        "Tribute submitted",
    );

    Ok(Json(SubmitTributeResponse {
        success: true,
        message: "Tribute submitted successfully and is now live.".to_string(),
        tribute: saved,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/tributes
// ---------------------------------------------------------------------------

/// Raw pagination query values. Kept as strings so junk input falls back to
/// defaults instead of turning into a nonsense range at the Data Service.
#[derive(Debug, Deserialize)]
pub struct ListTributesQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListTributesResponse {
    pub tributes: Vec<Tribute>,
    pub pagination: Pagination,
}

/// List tributes, newest first.
pub async fn list_tributes(
    State(state): State<AppState>,
    Query(query): Query<ListTributesQuery>,
) -> AppResult<impl IntoResponse> {
    let params = PageParams::from_raw(query.page.as_deref(), query.limit.as_deref());

    let (tributes, total) = state
        .data
        .list_tributes(u64::from(params.limit), params.offset())
        .await
        .map_err(|e| AppError::persistence("Failed to fetch tributes", e))?;

    Ok(Json(ListTributesResponse {
        tributes,
        pagination: Pagination::new(params, total),
    }))
}
