//! Optional-authentication extractor.
//!
//! Tribute submission and gallery upload work for signed-in visitors and
//! strangers alike, so this extractor never rejects -- a missing, expired,
//! or malformed token simply yields `None`.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use keepsake_data::models::AuthUser;

use crate::state::AppState;

/// The authenticated user behind a `Bearer` token, if any.
///
/// ```ignore
/// async fn my_handler(OptionalUser(user): OptionalUser) -> AppResult<Json<()>> {
///     let actor = user.map(|u| u.id.to_string());
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        let Some(token) = token else {
            return Ok(OptionalUser(None));
        };

        match state.data.current_user(token).await {
            Ok(user) => Ok(OptionalUser(user)),
            Err(err) => {
                // Auth lookup failures degrade to anonymous rather than
                // blocking the request.
                tracing::debug!(error = %err, "Auth lookup failed; continuing anonymously");
                Ok(OptionalUser(None))
            }
        }
    }
}
