//! HTTP Basic authentication extractor.
//!
//! Every protected handler takes [`RequireAuth`] as its first argument, so the
//! credentials are checked before the body is read or any registry runs.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{AUTHORIZATION, WWW_AUTHENTICATE},
        request::Parts,
    },
    response::{IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::json;
use tracing::Span;

use crate::error::{AppError, set_sentry_user};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::state::AppState;

/// Extractor that requires valid Basic credentials.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when a request is not authenticated.
pub enum AuthRejection {
    /// Credentials missing, malformed, or wrong. Answered with a Basic challenge.
    Challenge { realm: String },
    /// Verifying the credentials failed (e.g. the database is unreachable).
    Failed(AppError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Challenge { realm } => {
                let mut response = (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "message": "Unauthorized Access" })),
                )
                    .into_response();
                let challenge = format!("Basic realm=\"{}\"", realm.replace('"', ""));
                if let Ok(value) = HeaderValue::from_str(&challenge) {
                    response.headers_mut().insert(WWW_AUTHENTICATE, value);
                }
                response
            }
            Self::Failed(err) => err.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let challenge = || AuthRejection::Challenge {
            realm: state.config().auth_realm.clone(),
        };

        let (username, password) = basic_credentials(&parts.headers).ok_or_else(challenge)?;

        let user = AuthService::new(state.pool())
            .verify(&username, &password)
            .await
            .map_err(|e| AuthRejection::Failed(e.into()))?
            .ok_or_else(|| {
                tracing::warn!(username = %username, "Rejected Basic credentials");
                challenge()
            })?;

        Span::current().record("user", user.username.as_str());
        set_sentry_user(&user.id, user.username.as_str());

        Ok(Self(user.into()))
    }
}

/// Decode `Authorization: Basic <base64(username:password)>`.
///
/// Returns `None` for a missing header, another scheme, bad base64, non-UTF-8
/// content, or a payload without a colon.
#[must_use]
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_owned(), password.to_owned()))
}
