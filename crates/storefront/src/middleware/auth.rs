//! Admin route guard.
//!
//! Provides an extractor that lets a handler run only while the session
//! role is admin.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};

use crate::error::ErrorBody;
use crate::state::AppState;

/// Where non-admin browsers are sent.
pub const LOGIN_PATH: &str = "/auth/login";

/// Extractor that requires the admin role.
///
/// If the session is not admin, browsers are redirected to the login page
/// and JSON clients get a 401.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(_admin: RequireAdmin, State(state): State<AppState>) -> Json<DashboardStats> {
///     Json(state.orders().stats())
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

/// Error returned when the admin role is required but not held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// Redirect to login page (for browser requests).
    RedirectToLogin,
    /// Unauthorized response (for JSON requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    error: "Admin login required".to_string(),
                    retryable: false,
                }),
            )
                .into_response(),
        }
    }
}

/// Whether the client asked for JSON rather than a page.
fn wants_json(parts: &Parts) -> bool {
    parts
        .headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.session().lock().await.is_admin() {
            return Ok(Self);
        }

        tracing::debug!(path = %parts.uri.path(), "Admin route rejected");
        if wants_json(parts) {
            Err(AuthRejection::Unauthorized)
        } else {
            Err(AuthRejection::RedirectToLogin)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts(accept: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/admin");
        if let Some(accept) = accept {
            builder = builder.header(header::ACCEPT, accept);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_wants_json() {
        assert!(wants_json(&parts(Some("application/json"))));
        assert!(wants_json(&parts(Some("text/html, application/json;q=0.9"))));
        assert!(!wants_json(&parts(Some("text/html"))));
        assert!(!wants_json(&parts(None)));
    }

    #[test]
    fn test_rejection_responses() {
        let redirect = AuthRejection::RedirectToLogin.into_response();
        assert_eq!(redirect.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            redirect.headers().get(header::LOCATION).unwrap(),
            LOGIN_PATH
        );

        let unauthorized = AuthRejection::Unauthorized.into_response();
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);
    }
}
