//! Authentication route handlers.
//!
//! Login checks the submitted pair against the configured verifier and
//! switches the single session role on success.

use axum::{Json, extract::State};
use foodverse_core::{LoginOutcome, SessionRole, SessionStore};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::state::AppState;

/// Login form data.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Successful login or logout.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub role: SessionRole,
}

/// Current session state.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub role: SessionRole,
    pub is_authenticated: bool,
    pub is_admin: bool,
    pub is_customer: bool,
}

impl From<&SessionStore> for StatusResponse {
    fn from(session: &SessionStore) -> Self {
        Self {
            role: session.role(),
            is_authenticated: session.is_authenticated(),
            is_admin: session.is_admin(),
            is_customer: session.is_customer(),
        }
    }
}

/// Login prompt data.
#[derive(Debug, Serialize)]
pub struct LoginPageResponse {
    #[serde(flatten)]
    pub status: StatusResponse,
    /// Where customer credentials are posted.
    pub login_url: &'static str,
    /// Where admin credentials are posted.
    pub admin_login_url: &'static str,
}

/// Login prompt, the target of the admin guard's redirect.
#[instrument(skip(state))]
pub async fn login_page(State(state): State<AppState>) -> Json<LoginPageResponse> {
    let session = state.session().lock().await;
    Json(LoginPageResponse {
        status: StatusResponse::from(&*session),
        login_url: "/auth/login",
        admin_login_url: "/auth/admin/login",
    })
}

/// Show the current role.
#[instrument(skip(state))]
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let session = state.session().lock().await;
    Json(StatusResponse::from(&*session))
}

/// Map a login outcome to a response.
fn respond(outcome: LoginOutcome, role: SessionRole, username: &str) -> Result<Json<LoginResponse>> {
    match outcome {
        LoginOutcome::Success => {
            set_sentry_user(username, &role);
            tracing::info!(%role, "Login succeeded");
            Ok(Json(LoginResponse {
                success: true,
                role,
            }))
        }
        LoginOutcome::InvalidCredentials => {
            tracing::info!("Login rejected");
            Err(AppError::Unauthorized("Invalid credentials".to_string()))
        }
        LoginOutcome::Unavailable(cause) => {
            tracing::error!(error = %cause, "Credential verifier unavailable");
            Err(AppError::Unavailable(
                "An error occurred. Please try again.".to_string(),
            ))
        }
    }
}

/// Customer login.
///
/// # Errors
///
/// Returns `Unauthorized` for a wrong pair and `Unavailable` if the
/// verifier fails. The session is unchanged in both cases.
#[instrument(skip(state, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let mut session = state.session().lock().await;
    let outcome = session.login_as_customer(&form.username, &form.password);
    respond(outcome, session.role(), &form.username)
}

/// Admin login.
///
/// # Errors
///
/// Returns `Unauthorized` for a wrong pair and `Unavailable` if the
/// verifier fails. The session is unchanged in both cases.
#[instrument(skip(state, form), fields(username = %form.username))]
pub async fn admin_login(
    State(state): State<AppState>,
    Json(form): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let mut session = state.session().lock().await;
    let outcome = session.login_as_admin(&form.username, &form.password);
    respond(outcome, session.role(), &form.username)
}

/// Logout.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Json<LoginResponse> {
    let mut session = state.session().lock().await;
    session.logout();
    clear_sentry_user();
    tracing::info!("Logged out");

    Json(LoginResponse {
        success: true,
        role: session.role(),
    })
}
