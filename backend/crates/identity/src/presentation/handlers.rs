//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use kernel::error::app_error::AppError;
use platform::cookie::{SessionCookie, extract_cookie};
use std::sync::Arc;

use crate::application::session_manager::VISITOR_COOKIE_NAME;
use crate::application::{
    SignInInput, SignInUseCase, UpdateProfileInput, UpdateProfileUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{IdentityError, IdentityResult};
use crate::presentation::dto::{
    AuthCheckResponse, LoginRequest, MessageResponse, UpdateUserRequest, UserResponse,
};
use crate::presentation::filter::{AuthSession, IdentityState};

/// Shared state for user handlers
#[derive(Clone)]
pub struct IdentityAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub identity: IdentityState,
}

impl<R> FromRef<IdentityAppState<R>> for IdentityState
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &IdentityAppState<R>) -> Self {
        state.identity.clone()
    }
}

/// `Set-Cookie` header for a session cookie
pub fn set_cookie_header(cookie: &SessionCookie) -> IdentityResult<[(HeaderName, HeaderValue); 1]> {
    let value = cookie
        .header_value()
        .map_err(|e| IdentityError::Internal(format!("Invalid cookie header: {e}")))?;
    Ok([(header::SET_COOKIE, value)])
}

fn invalid_body(rejection: JsonRejection) -> IdentityError {
    tracing::debug!(error = %rejection, "Rejected request body");
    AppError::from(rejection).into()
}

// ============================================================================
// Login / Logout
// ============================================================================

/// POST /api/users/login
pub async fn login<R>(
    State(state): State<IdentityAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> IdentityResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(invalid_body)?;

    let use_case = SignInUseCase::new(state.repo.clone(), state.identity.sessions.clone());
    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::OK,
        set_cookie_header(&output.cookie)?,
        Json(MessageResponse::new("Login successful")),
    ))
}

/// POST /api/users/logout
///
/// Succeeds with or without a session.
pub async fn logout(State(identity): State<IdentityState>) -> IdentityResult<impl IntoResponse> {
    let cookie = identity.sessions.revoke_auth_session();

    Ok((
        StatusCode::OK,
        set_cookie_header(&cookie)?,
        Json(MessageResponse::new("Logout successful")),
    ))
}

// ============================================================================
// Session / Profile
// ============================================================================

/// GET /api/users/auth-check
pub async fn auth_check(AuthSession(claims): AuthSession) -> Json<AuthCheckResponse> {
    Json(AuthCheckResponse::from(claims))
}

/// GET /api/users/detail
pub async fn user_detail<R>(
    State(state): State<IdentityAppState<R>>,
    AuthSession(claims): AuthSession,
) -> IdentityResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let profile = state
        .repo
        .find_by_id(&claims.user_id)
        .await?
        .ok_or(IdentityError::UserNotFound)?;

    Ok(Json(UserResponse::from(profile)))
}

/// PUT /api/users/update
pub async fn update_user<R>(
    State(state): State<IdentityAppState<R>>,
    AuthSession(claims): AuthSession,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> IdentityResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(invalid_body)?;

    let use_case = UpdateProfileUseCase::new(state.repo.clone(), state.identity.sessions.clone());
    let output = use_case
        .execute(
            claims.user_id,
            UpdateProfileInput {
                name: req.name,
                email: req.email,
                password: req.password,
                new_password: req.new_password,
            },
        )
        .await?;

    Ok((
        StatusCode::OK,
        set_cookie_header(&output.cookie)?,
        Json(UserResponse::from(output.profile)),
    ))
}

// ============================================================================
// Visitor
// ============================================================================

/// POST /api/visitors
///
/// Creates a Visitor Session unless the request already carries a valid one.
pub async fn generate_visitor(
    State(identity): State<IdentityState>,
    headers: HeaderMap,
) -> IdentityResult<impl IntoResponse> {
    let existing = extract_cookie(&headers, VISITOR_COOKIE_NAME);
    let session = identity
        .sessions
        .ensure_visitor_session(existing.as_deref())?;

    match session.cookie {
        Some(cookie) => {
            tracing::info!(visit_id = %session.visitor_id, "Visitor session created");
            Ok((
                StatusCode::OK,
                set_cookie_header(&cookie)?,
                Json(MessageResponse::new("Visitor id generated successfully")),
            )
                .into_response())
        }
        None => Ok((
            StatusCode::OK,
            Json(MessageResponse::new("Visitor id already exists")),
        )
            .into_response()),
    }
}
