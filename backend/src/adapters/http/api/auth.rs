//! Login, token refresh and user profile endpoints.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::{Scope, UpdateProfileCommand};
use crate::domain::foundation::{DomainError, ErrorKind};

use super::super::context::{self, decode_body, RequestContext};
use super::super::dto::{Envelope, LoginRequest, LoginResponse, TokenResponse, UpdateUserRequest, UserResponse};
use super::super::error::ApiError;
use super::super::state::AppState;

/// POST /v1/login/social
pub async fn login_social(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let issued = state
        .execute(Scope::LoginSocial, |s| async move {
            context::source(&headers)?;
            let req: LoginRequest = decode_body(&body)?;
            s.auth.login_with_identity_assertion(&req.token_email).await
        })
        .await?;

    Ok(Json(Envelope::new(LoginResponse::from(issued))))
}

/// POST /v1/token/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let issued = state
        .execute(Scope::RefreshToken, |s| async move {
            let ctx = RequestContext::extract(&headers)?;
            ctx.authorize(&s.gate)?;
            s.auth.refresh_token(&ctx.token)
        })
        .await?;

    Ok(Json(Envelope::new(TokenResponse::from(issued))))
}

/// GET /v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .execute(Scope::GetUserById, |s| async move {
            let ctx = RequestContext::extract(&headers)?;
            ctx.authorize(&s.gate)?;
            s.auth.get_user_by_id(&id).await
        })
        .await?;

    Ok(Json(Envelope::new(UserResponse::from(user))))
}

/// PUT /v1/users/{id}
///
/// Users may only edit their own profile.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .execute(Scope::UpdateUser, |s| async move {
            let ctx = RequestContext::extract(&headers)?;
            let req: UpdateUserRequest = decode_body(&body)?;
            let claims = ctx.authorize(&s.gate)?;
            if claims.user_id.as_str() != id {
                return Err(DomainError::new(
                    ErrorKind::UnauthorizedAccess,
                    "Cannot edit another user's profile",
                ));
            }

            s.auth
                .update_profile(
                    &id,
                    UpdateProfileCommand {
                        full_name: req.fullname,
                        username: req.username,
                        email: req.email,
                    },
                )
                .await
        })
        .await?;

    Ok(Json(Envelope::new(UserResponse::from(user))))
}
