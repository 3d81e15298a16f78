//! Content and template endpoints.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::{CreateContentCommand, Scope, UpdateContentCommand};
use crate::domain::foundation::{ContentId, TemplateId};

use super::super::context::{decode_body, RequestContext};
use super::super::dto::{
    ContentResponse, CreateContentRequest, Envelope, TemplateResponse, UpdateContentRequest,
};
use super::super::error::ApiError;
use super::super::state::AppState;

/// POST /v1/contents
pub async fn create_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let content = state
        .execute(Scope::CreateContent, |s| async move {
            let ctx = RequestContext::extract(&headers)?;
            let req: CreateContentRequest = decode_body(&body)?;
            let claims = ctx.authorize(&s.gate)?;

            let cmd = CreateContentCommand {
                template_id: TemplateId::new(req.template_id)?,
                detail: req.detail_content_json_text,
            };
            s.contents.create(&claims.user_id, cmd).await
        })
        .await?;

    Ok(Json(Envelope::new(ContentResponse::from(content))))
}

/// GET /v1/contents - the caller's own content
pub async fn list_contents(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let contents = state
        .execute(Scope::GetContents, |s| async move {
            let claims = RequestContext::extract(&headers)?.authorize(&s.gate)?;
            s.contents.list_by_user(&claims.user_id).await
        })
        .await?;

    let body: Vec<ContentResponse> = contents.into_iter().map(ContentResponse::from).collect();
    Ok(Json(Envelope::new(body)))
}

/// GET /v1/contents/{id}
pub async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let content = state
        .execute(Scope::GetContentById, |s| async move {
            RequestContext::extract(&headers)?.authorize(&s.gate)?;
            s.contents.get(&ContentId::new(id)?).await
        })
        .await?;

    Ok(Json(Envelope::new(ContentResponse::from(content))))
}

/// PUT /v1/contents/{id}
pub async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let content = state
        .execute(Scope::UpdateContent, |s| async move {
            let ctx = RequestContext::extract(&headers)?;
            let req: UpdateContentRequest = decode_body(&body)?;
            let claims = ctx.authorize(&s.gate)?;

            let cmd = UpdateContentCommand {
                detail: req.detail_content_json_text,
                status: req.status,
            };
            s.contents
                .update(&ContentId::new(id)?, &claims.user_id, cmd)
                .await
        })
        .await?;

    Ok(Json(Envelope::new(ContentResponse::from(content))))
}

/// GET /v1/templates/{id}
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let template = state
        .execute(Scope::GetTemplateById, |s| async move {
            RequestContext::extract(&headers)?.authorize(&s.gate)?;
            s.contents.get_template(&TemplateId::new(id)?).await
        })
        .await?;

    Ok(Json(Envelope::new(TemplateResponse::from(template))))
}
