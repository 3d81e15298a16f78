//! Payment endpoints.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::{CreatePaymentCommand, Scope, UpdatePaymentCommand};
use crate::domain::foundation::{ContentId, DomainError, PaymentId};
use crate::domain::payment::PaymentStatus;

use super::super::context::{decode_body, RequestContext};
use super::super::dto::{CreatePaymentRequest, Envelope, PaymentResponse, UpdatePaymentRequest};
use super::super::error::ApiError;
use super::super::state::AppState;

fn content_id(raw: Option<String>) -> Result<Option<ContentId>, DomainError> {
    raw.filter(|s| !s.trim().is_empty())
        .map(ContentId::new)
        .transpose()
        .map_err(DomainError::from)
}

/// POST /v1/payments
pub async fn create_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state
        .execute(Scope::CreatePayment, |s| async move {
            let ctx = RequestContext::extract(&headers)?;
            let req: CreatePaymentRequest = decode_body(&body)?;
            let claims = ctx.authorize(&s.gate)?;

            let cmd = CreatePaymentCommand {
                content_id: content_id(req.content_id)?,
                amount: req.amount,
                proof_payment_url: req.proof_payment_url,
                date: req.date,
            };
            s.payments.create(&claims.user_id, cmd).await
        })
        .await?;

    Ok(Json(Envelope::new(PaymentResponse::from(payment))))
}

/// GET /v1/payments
pub async fn list_payments(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state
        .execute(Scope::GetPayments, |s| async move {
            RequestContext::extract(&headers)?.authorize(&s.gate)?;
            s.payments.list().await
        })
        .await?;

    let body: Vec<PaymentResponse> = payments.into_iter().map(PaymentResponse::from).collect();
    Ok(Json(Envelope::new(body)))
}

/// GET /v1/payments/{id}
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state
        .execute(Scope::GetPaymentById, |s| async move {
            RequestContext::extract(&headers)?.authorize(&s.gate)?;
            s.payments.get(&PaymentId::new(id)?).await
        })
        .await?;

    Ok(Json(Envelope::new(PaymentResponse::from(payment))))
}

/// PUT /v1/payments/{id}
///
/// Full replace; the new status drives the owner's entitlement.
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state
        .execute(Scope::UpdatePayment, |s| async move {
            let ctx = RequestContext::extract(&headers)?;
            let req: UpdatePaymentRequest = decode_body(&body)?;
            ctx.authorize(&s.gate)?;

            let cmd = UpdatePaymentCommand {
                content_id: content_id(req.content_id)?,
                amount: req.amount,
                proof_payment_url: req.proof_payment_url,
                date: req.date,
                status: PaymentStatus::parse(&req.status)?,
            };
            s.payments.update(&PaymentId::new(id)?, cmd).await
        })
        .await?;

    Ok(Json(Envelope::new(PaymentResponse::from(payment))))
}
