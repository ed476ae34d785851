use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use raisedup_auth_types::bearer::AuthUser;

use crate::domain::types::PaymentWithCourse;
use crate::error::ApiError;
use crate::handlers::extract::ApiJson;
use crate::infra::stripe::StripeClient;
use crate::state::AppState;
use crate::usecase::payment::{
    CreateCheckoutUseCase, GetUserPaymentsUseCase, VerifyPaymentUseCase,
};

fn gateway(state: &AppState) -> Result<StripeClient, ApiError> {
    state.stripe.clone().ok_or(ApiError::PaymentNotConfigured)
}

// ── POST /api/payment/create-checkout ────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequestBody {
    pub course_id: Option<Uuid>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub session_id: String,
    pub url: Option<String>,
}

pub async fn create_checkout_session(
    user: AuthUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CheckoutRequestBody>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let usecase = CreateCheckoutUseCase {
        courses: state.course_repo(),
        gateway: gateway(&state)?,
        client_url: state.client_url.to_string(),
    };
    let session = usecase.execute(user.user_id, body.course_id).await?;
    Ok(Json(CheckoutResponse {
        session_id: session.id,
        url: session.url,
    }))
}

// ── POST /api/payment/verify ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequestBody {
    pub session_id: Option<String>,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub message: &'static str,
}

pub async fn verify_payment(
    _user: AuthUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<VerifyRequestBody>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let usecase = VerifyPaymentUseCase {
        repo: state.payment_repo(),
        enrollments: state.enrollment_repo(),
        gateway: gateway(&state)?,
    };
    usecase.execute(body.session_id).await?;
    Ok(Json(VerifyResponse {
        success: true,
        message: "Payment verified and user enrolled",
    }))
}

// ── GET /api/payment/user ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PaymentCourse {
    pub title: String,
    pub thumbnail_url: Option<String>,
}

#[derive(Serialize)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub amount: f64,
    pub status: String,
    pub transaction_id: String,
    #[serde(serialize_with = "raisedup_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    pub courses: PaymentCourse,
}

impl From<PaymentWithCourse> for PaymentResponse {
    fn from(p: PaymentWithCourse) -> Self {
        Self {
            id: p.payment.id,
            user_id: p.payment.user_id,
            course_id: p.payment.course_id,
            amount: p.payment.amount,
            status: p.payment.status,
            transaction_id: p.payment.transaction_id,
            created_at: p.payment.created_at,
            courses: PaymentCourse {
                title: p.course_title,
                thumbnail_url: p.course_thumbnail_url,
            },
        }
    }
}

pub async fn list_user_payments(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<PaymentResponse>>, ApiError> {
    let usecase = GetUserPaymentsUseCase {
        repo: state.payment_repo(),
    };
    let payments = usecase.execute(user.user_id).await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}
