//! Hosted-checkout gateway over the Stripe REST API.

use reqwest::{Client, Response};
use serde::Deserialize;

use raisedup_domain::payment::CheckoutPaymentStatus;

use crate::domain::repository::{GatewayError, PaymentGateway};
use crate::domain::types::{CheckoutRequest, CheckoutSession, SessionStatus};

#[derive(Clone)]
pub struct StripeClient {
    http: Client,
    secret_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct SessionBody {
    id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    payment_status: Option<String>,
    #[serde(default)]
    amount_total: Option<i64>,
    #[serde(default)]
    metadata: Metadata,
}

#[derive(Deserialize, Default)]
struct Metadata {
    #[serde(rename = "courseId")]
    course_id: Option<String>,
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

impl StripeClient {
    pub fn new(secret_key: impl Into<String>, base_url: &str) -> Self {
        Self {
            http: Client::new(),
            secret_key: secret_key.into(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Decode a session body, or turn a provider error body into its message.
    async fn read_session(resp: Response) -> Result<SessionBody, GatewayError> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorEnvelope>()
                .await
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| format!("payment provider returned {status}"));
            return Err(GatewayError(message));
        }
        resp.json::<SessionBody>()
            .await
            .map_err(|e| GatewayError(format!("unreadable provider response: {e}")))
    }
}

/// Form fields for a one-item, card-only checkout in `payment` mode.
fn checkout_form(request: &CheckoutRequest) -> Vec<(String, String)> {
    let mut form: Vec<(String, String)> = [
        ("payment_method_types[0]", "card".to_owned()),
        ("mode", "payment".to_owned()),
        ("line_items[0][quantity]", "1".to_owned()),
        (
            "line_items[0][price_data][currency]",
            request.currency.to_owned(),
        ),
        (
            "line_items[0][price_data][unit_amount]",
            request.unit_amount.to_string(),
        ),
        (
            "line_items[0][price_data][product_data][name]",
            request.product_name.clone(),
        ),
        (
            "line_items[0][price_data][product_data][description]",
            request.product_description.clone(),
        ),
        ("success_url", request.success_url.clone()),
        ("cancel_url", request.cancel_url.clone()),
        ("metadata[courseId]", request.course_id.to_string()),
        ("metadata[userId]", request.user_id.to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v))
    .collect();
    if let Some(image) = &request.image_url {
        form.push((
            "line_items[0][price_data][product_data][images][0]".to_owned(),
            image.clone(),
        ));
    }
    form
}

/// Session ids are opaque but never contain path or query syntax.
fn is_valid_session_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl PaymentGateway for StripeClient {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, GatewayError> {
        let resp = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.base_url))
            .bearer_auth(&self.secret_key)
            .form(&checkout_form(request))
            .send()
            .await
            .map_err(|e| GatewayError(format!("payment provider unreachable: {e}")))?;
        let body = Self::read_session(resp).await?;
        Ok(CheckoutSession {
            id: body.id,
            url: body.url,
        })
    }

    async fn retrieve_session(&self, session_id: &str) -> Result<SessionStatus, GatewayError> {
        if !is_valid_session_id(session_id) {
            return Err(GatewayError(format!("No such checkout.session: '{session_id}'")));
        }
        let resp = self
            .http
            .get(format!("{}/v1/checkout/sessions/{session_id}", self.base_url))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| GatewayError(format!("payment provider unreachable: {e}")))?;
        let body = Self::read_session(resp).await?;
        Ok(SessionStatus {
            id: body.id,
            payment_status: CheckoutPaymentStatus::parse(
                body.payment_status.as_deref().unwrap_or("unpaid"),
            ),
            amount_total: body.amount_total,
            course_id: body.metadata.course_id,
            user_id: body.metadata.user_id,
        })
    }
}
