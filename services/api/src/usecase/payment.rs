use uuid::Uuid;

use raisedup_domain::payment::{PaymentStatus, from_minor_units, to_minor_units};

use crate::domain::repository::{
    CourseRepository, EnrollmentRepository, PaymentGateway, PaymentRepository,
};
use crate::domain::types::{
    CheckoutRequest, CheckoutSession, EnrollOutcome, Payment, PaymentWithCourse,
};
use crate::error::ApiError;

const CURRENCY: &str = "usd";
const DEFAULT_PRODUCT_DESCRIPTION: &str = "Course enrollment";

// ── CreateCheckout ───────────────────────────────────────────────────────────

pub struct CreateCheckoutUseCase<C: CourseRepository, G: PaymentGateway> {
    pub courses: C,
    pub gateway: G,
    /// Front-end origin for the redirect URLs.
    pub client_url: String,
}

impl<C: CourseRepository, G: PaymentGateway> CreateCheckoutUseCase<C, G> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        course_id: Option<Uuid>,
    ) -> Result<CheckoutSession, ApiError> {
        let course_id = course_id.ok_or(ApiError::MissingData("Course ID is required"))?;
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or(ApiError::CourseNotFound)?;

        let client_url = self.client_url.trim_end_matches('/');
        let request = CheckoutRequest {
            product_name: course.title,
            product_description: course
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| DEFAULT_PRODUCT_DESCRIPTION.to_owned()),
            image_url: course.thumbnail_url.filter(|u| !u.is_empty()),
            unit_amount: to_minor_units(course.price),
            currency: CURRENCY,
            // `{CHECKOUT_SESSION_ID}` is substituted by the provider.
            success_url: format!(
                "{client_url}/payment/success?session_id={{CHECKOUT_SESSION_ID}}"
            ),
            cancel_url: format!("{client_url}/courses/{course_id}"),
            course_id,
            user_id,
        };

        let session = self
            .gateway
            .create_checkout_session(&request)
            .await
            .map_err(|e| ApiError::CheckoutFailed(e.0))?;
        tracing::info!(%course_id, %user_id, session_id = %session.id, "checkout session created");
        Ok(session)
    }
}

// ── VerifyPayment ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct VerifiedPayment {
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub newly_enrolled: bool,
}

pub struct VerifyPaymentUseCase<P: PaymentRepository, E: EnrollmentRepository, G: PaymentGateway> {
    pub repo: P,
    pub enrollments: E,
    pub gateway: G,
}

impl<P, E, G> VerifyPaymentUseCase<P, E, G>
where
    P: PaymentRepository,
    E: EnrollmentRepository,
    G: PaymentGateway,
{
    /// Record the payment and enroll the buyer named in the session
    /// metadata. The two writes are independent: a failed payment insert is
    /// logged and enrollment still proceeds.
    pub async fn execute(&self, session_id: Option<String>) -> Result<VerifiedPayment, ApiError> {
        let session_id = session_id
            .filter(|s| !s.is_empty())
            .ok_or(ApiError::MissingData("Session ID is required"))?;
        let session = self
            .gateway
            .retrieve_session(&session_id)
            .await
            .map_err(|e| ApiError::VerificationFailed(e.0))?;

        if !session.payment_status.is_paid() {
            return Err(ApiError::PaymentNotCompleted {
                status: session.payment_status.as_str().to_owned(),
            });
        }

        let parse = |v: &Option<String>| v.as_deref().and_then(|s| s.parse::<Uuid>().ok());
        let (Some(user_id), Some(course_id)) = (parse(&session.user_id), parse(&session.course_id))
        else {
            return Err(ApiError::VerificationFailed(
                "checkout session metadata is missing userId or courseId".to_owned(),
            ));
        };

        let payment = Payment {
            id: Uuid::now_v7(),
            user_id,
            course_id,
            amount: from_minor_units(session.amount_total.unwrap_or(0)),
            status: PaymentStatus::Completed.to_string(),
            transaction_id: session.id.clone(),
            created_at: chrono::Utc::now(),
        };
        if let Err(e) = self.repo.create(&payment).await {
            tracing::warn!(error = ?e, session_id = %session.id, "failed to record payment");
        }

        let newly_enrolled = match self.enrollments.create(user_id, course_id).await {
            Ok(EnrollOutcome::Created(_)) => true,
            Ok(EnrollOutcome::AlreadyEnrolled) => false,
            Err(e) => {
                tracing::warn!(error = ?e, %user_id, %course_id, "failed to enroll after payment");
                false
            }
        };
        tracing::info!(%user_id, %course_id, session_id = %session.id, "payment verified");
        Ok(VerifiedPayment {
            user_id,
            course_id,
            newly_enrolled,
        })
    }
}

// ── GetUserPayments ──────────────────────────────────────────────────────────

pub struct GetUserPaymentsUseCase<R: PaymentRepository> {
    pub repo: R,
}

impl<R: PaymentRepository> GetUserPaymentsUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<PaymentWithCourse>, ApiError> {
        self.repo.list_for_user(user_id).await
    }
}
