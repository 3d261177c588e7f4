use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use riskroad_core::catalog::Instrument;
use riskroad_core::domain::account::{Investment, User};
use riskroad_core::domain::contract::{InvestmentInput, ProfileInput, SignupInput};
use riskroad_core::domain::profile::UserProfile;
use riskroad_core::domain::recommendation::Recommendation;
use riskroad_core::domain::summary::AllocationSummary;
use riskroad_core::engine::AllocationEngine;
use riskroad_core::storage::AccountStore;

#[derive(Clone)]
pub struct AppState {
    pub engine: AllocationEngine,
    /// `None` runs the API in degraded mode: recommendations work, signups do not.
    pub accounts: Option<Arc<dyn AccountStore>>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/catalog", get(get_catalog))
        .route("/recommendations", post(post_recommendations))
        .route("/recommendations/summary", post(post_recommendation_summary))
        .route("/signup", post(post_signup))
        .route("/investment", post(post_investment))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    error: String,
}

impl ApiError {
    fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
        }
    }

    fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    fn internal(err: anyhow::Error) -> Self {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %err, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

async fn healthz() -> &'static str {
    "ok"
}

async fn get_catalog(State(state): State<AppState>) -> Json<Vec<Instrument>> {
    Json(state.engine.catalog().instruments().to_vec())
}

async fn post_recommendations(
    State(state): State<AppState>,
    payload: Result<Json<ProfileInput>, JsonRejection>,
) -> Result<Json<Vec<Recommendation>>, ApiError> {
    let Json(input) = payload?;
    let (_, recommendations) = run_engine(&state, input)?;
    Ok(Json(recommendations))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRecommendationSummary {
    recommendations: Vec<Recommendation>,
    summary: AllocationSummary,
}

async fn post_recommendation_summary(
    State(state): State<AppState>,
    payload: Result<Json<ProfileInput>, JsonRejection>,
) -> Result<Json<ApiRecommendationSummary>, ApiError> {
    let Json(input) = payload?;
    let (profile, recommendations) = run_engine(&state, input)?;
    let summary = AllocationSummary::build(&profile, &recommendations);
    if summary.has_rounding_drift() {
        tracing::debug!(
            total_allocation = summary.total_allocation,
            drift = summary.rounding_drift,
            "allocation total differs from 100"
        );
    }

    Ok(Json(ApiRecommendationSummary {
        recommendations,
        summary,
    }))
}

fn run_engine(
    state: &AppState,
    input: ProfileInput,
) -> Result<(UserProfile, Vec<Recommendation>), ApiError> {
    let profile = input
        .validate_and_into_profile()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let recommendations = state
        .engine
        .recommend(&profile)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    tracing::info!(
        risk_tolerance = %profile.risk_tolerance,
        investment_term = %profile.investment_term,
        picks = recommendations.len(),
        "recommendation computed"
    );
    Ok((profile, recommendations))
}

#[derive(Debug, Serialize)]
struct ApiSignup {
    message: &'static str,
    user: User,
}

async fn post_signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiSignup>), ApiError> {
    let store = require_store(&state)?;
    let Json(input) = payload?;
    let new_user = input
        .validate_and_into_user()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let user = store
        .create_user(new_user)
        .await
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::bad_request("User already exists"))?;

    tracing::info!(user_id = %user.id, store = store.store_name(), "user registered");
    Ok((
        StatusCode::CREATED,
        Json(ApiSignup {
            message: "User registered successfully",
            user,
        }),
    ))
}

#[derive(Debug, Serialize)]
struct ApiInvestment {
    message: &'static str,
    investment: Investment,
}

async fn post_investment(
    State(state): State<AppState>,
    payload: Result<Json<InvestmentInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiInvestment>), ApiError> {
    let store = require_store(&state)?;
    let Json(input) = payload?;
    let new_investment = input
        .validate_and_into_investment()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let investment = store
        .record_investment(new_investment)
        .await
        .map_err(ApiError::internal)?;

    tracing::info!(
        investment_id = %investment.id,
        user_id = %investment.user_id,
        "investment saved"
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiInvestment {
            message: "Investment saved",
            investment,
        }),
    ))
}

fn require_store(state: &AppState) -> Result<&Arc<dyn AccountStore>, ApiError> {
    state.accounts.as_ref().ok_or_else(|| {
        ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "account storage is not configured",
        )
    })
}
