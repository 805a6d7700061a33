//! Carbon-track HTTP handlers.
//!
//! ```text
//! GET  /api/v1/carbon-track/profile/{userId}
//! GET  /api/v1/carbon-track/users
//! GET  /api/v1/carbon-track/footprints
//! GET  /api/v1/carbon-track/users/{userId}/dashboard
//! GET  /api/v1/carbon-track/users/{userId}/categories/{category}
//! GET  /api/v1/carbon-track/leaderboard/{city}
//! POST /api/v1/carbon-track/submissions
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    DashboardPoint, Error, FootprintRecord, FootprintSubmission, LeaderboardEntry, MeterReadings,
    SubmissionReceipt, TransportLeg, UserProfile, UserRecord, WasteEntry,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::CategoryPointSchema;
use crate::inbound::http::state::TrackerState;
use crate::inbound::http::validation::{
    map_footprint_validation_error, map_indexed_footprint_error, parse_category, parse_user_id,
};

/// Path prefix shared by every carbon-track endpoint.
pub const CARBON_TRACK_SCOPE: &str = "/api/v1/carbon-track";

/// One journey in a submission form.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransportationRequest {
    #[schema(example = "car")]
    pub mode: String,
    /// Distance travelled; takes precedence over `time` when non-zero.
    #[serde(default)]
    #[schema(example = 10.0)]
    pub distance: f64,
    /// Travel time, used only when `distance` is zero.
    #[serde(default)]
    pub time: f64,
}

/// Wet and dry waste for the day.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WastageRequest {
    #[serde(default)]
    #[schema(example = 2.0)]
    pub wet_waste: f64,
    #[serde(default)]
    #[schema(example = 3.0)]
    pub dry_waste: f64,
}

/// Daily footprint submission form.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    #[schema(example = 42)]
    pub user_id: i64,
    /// Day being reported; defaults to today.
    #[schema(value_type = Option<String>, format = Date, example = "2026-10-01")]
    pub date: Option<NaiveDate>,
    #[schema(example = "Pune")]
    pub city: String,
    #[schema(example = "Asha Rao")]
    pub name: String,
    #[serde(default)]
    pub transportations: Vec<TransportationRequest>,
    #[serde(default)]
    pub wastages: Vec<WastageRequest>,
    #[schema(example = 100.0)]
    pub prev_watts: f64,
    #[schema(example = 150.0)]
    pub today_watts: f64,
}

impl TryFrom<SubmissionRequest> for FootprintSubmission {
    type Error = Error;

    fn try_from(value: SubmissionRequest) -> Result<Self, Self::Error> {
        let user_id = parse_user_id(value.user_id)?;
        let meters = MeterReadings::try_new(value.prev_watts, value.today_watts)
            .map_err(map_footprint_validation_error)?;
        let legs = value
            .transportations
            .into_iter()
            .enumerate()
            .map(|(index, leg)| {
                TransportLeg::try_new(leg.mode, leg.distance, leg.time)
                    .map_err(map_indexed_footprint_error("transportations", index))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let waste = value
            .wastages
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                WasteEntry::try_new(entry.wet_waste, entry.dry_waste)
                    .map_err(map_indexed_footprint_error("wastages", index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let submission = FootprintSubmission::try_new(user_id, &value.name, &value.city, meters)
            .map_err(map_footprint_validation_error)?
            .with_date(value.date)
            .with_legs(legs)
            .with_waste(waste);
        submission
            .emissions()
            .ensure_finite()
            .map_err(map_footprint_validation_error)?;
        Ok(submission)
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    #[schema(example = "Carbon footprint submitted successfully with total emissions: 39.5")]
    pub message: String,
    pub footprint_id: i64,
    pub transportation: f64,
    pub waste: f64,
    pub electricity: f64,
    pub total: f64,
}

impl From<SubmissionReceipt> for SubmissionResponse {
    fn from(value: SubmissionReceipt) -> Self {
        let breakdown = value.breakdown;
        Self {
            message: format!(
                "Carbon footprint submitted successfully with total emissions: {:?}",
                breakdown.total
            ),
            footprint_id: value.footprint_id,
            transportation: breakdown.transportation,
            waste: breakdown.waste,
            electricity: breakdown.electricity,
            total: breakdown.total,
        }
    }
}

/// Fetch a user's public profile.
#[utoipa::path(
    get,
    path = "/api/v1/carbon-track/profile/{userId}",
    params(("userId" = i64, Path, description = "Directory user identifier")),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 400, description = "Invalid user id", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 503, description = "User directory unavailable", body = Error)
    ),
    tags = ["carbon-track"],
    operation_id = "getUserProfile"
)]
#[get("/profile/{user_id}")]
pub async fn get_profile(
    state: web::Data<TrackerState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UserProfile>> {
    let user_id = parse_user_id(path.into_inner())?;
    let profile = state.profiles.profile(user_id).await?;
    Ok(web::Json(profile))
}

/// List every user known to the directory.
#[utoipa::path(
    get,
    path = "/api/v1/carbon-track/users",
    responses(
        (status = 200, description = "Users", body = [UserRecord]),
        (status = 503, description = "User directory unavailable", body = Error)
    ),
    tags = ["carbon-track"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<TrackerState>) -> ApiResult<web::Json<Vec<UserRecord>>> {
    let users = state.profiles.list_users().await?;
    Ok(web::Json(users))
}

/// List every stored footprint record.
#[utoipa::path(
    get,
    path = "/api/v1/carbon-track/footprints",
    responses(
        (status = 200, description = "Footprint records", body = [FootprintRecord]),
        (status = 503, description = "Footprint store unavailable", body = Error)
    ),
    tags = ["carbon-track"],
    operation_id = "listFootprints"
)]
#[get("/footprints")]
pub async fn list_footprints(
    state: web::Data<TrackerState>,
) -> ApiResult<web::Json<Vec<FootprintRecord>>> {
    let records = state.history.list_footprints().await?;
    Ok(web::Json(records))
}

/// The user's 30 most recent daily totals, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/carbon-track/users/{userId}/dashboard",
    params(("userId" = i64, Path, description = "Directory user identifier")),
    responses(
        (status = 200, description = "Dashboard series", body = [DashboardPoint]),
        (status = 404, description = "Unknown user", body = Error),
        (status = 503, description = "Dependency unavailable", body = Error)
    ),
    tags = ["carbon-track"],
    operation_id = "getDashboard"
)]
#[get("/users/{user_id}/dashboard")]
pub async fn get_dashboard(
    state: web::Data<TrackerState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<DashboardPoint>>> {
    let user_id = parse_user_id(path.into_inner())?;
    let points = state.history.dashboard(user_id).await?;
    Ok(web::Json(points))
}

/// One emissions category across all of a user's records, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/carbon-track/users/{userId}/categories/{category}",
    params(
        ("userId" = i64, Path, description = "Directory user identifier"),
        ("category" = String, Path, description = "transportation, electricity or wastage")
    ),
    responses(
        (status = 200, description = "Category series", body = [CategoryPointSchema]),
        (status = 400, description = "Unknown category", body = Error),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["carbon-track"],
    operation_id = "getCategorySeries"
)]
#[get("/users/{user_id}/categories/{category}")]
pub async fn get_category_series(
    state: web::Data<TrackerState>,
    path: web::Path<(i64, String)>,
) -> ApiResult<HttpResponse> {
    let (raw_user_id, raw_category) = path.into_inner();
    let user_id = parse_user_id(raw_user_id)?;
    let category = parse_category(&raw_category)?;
    let points = state.history.category_series(user_id, category).await?;
    Ok(HttpResponse::Ok().json(points))
}

/// City leaderboard, highest cumulative total first.
#[utoipa::path(
    get,
    path = "/api/v1/carbon-track/leaderboard/{city}",
    params(("city" = String, Path, description = "City name, matched exactly")),
    responses(
        (status = 200, description = "Leaderboard", body = [LeaderboardEntry]),
        (status = 404, description = "No participants in this city", body = Error)
    ),
    tags = ["carbon-track"],
    operation_id = "getLeaderboard"
)]
#[get("/leaderboard/{city}")]
pub async fn get_leaderboard(
    state: web::Data<TrackerState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<LeaderboardEntry>>> {
    let city = path.into_inner();
    let entries = state.leaderboard.for_city(&city).await?;
    Ok(web::Json(entries))
}

/// Submit a daily footprint form.
#[utoipa::path(
    post,
    path = "/api/v1/carbon-track/submissions",
    request_body = SubmissionRequest,
    responses(
        (status = 200, description = "Submission recorded", body = SubmissionResponse),
        (status = 400, description = "Invalid submission", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 503, description = "Dependency unavailable", body = Error)
    ),
    tags = ["carbon-track"],
    operation_id = "submitFootprint"
)]
#[post("/submissions")]
pub async fn submit_footprint(
    state: web::Data<TrackerState>,
    payload: web::Json<SubmissionRequest>,
) -> ApiResult<web::Json<SubmissionResponse>> {
    let submission = FootprintSubmission::try_from(payload.into_inner())?;
    let receipt = state.submissions.submit(submission).await?;
    Ok(web::Json(SubmissionResponse::from(receipt)))
}

/// Register every carbon-track handler under [`CARBON_TRACK_SCOPE`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(CARBON_TRACK_SCOPE)
            .service(get_profile)
            .service(list_users)
            .service(list_footprints)
            .service(get_dashboard)
            .service(get_category_series)
            .service(get_leaderboard)
            .service(submit_footprint),
    );
}

#[cfg(test)]
#[path = "carbon_track_tests.rs"]
mod tests;
