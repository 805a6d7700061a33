//! Handler tests for the carbon-track endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self};
use actix_web::{App, web};
use chrono::{NaiveDate, Utc};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    MockFootprintHistoryQuery, MockFootprintSubmissionCommand, MockLeaderboardQuery,
    MockUserProfileQuery,
};
use crate::domain::{
    Category, CategoryPoint, EmissionsBreakdown, ErrorCode, Role, UserId,
};
use crate::inbound::http::{json_config, path_config};
use crate::middleware::Trace;

#[derive(Default)]
struct Mocks {
    submissions: MockFootprintSubmissionCommand,
    history: MockFootprintHistoryQuery,
    leaderboard: MockLeaderboardQuery,
    profiles: MockUserProfileQuery,
}

impl Mocks {
    fn into_state(self) -> TrackerState {
        TrackerState::new(
            Arc::new(self.submissions),
            Arc::new(self.history),
            Arc::new(self.leaderboard),
            Arc::new(self.profiles),
        )
    }
}

async fn call(mocks: Mocks, req: test::TestRequest) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .wrap(Trace)
            .app_data(web::Data::new(mocks.into_state()))
            .app_data(json_config())
            .app_data(path_config())
            .configure(configure),
    )
    .await;
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    (status, test::read_body_json(res).await)
}

fn submission_body() -> Value {
    json!({
        "userId": 7,
        "city": "Pune",
        "name": "Asha",
        "transportations": [{ "mode": "car", "distance": 10.0, "time": 0.0 }],
        "wastages": [{ "wetWaste": 2.0, "dryWaste": 3.0 }],
        "prevWatts": 100,
        "todayWatts": 150
    })
}

#[rstest]
#[actix_web::test]
async fn submission_reports_breakdown_and_message() {
    let mut mocks = Mocks::default();
    mocks
        .submissions
        .expect_submit()
        .withf(|submission| {
            submission.user_id().get() == 7
                && submission.city() == "Pune"
                && submission.date().is_none()
        })
        .times(1)
        .returning(|submission| {
            Ok(SubmissionReceipt {
                footprint_id: 55,
                breakdown: submission.emissions(),
            })
        });

    let (status, body) = call(
        mocks,
        test::TestRequest::post()
            .uri("/api/v1/carbon-track/submissions")
            .set_json(submission_body()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        json!("Carbon footprint submitted successfully with total emissions: 39.5")
    );
    assert_eq!(body["footprintId"], json!(55));
    assert_eq!(body["transportation"], json!(2.0));
    assert_eq!(body["waste"], json!(2.5));
    assert_eq!(body["electricity"], json!(35.0));
}

#[rstest]
#[case(json!({ "transportations": [{ "mode": "car", "distance": -1.0 }] }), "transportations.distance")]
#[case(json!({ "wastages": [{ "wetWaste": 1.0, "dryWaste": -2.0 }] }), "wastages.dryWaste")]
#[case(json!({ "city": "  " }), "city")]
#[case(json!({ "userId": 0 }), "userId")]
#[actix_web::test]
async fn invalid_submissions_never_reach_the_service(
    #[case] overrides: Value,
    #[case] field: &str,
) {
    let mut body = submission_body();
    if let (Some(target), Some(patch)) = (body.as_object_mut(), overrides.as_object()) {
        for (key, value) in patch {
            target.insert(key.clone(), value.clone());
        }
    }
    let mut mocks = Mocks::default();
    mocks.submissions.expect_submit().times(0);

    let (status, body) = call(
        mocks,
        test::TestRequest::post()
            .uri("/api/v1/carbon-track/submissions")
            .set_json(body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"]["field"], json!(field));
}

#[rstest]
#[case(json!({ "prevWatts": -1e308, "todayWatts": 1e308 }), "electricity")]
#[case(json!({ "wastages": [{ "wetWaste": 1e308, "dryWaste": 1e308 }] }), "waste")]
#[actix_web::test]
async fn overflowing_emissions_never_reach_the_service(
    #[case] overrides: Value,
    #[case] field: &str,
) {
    let mut body = submission_body();
    if let (Some(target), Some(patch)) = (body.as_object_mut(), overrides.as_object()) {
        for (key, value) in patch {
            target.insert(key.clone(), value.clone());
        }
    }
    let mut mocks = Mocks::default();
    mocks.submissions.expect_submit().times(0);

    let (status, body) = call(
        mocks,
        test::TestRequest::post()
            .uri("/api/v1/carbon-track/submissions")
            .set_json(body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"],
        json!({ "field": field, "code": "non_finite" })
    );
}

#[rstest]
#[actix_web::test]
async fn non_numeric_watts_are_rejected_by_the_extractor() {
    let mut body = submission_body();
    body["prevWatts"] = json!("a lot");
    let mut mocks = Mocks::default();
    mocks.submissions.expect_submit().times(0);

    let (status, body) = call(
        mocks,
        test::TestRequest::post()
            .uri("/api/v1/carbon-track/submissions")
            .set_json(body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], json!("invalid_json"));
}

#[rstest]
#[actix_web::test]
async fn unknown_user_submission_is_not_found_with_trace() {
    let mut mocks = Mocks::default();
    mocks
        .submissions
        .expect_submit()
        .return_once(|_| Err(Error::not_found("user 7 not found")));

    let (status, body) = call(
        mocks,
        test::TestRequest::post()
            .uri("/api/v1/carbon-track/submissions")
            .set_json(submission_body()),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("user 7 not found"));
    assert!(body["traceId"].is_string());
}

#[rstest]
#[actix_web::test]
async fn dashboard_serialises_formatted_dates() {
    let mut mocks = Mocks::default();
    mocks
        .history
        .expect_dashboard()
        .withf(|id| id.get() == 3)
        .return_once(|_| {
            Ok(vec![DashboardPoint {
                date: NaiveDate::from_ymd_opt(2026, 10, 5).expect("valid date"),
                total_carbon_footprint: 12.0,
            }])
        });

    let (status, body) = call(
        mocks,
        test::TestRequest::get().uri("/api/v1/carbon-track/users/3/dashboard"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "date": "05-10-2026", "totalCarbonFootprint": 12.0 }])
    );
}

#[rstest]
#[case("transportation", Category::Transportation, "transportation")]
#[case("electricity", Category::Electricity, "electricity")]
#[case("wastage", Category::Waste, "wastage")]
#[case("waste", Category::Waste, "wastage")]
#[actix_web::test]
async fn category_series_uses_category_key(
    #[case] segment: &str,
    #[case] category: Category,
    #[case] key: &str,
) {
    let mut mocks = Mocks::default();
    mocks
        .history
        .expect_category_series()
        .withf(move |_, requested| *requested == category)
        .return_once(move |_, requested| {
            Ok(vec![CategoryPoint {
                date: NaiveDate::from_ymd_opt(2026, 10, 5).expect("valid date"),
                category: requested,
                value: 4.5,
            }])
        });

    let (status, body) = call(
        mocks,
        test::TestRequest::get().uri(&format!(
            "/api/v1/carbon-track/users/3/categories/{segment}"
        )),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0][key], json!(4.5));
    assert_eq!(body[0]["date"], json!("05-10-2026"));
}

#[rstest]
#[actix_web::test]
async fn unknown_category_is_bad_request() {
    let mut mocks = Mocks::default();
    mocks.history.expect_category_series().times(0);

    let (status, body) = call(
        mocks,
        test::TestRequest::get().uri("/api/v1/carbon-track/users/3/categories/water"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], json!("unknown_category"));
}

#[rstest]
#[actix_web::test]
async fn non_numeric_user_id_is_bad_request() {
    let (status, body) = call(
        Mocks::default(),
        test::TestRequest::get().uri("/api/v1/carbon-track/profile/abc"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], json!("invalid_path"));
}

#[rstest]
#[actix_web::test]
async fn empty_leaderboard_is_not_found() {
    let mut mocks = Mocks::default();
    mocks
        .leaderboard
        .expect_for_city()
        .withf(|city| city == "Atlantis")
        .return_once(|city| Err(Error::not_found(format!("city {city} not found"))));

    let (status, body) = call(
        mocks,
        test::TestRequest::get().uri("/api/v1/carbon-track/leaderboard/Atlantis"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("not_found"));
}

#[rstest]
#[actix_web::test]
async fn leaderboard_preserves_service_order() {
    let mut mocks = Mocks::default();
    mocks.leaderboard.expect_for_city().return_once(|_| {
        let date = NaiveDate::from_ymd_opt(2026, 10, 5).expect("valid date");
        Ok(vec![
            LeaderboardEntry {
                user_id: UserId::new(2).expect("valid id"),
                name: "Ravi".to_owned(),
                city: "Pune".to_owned(),
                total_carbon_footprint: 40.0,
                date,
            },
            LeaderboardEntry {
                user_id: UserId::new(1).expect("valid id"),
                name: "Asha".to_owned(),
                city: "Pune".to_owned(),
                total_carbon_footprint: 12.0,
                date,
            },
        ])
    });

    let (status, body) = call(
        mocks,
        test::TestRequest::get().uri("/api/v1/carbon-track/leaderboard/Pune"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["userId"], json!(2));
    assert_eq!(body[1]["totalCarbonFootprint"], json!(12.0));
}

#[rstest]
#[actix_web::test]
async fn profile_outage_is_service_unavailable() {
    let mut mocks = Mocks::default();
    mocks
        .profiles
        .expect_profile()
        .return_once(|_| Err(Error::service_unavailable("user directory unavailable: timed out")));

    let (status, body) = call(
        mocks,
        test::TestRequest::get().uri("/api/v1/carbon-track/profile/9"),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], json!("service_unavailable"));
}

#[rstest]
#[actix_web::test]
async fn users_listing_omits_credentials() {
    let mut mocks = Mocks::default();
    mocks.profiles.expect_list_users().return_once(|| {
        let stamp = Utc::now();
        Ok(vec![UserRecord {
            id: UserId::new(1).expect("valid id"),
            name: "Asha".to_owned(),
            email: "asha@example.com".to_owned(),
            city: "Pune".to_owned(),
            total_carbon_footprint: 3.0,
            role: Role::Admin,
            created_at: stamp,
            updated_at: stamp,
        }])
    });

    let (status, body) = call(mocks, test::TestRequest::get().uri("/api/v1/carbon-track/users")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["role"], json!("admin"));
    assert!(body[0].get("passwordHash").is_none());
}

#[rstest]
#[actix_web::test]
async fn footprint_listing_maps_internal_errors() {
    let mut mocks = Mocks::default();
    mocks
        .history
        .expect_list_footprints()
        .return_once(|| Err(Error::internal("footprint store error: relation missing")));

    let (status, body) = call(
        mocks,
        test::TestRequest::get().uri("/api/v1/carbon-track/footprints"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], json!("Internal server error"));
    assert_eq!(body["code"], json!(ErrorCode::InternalError));
}

#[rstest]
fn receipt_message_keeps_decimal_point() {
    let response = SubmissionResponse::from(SubmissionReceipt {
        footprint_id: 1,
        breakdown: EmissionsBreakdown {
            transportation: 2.0,
            waste: 0.0,
            electricity: 0.0,
            total: 2.0,
        },
    });
    assert_eq!(
        response.message,
        "Carbon footprint submitted successfully with total emissions: 2.0"
    );
}
