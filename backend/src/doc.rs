//! OpenAPI documentation for both services.
//!
//! [`CarbonTrackApiDoc`] covers the tracker endpoints and probes;
//! [`UserDirectoryApiDoc`] covers the directory. Swagger UI serves them in
//! debug builds and `openapi-dump` exports them for tooling.

use utoipa::OpenApi;

use crate::domain::{
    DashboardPoint, EmissionsBreakdown, Error, ErrorCode, FootprintRecord, LeaderboardEntry, Role,
    UserProfile, UserRecord,
};
use crate::inbound::http::carbon_track::{
    SubmissionRequest, SubmissionResponse, TransportationRequest, WastageRequest,
};
use crate::inbound::http::directory::{CreditRequest, RegisterUserRequest, UserUpdateRequest};
use crate::inbound::http::schemas::CategoryPointSchema;

/// OpenAPI document for the carbon-track service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Carbon track API",
        description = "Daily footprint submissions, history dashboards and city leaderboards."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::carbon_track::get_profile,
        crate::inbound::http::carbon_track::list_users,
        crate::inbound::http::carbon_track::list_footprints,
        crate::inbound::http::carbon_track::get_dashboard,
        crate::inbound::http::carbon_track::get_category_series,
        crate::inbound::http::carbon_track::get_leaderboard,
        crate::inbound::http::carbon_track::submit_footprint,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        UserRecord,
        UserProfile,
        FootprintRecord,
        DashboardPoint,
        CategoryPointSchema,
        LeaderboardEntry,
        EmissionsBreakdown,
        SubmissionRequest,
        SubmissionResponse,
        TransportationRequest,
        WastageRequest
    )),
    tags(
        (name = "carbon-track", description = "Footprint submission and history"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct CarbonTrackApiDoc;

/// OpenAPI document for the user-directory service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User directory API",
        description = "Registration, lookup and atomic credit of user totals."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::directory::register_user,
        crate::inbound::http::directory::list_users,
        crate::inbound::http::directory::get_user,
        crate::inbound::http::directory::replace_user,
        crate::inbound::http::directory::credit_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        UserRecord,
        RegisterUserRequest,
        UserUpdateRequest,
        CreditRequest
    )),
    tags(
        (name = "user-directory", description = "User registration and totals"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct UserDirectoryApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated documents.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/v1/carbon-track/submissions")]
    #[case("/api/v1/carbon-track/leaderboard/{city}")]
    #[case("/api/v1/carbon-track/users/{userId}/categories/{category}")]
    #[case("/health/ready")]
    fn tracker_document_lists_paths(#[case] path: &str) {
        let doc = CarbonTrackApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    #[case("/users")]
    #[case("/users/{id}")]
    #[case("/users/{id}/credits")]
    fn directory_document_lists_paths(#[case] path: &str) {
        let doc = UserDirectoryApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn error_schema_uses_envelope_fields() {
        let doc = CarbonTrackApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error, "code");
        assert_object_schema_has_field(error, "message");
        assert_object_schema_has_field(error, "traceId");
    }

    #[rstest]
    fn user_schema_never_mentions_credentials() {
        let doc = UserDirectoryApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user = schemas.get("UserRecord").expect("UserRecord schema");

        assert_object_schema_has_field(user, "totalCarbonFootprint");
        match user {
            RefOr::T(Schema::Object(obj)) => {
                assert!(!obj.properties.contains_key("passwordHash"));
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn category_points_are_documented_by_wrapper() {
        let doc = CarbonTrackApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert!(schemas.contains_key("CategoryPoint"));
    }
}
