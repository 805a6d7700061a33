//! Tests for the directory user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn record() -> UserRecord {
    let stamp = DateTime::parse_from_rfc3339("2026-10-01T08:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc);
    UserRecord {
        id: UserId::new(42).expect("valid id"),
        name: "Asha Rao".to_owned(),
        email: "asha@example.com".to_owned(),
        city: "Pune".to_owned(),
        total_carbon_footprint: 12.5,
        role: Role::User,
        created_at: stamp,
        updated_at: stamp,
    }
}

#[rstest]
#[case(0)]
#[case(-3)]
fn user_id_rejects_non_positive_values(#[case] raw: i64) {
    assert_eq!(UserId::new(raw), Err(UserValidationError::InvalidId));
}

#[rstest]
fn user_id_deserialises_from_integers() {
    let id: UserId = serde_json::from_value(json!(9)).expect("positive id decodes");
    assert_eq!(id.get(), 9);
    assert!(serde_json::from_value::<UserId>(json!(-1)).is_err());
}

#[rstest]
#[case("", UserValidationError::EmptyField { field: "city" })]
#[case("   ", UserValidationError::EmptyField { field: "city" })]
fn labels_reject_blank_values(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(validate_label("city", raw), Err(expected));
}

#[rstest]
fn labels_reject_overlong_values() {
    let raw = "x".repeat(LABEL_MAX + 1);
    let err = validate_label("name", &raw).expect_err("too long");
    assert_eq!(err.code(), "field_too_long");
    assert_eq!(err.field(), "name");
}

#[rstest]
#[case("asha.example.com")]
#[case("@example.com")]
#[case("asha@")]
#[case("a@b@c")]
fn registration_rejects_malformed_emails(#[case] email: &str) {
    let result = Registration::try_from_parts("Asha", email, "Pune", "password1", "password1");
    assert_eq!(result, Err(UserValidationError::InvalidEmail));
}

#[rstest]
fn registration_rejects_short_passwords() {
    let result = Registration::try_from_parts("Asha", "a@b.c", "Pune", "short", "short");
    assert_eq!(
        result,
        Err(UserValidationError::PasswordTooShort { min: PASSWORD_MIN })
    );
}

#[rstest]
fn registration_rejects_mismatched_passwords() {
    let result =
        Registration::try_from_parts("Asha", "a@b.c", "Pune", "password1", "password2");
    let err = result.expect_err("mismatch");
    assert_eq!(err, UserValidationError::PasswordMismatch);
    assert_eq!(err.field(), "confirmPassword");
}

#[rstest]
fn registration_debug_redacts_password() {
    let registration =
        Registration::try_from_parts(" Asha ", "a@b.c", "Pune", "hunter2hunter2", "hunter2hunter2")
            .expect("valid registration");
    let rendered = format!("{registration:?}");
    assert!(!rendered.contains("hunter2"));
    assert_eq!(registration.name(), "Asha");
}

#[rstest]
fn user_update_rejects_non_finite_totals() {
    let err = UserUpdate::try_new("Asha", f64::NAN).expect_err("NaN rejected");
    assert_eq!(err.field(), "totalCarbonFootprint");
}

#[rstest]
fn record_serialises_without_credentials(record: UserRecord) {
    let value = serde_json::to_value(&record).expect("record serialises");
    assert_eq!(value["totalCarbonFootprint"], json!(12.5));
    assert_eq!(value["role"], json!("user"));
    assert!(value.get("passwordHash").is_none());
}

#[rstest]
fn profile_projects_public_fields(record: UserRecord) {
    let profile = UserProfile::from(record);
    assert_eq!(
        serde_json::to_value(profile).expect("profile serialises"),
        json!({
            "name": "Asha Rao",
            "email": "asha@example.com",
            "city": "Pune",
            "totalCarbonFootprint": 12.5,
        })
    );
}

#[rstest]
#[case("user", Some(Role::User))]
#[case("admin", Some(Role::Admin))]
#[case("root", None)]
fn role_parses_storage_tags(#[case] raw: &str, #[case] expected: Option<Role>) {
    assert_eq!(Role::parse(raw), expected);
}
