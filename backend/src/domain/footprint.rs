//! Footprint submissions, stored records and history projections.

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

use super::{
    EmissionsBreakdown, MeterReadings, TransportLeg, UserId, UserValidationError, WasteEntry,
    validate_label,
};

/// Date format used by history projections (`dd-MM-yyyy`).
pub const HISTORY_DATE_FORMAT: &str = "%d-%m-%Y";
/// Maximum number of points returned by the dashboard.
pub const DASHBOARD_LIMIT: usize = 30;

/// Validation errors raised while building a submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FootprintValidationError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error(transparent)]
    Label(#[from] UserValidationError),
}

impl FootprintValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NonFinite { field } | Self::Negative { field } => field,
            Self::Label(inner) => inner.field(),
        }
    }

    /// Stable machine-readable code for error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NonFinite { .. } => "non_finite",
            Self::Negative { .. } => "negative_value",
            Self::Label(inner) => inner.code(),
        }
    }
}

/// A validated daily footprint submission.
///
/// # Examples
/// ```
/// use carbon_backend::domain::{FootprintSubmission, MeterReadings, TransportLeg, UserId};
///
/// let submission = FootprintSubmission::try_new(
///     UserId::new(1).expect("valid id"),
///     "Asha",
///     "Pune",
///     MeterReadings::try_new(100.0, 150.0).expect("valid readings"),
/// )
/// .expect("valid submission")
/// .with_legs(vec![TransportLeg::try_new("car", 10.0, 0.0).expect("valid leg")]);
///
/// assert!(submission.date().is_none());
/// assert!((submission.emissions().total - 37.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintSubmission {
    user_id: UserId,
    date: Option<NaiveDate>,
    name: String,
    city: String,
    legs: Vec<TransportLeg>,
    waste: Vec<WasteEntry>,
    meters: MeterReadings,
}

impl FootprintSubmission {
    /// Validate the identifying fields of a submission.
    pub fn try_new(
        user_id: UserId,
        name: &str,
        city: &str,
        meters: MeterReadings,
    ) -> Result<Self, FootprintValidationError> {
        Ok(Self {
            user_id,
            date: None,
            name: validate_label("name", name)?,
            city: validate_label("city", city)?,
            legs: Vec::new(),
            waste: Vec::new(),
            meters,
        })
    }

    /// Record the submission against an explicit day.
    #[must_use]
    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    #[must_use]
    pub fn with_legs(mut self, legs: Vec<TransportLeg>) -> Self {
        self.legs = legs;
        self
    }

    #[must_use]
    pub fn with_waste(mut self, waste: Vec<WasteEntry>) -> Self {
        self.waste = waste;
        self
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn city(&self) -> &str {
        self.city.as_str()
    }

    /// Emissions for this submission.
    pub fn emissions(&self) -> EmissionsBreakdown {
        EmissionsBreakdown::calculate(&self.legs, &self.waste, self.meters)
    }
}

/// Footprint row to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFootprint {
    pub user_id: UserId,
    pub name: String,
    pub date: NaiveDate,
    pub city: String,
    pub breakdown: EmissionsBreakdown,
}

/// Stored footprint record. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FootprintRecord {
    #[schema(example = 101)]
    pub id: i64,
    #[schema(value_type = i64, example = 42)]
    pub user_id: UserId,
    pub name: String,
    #[schema(value_type = String, format = Date, example = "2026-10-01")]
    pub date: NaiveDate,
    pub city: String,
    pub transportation: f64,
    pub electricity: f64,
    pub waste: f64,
    pub total: f64,
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubmissionReceipt {
    pub footprint_id: i64,
    pub breakdown: EmissionsBreakdown,
}

/// History category exposed by the per-category series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Transportation,
    Electricity,
    Waste,
}

impl Category {
    /// Parse a path segment. `wastage` and `waste` both select [`Category::Waste`].
    ///
    /// # Examples
    /// ```
    /// use carbon_backend::domain::Category;
    ///
    /// assert_eq!(Category::parse("Wastage"), Some(Category::Waste));
    /// assert_eq!(Category::parse("water"), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "transportation" => Some(Self::Transportation),
            "electricity" => Some(Self::Electricity),
            "wastage" | "waste" => Some(Self::Waste),
            _ => None,
        }
    }

    /// JSON key used for the category value in series points.
    pub fn key(self) -> &'static str {
        match self {
            Self::Transportation => "transportation",
            Self::Electricity => "electricity",
            Self::Waste => "wastage",
        }
    }

    /// Extract this category's value from a record.
    pub fn value_of(self, record: &FootprintRecord) -> f64 {
        match self {
            Self::Transportation => record.transportation,
            Self::Electricity => record.electricity,
            Self::Waste => record.waste,
        }
    }
}

fn serialize_history_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(HISTORY_DATE_FORMAT))
}

/// One point of the dashboard series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPoint {
    #[serde(serialize_with = "serialize_history_date")]
    #[schema(value_type = String, example = "01-10-2026")]
    pub date: NaiveDate,
    pub total_carbon_footprint: f64,
}

impl From<&FootprintRecord> for DashboardPoint {
    fn from(value: &FootprintRecord) -> Self {
        Self {
            date: value.date,
            total_carbon_footprint: value.total,
        }
    }
}

/// One point of a single-category series.
///
/// Serialises as `{"date": "dd-MM-yyyy", "<category>": value}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryPoint {
    pub date: NaiveDate,
    pub category: Category,
    pub value: f64,
}

impl CategoryPoint {
    pub fn from_record(category: Category, record: &FootprintRecord) -> Self {
        Self {
            date: record.date,
            category,
            value: category.value_of(record),
        }
    }
}

impl Serialize for CategoryPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(
            "date",
            &self.date.format(HISTORY_DATE_FORMAT).to_string(),
        )?;
        map.serialize_entry(self.category.key(), &self.value)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn record() -> FootprintRecord {
        FootprintRecord {
            id: 7,
            user_id: UserId::new(3).expect("valid id"),
            name: "Asha".to_owned(),
            date: NaiveDate::from_ymd_opt(2026, 10, 1).expect("valid date"),
            city: "Pune".to_owned(),
            transportation: 2.0,
            electricity: 35.0,
            waste: 2.5,
            total: 39.5,
        }
    }

    #[rstest]
    #[case("transportation", Category::Transportation)]
    #[case("ELECTRICITY", Category::Electricity)]
    #[case("wastage", Category::Waste)]
    #[case("waste", Category::Waste)]
    fn categories_parse_path_segments(#[case] raw: &str, #[case] expected: Category) {
        assert_eq!(Category::parse(raw), Some(expected));
    }

    #[rstest]
    fn dashboard_points_format_dates(record: FootprintRecord) {
        let point = DashboardPoint::from(&record);
        assert_eq!(
            serde_json::to_value(point).expect("point serialises"),
            json!({ "date": "01-10-2026", "totalCarbonFootprint": 39.5 })
        );
    }

    #[rstest]
    #[case(Category::Transportation, json!({ "date": "01-10-2026", "transportation": 2.0 }))]
    #[case(Category::Electricity, json!({ "date": "01-10-2026", "electricity": 35.0 }))]
    #[case(Category::Waste, json!({ "date": "01-10-2026", "wastage": 2.5 }))]
    fn category_points_use_category_key(
        record: FootprintRecord,
        #[case] category: Category,
        #[case] expected: serde_json::Value,
    ) {
        let point = CategoryPoint::from_record(category, &record);
        assert_eq!(serde_json::to_value(point).expect("point serialises"), expected);
    }

    #[rstest]
    fn submissions_reject_blank_cities() {
        let err = FootprintSubmission::try_new(
            UserId::new(1).expect("valid id"),
            "Asha",
            "  ",
            MeterReadings::try_new(0.0, 0.0).expect("valid readings"),
        )
        .expect_err("blank city");
        assert_eq!(err.field(), "city");
        assert_eq!(err.code(), "empty_field");
    }

    #[rstest]
    fn records_serialise_iso_dates(record: FootprintRecord) {
        let value = serde_json::to_value(record).expect("record serialises");
        assert_eq!(value["date"], json!("2026-10-01"));
        assert_eq!(value["userId"], json!(3));
    }
}
