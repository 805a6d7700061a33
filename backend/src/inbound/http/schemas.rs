//! OpenAPI schema definitions for types with hand-written serialisation.
//!
//! [`crate::domain::CategoryPoint`] serialises its value under a key that
//! depends on the requested category, so it cannot derive `ToSchema`. The
//! wrapper below documents the possible shapes for clients.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::CategoryPoint`].
///
/// Exactly one of `transportation`, `electricity` or `wastage` is present,
/// matching the requested category.
#[derive(ToSchema)]
#[schema(as = CategoryPoint)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CategoryPointSchema {
    /// Record date formatted as `dd-MM-yyyy`.
    #[schema(example = "01-10-2026")]
    date: String,
    /// Present for the `transportation` series.
    transportation: Option<f64>,
    /// Present for the `electricity` series.
    electricity: Option<f64>,
    /// Present for the `wastage` series.
    wastage: Option<f64>,
}
