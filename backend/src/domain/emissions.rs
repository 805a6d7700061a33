//! Emissions calculator.
//!
//! Converts the raw inputs of a daily submission into per-category emission
//! values. Everything here is pure; validation of the inputs happens when the
//! [`TransportLeg`], [`WasteEntry`] and [`MeterReadings`] values are built.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::FootprintValidationError;

/// Emission factor applied to every kilogram of wet or dry waste.
pub const WASTE_FACTOR: f64 = 0.5;
/// Emission factor applied to every unit of electricity consumed.
pub const ELECTRICITY_FACTOR: f64 = 0.7;
/// Divisor applied to duration-based transport estimates.
pub const DURATION_DIVISOR: f64 = 10.0;

/// Recognised transport modes and their emission factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Car,
    ElectricCar,
    Train,
    Flight,
    Bus,
    Other,
}

impl TransportMode {
    /// Classify a free-form mode label, ignoring case and surrounding space.
    ///
    /// # Examples
    /// ```
    /// use carbon_backend::domain::TransportMode;
    ///
    /// assert_eq!(TransportMode::classify("Electric Car"), TransportMode::ElectricCar);
    /// assert_eq!(TransportMode::classify("rickshaw"), TransportMode::Other);
    /// ```
    pub fn classify(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "car" => Self::Car,
            "electric car" => Self::ElectricCar,
            "train" => Self::Train,
            "flight" => Self::Flight,
            "bus" => Self::Bus,
            _ => Self::Other,
        }
    }

    /// Emissions per unit of distance.
    pub fn factor(self) -> f64 {
        match self {
            Self::Car | Self::Other => 0.2,
            Self::ElectricCar => 0.1,
            Self::Train => 0.05,
            Self::Flight => 0.3,
            Self::Bus => 0.15,
        }
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, FootprintValidationError> {
    if !value.is_finite() {
        return Err(FootprintValidationError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(FootprintValidationError::Negative { field });
    }
    Ok(value)
}

/// One journey within a daily submission.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportLeg {
    mode: String,
    distance: f64,
    duration: f64,
}

impl TransportLeg {
    /// Validate a leg. Distance and duration must be finite and non-negative.
    pub fn try_new(
        mode: impl Into<String>,
        distance: f64,
        duration: f64,
    ) -> Result<Self, FootprintValidationError> {
        Ok(Self {
            mode: mode.into().trim().to_owned(),
            distance: non_negative("distance", distance)?,
            duration: non_negative("time", duration)?,
        })
    }

    pub fn mode(&self) -> &str {
        self.mode.as_str()
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Emissions for this leg.
    ///
    /// Distance wins when it is non-zero; otherwise the duration is scaled
    /// down by [`DURATION_DIVISOR`].
    pub fn emissions(&self) -> f64 {
        let factor = TransportMode::classify(&self.mode).factor();
        if self.distance != 0.0 {
            self.distance * factor
        } else {
            self.duration * (factor / DURATION_DIVISOR)
        }
    }
}

/// Wet and dry waste recorded for a day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WasteEntry {
    wet: f64,
    dry: f64,
}

impl WasteEntry {
    /// Validate a waste entry. Both masses must be finite and non-negative.
    pub fn try_new(wet: f64, dry: f64) -> Result<Self, FootprintValidationError> {
        Ok(Self {
            wet: non_negative("wetWaste", wet)?,
            dry: non_negative("dryWaste", dry)?,
        })
    }

    pub fn emissions(self) -> f64 {
        (self.wet + self.dry) * WASTE_FACTOR
    }
}

/// Previous and current electricity meter readings.
///
/// A current reading below the previous one is accepted and yields negative
/// electricity emissions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterReadings {
    previous: f64,
    current: f64,
}

impl MeterReadings {
    /// Validate that both readings are finite.
    pub fn try_new(previous: f64, current: f64) -> Result<Self, FootprintValidationError> {
        if !previous.is_finite() {
            return Err(FootprintValidationError::NonFinite { field: "prevWatts" });
        }
        if !current.is_finite() {
            return Err(FootprintValidationError::NonFinite {
                field: "todayWatts",
            });
        }
        Ok(Self { previous, current })
    }

    pub fn emissions(self) -> f64 {
        (self.current - self.previous) * ELECTRICITY_FACTOR
    }
}

/// Per-category emissions and their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmissionsBreakdown {
    #[schema(example = 2.0)]
    pub transportation: f64,
    #[schema(example = 2.5)]
    pub waste: f64,
    #[schema(example = 35.0)]
    pub electricity: f64,
    #[schema(example = 39.5)]
    pub total: f64,
}

impl EmissionsBreakdown {
    /// Compute the breakdown for one day's inputs.
    ///
    /// # Examples
    /// ```
    /// use carbon_backend::domain::{EmissionsBreakdown, MeterReadings, TransportLeg, WasteEntry};
    ///
    /// let legs = [TransportLeg::try_new("car", 10.0, 0.0).expect("valid leg")];
    /// let waste = [WasteEntry::try_new(2.0, 3.0).expect("valid waste")];
    /// let meters = MeterReadings::try_new(100.0, 150.0).expect("valid readings");
    ///
    /// let breakdown = EmissionsBreakdown::calculate(&legs, &waste, meters);
    /// assert!((breakdown.total - 39.5).abs() < 1e-9);
    /// ```
    pub fn calculate(
        legs: &[TransportLeg],
        waste: &[WasteEntry],
        meters: MeterReadings,
    ) -> Self {
        let transportation = legs.iter().map(TransportLeg::emissions).sum::<f64>();
        let waste = waste.iter().copied().map(WasteEntry::emissions).sum::<f64>();
        let electricity = meters.emissions();
        Self {
            transportation,
            waste,
            electricity,
            total: transportation + waste + electricity,
        }
    }

    /// Reject breakdowns whose category sums or total overflowed.
    ///
    /// Each input is finite on its own, but extreme readings can still sum to
    /// infinity; such a total must never be credited.
    ///
    /// # Errors
    ///
    /// Returns [`FootprintValidationError::NonFinite`] naming the first
    /// category (or `total`) that is not finite.
    pub fn ensure_finite(self) -> Result<Self, FootprintValidationError> {
        let checks = [
            ("transportation", self.transportation),
            ("waste", self.waste),
            ("electricity", self.electricity),
            ("total", self.total),
        ];
        match checks.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((field, _)) => Err(FootprintValidationError::NonFinite { field }),
            None => Ok(self),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the emissions calculator.
    use super::*;
    use rstest::rstest;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    fn leg(mode: &str, distance: f64, duration: f64) -> TransportLeg {
        TransportLeg::try_new(mode, distance, duration).expect("valid leg")
    }

    #[rstest]
    #[case("car", 0.2)]
    #[case("CAR", 0.2)]
    #[case("Electric Car", 0.1)]
    #[case("train", 0.05)]
    #[case("flight", 0.3)]
    #[case("bus", 0.15)]
    #[case("hovercraft", 0.2)]
    #[case("", 0.2)]
    fn distance_legs_use_mode_factor(#[case] mode: &str, #[case] factor: f64) {
        assert_close(leg(mode, 12.0, 0.0).emissions(), 12.0 * factor);
    }

    #[rstest]
    #[case("train", 30.0, 30.0 * 0.05 / 10.0)]
    #[case("bus", 60.0, 60.0 * 0.15 / 10.0)]
    #[case("unicycle", 5.0, 5.0 * 0.2 / 10.0)]
    fn duration_only_legs_scale_down(#[case] mode: &str, #[case] minutes: f64, #[case] expected: f64) {
        assert_close(leg(mode, 0.0, minutes).emissions(), expected);
    }

    #[rstest]
    fn distance_takes_precedence_over_duration() {
        assert_close(leg("car", 10.0, 600.0).emissions(), 2.0);
    }

    #[rstest]
    fn idle_leg_emits_nothing() {
        assert_close(leg("car", 0.0, 0.0).emissions(), 0.0);
    }

    #[rstest]
    fn waste_entries_are_additive() {
        let entries = [
            WasteEntry::try_new(2.0, 3.0).expect("valid waste"),
            WasteEntry::try_new(1.0, 0.0).expect("valid waste"),
        ];
        let breakdown = EmissionsBreakdown::calculate(
            &[],
            &entries,
            MeterReadings::try_new(0.0, 0.0).expect("valid readings"),
        );
        assert_close(breakdown.waste, 3.0);
    }

    #[rstest]
    #[case(100.0, 150.0, 35.0)]
    #[case(150.0, 100.0, -35.0)]
    #[case(80.0, 80.0, 0.0)]
    fn electricity_keeps_sign(#[case] previous: f64, #[case] current: f64, #[case] expected: f64) {
        let meters = MeterReadings::try_new(previous, current).expect("valid readings");
        assert_close(meters.emissions(), expected);
    }

    #[rstest]
    fn reference_submission_totals_thirty_nine_and_a_half() {
        let breakdown = EmissionsBreakdown::calculate(
            &[leg("car", 10.0, 0.0)],
            &[WasteEntry::try_new(2.0, 3.0).expect("valid waste")],
            MeterReadings::try_new(100.0, 150.0).expect("valid readings"),
        );
        assert_close(breakdown.transportation, 2.0);
        assert_close(breakdown.waste, 2.5);
        assert_close(breakdown.electricity, 35.0);
        assert_close(breakdown.total, 39.5);
    }

    #[rstest]
    fn overflowing_electricity_is_rejected() {
        let breakdown = EmissionsBreakdown::calculate(
            &[],
            &[],
            MeterReadings::try_new(-f64::MAX, f64::MAX).expect("finite readings"),
        );
        assert_eq!(
            breakdown.ensure_finite(),
            Err(FootprintValidationError::NonFinite { field: "electricity" })
        );
    }

    #[rstest]
    fn overflowing_waste_is_rejected() {
        let breakdown = EmissionsBreakdown::calculate(
            &[],
            &[WasteEntry::try_new(f64::MAX, f64::MAX).expect("finite waste")],
            MeterReadings::try_new(0.0, 0.0).expect("valid readings"),
        );
        assert_eq!(
            breakdown.ensure_finite().map_err(|err| err.field()),
            Err("waste")
        );
    }

    #[rstest]
    fn overflowing_total_is_rejected_when_categories_are_finite() {
        let breakdown = EmissionsBreakdown::calculate(
            &[],
            &[
                WasteEntry::try_new(f64::MAX, 0.0).expect("finite waste"),
                WasteEntry::try_new(f64::MAX, 0.0).expect("finite waste"),
            ],
            MeterReadings::try_new(0.0, f64::MAX).expect("finite readings"),
        );
        assert!(breakdown.waste.is_finite() && breakdown.electricity.is_finite());
        assert_eq!(
            breakdown.ensure_finite().map_err(|err| err.field()),
            Err("total")
        );
    }

    #[rstest]
    fn ordinary_breakdowns_pass_the_finite_check() {
        let breakdown = EmissionsBreakdown::calculate(
            &[leg("car", 10.0, 0.0)],
            &[],
            MeterReadings::try_new(100.0, 150.0).expect("valid readings"),
        );
        assert_eq!(breakdown.ensure_finite(), Ok(breakdown));
    }

    #[rstest]
    #[case(-1.0, 0.0, "distance")]
    #[case(0.0, -1.0, "time")]
    #[case(f64::NAN, 0.0, "distance")]
    #[case(0.0, f64::INFINITY, "time")]
    fn legs_reject_invalid_measurements(
        #[case] distance: f64,
        #[case] duration: f64,
        #[case] field: &str,
    ) {
        let err = TransportLeg::try_new("car", distance, duration).expect_err("invalid leg");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn waste_rejects_negative_mass() {
        let err = WasteEntry::try_new(1.0, -0.5).expect_err("negative dry waste");
        assert_eq!(err, FootprintValidationError::Negative { field: "dryWaste" });
    }

    #[rstest]
    fn meters_reject_non_finite_readings() {
        let err = MeterReadings::try_new(f64::NAN, 1.0).expect_err("NaN reading");
        assert_eq!(err.field(), "prevWatts");
    }
}
