//! Body metrics derived from raw anthropometric measurements.
//!
//! All formulas are closed-form and evaluated in `f64`. Every output is rounded
//! to two decimal places with [`round2`]. Body fat is computed from the
//! unrounded BMI, so the rounded `bmi` field and the body-fat estimate may
//! disagree in the last digit with a hand calculation done on rounded values.
//!
//! # Formulas
//!
//! ```text
//! bmi                  = weight / (height / 100)^2
//! waist_to_hip_ratio   = waist / hip
//! body_fat_percentage  = 1.20 * bmi + 0.23 * age - 16.2   (male)
//!                        1.20 * bmi + 0.23 * age - 5.4    (female)
//! body_surface_area    = sqrt(height * weight / 3600)      (Mosteller)
//! basal_metabolic_rate = 88.36 + 13.4 * weight + 4.8 * height - 5.7 * age   (male)
//!                        447.6 + 9.2 * weight + 3.1 * height - 4.3 * age    (female)
//! waist_to_height_ratio = waist / height
//! ```

pub mod age;

pub use age::{age_on, age_today, validate_birthdate, AgeError};

use serde::{Deserialize, Serialize};

/// Biological sex, used only to select a formula branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Male formula branch.
    Male,
    /// Female formula branch.
    Female,
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

impl std::str::FromStr for Sex {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(MetricsError::UnknownSex(other.to_string())),
        }
    }
}

/// Raw body measurements in centimetres and kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurement {
    /// Height in centimetres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    /// Waist circumference in centimetres.
    pub waist: f64,
    /// Hip circumference in centimetres.
    pub hip: f64,
    /// Chest circumference in centimetres. Logged only, never used in a formula.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest: Option<f64>,
}

impl BodyMeasurement {
    /// Create a measurement without a chest value.
    pub fn new(height: f64, weight: f64, waist: f64, hip: f64) -> Self {
        Self {
            height,
            weight,
            waist,
            hip,
            chest: None,
        }
    }

    /// Attach a chest circumference.
    pub fn with_chest(mut self, chest: f64) -> Self {
        self.chest = Some(chest);
        self
    }

    /// Check that every formula input is finite and strictly positive.
    pub fn validate(&self) -> Result<(), MetricsError> {
        let fields = [
            ("height", self.height),
            ("weight", self.weight),
            ("waist", self.waist),
            ("hip", self.hip),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(MetricsError::InvalidMeasurement { field, value });
            }
        }
        if let Some(chest) = self.chest {
            if !chest.is_finite() || chest <= 0.0 {
                return Err(MetricsError::InvalidMeasurement {
                    field: "chest",
                    value: chest,
                });
            }
        }
        Ok(())
    }
}

/// Derived health indicators, each rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMetrics {
    /// Weight echoed from the input.
    pub weight: f64,
    /// Body mass index (kg/m²).
    pub bmi: f64,
    /// Waist circumference divided by hip circumference.
    pub waist_to_hip_ratio: f64,
    /// Estimated body fat percentage.
    pub body_fat_percentage: f64,
    /// Body surface area in m² (Mosteller).
    pub body_surface_area: f64,
    /// Basal metabolic rate in kcal/day (Harris–Benedict).
    pub basal_metabolic_rate: f64,
    /// Waist circumference divided by height.
    pub waist_to_height_ratio: f64,
}

/// Error type for metric computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricsError {
    /// A measurement was zero, negative, or not a finite number.
    #[error("Invalid {field}: {value} (must be a positive number)")]
    InvalidMeasurement {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Sex string was neither male nor female.
    #[error("Unknown sex '{0}': expected male or female")]
    UnknownSex(String),
}

/// Round to two decimal places, halves away from zero.
///
/// Non-finite values pass through unchanged.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute all metrics for a measurement.
///
/// This does not validate its input: a zero height or hip yields `inf` or
/// `NaN` in the affected fields. Use [`try_compute_metrics`] when the input
/// comes from a user.
pub fn compute_metrics(measurement: &BodyMeasurement, age: u32, sex: Sex) -> BodyMetrics {
    let BodyMeasurement {
        height,
        weight,
        waist,
        hip,
        ..
    } = *measurement;
    let age = f64::from(age);

    let height_m = height / 100.0;
    let bmi = weight / (height_m * height_m);

    let body_fat = match sex {
        Sex::Male => 1.20 * bmi + 0.23 * age - 16.2,
        Sex::Female => 1.20 * bmi + 0.23 * age - 5.4,
    };

    let bmr = match sex {
        Sex::Male => 88.36 + 13.4 * weight + 4.8 * height - 5.7 * age,
        Sex::Female => 447.6 + 9.2 * weight + 3.1 * height - 4.3 * age,
    };

    BodyMetrics {
        weight: round2(weight),
        bmi: round2(bmi),
        waist_to_hip_ratio: round2(waist / hip),
        body_fat_percentage: round2(body_fat),
        body_surface_area: round2(((height * weight) / 3600.0).sqrt()),
        basal_metabolic_rate: round2(bmr),
        waist_to_height_ratio: round2(waist / height),
    }
}

/// Validate the measurement, then compute its metrics.
pub fn try_compute_metrics(
    measurement: &BodyMeasurement,
    age: u32,
    sex: Sex,
) -> Result<BodyMetrics, MetricsError> {
    measurement.validate()?;
    Ok(compute_metrics(measurement, age, sex))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn reference() -> BodyMeasurement {
        BodyMeasurement::new(170.0, 70.0, 80.0, 90.0)
    }

    #[test]
    fn test_bmi_and_waist_to_height() {
        let m = compute_metrics(&reference(), 30, Sex::Male);
        assert_close(m.bmi, 24.22);
        assert_close(m.waist_to_height_ratio, 0.47);
        assert_close(m.weight, 70.0);
    }

    #[test]
    fn test_waist_to_hip_ratio() {
        let m = compute_metrics(&reference(), 30, Sex::Male);
        assert_close(m.waist_to_hip_ratio, 0.89);
    }

    #[test]
    fn test_body_fat_female_uses_unrounded_bmi() {
        // 1.20 * 24.2214... + 6.9 - 5.4 = 30.5657...; the rounded bmi would give 30.56
        let m = compute_metrics(&reference(), 30, Sex::Female);
        assert_close(m.body_fat_percentage, 30.57);
    }

    #[test]
    fn test_body_fat_male() {
        let m = compute_metrics(&reference(), 30, Sex::Male);
        assert_close(m.body_fat_percentage, 19.77);
    }

    #[test]
    fn test_body_surface_area_mosteller() {
        let m = compute_metrics(&reference(), 30, Sex::Male);
        assert_close(m.body_surface_area, 1.82);
    }

    #[test]
    fn test_basal_metabolic_rate_by_sex() {
        let male = compute_metrics(&reference(), 30, Sex::Male);
        assert_close(male.basal_metabolic_rate, 1671.36);

        let female = compute_metrics(&reference(), 30, Sex::Female);
        assert_close(female.basal_metabolic_rate, 1489.6);
    }

    #[test]
    fn test_sex_only_changes_sex_dependent_fields() {
        let male = compute_metrics(&reference(), 45, Sex::Male);
        let female = compute_metrics(&reference(), 45, Sex::Female);
        assert_eq!(male.bmi, female.bmi);
        assert_eq!(male.waist_to_hip_ratio, female.waist_to_hip_ratio);
        assert_eq!(male.body_surface_area, female.body_surface_area);
        assert_eq!(male.waist_to_height_ratio, female.waist_to_height_ratio);
        assert_ne!(male.body_fat_percentage, female.body_fat_percentage);
        assert_ne!(male.basal_metabolic_rate, female.basal_metabolic_rate);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let a = compute_metrics(&reference(), 30, Sex::Female);
        let b = compute_metrics(&reference(), 30, Sex::Female);
        assert_eq!(a, b);
    }

    #[test]
    fn test_valid_inputs_give_finite_non_negative_ratios() {
        for height in [120.0, 155.5, 170.0, 201.0] {
            for weight in [35.0, 62.3, 70.0, 140.0] {
                for (waist, hip) in [(55.0, 80.0), (80.0, 90.0), (120.0, 110.0)] {
                    let m = compute_metrics(
                        &BodyMeasurement::new(height, weight, waist, hip),
                        30,
                        Sex::Male,
                    );
                    for value in [
                        m.bmi,
                        m.waist_to_hip_ratio,
                        m.body_surface_area,
                        m.waist_to_height_ratio,
                    ] {
                        assert!(value.is_finite() && value >= 0.0, "{m:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_zero_height_propagates_non_finite() {
        let m = compute_metrics(&BodyMeasurement::new(0.0, 70.0, 80.0, 90.0), 30, Sex::Male);
        assert!(m.bmi.is_infinite());
        assert!(m.waist_to_height_ratio.is_infinite());
    }

    #[test]
    fn test_zero_hip_gives_nan_ratio_when_waist_is_zero() {
        let m = compute_metrics(&BodyMeasurement::new(170.0, 70.0, 0.0, 0.0), 30, Sex::Male);
        assert!(m.waist_to_hip_ratio.is_nan());
    }

    #[test]
    fn test_try_compute_rejects_non_positive() {
        let err = try_compute_metrics(&BodyMeasurement::new(170.0, 0.0, 80.0, 90.0), 30, Sex::Male)
            .unwrap_err();
        assert_eq!(
            err,
            MetricsError::InvalidMeasurement {
                field: "weight",
                value: 0.0
            }
        );
    }

    #[test]
    fn test_try_compute_rejects_nan_and_negative_chest() {
        let nan = BodyMeasurement::new(f64::NAN, 70.0, 80.0, 90.0);
        assert!(matches!(
            try_compute_metrics(&nan, 30, Sex::Male),
            Err(MetricsError::InvalidMeasurement { field: "height", .. })
        ));

        let chest = reference().with_chest(-1.0);
        assert!(matches!(
            try_compute_metrics(&chest, 30, Sex::Male),
            Err(MetricsError::InvalidMeasurement { field: "chest", .. })
        ));
    }

    #[test]
    fn test_try_compute_matches_unchecked_on_valid_input() {
        let checked = try_compute_metrics(&reference(), 30, Sex::Male).unwrap();
        assert_eq!(checked, compute_metrics(&reference(), 30, Sex::Male));
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_close(round2(1.005_000_1), 1.01);
        assert_close(round2(2.675_000_1), 2.68);
        assert_close(round2(-1.255_000_1), -1.26);
        assert!(round2(f64::NAN).is_nan());
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_sex_from_str() {
        assert_eq!("male".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("F".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!(" Female ".parse::<Sex>().unwrap(), Sex::Female);
        assert!(matches!(
            "other".parse::<Sex>(),
            Err(MetricsError::UnknownSex(_))
        ));
    }

    #[test]
    fn test_metrics_serialize_camel_case() {
        let m = compute_metrics(&reference(), 30, Sex::Male);
        let json = serde_json::to_value(m).unwrap();
        assert_eq!(json["bmi"], 24.22);
        assert_eq!(json["waistToHipRatio"], 0.89);
        assert!(json.get("bodyFatPercentage").is_some());
        assert!(json.get("basalMetabolicRate").is_some());
    }

    #[test]
    fn test_measurement_omits_missing_chest() {
        let json = serde_json::to_value(reference()).unwrap();
        assert!(json.get("chest").is_none());
        let json = serde_json::to_value(reference().with_chest(100.0)).unwrap();
        assert_eq!(json["chest"], 100.0);
    }
}
