//! BMI calculation and threshold classification.

use serde::Serialize;

// ============================================================================
// Thresholds
// ============================================================================

/// Lower bound (inclusive) of the normal-weight band.
pub const NORMAL_LOWER: f64 = 18.5;
/// Lower bound (inclusive) of the overweight band.
pub const OVERWEIGHT_LOWER: f64 = 25.0;
/// Lower bound (inclusive) of the obese band.
pub const OBESE_LOWER: f64 = 30.0;

/// Rule-based BMI category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BmiCategory {
    #[serde(rename = "Underweight")]
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obese")]
    Obese,
}

impl BmiCategory {
    /// All categories in chart order.
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::NormalWeight,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Position of this category in `ALL` (the chart's dataset index).
    pub fn chart_index(self) -> usize {
        match self {
            BmiCategory::Underweight => 0,
            BmiCategory::NormalWeight => 1,
            BmiCategory::Overweight => 2,
            BmiCategory::Obese => 3,
        }
    }

    pub fn is_healthy(self) -> bool {
        self == BmiCategory::NormalWeight
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Calculation
// ============================================================================

/// Compute BMI from weight (kg) and height (cm), rounded to 2 decimal places.
///
/// Callers must pass positive values; zero height is not guarded here.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    round_to(bmi, 2)
}

#[inline]
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Classify a BMI value using half-open threshold bands.
/// - BMI < 18.5: Underweight
/// - 18.5 ≤ BMI < 25: Normal weight
/// - 25 ≤ BMI < 30: Overweight
/// - otherwise: Obese
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < NORMAL_LOWER {
        BmiCategory::Underweight
    } else if bmi < OVERWEIGHT_LOWER {
        BmiCategory::NormalWeight
    } else if bmi < OBESE_LOWER {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}
