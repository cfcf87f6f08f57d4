//! Assessment pipeline
//!
//! Turns raw form fields into a validated `Measurement`, then runs
//! BMI → rule classifier → predictor → recommendations and bundles the
//! results. Nothing here outlives a single request.

use serde::{Deserialize, Serialize};

use crate::bmi::{calculate_bmi, classify_bmi, BmiCategory};
use crate::errors::AssessmentError;
use crate::predictor::{CategoryPredictor, PredictedCategory};
use crate::recommendations::build_recommendations;

// ============================================================================
// Input Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse the exact form values `male` / `female`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }

    /// Numeric code used as a predictor feature (male = 0, female = 1).
    pub fn code(self) -> u8 {
        match self {
            Gender::Male => 0,
            Gender::Female => 1,
        }
    }
}

/// Raw form submission, every field as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MeasurementForm {
    pub weight: Option<String>,
    pub height: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
}

/// Validated body metrics: weight and height positive, age non-zero, and a
/// finite BMI. Fields are private, so a value can only come from
/// `Measurement::new` or `MeasurementForm::validate`.
///
/// ```compile_fail
/// use myfit_ai::{Gender, Measurement};
///
/// let unchecked = Measurement { weight_kg: 70.0, height_cm: 0.0, age: 0, gender: Gender::Male };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    weight_kg: f64,
    height_cm: f64,
    age: u64,
    gender: Gender,
}

impl Measurement {
    pub fn new(weight_kg: f64, height_cm: f64, age: u64, gender: Gender) -> Result<Self, AssessmentError> {
        if !is_positive(weight_kg) || !is_positive(height_cm) || age == 0 {
            return Err(AssessmentError::OutOfRange);
        }
        // Finite inputs can still overflow, e.g. 1e308 kg at 1e-300 cm
        if !calculate_bmi(weight_kg, height_cm).is_finite() {
            return Err(AssessmentError::OutOfRange);
        }
        Ok(Self {
            weight_kg,
            height_cm,
            age,
            gender,
        })
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }
}

// NaN is not positive
#[inline]
fn is_positive(value: f64) -> bool {
    value > 0.0
}

// ============================================================================
// Parsing & Validation
// ============================================================================

/// Fields after type parsing, before range checks.
#[derive(Debug, Clone, PartialEq)]
struct ParsedFields {
    weight: f64,
    height: f64,
    age: i64,
    gender: String,
}

fn parse_real(field: &'static str, raw: Option<&str>) -> Result<f64, AssessmentError> {
    let value: f64 = raw
        .unwrap_or("0")
        .trim()
        .parse()
        .map_err(|_| AssessmentError::InvalidInput { field })?;
    if !value.is_finite() {
        return Err(AssessmentError::InvalidInput { field });
    }
    Ok(value)
}

fn parse_integer(field: &'static str, raw: Option<&str>) -> Result<i64, AssessmentError> {
    raw.unwrap_or("0")
        .trim()
        .parse()
        .map_err(|_| AssessmentError::InvalidInput { field })
}

impl MeasurementForm {
    pub fn new(weight: &str, height: &str, age: &str, gender: &str) -> Self {
        Self {
            weight: Some(weight.to_string()),
            height: Some(height.to_string()),
            age: Some(age.to_string()),
            gender: Some(gender.to_string()),
        }
    }

    /// Parse every field, then range-check. Parse failures take precedence
    /// over range violations. Missing numbers count as `0` and a missing
    /// gender as `male`.
    pub fn validate(&self) -> Result<Measurement, AssessmentError> {
        let parsed = ParsedFields {
            weight: parse_real("weight", self.weight.as_deref())?,
            height: parse_real("height", self.height.as_deref())?,
            age: parse_integer("age", self.age.as_deref())?,
            gender: self.gender.clone().unwrap_or_else(|| "male".to_string()),
        };

        let gender = Gender::parse(&parsed.gender).ok_or(AssessmentError::OutOfRange)?;
        let age = u64::try_from(parsed.age).map_err(|_| AssessmentError::OutOfRange)?;

        Measurement::new(parsed.weight, parsed.height, age, gender)
    }
}

// ============================================================================
// Result Bundle
// ============================================================================

/// Everything computed for one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub bmi: f64,
    pub category: BmiCategory,
    pub ai_category: PredictedCategory,
    pub recommendations: Vec<&'static str>,
}

/// Run the full pipeline on an already validated measurement.
pub(crate) fn assess_measurement(measurement: &Measurement, predictor: &CategoryPredictor) -> Assessment {
    let bmi = calculate_bmi(measurement.weight_kg(), measurement.height_cm());
    let category = classify_bmi(bmi);
    let ai_category = predictor.predict(measurement);
    let recommendations = build_recommendations(category, measurement.age(), measurement.gender());

    Assessment {
        bmi,
        category,
        ai_category,
        recommendations,
    }
}

/// Validate a raw submission and assess it. Either every step runs or none does.
pub fn assess(form: &MeasurementForm, predictor: &CategoryPredictor) -> Result<Assessment, AssessmentError> {
    let measurement = form.validate().map_err(|e| {
        tracing::warn!("Rejected submission: {:?}", e);
        e
    })?;

    let assessment = assess_measurement(&measurement, predictor);
    tracing::debug!(
        "Assessed BMI {} ({}, predicted {}, {} recommendations)",
        assessment.bmi,
        assessment.category,
        assessment.ai_category,
        assessment.recommendations.len()
    );

    Ok(assessment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn predictor() -> CategoryPredictor {
        CategoryPredictor::from_training_set().unwrap()
    }

    #[test]
    fn test_scenario_normal_male() {
        let result = assess(&MeasurementForm::new("70", "175", "30", "male"), &predictor()).unwrap();
        assert_relative_eq!(result.bmi, 22.86, epsilon = 1e-9);
        assert_eq!(result.category, BmiCategory::NormalWeight);
        assert_eq!(result.recommendations.len(), 4);
    }

    #[test]
    fn test_scenario_obese_older_female() {
        let result = assess(&MeasurementForm::new("110", "165", "50", "female"), &predictor()).unwrap();
        assert_relative_eq!(result.bmi, 40.4, epsilon = 1e-9);
        assert_eq!(result.category, BmiCategory::Obese);
        assert_eq!(result.recommendations.len(), 8);
    }

    #[test]
    fn test_scenario_normal_female() {
        let result = assess(&MeasurementForm::new("50", "160", "25", "female"), &predictor()).unwrap();
        assert_relative_eq!(result.bmi, 19.53, epsilon = 1e-9);
        assert_eq!(result.category, BmiCategory::NormalWeight);
        assert_eq!(result.recommendations.len(), 5);
    }

    #[test]
    fn test_out_of_range_values() {
        let predictor = predictor();
        let cases = [
            MeasurementForm::new("0", "170", "40", "male"),
            MeasurementForm::new("70", "0", "40", "male"),
            MeasurementForm::new("70", "170", "0", "male"),
            MeasurementForm::new("-70", "170", "40", "male"),
            MeasurementForm::new("70", "170", "-3", "male"),
            MeasurementForm::new("70", "170", "40", "other"),
            MeasurementForm::new("70", "170", "40", "Male"),
        ];
        for form in &cases {
            assert_eq!(assess(form, &predictor), Err(AssessmentError::OutOfRange), "{:?}", form);
        }
    }

    #[test]
    fn test_unparsable_values() {
        let predictor = predictor();
        let cases = [
            (MeasurementForm::new("abc", "170", "40", "male"), "weight"),
            (MeasurementForm::new("70", "", "40", "male"), "height"),
            (MeasurementForm::new("70", "170", "40.5", "male"), "age"),
            (MeasurementForm::new("nan", "170", "40", "male"), "weight"),
            (MeasurementForm::new("70", "inf", "40", "male"), "height"),
        ];
        for (form, field) in &cases {
            assert_eq!(
                assess(form, &predictor),
                Err(AssessmentError::InvalidInput { field: *field }),
                "{:?}",
                form
            );
        }
    }

    #[test]
    fn test_parse_error_wins_over_range_error() {
        let form = MeasurementForm::new("0", "170", "abc", "other");
        assert_eq!(form.validate(), Err(AssessmentError::InvalidInput { field: "age" }));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let missing_weight = MeasurementForm {
            weight: None,
            ..MeasurementForm::new("70", "170", "40", "male")
        };
        assert_eq!(missing_weight.validate(), Err(AssessmentError::OutOfRange));

        let missing_gender = MeasurementForm {
            gender: None,
            ..MeasurementForm::new("70", "170", "40", "female")
        };
        assert_eq!(missing_gender.validate().unwrap().gender(), Gender::Male);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let m = MeasurementForm::new(" 70 ", "175\n", " 30", "male").validate().unwrap();
        assert_relative_eq!(m.weight_kg(), 70.0);
        assert_eq!(m.age(), 30);
    }

    #[test]
    fn test_identical_input_yields_identical_bundle() {
        let predictor = predictor();
        let form = MeasurementForm::new("82.5", "178", "61", "female");
        assert_eq!(assess(&form, &predictor), assess(&form, &predictor));
    }

    #[test]
    fn test_gender_codes() {
        assert_eq!(Gender::Male.code(), 0);
        assert_eq!(Gender::Female.code(), 1);
        assert_eq!(Gender::parse("female"), Some(Gender::Female));
        assert_eq!(Gender::parse(""), None);
    }

    #[test]
    fn test_assessment_serializes_labels() {
        let result = assess(&MeasurementForm::new("70", "175", "30", "male"), &predictor()).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["category"], "Normal weight");
        assert!(json["ai_category"].is_string());
        assert_eq!(json["recommendations"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_overflowing_bmi_is_out_of_range() {
        let form = MeasurementForm::new("1e308", "1e-300", "30", "male");
        assert_eq!(assess(&form, &predictor()), Err(AssessmentError::OutOfRange));
        assert_eq!(
            Measurement::new(1e308, 1e-300, 30, Gender::Male),
            Err(AssessmentError::OutOfRange)
        );
    }

    #[test]
    fn test_constructor_rejects_what_validation_rejects() {
        assert_eq!(Measurement::new(70.0, 0.0, 30, Gender::Male), Err(AssessmentError::OutOfRange));
        assert_eq!(Measurement::new(70.0, 175.0, 0, Gender::Male), Err(AssessmentError::OutOfRange));
        assert_eq!(Measurement::new(f64::NAN, 175.0, 30, Gender::Male), Err(AssessmentError::OutOfRange));

        let m = Measurement::new(70.0, 175.0, 30, Gender::Female).unwrap();
        let result = assess_measurement(&m, &predictor());
        assert!(result.bmi.is_finite());
        assert_eq!(result.recommendations.len(), 5);
    }

    #[test]
    fn test_age_beyond_u32_is_accepted() {
        let m = MeasurementForm::new("70", "175", "5000000000", "male").validate().unwrap();
        assert_eq!(m.age(), 5_000_000_000);
    }
}
