//! Toy Category Predictor
//!
//! An `aprender` CART decision tree (Gini impurity) fit once at startup on
//! four fixed example rows. With one sample per class the fitted tree
//! memorises the training rows and splits the rest of feature space at
//! midpoints between them, so its decision boundaries carry no real meaning.
//!
//! Features, in order: weight (kg), height (cm), age (years), gender code
//! (0 = male, 1 = female).

use aprender::primitives::Matrix;
use aprender::tree::DecisionTreeClassifier;
use serde::Serialize;

use crate::assessment::{Gender, Measurement};
use crate::errors::PredictorError;

// ============================================================================
// Predicted Labels
// ============================================================================

/// Category produced by the predictor.
///
/// Labels are lowercase and use "normal" rather than "Normal weight"; this
/// differs from `BmiCategory` and is left as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictedCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl PredictedCategory {
    pub const ALL: [PredictedCategory; 4] = [
        PredictedCategory::Underweight,
        PredictedCategory::Normal,
        PredictedCategory::Overweight,
        PredictedCategory::Obese,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PredictedCategory::Underweight => "underweight",
            PredictedCategory::Normal => "normal",
            PredictedCategory::Overweight => "overweight",
            PredictedCategory::Obese => "obese",
        }
    }

    /// Label with its first letter upper-cased, for display.
    pub fn display_label(self) -> &'static str {
        match self {
            PredictedCategory::Underweight => "Underweight",
            PredictedCategory::Normal => "Normal",
            PredictedCategory::Overweight => "Overweight",
            PredictedCategory::Obese => "Obese",
        }
    }

    fn class_index(self) -> usize {
        match self {
            PredictedCategory::Underweight => 0,
            PredictedCategory::Normal => 1,
            PredictedCategory::Overweight => 2,
            PredictedCategory::Obese => 3,
        }
    }
}

impl std::fmt::Display for PredictedCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Training Data
// ============================================================================

const N_FEATURES: usize = 4;

/// Fixed training rows: ([weight, height, age, gender_code], label).
pub const TRAINING_SET: [([f32; N_FEATURES], PredictedCategory); 4] = [
    ([50.0, 160.0, 25.0, 1.0], PredictedCategory::Underweight),
    ([70.0, 175.0, 30.0, 0.0], PredictedCategory::Normal),
    ([90.0, 180.0, 45.0, 0.0], PredictedCategory::Overweight),
    ([110.0, 165.0, 50.0, 1.0], PredictedCategory::Obese),
];

/// Build a feature matrix one row per sample.
fn feature_matrix(rows: &[[f32; N_FEATURES]]) -> Matrix<f32> {
    let mut matrix = Matrix::zeros(rows.len(), N_FEATURES);
    for (row_idx, row) in rows.iter().enumerate() {
        for (col, &value) in row.iter().enumerate() {
            matrix.set(row_idx, col, value);
        }
    }
    matrix
}

// ============================================================================
// Category Predictor
// ============================================================================

/// Decision tree fit on `TRAINING_SET`, shared read-only across requests.
#[derive(Debug, Clone)]
pub struct CategoryPredictor {
    tree: DecisionTreeClassifier,
}

impl CategoryPredictor {
    /// Fit the predictor on the fixed four-row training set.
    pub fn from_training_set() -> Result<Self, PredictorError> {
        let rows: Vec<[f32; N_FEATURES]> = TRAINING_SET.iter().map(|(row, _)| *row).collect();
        let labels: Vec<usize> = TRAINING_SET
            .iter()
            .map(|(_, category)| category.class_index())
            .collect();

        let mut tree = DecisionTreeClassifier::new();
        tree.fit(&feature_matrix(&rows), &labels)?;
        tracing::info!("Fitted category predictor on {} samples", rows.len());

        Ok(Self { tree })
    }

    pub fn predict(&self, measurement: &Measurement) -> PredictedCategory {
        self.predict_raw(
            measurement.weight_kg(),
            measurement.height_cm(),
            measurement.age(),
            measurement.gender(),
        )
    }

    /// Predict from raw feature values.
    pub fn predict_raw(&self, weight_kg: f64, height_cm: f64, age: u64, gender: Gender) -> PredictedCategory {
        let features = [
            weight_kg as f32,
            height_cm as f32,
            age as f32,
            f32::from(gender.code()),
        ];
        let predicted = self.tree.predict(&feature_matrix(&[features]));
        // Leaves only carry labels produced by `class_index`
        predicted
            .first()
            .and_then(|&idx| PredictedCategory::ALL.get(idx).copied())
            .unwrap_or(PredictedCategory::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predictor() -> CategoryPredictor {
        CategoryPredictor::from_training_set().unwrap()
    }

    #[test]
    fn test_training_rows_predict_their_own_label() {
        let predictor = predictor();
        for (row, expected) in TRAINING_SET.iter() {
            let gender = if row[3] == 0.0 { Gender::Male } else { Gender::Female };
            let predicted =
                predictor.predict_raw(f64::from(row[0]), f64::from(row[1]), row[2] as u64, gender);
            assert_eq!(predicted, *expected, "row {:?}", row);
        }
    }

    #[test]
    fn test_predictions_are_valid_and_deterministic() {
        let a = predictor();
        let b = predictor();
        for weight in [1.0, 45.0, 68.0, 85.0, 140.0, 500.0] {
            for gender in [Gender::Male, Gender::Female] {
                let first = a.predict_raw(weight, 170.0, 40, gender);
                assert!(PredictedCategory::ALL.contains(&first));
                assert_eq!(first, a.predict_raw(weight, 170.0, 40, gender));
                assert_eq!(first, b.predict_raw(weight, 170.0, 40, gender));
            }
        }
    }

    #[test]
    fn test_huge_age_still_predicts() {
        let predicted = predictor().predict_raw(70.0, 175.0, 5_000_000_000, Gender::Male);
        assert!(PredictedCategory::ALL.contains(&predicted));
    }

    #[test]
    fn test_feature_matrix_layout() {
        let matrix = feature_matrix(&[[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]]);
        assert_eq!(matrix.shape(), (2, N_FEATURES));
        assert_eq!(matrix.get(1, 2), 7.0);
    }

    #[test]
    fn test_labels_keep_lowercase_vocabulary() {
        let labels: Vec<&str> = PredictedCategory::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["underweight", "normal", "overweight", "obese"]);
        assert_eq!(PredictedCategory::Normal.display_label(), "Normal");
        assert_eq!(serde_json::to_string(&PredictedCategory::Normal).unwrap(), "\"normal\"");
    }
}
