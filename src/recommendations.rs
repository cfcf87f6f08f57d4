//! Recommendation Builder
//!
//! Rule-derived advice. A fixed baseline is always returned first; each rule
//! below appends independently, in the order listed.

use crate::assessment::Gender;
use crate::bmi::BmiCategory;

/// Always included, in this order.
pub const BASELINE: [&str; 4] = [
    "Drink plenty of water.",
    "Eat a balanced diet rich in fruits and vegetables.",
    "Avoid sugary and processed foods.",
    "Exercise regularly - at least 150 minutes per week.",
];

pub const UNDERWEIGHT_TIP: &str =
    "Increase calorie intake with healthy fats and proteins like nuts, dairy, and lean meats.";
pub const LIMIT_FAT_SUGAR_TIP: &str = "Limit high-fat and high-sugar foods.";
pub const CONSULT_PROVIDER_TIP: &str =
    "Consider consulting a healthcare provider for personalized advice.";
pub const BONE_HEALTH_TIP: &str =
    "Ensure adequate calcium and vitamin D intake to support bone health.";
pub const IRON_TIP: &str = "Include iron-rich foods like spinach, lentils, and lean red meat.";

/// Age from which the bone-health tip applies.
pub const BONE_HEALTH_AGE: u64 = 50;

/// Build the ordered recommendation list (4 to 8 entries).
pub fn build_recommendations(category: BmiCategory, age: u64, gender: Gender) -> Vec<&'static str> {
    let mut recs = Vec::with_capacity(8);
    recs.extend_from_slice(&BASELINE);

    match category {
        BmiCategory::Underweight => recs.push(UNDERWEIGHT_TIP),
        BmiCategory::Overweight | BmiCategory::Obese => {
            recs.push(LIMIT_FAT_SUGAR_TIP);
            recs.push(CONSULT_PROVIDER_TIP);
        }
        BmiCategory::NormalWeight => {}
    }

    if age >= BONE_HEALTH_AGE {
        recs.push(BONE_HEALTH_TIP);
    }

    if gender == Gender::Female {
        recs.push(IRON_TIP);
    }

    recs
}
