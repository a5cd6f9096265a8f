use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const AGE_RANGE: (u32, u32) = (0, 120);
pub const WEIGHT_RANGE: (u32, u32) = (0, 200);
pub const HEIGHT_RANGE: (u32, u32) = (0, 250);

pub const DEFAULT_AGE: u32 = 25;
pub const DEFAULT_WEIGHT_KG: u32 = 70;
pub const DEFAULT_HEIGHT_CM: u32 = 170;

/// Labels in the order the selector shows them
pub const CONDITION_LABELS: [&str; 5] = [
    "None",
    "Diabetes",
    "Hypertension",
    "Cardiovascular Disease",
    "Other",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("unknown condition: {0}")]
    UnknownCondition(String),
}

/// Health condition driving which prompt template is used.
///
/// Only `Other` carries free-text symptoms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    None,
    Diabetes,
    Hypertension,
    CardiovascularDisease,
    Other { symptoms: String },
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::None => "None",
            Condition::Diabetes => "Diabetes",
            Condition::Hypertension => "Hypertension",
            Condition::CardiovascularDisease => "Cardiovascular Disease",
            Condition::Other { .. } => "Other",
        }
    }

    /// Symptoms text, empty for every condition except `Other`
    pub fn symptoms(&self) -> &str {
        match self {
            Condition::Other { symptoms } => symptoms,
            _ => "",
        }
    }

    /// Build a condition from its selector label, attaching symptoms only for `Other`.
    pub fn from_label(label: &str, symptoms: &str) -> Result<Self, ProfileError> {
        match label.trim() {
            "Other" => Ok(Condition::Other {
                symptoms: symptoms.trim().to_string(),
            }),
            other => other.parse(),
        }
    }
}

impl FromStr for Condition {
    type Err = ProfileError;

    /// Parses a label; `Other` parses with empty symptoms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "None" => Ok(Condition::None),
            "Diabetes" => Ok(Condition::Diabetes),
            "Hypertension" => Ok(Condition::Hypertension),
            "Cardiovascular Disease" => Ok(Condition::CardiovascularDisease),
            "Other" => Ok(Condition::Other {
                symptoms: String::new(),
            }),
            unknown => Err(ProfileError::UnknownCondition(unknown.to_string())),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Request-scoped user details collected by the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub age: u32,
    pub weight_kg: u32,
    pub height_cm: u32,
    pub condition: Condition,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: DEFAULT_AGE,
            weight_kg: DEFAULT_WEIGHT_KG,
            height_cm: DEFAULT_HEIGHT_CM,
            condition: Condition::None,
        }
    }
}

/// Raw form submission. Numbers stay strings so bad input falls back to defaults
/// instead of rejecting the whole request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub symptoms: String,
}

impl TryFrom<ProfileForm> for UserProfile {
    type Error = ProfileError;

    fn try_from(form: ProfileForm) -> Result<Self, Self::Error> {
        let condition = if form.condition.trim().is_empty() {
            Condition::None
        } else {
            Condition::from_label(&form.condition, &form.symptoms)?
        };

        Ok(Self {
            age: parse_clamped(&form.age, AGE_RANGE, DEFAULT_AGE),
            weight_kg: parse_clamped(&form.weight, WEIGHT_RANGE, DEFAULT_WEIGHT_KG),
            height_cm: parse_clamped(&form.height, HEIGHT_RANGE, DEFAULT_HEIGHT_CM),
            condition,
        })
    }
}

/// Parse a whole number and clamp it into `range`; unparsable input yields `default`.
pub fn parse_clamped(raw: &str, range: (u32, u32), default: u32) -> u32 {
    let (min, max) = range;
    match raw.trim().parse::<i64>() {
        Ok(value) => value.clamp(i64::from(min), i64::from(max)) as u32,
        Err(_) => match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => {
                value.round().clamp(f64::from(min), f64::from(max)) as u32
            }
            _ => default,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(age: &str, weight: &str, height: &str, condition: &str, symptoms: &str) -> ProfileForm {
        ProfileForm {
            age: age.to_string(),
            weight: weight.to_string(),
            height: height.to_string(),
            condition: condition.to_string(),
            symptoms: symptoms.to_string(),
        }
    }

    #[test]
    fn test_clamps_out_of_range_numbers() {
        let profile = UserProfile::try_from(form("130", "-5", "999", "None", "")).unwrap();
        assert_eq!(profile.age, 120);
        assert_eq!(profile.weight_kg, 0);
        assert_eq!(profile.height_cm, 250);
    }

    #[test]
    fn test_bad_numbers_fall_back_to_defaults() {
        let profile = UserProfile::try_from(form("", "abc", "NaN", "", "")).unwrap();
        assert_eq!(profile, UserProfile::default());
    }

    #[test]
    fn test_fractional_numbers_round() {
        assert_eq!(parse_clamped("70.6", WEIGHT_RANGE, DEFAULT_WEIGHT_KG), 71);
    }

    #[test]
    fn test_symptoms_dropped_unless_other() {
        let profile =
            UserProfile::try_from(form("25", "70", "170", "Diabetes", "thirst")).unwrap();
        assert_eq!(profile.condition, Condition::Diabetes);
        assert_eq!(profile.condition.symptoms(), "");

        let profile =
            UserProfile::try_from(form("25", "70", "170", "Other", " fatigue, thirst ")).unwrap();
        assert_eq!(
            profile.condition,
            Condition::Other {
                symptoms: "fatigue, thirst".to_string()
            }
        );
    }

    #[test]
    fn test_every_label_round_trips() {
        for label in CONDITION_LABELS {
            let condition: Condition = label.parse().unwrap();
            assert_eq!(condition.label(), label);
        }
    }

    #[test]
    fn test_unknown_condition_rejected() {
        let err = UserProfile::try_from(form("25", "70", "170", "Gout", "")).unwrap_err();
        assert_eq!(err, ProfileError::UnknownCondition("Gout".to_string()));
    }
}
