//! Quality rubric: characteristics and the subcharacteristics scored under them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::DEFAULT_SUBCHARACTERISTIC_MAX_SCORE;

/// Rubric category with its weight in the global score
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Characteristic {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Usabilidad")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 25.0)]
    pub weight_percentage: f64,
}

/// Scoring dimension of a characteristic
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Subcharacteristic {
    #[schema(example = 4)]
    pub id: i32,
    #[schema(example = 1)]
    pub characteristic_id: i32,
    #[schema(example = "Aprendizaje")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 3)]
    pub max_score: i16,
}

/// A characteristic together with its subcharacteristics
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CharacteristicTree {
    #[serde(flatten)]
    pub characteristic: Characteristic,
    pub subcharacteristics: Vec<Subcharacteristic>,
}

fn default_max_score() -> i16 {
    DEFAULT_SUBCHARACTERISTIC_MAX_SCORE
}

/// Subcharacteristic creation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewSubcharacteristic {
    #[validate(
        length(min = 1, max = 100, message = "El nombre es obligatorio (máx. 100)")
    )]
    #[schema(example = "Aprendizaje")]
    pub name: String,
    pub description: Option<String>,
    /// Defaults to 3; scores are stored in the range 0–3
    #[serde(default = "default_max_score")]
    #[validate(
        range(min = 1, max = 3, message = "El puntaje máximo debe estar entre 1 y 3")
    )]
    #[schema(example = 3)]
    pub max_score: i16,
}

/// Characteristic creation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewCharacteristic {
    #[validate(
        length(min = 1, max = 100, message = "El nombre es obligatorio (máx. 100)")
    )]
    #[schema(example = "Usabilidad")]
    pub name: String,
    pub description: Option<String>,
    #[validate(
        range(min = 0.0, max = 100.0, message = "El peso debe estar entre 0 y 100")
    )]
    #[schema(example = 25.0)]
    pub weight_percentage: f64,
    #[serde(default)]
    #[validate(nested)]
    pub subcharacteristics: Vec<NewSubcharacteristic>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_score_defaults_to_three() {
        let parsed: NewSubcharacteristic =
            serde_json::from_value(serde_json::json!({ "name": "Aprendizaje" })).unwrap();
        assert_eq!(parsed.max_score, 3);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_weight_bounds() {
        let mut request = NewCharacteristic {
            name: "Usabilidad".to_string(),
            description: None,
            weight_percentage: 100.0,
            subcharacteristics: vec![],
        };
        assert!(request.validate().is_ok());

        request.weight_percentage = 100.5;
        assert!(request.validate().is_err());

        request.weight_percentage = -1.0;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_zero_max_score_rejected() {
        let request = NewSubcharacteristic {
            name: "Aprendizaje".to_string(),
            description: None,
            max_score: 0,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_tree_serializes_flat() {
        let tree = CharacteristicTree {
            characteristic: Characteristic {
                id: 1,
                name: "Usabilidad".to_string(),
                description: None,
                weight_percentage: 25.0,
            },
            subcharacteristics: vec![],
        };
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["name"], "Usabilidad");
        assert!(json["subcharacteristics"].as_array().unwrap().is_empty());
    }
}
