//! Quality evaluations of a project.
//!
//! Detail and summary rows carry copies of the rubric names, weights and max
//! scores as they were when the evaluation was recorded, so editing or
//! deleting the rubric later leaves past evaluations untouched. All scores and
//! percentages are supplied by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// One scoring pass of a project
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Evaluation {
    pub id: i32,
    pub software_id: i32,
    pub date: DateTime<Utc>,
    #[schema(example = 82.5)]
    pub global_score_percentage: Option<f64>,
}

/// Score given to one subcharacteristic
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EvaluationDetail {
    pub id: i32,
    pub evaluation_id: i32,
    /// None once the rubric row is deleted
    pub subcharacteristic_id: Option<i32>,
    #[schema(example = 2)]
    pub score: i16,
    pub comment: Option<String>,
    pub subcharacteristic_name: String,
    pub subcharacteristic_description: Option<String>,
    pub max_score: i16,
}

/// Rollup of one characteristic within an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CharacteristicSummary {
    pub id: i32,
    pub evaluation_id: i32,
    /// None once the rubric row is deleted
    pub characteristic_id: Option<i32>,
    pub value: i32,
    pub max_value: i32,
    pub result_percentage: f64,
    pub weighted_percentage: f64,
    pub characteristic_name: String,
    pub weight_percentage: f64,
}

/// Evaluation with all of its rows
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EvaluationReport {
    #[serde(flatten)]
    pub evaluation: Evaluation,
    pub details: Vec<EvaluationDetail>,
    pub characteristic_summaries: Vec<CharacteristicSummary>,
}

/// Detail entry of an evaluation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewEvaluationDetail {
    pub subcharacteristic_id: i32,
    #[validate(range(min = 0, max = 3, message = "El puntaje debe estar entre 0 y 3"))]
    #[schema(example = 2)]
    pub score: i16,
    pub comment: Option<String>,
}

/// Summary entry of an evaluation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_summary_bounds"))]
pub struct NewCharacteristicSummary {
    pub characteristic_id: i32,
    #[validate(range(min = 0, message = "El valor no puede ser negativo"))]
    pub value: i32,
    #[validate(range(min = 1, message = "El valor máximo debe ser positivo"))]
    pub max_value: i32,
    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "El porcentaje debe estar entre 0 y 100",
    ))]
    pub result_percentage: f64,
    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "El porcentaje debe estar entre 0 y 100",
    ))]
    pub weighted_percentage: f64,
}

fn validate_summary_bounds(
    summary: &NewCharacteristicSummary,
) -> Result<(), validator::ValidationError> {
    if summary.value > summary.max_value {
        let mut err = validator::ValidationError::new("value_exceeds_max");
        err.message = Some("El valor no puede superar el valor máximo".into());
        return Err(err);
    }
    Ok(())
}

/// Evaluation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewEvaluation {
    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "El porcentaje global debe estar entre 0 y 100",
    ))]
    #[schema(example = 82.5)]
    pub global_score_percentage: Option<f64>,
    #[serde(default)]
    #[validate(nested)]
    pub details: Vec<NewEvaluationDetail>,
    #[serde(default)]
    #[validate(nested)]
    pub characteristic_summaries: Vec<NewCharacteristicSummary>,
}
