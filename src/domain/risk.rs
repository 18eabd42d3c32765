//! Risk register of a project.
//!
//! A risk owns exactly one ownership, classification, evaluation and control
//! record, plus any number of mitigation plans. Zones and ratings are stored
//! as supplied; nothing here derives them.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::AppError;

/// Risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RiskType {
    #[serde(rename = "Lógico")]
    Logical,
    #[serde(rename = "Físico")]
    Physical,
    #[serde(rename = "Locativo")]
    Locative,
    #[serde(rename = "Legal")]
    Legal,
    #[serde(rename = "Reputacional")]
    Reputational,
    #[serde(rename = "Financiero")]
    Financial,
}

impl RiskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskType::Logical => "Lógico",
            RiskType::Physical => "Físico",
            RiskType::Locative => "Locativo",
            RiskType::Legal => "Legal",
            RiskType::Reputational => "Reputacional",
            RiskType::Financial => "Financiero",
        }
    }
}

impl FromStr for RiskType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Lógico" => Ok(RiskType::Logical),
            "Físico" => Ok(RiskType::Physical),
            "Locativo" => Ok(RiskType::Locative),
            "Legal" => Ok(RiskType::Legal),
            "Reputacional" => Ok(RiskType::Reputational),
            "Financiero" => Ok(RiskType::Financial),
            other => Err(AppError::internal(format!("Unknown risk type '{}'", other))),
        }
    }
}

/// Likelihood scale, 1 (rare) to 5 (almost certain)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Likelihood {
    Raro,
    Improbable,
    Posible,
    Probable,
    CasiSeguro,
}

impl Likelihood {
    pub fn level(self) -> i32 {
        match self {
            Likelihood::Raro => 1,
            Likelihood::Improbable => 2,
            Likelihood::Posible => 3,
            Likelihood::Probable => 4,
            Likelihood::CasiSeguro => 5,
        }
    }
}

impl TryFrom<i32> for Likelihood {
    type Error = AppError;

    fn try_from(level: i32) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Likelihood::Raro),
            2 => Ok(Likelihood::Improbable),
            3 => Ok(Likelihood::Posible),
            4 => Ok(Likelihood::Probable),
            5 => Ok(Likelihood::CasiSeguro),
            other => Err(AppError::internal(format!(
                "Likelihood level {} out of range",
                other
            ))),
        }
    }
}

/// Impact scale, 1 (insignificant) to 5 (catastrophic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Impact {
    Insignificante,
    Menor,
    Moderado,
    Mayor,
    Catastrofico,
}

impl Impact {
    pub fn level(self) -> i32 {
        match self {
            Impact::Insignificante => 1,
            Impact::Menor => 2,
            Impact::Moderado => 3,
            Impact::Mayor => 4,
            Impact::Catastrofico => 5,
        }
    }
}

impl TryFrom<i32> for Impact {
    type Error = AppError;

    fn try_from(level: i32) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Impact::Insignificante),
            2 => Ok(Impact::Menor),
            3 => Ok(Impact::Moderado),
            4 => Ok(Impact::Mayor),
            5 => Ok(Impact::Catastrofico),
            other => Err(AppError::internal(format!(
                "Impact level {} out of range",
                other
            ))),
        }
    }
}

/// Planned response to a risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ResponseType {
    #[serde(rename = "Evitar")]
    Avoid,
    #[serde(rename = "Mitigar")]
    Mitigate,
    #[serde(rename = "Transferir")]
    Transfer,
    #[serde(rename = "Aceptar")]
    Accept,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Avoid => "Evitar",
            ResponseType::Mitigate => "Mitigar",
            ResponseType::Transfer => "Transferir",
            ResponseType::Accept => "Aceptar",
        }
    }
}

impl FromStr for ResponseType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Evitar" => Ok(ResponseType::Avoid),
            "Mitigar" => Ok(ResponseType::Mitigate),
            "Transferir" => Ok(ResponseType::Transfer),
            "Aceptar" => Ok(ResponseType::Accept),
            other => Err(AppError::internal(format!(
                "Unknown response type '{}'",
                other
            ))),
        }
    }
}

// =============================================================================
// Stored records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SoftwareRisk {
    pub id: i32,
    pub software_id: i32,
    #[schema(example = "R-001")]
    pub risk_code: String,
    pub identified_at: Option<NaiveDate>,
    pub title: String,
    pub description: Option<String>,
    pub causes: Option<String>,
    pub affects_critical_infrastructure: bool,
    pub process: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RiskOwnership {
    pub id: i32,
    pub risk_id: i32,
    pub owner_name: String,
    pub owner_role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RiskClassification {
    pub id: i32,
    pub risk_id: i32,
    pub risk_type: RiskType,
    pub confidentiality: bool,
    pub integrity: bool,
    pub availability: bool,
    pub impact_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RiskEvaluation {
    pub id: i32,
    pub risk_id: i32,
    pub likelihood: Likelihood,
    pub impact: Impact,
    #[schema(example = "Alta")]
    pub risk_zone: Option<String>,
    pub acceptance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RiskControl {
    pub id: i32,
    pub risk_id: i32,
    pub control_type: Option<String>,
    pub has_mechanism: bool,
    pub has_manuals: bool,
    pub control_effective: bool,
    pub responsible_defined: bool,
    pub control_frequency_adequate: bool,
    pub control_rating: Option<f64>,
    pub preventive_controls_avg: Option<f64>,
    pub reduce_likelihood_quadrants: i32,
    pub corrective_controls_avg: Option<f64>,
    pub reduce_impact_quadrants: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RiskMitigation {
    pub id: i32,
    pub risk_id: i32,
    pub evaluation_id: Option<i32>,
    pub ownership_id: Option<i32>,
    pub risk_code: Option<String>,
    pub risk_description: Option<String>,
    pub risk_zone: Option<String>,
    pub responsible: Option<String>,
    pub phase: Option<String>,
    pub response_type: ResponseType,
    pub mitigation_plan: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// A risk with its four one-to-one components
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RiskRecord {
    #[serde(flatten)]
    pub risk: SoftwareRisk,
    pub ownership: RiskOwnership,
    pub classification: RiskClassification,
    pub evaluation: RiskEvaluation,
    pub controls: RiskControl,
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewRiskOwnership {
    #[validate(length(
        min = 1,
        max = 100,
        message = "El responsable es obligatorio (máx. 100)",
    ))]
    pub owner_name: String,
    #[validate(length(max = 100))]
    pub owner_role: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewRiskClassification {
    pub risk_type: RiskType,
    #[serde(default)]
    pub confidentiality: bool,
    #[serde(default)]
    pub integrity: bool,
    #[serde(default)]
    pub availability: bool,
    #[validate(length(max = 30))]
    pub impact_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewRiskEvaluation {
    pub likelihood: Likelihood,
    pub impact: Impact,
    #[validate(length(max = 100))]
    pub risk_zone: Option<String>,
    pub acceptance: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewRiskControl {
    #[validate(length(max = 100))]
    pub control_type: Option<String>,
    #[serde(default)]
    pub has_mechanism: bool,
    #[serde(default)]
    pub has_manuals: bool,
    #[serde(default)]
    pub control_effective: bool,
    #[serde(default)]
    pub responsible_defined: bool,
    #[serde(default)]
    pub control_frequency_adequate: bool,
    #[validate(range(min = 0.0, max = 100.0))]
    pub control_rating: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub preventive_controls_avg: Option<f64>,
    #[serde(default)]
    #[validate(
        range(min = 0, max = 2, message = "Los cuadrantes deben estar entre 0 y 2")
    )]
    pub reduce_likelihood_quadrants: i32,
    #[validate(range(min = 0.0, max = 100.0))]
    pub corrective_controls_avg: Option<f64>,
    #[serde(default)]
    #[validate(
        range(min = 0, max = 2, message = "Los cuadrantes deben estar entre 0 y 2")
    )]
    pub reduce_impact_quadrants: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewRisk {
    #[validate(length(
        min = 1,
        max = 50,
        message = "El código del riesgo es obligatorio (máx. 50)",
    ))]
    #[schema(example = "R-001")]
    pub risk_code: String,
    pub identified_at: Option<NaiveDate>,
    #[validate(
        length(min = 1, max = 255, message = "El título es obligatorio (máx. 255)")
    )]
    pub title: String,
    pub description: Option<String>,
    pub causes: Option<String>,
    #[serde(default)]
    pub affects_critical_infrastructure: bool,
    #[validate(length(max = 100))]
    pub process: Option<String>,
    #[validate(nested)]
    pub ownership: NewRiskOwnership,
    #[validate(nested)]
    pub classification: NewRiskClassification,
    #[validate(nested)]
    pub evaluation: NewRiskEvaluation,
    #[validate(nested)]
    pub controls: NewRiskControl,
}

/// Mitigation request. Risk code, description and zone default to the
/// values currently stored on the risk.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewRiskMitigation {
    pub evaluation_id: Option<i32>,
    pub ownership_id: Option<i32>,
    #[validate(length(max = 50))]
    pub risk_code: Option<String>,
    pub risk_description: Option<String>,
    #[validate(length(max = 100))]
    pub risk_zone: Option<String>,
    #[validate(length(max = 100))]
    pub responsible: Option<String>,
    #[validate(length(max = 100))]
    pub phase: Option<String>,
    pub response_type: ResponseType,
    pub mitigation_plan: Option<String>,
}
