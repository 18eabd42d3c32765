//! Tracked software projects and their participants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::MSG_SOFTWARE_REGISTERED;

/// Date format used when a project is serialized for clients
pub const REGISTERED_AT_FORMAT: &str = "%d-%m-%Y";

/// A software project owned by one user
#[derive(Debug, Clone, PartialEq)]
pub struct Software {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub city: String,
    pub general_objective: String,
    pub description: String,
    pub version: String,
    pub registered_at: DateTime<Utc>,
}

/// A contributor listed on a project
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Participant {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = 1)]
    pub software_id: i32,
    #[schema(example = "Ana")]
    pub name: String,
    #[schema(example = "Dev")]
    pub role: String,
}

/// Participant entry of a registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewParticipant {
    #[validate(length(
        min = 1,
        max = 100,
        message = "El nombre del participante es obligatorio (máx. 100)",
    ))]
    #[schema(example = "Ana")]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "El rol del participante es obligatorio (máx. 100)",
    ))]
    #[schema(example = "Dev")]
    pub role: String,
}

/// Project registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewSoftware {
    #[validate(
        length(min = 1, max = 100, message = "El nombre es obligatorio (máx. 100)")
    )]
    #[schema(example = "Inventory App")]
    pub name: String,
    #[validate(
        length(min = 1, max = 30, message = "La ciudad es obligatoria (máx. 30)")
    )]
    #[schema(example = "Pasto")]
    pub city: String,
    #[validate(length(
        min = 1,
        max = 250,
        message = "El objetivo general es obligatorio (máx. 250)",
    ))]
    pub general_objective: String,
    #[validate(length(
        min = 1,
        max = 300,
        message = "La descripción es obligatoria (máx. 300)",
    ))]
    pub description: String,
    #[validate(
        length(min = 1, max = 50, message = "La versión es obligatoria (máx. 50)")
    )]
    #[schema(example = "1.0.0")]
    pub version: String,
    #[serde(default)]
    #[validate(nested)]
    pub participants: Vec<NewParticipant>,
}

/// Flat serialization of a project
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SoftwareResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Inventory App")]
    pub name: String,
    pub city: String,
    pub general_objective: String,
    pub description: String,
    pub version: String,
    pub user_id: i32,
    /// Registration date as `dd-mm-YYYY`
    #[schema(example = "16-10-2026")]
    pub registered_at: String,
}

impl From<Software> for SoftwareResponse {
    fn from(software: Software) -> Self {
        Self {
            id: software.id,
            name: software.name,
            city: software.city,
            general_objective: software.general_objective,
            description: software.description,
            version: software.version,
            user_id: software.user_id,
            registered_at: software
                .registered_at
                .format(REGISTERED_AT_FORMAT)
                .to_string(),
        }
    }
}

/// Body returned by a successful registration
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SoftwareRegistered {
    pub success: bool,
    #[schema(example = "Software registrado")]
    pub message: String,
    pub software: SoftwareResponse,
}

impl From<Software> for SoftwareRegistered {
    fn from(software: Software) -> Self {
        Self {
            success: true,
            message: MSG_SOFTWARE_REGISTERED.to_string(),
            software: software.into(),
        }
    }
}

/// Most recent evaluation of a project, shown in listings
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LatestEvaluation {
    pub id: i32,
    pub date: DateTime<Utc>,
    #[schema(example = 87.5)]
    pub global_score_percentage: Option<f64>,
}

/// Project listing entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SoftwareSummary {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub general_objective: String,
    pub description: String,
    pub version: String,
    pub registered_at: DateTime<Utc>,
    pub evaluation: Option<LatestEvaluation>,
}

impl SoftwareSummary {
    pub fn new(software: Software, evaluation: Option<LatestEvaluation>) -> Self {
        Self {
            id: software.id,
            name: software.name,
            city: software.city,
            general_objective: software.general_objective,
            description: software.description,
            version: software.version,
            registered_at: software.registered_at,
            evaluation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn inventory_app() -> Software {
        Software {
            id: 1,
            user_id: 2,
            name: "Inventory App".to_string(),
            city: "Pasto".to_string(),
            general_objective: "x".to_string(),
            description: "y".to_string(),
            version: "1.0".to_string(),
            registered_at: Utc.with_ymd_and_hms(2026, 3, 9, 15, 30, 0).unwrap(),
        }
    }

    fn request(name: &str) -> NewSoftware {
        NewSoftware {
            name: name.to_string(),
            city: "Pasto".to_string(),
            general_objective: "Control de inventario".to_string(),
            description: "Aplicación de inventario".to_string(),
            version: "1.0".to_string(),
            participants: vec![NewParticipant {
                name: "Ana".to_string(),
                role: "Dev".to_string(),
            }],
        }
    }

    #[test]
    fn test_registered_at_is_day_month_year() {
        let response = SoftwareResponse::from(inventory_app());
        assert_eq!(response.registered_at, "09-03-2026");
        assert_eq!(response.user_id, 2);
    }

    #[test]
    fn test_registration_body_carries_software_key() {
        let json = serde_json::to_value(SoftwareRegistered::from(inventory_app())).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Software registrado");
        assert_eq!(json["software"]["name"], "Inventory App");
        assert_eq!(json["software"]["registered_at"], "09-03-2026");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_request_validation() {
        assert!(request("Inventory App").validate().is_ok());
        assert!(request("").validate().is_err());

        let mut long_city = request("Inventory App");
        long_city.city = "x".repeat(31);
        assert!(long_city.validate().is_err());
    }

    #[test]
    fn test_nested_participant_validation() {
        let mut invalid = request("Inventory App");
        invalid.participants.push(NewParticipant {
            name: String::new(),
            role: "QA".to_string(),
        });
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_participants_default_to_empty() {
        let parsed: NewSoftware = serde_json::from_value(serde_json::json!({
            "name": "Inventory App",
            "city": "Pasto",
            "general_objective": "x",
            "description": "y",
            "version": "1.0"
        }))
        .unwrap();
        assert!(parsed.participants.is_empty());
    }
}
