//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, evaluation_handler, risk_handler, rubric_handler, software_handler,
};
use crate::domain::{
    Characteristic, CharacteristicSummary, CharacteristicTree, Evaluation, EvaluationDetail,
    EvaluationReport, Impact, LatestEvaluation, Likelihood, NewCharacteristic,
    NewCharacteristicSummary, NewEvaluation, NewEvaluationDetail, NewParticipant, NewRisk,
    NewRiskClassification, NewRiskControl, NewRiskEvaluation, NewRiskMitigation, NewRiskOwnership,
    NewSoftware, NewSubcharacteristic, Participant, ResponseType, RiskClassification, RiskControl,
    RiskEvaluation, RiskMitigation, RiskOwnership, RiskRecord, RiskType, SoftwareRegistered,
    SoftwareResponse, SoftwareRisk, SoftwareSummary, Subcharacteristic, UserResponse, UserRole,
};
use crate::services::TokenResponse;

/// OpenAPI documentation for the Quality Registry API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quality Registry API",
        version = "0.1.0",
        description = "Software project registry with quality evaluations and a risk register",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // Software endpoints
        software_handler::create_software,
        software_handler::list_software,
        software_handler::get_software,
        software_handler::list_participants,
        software_handler::delete_software,
        // Rubric endpoints
        rubric_handler::list_characteristics,
        rubric_handler::create_characteristic,
        rubric_handler::add_subcharacteristic,
        rubric_handler::delete_characteristic,
        // Evaluation endpoints
        evaluation_handler::record_evaluation,
        evaluation_handler::list_evaluations,
        evaluation_handler::get_evaluation,
        // Risk endpoints
        risk_handler::register_risk,
        risk_handler::list_risks,
        risk_handler::get_risk,
        risk_handler::delete_risk,
        risk_handler::add_mitigation,
        risk_handler::list_mitigations,
    ),
    components(
        schemas(
            // Accounts
            UserRole,
            UserResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            // Software
            NewSoftware,
            NewParticipant,
            Participant,
            SoftwareResponse,
            SoftwareRegistered,
            SoftwareSummary,
            LatestEvaluation,
            // Rubric
            Characteristic,
            Subcharacteristic,
            CharacteristicTree,
            NewCharacteristic,
            NewSubcharacteristic,
            // Evaluations
            Evaluation,
            EvaluationDetail,
            CharacteristicSummary,
            EvaluationReport,
            NewEvaluation,
            NewEvaluationDetail,
            NewCharacteristicSummary,
            // Risks
            RiskType,
            Likelihood,
            Impact,
            ResponseType,
            SoftwareRisk,
            RiskOwnership,
            RiskClassification,
            RiskEvaluation,
            RiskControl,
            RiskMitigation,
            RiskRecord,
            NewRisk,
            NewRiskOwnership,
            NewRiskClassification,
            NewRiskEvaluation,
            NewRiskControl,
            NewRiskMitigation,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Account registration and login"),
        (name = "Software", description = "Registered software projects"),
        (name = "Rubric", description = "Quality characteristics and subcharacteristics"),
        (name = "Evaluations", description = "Quality evaluations of a project"),
        (name = "Risks", description = "Risk register and mitigation plans")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_protected_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/software"));
        assert!(doc
            .paths
            .paths
            .contains_key("/software/{id}/risks/{risk_id}/mitigations"));
        assert!(doc
            .components
            .as_ref()
            .map(|c| c.security_schemes.contains_key("bearer_auth"))
            .unwrap_or(false));
    }
}
