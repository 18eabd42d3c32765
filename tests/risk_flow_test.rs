//! Risk register and mitigation plans.

mod common;

use serde_json::json;

use common::{count_rows, register_user, setup, software_request, TestContext};

use quality_registry::domain::{
    Impact, Likelihood, NewRisk, NewRiskMitigation, ResponseType, RiskType,
};
use quality_registry::errors::AppError;
use quality_registry::services::{RiskService, ServiceContainer, SoftwareService};

fn risk_request(code: &str) -> NewRisk {
    serde_json::from_value(json!({
        "risk_code": code,
        "identified_at": "2026-03-01",
        "title": "Caída del servidor",
        "description": "El servidor principal deja de responder",
        "causes": "Falta de redundancia",
        "affects_critical_infrastructure": true,
        "process": "Operación",
        "ownership": { "owner_name": "Marta", "owner_role": "Infraestructura" },
        "classification": {
            "risk_type": "Físico",
            "availability": true,
            "impact_type": "Operativo"
        },
        "evaluation": {
            "likelihood": "POSIBLE",
            "impact": "MAYOR",
            "risk_zone": "Alta"
        },
        "controls": {
            "control_type": "Preventivo",
            "has_mechanism": true,
            "reduce_likelihood_quadrants": 1
        }
    }))
    .expect("risk request should deserialize")
}

fn mitigation_request() -> NewRiskMitigation {
    NewRiskMitigation {
        evaluation_id: None,
        ownership_id: None,
        risk_code: None,
        risk_description: None,
        risk_zone: None,
        responsible: Some("Marta".to_string()),
        phase: Some("Planeación".to_string()),
        response_type: ResponseType::Mitigate,
        mitigation_plan: Some("Servidor de respaldo".to_string()),
    }
}

struct Seeded {
    owner: i32,
    software_id: i32,
}

async fn seed(ctx: &TestContext) -> Seeded {
    let owner = register_user(ctx, "ana").await;
    let software_id = ctx
        .services
        .software()
        .register_software(owner, software_request("Inventory App", &[]))
        .await
        .unwrap()
        .id;
    Seeded { owner, software_id }
}

#[tokio::test]
async fn test_register_and_read_risk() {
    let ctx = setup().await;
    let seeded = seed(&ctx).await;
    let risks = ctx.services.risks();

    let record = risks
        .register_risk(seeded.software_id, seeded.owner, risk_request("R-001"))
        .await
        .unwrap();
    assert_eq!(record.classification.risk_type, RiskType::Physical);
    assert_eq!(record.evaluation.likelihood, Likelihood::Posible);
    assert_eq!(record.evaluation.impact, Impact::Mayor);
    assert_eq!(record.controls.reduce_likelihood_quadrants, 1);
    assert_eq!(record.controls.reduce_impact_quadrants, 0);

    let fetched = risks
        .get_risk(seeded.software_id, record.risk.id, seeded.owner)
        .await
        .unwrap();
    assert_eq!(fetched.risk, record.risk);
    assert_eq!(fetched.ownership, record.ownership);
    assert_eq!(fetched.evaluation, record.evaluation);

    let listed = risks
        .list_risks(seeded.software_id, seeded.owner)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].risk_code, "R-001");
}

#[tokio::test]
async fn test_risks_are_private_to_project_owner() {
    let ctx = setup().await;
    let seeded = seed(&ctx).await;
    let other = register_user(&ctx, "luis").await;
    let risks = ctx.services.risks();

    let record = risks
        .register_risk(seeded.software_id, seeded.owner, risk_request("R-001"))
        .await
        .unwrap();

    assert!(matches!(
        risks.list_risks(seeded.software_id, other).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        risks
            .get_risk(seeded.software_id, record.risk.id, other)
            .await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        risks
            .register_risk(seeded.software_id, other, risk_request("R-002"))
            .await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn test_mitigation_defaults_to_risk_values() {
    let ctx = setup().await;
    let seeded = seed(&ctx).await;
    let risks = ctx.services.risks();

    let record = risks
        .register_risk(seeded.software_id, seeded.owner, risk_request("R-001"))
        .await
        .unwrap();

    let mitigation = risks
        .add_mitigation(
            seeded.software_id,
            record.risk.id,
            seeded.owner,
            mitigation_request(),
        )
        .await
        .unwrap();

    assert_eq!(mitigation.evaluation_id, Some(record.evaluation.id));
    assert_eq!(mitigation.ownership_id, Some(record.ownership.id));
    assert_eq!(mitigation.risk_code.as_deref(), Some("R-001"));
    assert_eq!(
        mitigation.risk_description.as_deref(),
        Some("El servidor principal deja de responder")
    );
    assert_eq!(mitigation.risk_zone.as_deref(), Some("Alta"));
    assert_eq!(mitigation.response_type, ResponseType::Mitigate);

    let listed = risks
        .list_mitigations(seeded.software_id, record.risk.id, seeded.owner)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, mitigation.id);
}

#[tokio::test]
async fn test_mitigation_rejects_component_of_another_risk() {
    let ctx = setup().await;
    let seeded = seed(&ctx).await;
    let risks = ctx.services.risks();

    let first = risks
        .register_risk(seeded.software_id, seeded.owner, risk_request("R-001"))
        .await
        .unwrap();
    let second = risks
        .register_risk(seeded.software_id, seeded.owner, risk_request("R-002"))
        .await
        .unwrap();

    let mut request = mitigation_request();
    request.evaluation_id = Some(second.evaluation.id);

    let result = risks
        .add_mitigation(seeded.software_id, first.risk.id, seeded.owner, request)
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(count_rows(&ctx.db, "risk_mitigation").await, 0);
}

#[tokio::test]
async fn test_deleting_risk_removes_components() {
    let ctx = setup().await;
    let seeded = seed(&ctx).await;
    let risks = ctx.services.risks();

    let record = risks
        .register_risk(seeded.software_id, seeded.owner, risk_request("R-001"))
        .await
        .unwrap();
    risks
        .add_mitigation(
            seeded.software_id,
            record.risk.id,
            seeded.owner,
            mitigation_request(),
        )
        .await
        .unwrap();

    risks
        .delete_risk(seeded.software_id, record.risk.id, seeded.owner)
        .await
        .unwrap();

    for table in [
        "software_risks",
        "risk_ownership",
        "risk_classification",
        "risk_evaluation",
        "risk_controls",
        "risk_mitigation",
    ] {
        assert_eq!(count_rows(&ctx.db, table).await, 0, "{} not emptied", table);
    }

    assert!(matches!(
        risks
            .get_risk(seeded.software_id, record.risk.id, seeded.owner)
            .await,
        Err(AppError::NotFound)
    ));
}
