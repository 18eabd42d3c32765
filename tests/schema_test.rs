//! Database-level constraints created by the migrations.

mod common;

use common::{count_rows, exec, register_user, setup, software_request, TestContext};

use tokio_test::{assert_err, assert_ok};

use quality_registry::errors::AppError;
use quality_registry::services::{RubricService, ServiceContainer, SoftwareService};

async fn seed_software(ctx: &TestContext) -> i32 {
    let owner = register_user(ctx, "ana").await;
    ctx.services
        .software()
        .register_software(owner, software_request("Inventory App", &[("Ana", "Dev")]))
        .await
        .unwrap()
        .id
}

async fn seed_rubric(ctx: &TestContext) {
    exec(
        &ctx.db,
        "INSERT INTO quality_characteristics (id, name, weight_percentage) \
         VALUES (1, 'Usabilidad', 25)",
    )
    .await
    .unwrap();
    exec(
        &ctx.db,
        "INSERT INTO subcharacteristics (id, characteristic_id, name) VALUES (1, 1, 'Aprendizaje')",
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_duplicate_name_violates_unique_index() {
    let ctx = setup().await;
    let software_id = seed_software(&ctx).await;
    assert_eq!(software_id, 1);

    let err = exec(
        &ctx.db,
        "INSERT INTO software \
         (user_id, name, city, general_objective, description, version, registered_at) \
         VALUES (1, 'Inventory App', 'Pasto', 'x', 'y', '1.0', '2026-01-01T00:00:00+00:00')",
    )
    .await
    .unwrap_err();

    assert!(AppError::from(err).is_unique_violation());
    assert_eq!(count_rows(&ctx.db, "software").await, 1);
}

#[tokio::test]
async fn test_subcharacteristic_max_score_defaults_to_three() {
    let ctx = setup().await;
    seed_rubric(&ctx).await;

    let rubric = ctx.services.rubric().list_characteristics().await.unwrap();
    assert_eq!(rubric[0].subcharacteristics[0].max_score, 3);
}

#[tokio::test]
async fn test_rubric_checks() {
    let ctx = setup().await;

    let heavy =
        "INSERT INTO quality_characteristics (name, weight_percentage) VALUES ('Heavy', 101)";
    assert_err!(exec(&ctx.db, heavy).await);

    let negative =
        "INSERT INTO quality_characteristics (name, weight_percentage) VALUES ('Negative', -1)";
    assert_err!(exec(&ctx.db, negative).await);

    seed_rubric(&ctx).await;
    let zero_max =
        "INSERT INTO subcharacteristics (characteristic_id, name, max_score) VALUES (1, 'Zero', 0)";
    assert_err!(exec(&ctx.db, zero_max).await);
}

#[tokio::test]
async fn test_detail_score_above_three_rejected() {
    let ctx = setup().await;
    let software_id = seed_software(&ctx).await;
    seed_rubric(&ctx).await;

    exec(
        &ctx.db,
        &format!(
            "INSERT INTO evaluations (id, software_id, date) \
             VALUES (1, {}, '2026-01-01T00:00:00+00:00')",
            software_id
        ),
    )
    .await
    .unwrap();

    let insert_detail = |score: i32| {
        format!(
            "INSERT INTO evaluation_details (evaluation_id, subcharacteristic_id, score, \
             subcharacteristic_name, max_score) VALUES (1, 1, {}, 'Aprendizaje', 3)",
            score
        )
    };

    assert_ok!(exec(&ctx.db, &insert_detail(3)).await);
    assert_err!(exec(&ctx.db, &insert_detail(4)).await);
    assert_err!(exec(&ctx.db, &insert_detail(-1)).await);
}

#[tokio::test]
async fn test_deleting_rubric_keeps_detail_snapshot() {
    let ctx = setup().await;
    let software_id = seed_software(&ctx).await;
    seed_rubric(&ctx).await;

    exec(
        &ctx.db,
        &format!(
            "INSERT INTO evaluations (id, software_id, date) \
             VALUES (1, {}, '2026-01-01T00:00:00+00:00')",
            software_id
        ),
    )
    .await
    .unwrap();
    exec(
        &ctx.db,
        "INSERT INTO evaluation_details (evaluation_id, subcharacteristic_id, score, \
         subcharacteristic_name, max_score) VALUES (1, 1, 2, 'Aprendizaje', 3)",
    )
    .await
    .unwrap();

    exec(&ctx.db, "DELETE FROM quality_characteristics WHERE id = 1")
        .await
        .unwrap();

    assert_eq!(count_rows(&ctx.db, "subcharacteristics").await, 0);
    assert_eq!(count_rows(&ctx.db, "evaluation_details").await, 1);
}

#[tokio::test]
async fn test_risk_checks_and_one_component_per_risk() {
    let ctx = setup().await;
    let software_id = seed_software(&ctx).await;

    exec(
        &ctx.db,
        &format!(
            "INSERT INTO software_risks \
             (id, software_id, risk_code, title, affects_critical_infrastructure) \
             VALUES (1, {}, 'R-001', 'Caída del servidor', 0)",
            software_id
        ),
    )
    .await
    .unwrap();

    let evaluation = |likelihood: i32, impact: i32| {
        format!(
            "INSERT INTO risk_evaluation (risk_id, likelihood, impact) VALUES (1, {}, {})",
            likelihood, impact
        )
    };
    assert_err!(exec(&ctx.db, &evaluation(6, 3)).await);
    assert_err!(exec(&ctx.db, &evaluation(3, 0)).await);
    assert_ok!(exec(&ctx.db, &evaluation(3, 3)).await);

    // A second evaluation for the same risk
    let err = exec(&ctx.db, &evaluation(2, 2)).await.unwrap_err();
    assert!(AppError::from(err).is_unique_violation());

    let controls = |quadrants: i32| {
        format!(
            "INSERT INTO risk_controls (risk_id, has_mechanism, has_manuals, control_effective, \
             responsible_defined, control_frequency_adequate, reduce_likelihood_quadrants, \
             reduce_impact_quadrants) VALUES (1, 0, 0, 0, 0, 0, {}, 0)",
            quadrants
        )
    };
    assert_err!(exec(&ctx.db, &controls(3)).await);
    assert_ok!(exec(&ctx.db, &controls(2)).await);
}

#[tokio::test]
async fn test_deleting_user_cascades_to_projects() {
    let ctx = setup().await;
    seed_software(&ctx).await;

    exec(&ctx.db, "DELETE FROM users").await.unwrap();

    assert_eq!(count_rows(&ctx.db, "software").await, 0);
    assert_eq!(count_rows(&ctx.db, "software_participants").await, 0);
}
