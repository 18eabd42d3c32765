//! Rubric management and evaluation recording.

mod common;

use common::{count_rows, register_user, setup, software_request, TestContext};

use quality_registry::domain::{
    CharacteristicTree, NewCharacteristic, NewCharacteristicSummary, NewEvaluation,
    NewEvaluationDetail, NewSubcharacteristic,
};
use quality_registry::errors::AppError;
use quality_registry::services::{
    EvaluationService, RubricService, ServiceContainer, SoftwareService,
};

async fn seed_rubric(ctx: &TestContext) -> CharacteristicTree {
    ctx.services
        .rubric()
        .create_characteristic(NewCharacteristic {
            name: "Usabilidad".to_string(),
            description: Some("Facilidad de uso".to_string()),
            weight_percentage: 25.0,
            subcharacteristics: vec![
                NewSubcharacteristic {
                    name: "Aprendizaje".to_string(),
                    description: None,
                    max_score: 3,
                },
                NewSubcharacteristic {
                    name: "Operabilidad".to_string(),
                    description: None,
                    max_score: 2,
                },
            ],
        })
        .await
        .unwrap()
}

fn evaluation_request(tree: &CharacteristicTree, scores: [i16; 2]) -> NewEvaluation {
    NewEvaluation {
        global_score_percentage: Some(80.0),
        details: tree
            .subcharacteristics
            .iter()
            .zip(scores)
            .map(|(sub, score)| NewEvaluationDetail {
                subcharacteristic_id: sub.id,
                score,
                comment: Some("ok".to_string()),
            })
            .collect(),
        characteristic_summaries: vec![NewCharacteristicSummary {
            characteristic_id: tree.characteristic.id,
            value: 4,
            max_value: 5,
            result_percentage: 80.0,
            weighted_percentage: 20.0,
        }],
    }
}

#[tokio::test]
async fn test_rubric_tree_lists_subcharacteristics() {
    let ctx = setup().await;
    let tree = seed_rubric(&ctx).await;

    let sub = ctx
        .services
        .rubric()
        .add_subcharacteristic(
            tree.characteristic.id,
            NewSubcharacteristic {
                name: "Accesibilidad".to_string(),
                description: None,
                max_score: 3,
            },
        )
        .await
        .unwrap();
    assert_eq!(sub.characteristic_id, tree.characteristic.id);

    let rubric = ctx.services.rubric().list_characteristics().await.unwrap();
    assert_eq!(rubric.len(), 1);
    assert_eq!(rubric[0].subcharacteristics.len(), 3);
}

#[tokio::test]
async fn test_subcharacteristic_requires_existing_characteristic() {
    let ctx = setup().await;

    let result = ctx
        .services
        .rubric()
        .add_subcharacteristic(
            99,
            NewSubcharacteristic {
                name: "Huérfana".to_string(),
                description: None,
                max_score: 3,
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_record_and_read_evaluation() {
    let ctx = setup().await;
    let owner = register_user(&ctx, "ana").await;
    let software = ctx
        .services
        .software()
        .register_software(owner, software_request("Inventory App", &[]))
        .await
        .unwrap();
    let tree = seed_rubric(&ctx).await;
    let evaluations = ctx.services.evaluations();

    let report = evaluations
        .record_evaluation(software.id, owner, evaluation_request(&tree, [3, 1]))
        .await
        .unwrap();
    assert_eq!(report.details.len(), 2);
    assert_eq!(report.details[0].subcharacteristic_name, "Aprendizaje");
    assert_eq!(
        report.characteristic_summaries[0].characteristic_name,
        "Usabilidad"
    );
    assert_eq!(report.characteristic_summaries[0].weight_percentage, 25.0);

    let fetched = evaluations
        .get_evaluation(software.id, report.evaluation.id, owner)
        .await
        .unwrap();
    assert_eq!(fetched.details, report.details);

    let second = evaluations
        .record_evaluation(software.id, owner, evaluation_request(&tree, [2, 2]))
        .await
        .unwrap();
    let listed = evaluations
        .list_evaluations(software.id, owner)
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.evaluation.id);

    let summary = ctx.services.software().list_software(owner).await.unwrap();
    assert_eq!(
        summary[0].evaluation.as_ref().map(|e| e.id),
        Some(second.evaluation.id)
    );
}

#[tokio::test]
async fn test_score_above_subcharacteristic_max_rolls_back() {
    let ctx = setup().await;
    let owner = register_user(&ctx, "ana").await;
    let software = ctx
        .services
        .software()
        .register_software(owner, software_request("Inventory App", &[]))
        .await
        .unwrap();
    let tree = seed_rubric(&ctx).await;

    // Operabilidad is scored out of 2
    let result = ctx
        .services
        .evaluations()
        .record_evaluation(software.id, owner, evaluation_request(&tree, [3, 3]))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(count_rows(&ctx.db, "evaluations").await, 0);
    assert_eq!(count_rows(&ctx.db, "evaluation_details").await, 0);
}

#[tokio::test]
async fn test_unknown_subcharacteristic_is_rejected() {
    let ctx = setup().await;
    let owner = register_user(&ctx, "ana").await;
    let software = ctx
        .services
        .software()
        .register_software(owner, software_request("Inventory App", &[]))
        .await
        .unwrap();

    let request = NewEvaluation {
        global_score_percentage: None,
        details: vec![NewEvaluationDetail {
            subcharacteristic_id: 42,
            score: 1,
            comment: None,
        }],
        characteristic_summaries: vec![],
    };

    let result = ctx
        .services
        .evaluations()
        .record_evaluation(software.id, owner, request)
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(count_rows(&ctx.db, "evaluations").await, 0);
}

#[tokio::test]
async fn test_other_user_cannot_evaluate() {
    let ctx = setup().await;
    let owner = register_user(&ctx, "ana").await;
    let other = register_user(&ctx, "luis").await;
    let software = ctx
        .services
        .software()
        .register_software(owner, software_request("Inventory App", &[]))
        .await
        .unwrap();
    let tree = seed_rubric(&ctx).await;

    let result = ctx
        .services
        .evaluations()
        .record_evaluation(software.id, other, evaluation_request(&tree, [1, 1]))
        .await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_deleting_characteristic_keeps_recorded_values() {
    let ctx = setup().await;
    let owner = register_user(&ctx, "ana").await;
    let software = ctx
        .services
        .software()
        .register_software(owner, software_request("Inventory App", &[]))
        .await
        .unwrap();
    let tree = seed_rubric(&ctx).await;
    let report = ctx
        .services
        .evaluations()
        .record_evaluation(software.id, owner, evaluation_request(&tree, [2, 1]))
        .await
        .unwrap();

    ctx.services
        .rubric()
        .delete_characteristic(tree.characteristic.id)
        .await
        .unwrap();
    assert!(matches!(
        ctx.services
            .rubric()
            .delete_characteristic(tree.characteristic.id)
            .await,
        Err(AppError::NotFound)
    ));

    let fetched = ctx
        .services
        .evaluations()
        .get_evaluation(software.id, report.evaluation.id, owner)
        .await
        .unwrap();
    assert_eq!(fetched.details.len(), 2);
    assert!(fetched
        .details
        .iter()
        .all(|d| d.subcharacteristic_id.is_none()));
    assert_eq!(fetched.details[0].subcharacteristic_name, "Aprendizaje");
    assert_eq!(fetched.characteristic_summaries[0].characteristic_id, None);
    assert_eq!(
        fetched.characteristic_summaries[0].characteristic_name,
        "Usabilidad"
    );
}

#[tokio::test]
async fn test_deleting_software_removes_evaluations() {
    let ctx = setup().await;
    let owner = register_user(&ctx, "ana").await;
    let software = ctx
        .services
        .software()
        .register_software(owner, software_request("Inventory App", &[]))
        .await
        .unwrap();
    let tree = seed_rubric(&ctx).await;
    ctx.services
        .evaluations()
        .record_evaluation(software.id, owner, evaluation_request(&tree, [2, 1]))
        .await
        .unwrap();

    ctx.services
        .software()
        .delete_software(software.id, owner)
        .await
        .unwrap();

    assert_eq!(count_rows(&ctx.db, "evaluations").await, 0);
    assert_eq!(count_rows(&ctx.db, "evaluation_details").await, 0);
    assert_eq!(
        count_rows(&ctx.db, "evaluation_characteristic_summary").await,
        0
    );
}
