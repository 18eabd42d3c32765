//! Software registration against a real database.

mod common;

use common::{count_rows, register_user, setup, setup_with_scope, software_request};

use quality_registry::config::{ParticipantScope, MSG_DUPLICATE_SOFTWARE};
use quality_registry::errors::AppError;
use quality_registry::services::{ServiceContainer, SoftwareService};

#[tokio::test]
async fn test_registered_software_is_visible_only_to_owner() {
    let ctx = setup().await;
    let owner = register_user(&ctx, "ana").await;
    let other = register_user(&ctx, "luis").await;
    let service = ctx.services.software();

    let software = service
        .register_software(owner, software_request("Inventory App", &[("Ana", "Dev")]))
        .await
        .unwrap();

    let found = service
        .get_software_detail(software.id, owner)
        .await
        .unwrap();
    assert_eq!(found.map(|s| s.name), Some("Inventory App".to_string()));

    let hidden = service
        .get_software_detail(software.id, other)
        .await
        .unwrap();
    assert!(hidden.is_none());

    assert!(service.list_software(other).await.unwrap().is_empty());
    assert!(matches!(
        service.list_participants(software.id, other).await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn test_duplicate_name_is_rejected_without_writing() {
    let ctx = setup().await;
    let owner = register_user(&ctx, "ana").await;
    let service = ctx.services.software();

    service
        .register_software(owner, software_request("Inventory App", &[("Ana", "Dev")]))
        .await
        .unwrap();

    let result = service
        .register_software(owner, software_request("Inventory App", &[("Luis", "QA")]))
        .await;

    match result {
        Err(AppError::Conflict(message)) => assert_eq!(message, MSG_DUPLICATE_SOFTWARE),
        other => panic!("expected conflict, got {:?}", other),
    }
    assert_eq!(count_rows(&ctx.db, "software").await, 1);
    assert_eq!(count_rows(&ctx.db, "software_participants").await, 1);
}

#[tokio::test]
async fn test_same_name_allowed_for_different_owners() {
    let ctx = setup().await;
    let ana = register_user(&ctx, "ana").await;
    let luis = register_user(&ctx, "luis").await;
    let service = ctx.services.software();

    service
        .register_software(ana, software_request("Inventory App", &[]))
        .await
        .unwrap();
    service
        .register_software(luis, software_request("Inventory App", &[]))
        .await
        .unwrap();

    assert_eq!(count_rows(&ctx.db, "software").await, 2);
}

#[tokio::test]
async fn test_participants_deduplicated_within_project() {
    let ctx = setup().await;
    let owner = register_user(&ctx, "ana").await;
    let service = ctx.services.software();

    let first = service
        .register_software(
            owner,
            software_request(
                "Inventory App",
                &[("Ana", "Dev"), ("Ana", "QA"), ("Luis", "QA")],
            ),
        )
        .await
        .unwrap();
    let second = service
        .register_software(owner, software_request("Billing", &[("Ana", "Dev")]))
        .await
        .unwrap();

    let first_participants = service.list_participants(first.id, owner).await.unwrap();
    let names: Vec<_> = first_participants.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Luis"]);
    assert_eq!(first_participants[0].role, "Dev");

    // Another project may list the same person
    let second_participants = service.list_participants(second.id, owner).await.unwrap();
    assert_eq!(second_participants.len(), 1);
}

#[tokio::test]
async fn test_global_scope_skips_names_listed_anywhere() {
    let ctx = setup_with_scope(ParticipantScope::Global).await;
    let ana = register_user(&ctx, "ana").await;
    let luis = register_user(&ctx, "luis").await;
    let service = ctx.services.software();

    service
        .register_software(ana, software_request("Inventory App", &[("Ana", "Dev")]))
        .await
        .unwrap();
    let second = service
        .register_software(
            luis,
            software_request("Billing", &[("Ana", "Dev"), ("Marta", "PM")]),
        )
        .await
        .unwrap();

    let participants = service.list_participants(second.id, luis).await.unwrap();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0].name, "Marta");
}

#[tokio::test]
async fn test_list_includes_latest_evaluation_slot() {
    let ctx = setup().await;
    let owner = register_user(&ctx, "ana").await;
    let service = ctx.services.software();

    service
        .register_software(owner, software_request("Inventory App", &[]))
        .await
        .unwrap();
    service
        .register_software(owner, software_request("Billing", &[]))
        .await
        .unwrap();

    let listed = service.list_software(owner).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "Inventory App");
    assert!(listed.iter().all(|s| s.evaluation.is_none()));
}

#[tokio::test]
async fn test_delete_removes_participants() {
    let ctx = setup().await;
    let owner = register_user(&ctx, "ana").await;
    let other = register_user(&ctx, "luis").await;
    let service = ctx.services.software();

    let software = service
        .register_software(owner, software_request("Inventory App", &[("Ana", "Dev")]))
        .await
        .unwrap();

    assert!(matches!(
        service.delete_software(software.id, other).await,
        Err(AppError::NotFound)
    ));

    service.delete_software(software.id, owner).await.unwrap();
    assert_eq!(count_rows(&ctx.db, "software").await, 0);
    assert_eq!(count_rows(&ctx.db, "software_participants").await, 0);
}
