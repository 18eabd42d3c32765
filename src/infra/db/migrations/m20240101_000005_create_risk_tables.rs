//! Migration: Create the risk register tables.
//!
//! Ownership, classification, evaluation and controls each hold a unique
//! `risk_id`, so a risk has at most one of each.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Foreign key from a component table to `software_risks`, cascading on delete.
fn risk_fk<T: IntoIden + 'static>(name: &str, table: T, column: T) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(table, column)
        .to(SoftwareRisks::Table, SoftwareRisks::Id)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

fn id_column<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SoftwareRisks::Table)
                    .if_not_exists()
                    .col(&mut id_column(SoftwareRisks::Id))
                    .col(
                        ColumnDef::new(SoftwareRisks::SoftwareId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SoftwareRisks::RiskCode)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SoftwareRisks::IdentifiedAt).date().null())
                    .col(
                        ColumnDef::new(SoftwareRisks::Title)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SoftwareRisks::Description).text().null())
                    .col(ColumnDef::new(SoftwareRisks::Causes).text().null())
                    .col(
                        ColumnDef::new(SoftwareRisks::AffectsCriticalInfrastructure)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SoftwareRisks::Process)
                            .string_len(100)
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_risk_software")
                            .from(SoftwareRisks::Table, SoftwareRisks::SoftwareId)
                            .to(Software::Table, Software::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RiskOwnership::Table)
                    .if_not_exists()
                    .col(&mut id_column(RiskOwnership::Id))
                    .col(
                        ColumnDef::new(RiskOwnership::RiskId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(RiskOwnership::OwnerName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiskOwnership::OwnerRole)
                            .string_len(100)
                            .null(),
                    )
                    .foreign_key(&mut risk_fk(
                        "fk_ownership_risk",
                        RiskOwnership::Table,
                        RiskOwnership::RiskId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RiskClassification::Table)
                    .if_not_exists()
                    .col(&mut id_column(RiskClassification::Id))
                    .col(
                        ColumnDef::new(RiskClassification::RiskId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(RiskClassification::RiskType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RiskClassification::Confidentiality)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RiskClassification::Integrity)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RiskClassification::Availability)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RiskClassification::ImpactType)
                            .string_len(30)
                            .null(),
                    )
                    .foreign_key(&mut risk_fk(
                        "fk_classification_risk",
                        RiskClassification::Table,
                        RiskClassification::RiskId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RiskEvaluation::Table)
                    .if_not_exists()
                    .col(&mut id_column(RiskEvaluation::Id))
                    .col(
                        ColumnDef::new(RiskEvaluation::RiskId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(RiskEvaluation::Likelihood)
                            .integer()
                            .not_null()
                            .check(Expr::col(RiskEvaluation::Likelihood).between(1, 5)),
                    )
                    .col(
                        ColumnDef::new(RiskEvaluation::Impact)
                            .integer()
                            .not_null()
                            .check(Expr::col(RiskEvaluation::Impact).between(1, 5)),
                    )
                    .col(
                        ColumnDef::new(RiskEvaluation::RiskZone)
                            .string_len(100)
                            .null(),
                    )
                    .col(ColumnDef::new(RiskEvaluation::Acceptance).text().null())
                    .foreign_key(&mut risk_fk(
                        "fk_evaluation_risk",
                        RiskEvaluation::Table,
                        RiskEvaluation::RiskId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RiskControls::Table)
                    .if_not_exists()
                    .col(&mut id_column(RiskControls::Id))
                    .col(
                        ColumnDef::new(RiskControls::RiskId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(RiskControls::ControlType)
                            .string_len(100)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RiskControls::HasMechanism)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RiskControls::HasManuals)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RiskControls::ControlEffective)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RiskControls::ResponsibleDefined)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RiskControls::ControlFrequencyAdequate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(RiskControls::ControlRating).double().null())
                    .col(
                        ColumnDef::new(RiskControls::PreventiveControlsAvg)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RiskControls::ReduceLikelihoodQuadrants)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(
                                Expr::col(RiskControls::ReduceLikelihoodQuadrants).between(0, 2),
                            ),
                    )
                    .col(
                        ColumnDef::new(RiskControls::CorrectiveControlsAvg)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RiskControls::ReduceImpactQuadrants)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(RiskControls::ReduceImpactQuadrants).between(0, 2)),
                    )
                    .foreign_key(&mut risk_fk(
                        "fk_controls_risk",
                        RiskControls::Table,
                        RiskControls::RiskId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RiskMitigation::Table)
                    .if_not_exists()
                    .col(&mut id_column(RiskMitigation::Id))
                    .col(ColumnDef::new(RiskMitigation::RiskId).integer().not_null())
                    .col(
                        ColumnDef::new(RiskMitigation::EvaluationId)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(RiskMitigation::OwnershipId).integer().null())
                    .col(
                        ColumnDef::new(RiskMitigation::RiskCode)
                            .string_len(50)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RiskMitigation::RiskDescription)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RiskMitigation::RiskZone)
                            .string_len(100)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RiskMitigation::Responsible)
                            .string_len(100)
                            .null(),
                    )
                    .col(ColumnDef::new(RiskMitigation::Phase).string_len(100).null())
                    .col(
                        ColumnDef::new(RiskMitigation::ResponseType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RiskMitigation::MitigationPlan).text().null())
                    .col(
                        ColumnDef::new(RiskMitigation::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(&mut risk_fk(
                        "fk_mitigation_risk",
                        RiskMitigation::Table,
                        RiskMitigation::RiskId,
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mitigation_evaluation")
                            .from(RiskMitigation::Table, RiskMitigation::EvaluationId)
                            .to(RiskEvaluation::Table, RiskEvaluation::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mitigation_ownership")
                            .from(RiskMitigation::Table, RiskMitigation::OwnershipId)
                            .to(RiskOwnership::Table, RiskOwnership::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RiskMitigation::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RiskControls::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RiskEvaluation::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RiskClassification::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RiskOwnership::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SoftwareRisks::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Software {
    Table,
    Id,
}

#[derive(Iden)]
enum SoftwareRisks {
    Table,
    Id,
    SoftwareId,
    RiskCode,
    IdentifiedAt,
    Title,
    Description,
    Causes,
    AffectsCriticalInfrastructure,
    Process,
}

#[derive(Iden)]
enum RiskOwnership {
    Table,
    Id,
    RiskId,
    OwnerName,
    OwnerRole,
}

#[derive(Iden)]
enum RiskClassification {
    Table,
    Id,
    RiskId,
    RiskType,
    Confidentiality,
    Integrity,
    Availability,
    ImpactType,
}

#[derive(Iden)]
enum RiskEvaluation {
    Table,
    Id,
    RiskId,
    Likelihood,
    Impact,
    RiskZone,
    Acceptance,
}

#[derive(Iden)]
enum RiskControls {
    Table,
    Id,
    RiskId,
    ControlType,
    HasMechanism,
    HasManuals,
    ControlEffective,
    ResponsibleDefined,
    ControlFrequencyAdequate,
    ControlRating,
    PreventiveControlsAvg,
    ReduceLikelihoodQuadrants,
    CorrectiveControlsAvg,
    ReduceImpactQuadrants,
}

#[derive(Iden)]
enum RiskMitigation {
    Table,
    Id,
    RiskId,
    EvaluationId,
    OwnershipId,
    RiskCode,
    RiskDescription,
    RiskZone,
    Responsible,
    Phase,
    ResponseType,
    MitigationPlan,
    RegisteredAt,
}
