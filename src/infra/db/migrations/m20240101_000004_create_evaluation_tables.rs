//! Migration: Create evaluations and their detail and summary rows.
//!
//! Rubric references are set to NULL when the rubric row goes away; the
//! copied names and weights keep the evaluation readable.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Evaluations::SoftwareId).integer().not_null())
                    .col(
                        ColumnDef::new(Evaluations::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::GlobalScorePercentage)
                            .double()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluation_software")
                            .from(Evaluations::Table, Evaluations::SoftwareId)
                            .to(Software::Table, Software::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EvaluationDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationDetails::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EvaluationDetails::EvaluationId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationDetails::SubcharacteristicId)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationDetails::Score)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(EvaluationDetails::Score).between(0, 3)),
                    )
                    .col(ColumnDef::new(EvaluationDetails::Comment).text().null())
                    .col(
                        ColumnDef::new(EvaluationDetails::SubcharacteristicName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationDetails::SubcharacteristicDescription)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationDetails::MaxScore)
                            .small_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_detail_evaluation")
                            .from(EvaluationDetails::Table, EvaluationDetails::EvaluationId)
                            .to(Evaluations::Table, Evaluations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_detail_subcharacteristic")
                            .from(
                                EvaluationDetails::Table,
                                EvaluationDetails::SubcharacteristicId,
                            )
                            .to(Subcharacteristics::Table, Subcharacteristics::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EvaluationCharacteristicSummary::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationCharacteristicSummary::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EvaluationCharacteristicSummary::EvaluationId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationCharacteristicSummary::CharacteristicId)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationCharacteristicSummary::Value)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationCharacteristicSummary::MaxValue)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationCharacteristicSummary::ResultPercentage)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationCharacteristicSummary::WeightedPercentage)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationCharacteristicSummary::CharacteristicName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationCharacteristicSummary::WeightPercentage)
                            .double()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_summary_evaluation")
                            .from(
                                EvaluationCharacteristicSummary::Table,
                                EvaluationCharacteristicSummary::EvaluationId,
                            )
                            .to(Evaluations::Table, Evaluations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_summary_characteristic")
                            .from(
                                EvaluationCharacteristicSummary::Table,
                                EvaluationCharacteristicSummary::CharacteristicId,
                            )
                            .to(QualityCharacteristics::Table, QualityCharacteristics::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_evaluations_software_date")
                    .table(Evaluations::Table)
                    .col(Evaluations::SoftwareId)
                    .col(Evaluations::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(EvaluationCharacteristicSummary::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(EvaluationDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Software {
    Table,
    Id,
}

#[derive(Iden)]
enum QualityCharacteristics {
    Table,
    Id,
}

#[derive(Iden)]
enum Subcharacteristics {
    Table,
    Id,
}

#[derive(Iden)]
enum Evaluations {
    Table,
    Id,
    SoftwareId,
    Date,
    GlobalScorePercentage,
}

#[derive(Iden)]
enum EvaluationDetails {
    Table,
    Id,
    EvaluationId,
    SubcharacteristicId,
    Score,
    Comment,
    SubcharacteristicName,
    SubcharacteristicDescription,
    MaxScore,
}

#[derive(Iden)]
enum EvaluationCharacteristicSummary {
    Table,
    Id,
    EvaluationId,
    CharacteristicId,
    Value,
    MaxValue,
    ResultPercentage,
    WeightedPercentage,
    CharacteristicName,
    WeightPercentage,
}
