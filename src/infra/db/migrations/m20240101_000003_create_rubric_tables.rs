//! Migration: Create the evaluation rubric tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(QualityCharacteristics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QualityCharacteristics::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(QualityCharacteristics::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QualityCharacteristics::Description)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(QualityCharacteristics::WeightPercentage)
                            .double()
                            .not_null()
                            .check(
                                Expr::col(QualityCharacteristics::WeightPercentage).between(0, 100),
                            ),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subcharacteristics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subcharacteristics::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Subcharacteristics::CharacteristicId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Subcharacteristics::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Subcharacteristics::Description)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Subcharacteristics::MaxScore)
                            .small_integer()
                            .not_null()
                            .default(3)
                            .check(Expr::col(Subcharacteristics::MaxScore).gt(0)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subcharacteristic_characteristic")
                            .from(
                                Subcharacteristics::Table,
                                Subcharacteristics::CharacteristicId,
                            )
                            .to(QualityCharacteristics::Table, QualityCharacteristics::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subcharacteristics::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(QualityCharacteristics::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum QualityCharacteristics {
    Table,
    Id,
    Name,
    Description,
    WeightPercentage,
}

#[derive(Iden)]
enum Subcharacteristics {
    Table,
    Id,
    CharacteristicId,
    Name,
    Description,
    MaxScore,
}
