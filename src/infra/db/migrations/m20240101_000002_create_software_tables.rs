//! Migration: Create software and software_participants tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Software::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Software::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Software::UserId).integer().not_null())
                    .col(ColumnDef::new(Software::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Software::City).string_len(30).not_null())
                    .col(
                        ColumnDef::new(Software::GeneralObjective)
                            .string_len(250)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Software::Description)
                            .string_len(300)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Software::Version).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Software::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_software_user")
                            .from(Software::Table, Software::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One name per owner
        manager
            .create_index(
                Index::create()
                    .name("uq_software_user_name")
                    .table(Software::Table)
                    .col(Software::UserId)
                    .col(Software::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SoftwareParticipants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SoftwareParticipants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SoftwareParticipants::SoftwareId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SoftwareParticipants::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SoftwareParticipants::Role)
                            .string_len(100)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_participant_software")
                            .from(
                                SoftwareParticipants::Table,
                                SoftwareParticipants::SoftwareId,
                            )
                            .to(Software::Table, Software::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_participants_name")
                    .table(SoftwareParticipants::Table)
                    .col(SoftwareParticipants::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SoftwareParticipants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Software::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Software {
    Table,
    Id,
    UserId,
    Name,
    City,
    GeneralObjective,
    Description,
    Version,
    RegisteredAt,
}

#[derive(Iden)]
enum SoftwareParticipants {
    Table,
    Id,
    SoftwareId,
    Name,
    Role,
}
