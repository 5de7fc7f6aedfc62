use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChemicalForms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChemicalForms::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ChemicalForms::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(ChemicalForms::Date).date().not_null())
                    .col(ColumnDef::new(ChemicalForms::Unit).string().not_null())
                    .col(ColumnDef::new(ChemicalForms::Chemical).string().not_null())
                    .col(ColumnDef::new(ChemicalForms::Uom).string().not_null())
                    .col(ColumnDef::new(ChemicalForms::SapCode).string().not_null())
                    .col(
                        ColumnDef::new(ChemicalForms::Opening)
                            .decimal_len(14, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChemicalForms::Received)
                            .decimal_len(14, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChemicalForms::Consumption)
                            .decimal_len(14, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChemicalForms::Closing)
                            .decimal_len(14, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChemicalForms::ReportedBalance)
                            .decimal_len(14, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ChemicalForms::Remarks).string().not_null())
                    .col(
                        ColumnDef::new(ChemicalForms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ChemicalForms::Table, ChemicalForms::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ChemicalForms::Table)
                    .col(ChemicalForms::OwnerId)
                    .name("idx_chemical_forms_owner_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChemicalForms::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ChemicalForms {
    Table,
    Id,
    OwnerId,
    Date,
    Unit,
    Chemical,
    Uom,
    SapCode,
    Opening,
    Received,
    Consumption,
    Closing,
    ReportedBalance,
    Remarks,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
