use sea_orm_migration::prelude::*;

use crate::m20240115_000001_create_customers::Customers;

#[derive(DeriveIden)]
pub(crate) enum Restaurants {
    Table,
    Id,
    Name,
    Cuisine,
    Address,
    CreatedBy,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Restaurants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Restaurants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Restaurants::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Restaurants::Cuisine)
                            .string_len(50)
                            .not_null()
                            .default("european_cuisine"),
                    )
                    .col(ColumnDef::new(Restaurants::Address).text().not_null())
                    .col(ColumnDef::new(Restaurants::CreatedBy).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_restaurants_created_by")
                            .from(Restaurants::Table, Restaurants::CreatedBy)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_restaurants_created_by")
                    .table(Restaurants::Table)
                    .col(Restaurants::CreatedBy)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Restaurants::Table)
                    .to_owned(),
            )
            .await
    }
}
