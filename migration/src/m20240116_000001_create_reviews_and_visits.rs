use sea_orm_migration::prelude::*;

use crate::m20240115_000001_create_customers::Customers;
use crate::m20240115_000002_create_restaurants::Restaurants;

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    RestaurantId,
    CustomerId,
    Created,
    Rating,
    Pricing,
    Comment,
}

#[derive(DeriveIden)]
enum Visits {
    Table,
    Id,
    RestaurantId,
    CustomerId,
    Date,
    Spending,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reviews::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reviews::RestaurantId).integer().not_null())
                    .col(ColumnDef::new(Reviews::CustomerId).integer().not_null())
                    .col(
                        ColumnDef::new(Reviews::Created)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reviews::Rating)
                            .integer()
                            .not_null()
                            .default(3),
                    )
                    .col(
                        ColumnDef::new(Reviews::Pricing)
                            .string_len(30)
                            .not_null()
                            .default("moderate"),
                    )
                    .col(ColumnDef::new(Reviews::Comment).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_restaurant")
                            .from(Reviews::Table, Reviews::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_customer")
                            .from(Reviews::Table, Reviews::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // one review per customer and restaurant
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_reviews_restaurant_customer")
                    .table(Reviews::Table)
                    .col(Reviews::RestaurantId)
                    .col(Reviews::CustomerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Visits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Visits::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Visits::RestaurantId).integer().null())
                    .col(ColumnDef::new(Visits::CustomerId).integer().not_null())
                    .col(ColumnDef::new(Visits::Date).date().not_null())
                    .col(
                        ColumnDef::new(Visits::Spending)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visits_restaurant")
                            .from(Visits::Table, Visits::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visits_customer")
                            .from(Visits::Table, Visits::CustomerId)
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
                    .name("uq_visits_restaurant_customer_date")
                    .table(Visits::Table)
                    .col(Visits::RestaurantId)
                    .col(Visits::CustomerId)
                    .col(Visits::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_visits_customer")
                    .table(Visits::Table)
                    .col(Visits::CustomerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Visits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Reviews::Table).to_owned())
            .await?;
        Ok(())
    }
}
