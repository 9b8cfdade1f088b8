pub use sea_orm_migration::prelude::*;

mod m20240115_000001_create_customers;
mod m20240115_000002_create_restaurants;
mod m20240116_000001_create_reviews_and_visits;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240115_000001_create_customers::Migration),
            Box::new(m20240115_000002_create_restaurants::Migration),
            Box::new(m20240116_000001_create_reviews_and_visits::Migration),
        ]
    }
}
