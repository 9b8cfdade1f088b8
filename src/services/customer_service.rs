use crate::entities::customer_entity as customers;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::{icontains, non_empty};
use sea_orm::sea_query::Condition;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

#[derive(Clone)]
pub struct CustomerService {
    pool: DatabaseConnection,
}

impl CustomerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Customers whose username or e-mail contains `query`, ignoring case.
    pub async fn search_customers(&self, query: &CustomerQuery) -> AppResult<Vec<CustomerResponse>> {
        let mut select = customers::Entity::find().order_by_asc(customers::Column::Username);

        if let Some(needle) = non_empty(&query.query) {
            select = select.filter(
                Condition::any()
                    .add(icontains(
                        (customers::Entity, customers::Column::Username),
                        needle,
                    ))
                    .add(icontains(
                        (customers::Entity, customers::Column::Email),
                        needle,
                    )),
            );
        }

        let models = select.all(&self.pool).await?;
        Ok(models.into_iter().map(CustomerResponse::from).collect())
    }

    pub async fn get_customer(&self, username: &str) -> AppResult<CustomerResponse> {
        customers::Entity::find()
            .filter(customers::Column::Username.eq(username))
            .one(&self.pool)
            .await?
            .map(CustomerResponse::from)
            .ok_or_else(|| AppError::not_found("Customer"))
    }
}
