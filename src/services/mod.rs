pub mod auth_service;
pub mod customer_service;
pub mod restaurant_service;
pub mod review_service;
pub mod visit_service;

pub use auth_service::*;
pub use customer_service::*;
pub use restaurant_service::*;
pub use review_service::*;
pub use visit_service::*;

use sea_orm::sea_query::{Expr, Func, IntoColumnRef, SimpleExpr};

/// Case-insensitive substring match on `column`.
pub(crate) fn icontains<C: IntoColumnRef>(column: C, needle: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(format!("%{}%", needle.to_lowercase()))
}

/// Trimmed filter value, or `None` when absent or blank.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
