pub mod aggregation;
pub mod jwt;
pub mod password;
pub mod validation;

pub use aggregation::{average_rating, pricing_category_evaluation, to_money, total_spending};
pub use jwt::*;
pub use password::*;
pub use validation::*;
