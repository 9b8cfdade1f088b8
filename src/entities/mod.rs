pub mod customers;
pub mod restaurants;
pub mod reviews;
pub mod visits;

pub use customers as customer_entity;
pub use restaurants as restaurant_entity;
pub use reviews as review_entity;
pub use visits as visit_entity;

pub use restaurants::Cuisine;
pub use reviews::PricingCategory;
