pub mod common;
pub mod customer;
pub mod pagination;
pub mod restaurant;
pub mod review;
pub mod visit;

pub use common::*;
pub use customer::*;
pub use pagination::*;
pub use restaurant::*;
pub use review::*;
pub use visit::*;
