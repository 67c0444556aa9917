//! Domain models shared across routes and services.

pub mod design;
pub mod order;
pub mod user;

pub use design::{CustomDesign, DesignRecord};
pub use order::Order;
pub use user::CurrentUser;
