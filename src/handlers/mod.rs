pub mod catalog;
pub mod clients;
pub mod common;
pub mod products;
pub mod proposals;
pub mod users;

pub use catalog::catalog_routes;
pub use clients::client_routes;
pub use products::product_routes;
pub use proposals::proposal_routes;
pub use users::user_routes;
