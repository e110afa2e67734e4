pub mod catalog;
pub mod clients;
pub mod numbering;
pub mod pricing;
pub mod products;
pub mod proposals;
pub mod validation;

pub use catalog::Catalog;
pub use clients::ClientService;
pub use products::ProductService;
pub use proposals::ProposalService;
