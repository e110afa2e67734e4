pub mod client;
pub mod product;
pub mod proposal;
pub mod user;

pub use client::{Client, NewClient};
pub use product::{NewProduct, Product};
pub use proposal::{
    Classification, ContractType, Equipment, Manager, Opportunity, Proposal, ProposalItem,
    ProposalStatus, ProposalTotals,
};
pub use user::{seed_users, User, UserRole};
