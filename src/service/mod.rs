//! Data access per entity, plus the join aggregation they share.

mod accounts;
pub mod aggregate;
mod providers;
mod sneakers;

pub use accounts::{AccountService, AccountTable};
pub use providers::ProviderService;
pub use sneakers::SneakerService;
