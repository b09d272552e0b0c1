//! Row, record and request-body types for every entity.

mod account;
mod provider;
mod sneaker;

pub use account::*;
pub use provider::*;
pub use sneaker::*;
