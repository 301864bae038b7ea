pub mod cart;
pub mod curator;
pub mod manager;
pub mod validator;

pub use crate::domain::model::{
    AvailabilityStatus, CartEntry, CartSummary, Domain, ProbeTicket, Suffix,
};
pub use crate::domain::ports::{AvailabilityProber, ConfigProvider};
pub use crate::utils::error::Result;
