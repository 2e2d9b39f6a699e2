pub mod commissioner_service;

pub use commissioner_service::{CommissionerLogin, CommissionerService};
