//! # Agora Clients Crate
//!
//! Clients delegate work to commissioners. This crate owns the commissioner
//! lifecycle (create, login, read, update, delete), order assignment, and the
//! ownership rule that a client may only touch its own commissioners.

pub mod services;
pub mod types;
pub mod utils;

pub use services::{CommissionerLogin, CommissionerService};
pub use types::{
    AssignOrder, CommissionerError, CommissionerPatch, CommissionerResult, NewCommissioner,
};
pub use utils::ownership::OwnershipChecker;
