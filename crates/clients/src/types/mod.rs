pub mod errors;
pub mod inputs;

pub use errors::{CommissionerError, CommissionerResult};
pub use inputs::{AssignOrder, CommissionerPatch, NewCommissioner};
