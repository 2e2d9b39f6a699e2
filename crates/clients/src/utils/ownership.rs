//! Ownership checks between clients and their commissioners.

use agora_auth::{Principal, Role};

use crate::types::CommissionerError;

pub struct OwnershipChecker;

impl OwnershipChecker {
    /// A client may only act on commissioners listed in its own set.
    pub fn can_manage(owned_ids: &[i64], commissioner_id: i64) -> Result<(), CommissionerError> {
        if !owned_ids.contains(&commissioner_id) {
            return Err(CommissionerError::forbidden(
                "You are not authorized to modify this commissioner",
            ));
        }
        Ok(())
    }

    pub fn require_client(principal: &Principal) -> Result<(), CommissionerError> {
        if principal.role != Role::Client {
            return Err(CommissionerError::forbidden(
                "Only clients can manage commissioners",
            ));
        }
        Ok(())
    }

    pub fn can_assign_orders(principal: &Principal) -> Result<(), CommissionerError> {
        if !matches!(principal.role, Role::Client | Role::Admin) {
            return Err(CommissionerError::forbidden(
                "Only clients and admins can assign commissioners to orders",
            ));
        }
        Ok(())
    }

    /// A commissioner may only be linked to orders of the client it acts for,
    /// and a client may only link its own commissioners to its own orders.
    pub fn can_link_to_order(
        principal: &Principal,
        commissioner_client_id: i64,
        order_client_id: i64,
    ) -> Result<(), CommissionerError> {
        if principal.role == Role::Client
            && (commissioner_client_id != principal.id || order_client_id != principal.id)
        {
            return Err(CommissionerError::forbidden(
                "You can only assign your own commissioners to your own orders",
            ));
        }
        if commissioner_client_id != order_client_id {
            return Err(CommissionerError::forbidden(
                "Commissioner does not act for the client of this order",
            ));
        }
        Ok(())
    }
}
