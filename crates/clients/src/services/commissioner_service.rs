//! Commissioner service: CRUD scoped to the owning client, login, order assignment.

use sqlx::SqlitePool;
use tracing::{info, warn};

use agora_auth::{hash_password, verify_password, AuthError, Principal, Role, TokenManager};
use agora_database::{
    ClientRepository, Commissioner, CommissionerRepository, CreateCommissionerRequest,
    DatabaseError, OrderRepository, OrderWithCommissioners, UpdateCommissionerRequest,
};

use crate::types::inputs::provided;
use crate::types::{
    AssignOrder, CommissionerError, CommissionerPatch, CommissionerResult, NewCommissioner,
};
use crate::utils::ownership::OwnershipChecker;

/// Successful login: the commissioner, the principal the token encodes, and the token.
#[derive(Debug, Clone)]
pub struct CommissionerLogin {
    pub commissioner: Commissioner,
    pub principal: Principal,
    pub token: String,
}

#[derive(Clone)]
pub struct CommissionerService {
    commissioners: CommissionerRepository,
    clients: ClientRepository,
    orders: OrderRepository,
    tokens: TokenManager,
}

impl CommissionerService {
    pub fn new(pool: SqlitePool, tokens: TokenManager) -> Self {
        Self {
            commissioners: CommissionerRepository::new(pool.clone()),
            clients: ClientRepository::new(pool.clone()),
            orders: OrderRepository::new(pool),
            tokens,
        }
    }

    pub async fn create(
        &self,
        principal: &Principal,
        input: NewCommissioner,
    ) -> CommissionerResult<Commissioner> {
        OwnershipChecker::require_client(principal)?;

        if !input.has_required_fields() {
            return Err(CommissionerError::validation(
                "Please provide all required fields",
            ));
        }

        let password_hash = hash_password(&input.password)?;
        let commissioner = self
            .commissioners
            .create(&CreateCommissionerRequest {
                name: input.name,
                identity_number: input.identity_number,
                phone_number: input.phone_number,
                password_hash,
                service_item_id: input.service_item_id,
                client_id: principal.id,
            })
            .await
            .map_err(map_write_error)?;

        Ok(commissioner)
    }

    pub async fn login(&self, phone_number: &str, password: &str) -> CommissionerResult<CommissionerLogin> {
        if phone_number.trim().is_empty() || password.is_empty() {
            return Err(CommissionerError::validation(
                "Please provide a valid phone number and password",
            ));
        }

        let Some(commissioner) = self.commissioners.find_by_phone(phone_number).await? else {
            warn!("commissioner login with unknown phone number");
            return Err(CommissionerError::InvalidCredentials);
        };

        verify_password(password, &commissioner.password_hash).map_err(|err| match err {
            AuthError::InvalidCredentials => {
                warn!(commissioner_id = commissioner.id, "commissioner login with wrong password");
                CommissionerError::InvalidCredentials
            }
            other => CommissionerError::Auth(other),
        })?;

        let principal = Principal::new(commissioner.id, Role::Commissioner, commissioner.name.clone());
        let token = self.tokens.issue(&principal)?;
        info!(commissioner_id = commissioner.id, "commissioner logged in");

        Ok(CommissionerLogin {
            commissioner,
            principal,
            token,
        })
    }

    pub async fn list(&self, principal: &Principal) -> CommissionerResult<Vec<Commissioner>> {
        OwnershipChecker::require_client(principal)?;
        Ok(self.commissioners.list_for_client(principal.id).await?)
    }

    pub async fn get(&self, principal: &Principal, id: i64) -> CommissionerResult<Commissioner> {
        self.owned(principal, id).await
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: i64,
        patch: CommissionerPatch,
    ) -> CommissionerResult<Commissioner> {
        let current = self.owned(principal, id).await?;

        let password_hash = match provided(&patch.password) {
            Some(password) => Some(hash_password(&password)?),
            None => None,
        };
        let request = UpdateCommissionerRequest {
            name: provided(&patch.name),
            identity_number: provided(&patch.identity_number),
            phone_number: provided(&patch.phone_number),
            password_hash,
            service_item_id: patch.service_item_id,
        };

        if request.is_empty() {
            return Ok(current);
        }

        self.commissioners
            .update(id, &request)
            .await
            .map_err(map_write_error)?
            .ok_or(CommissionerError::CommissionerNotFound(id))
    }

    pub async fn delete(&self, principal: &Principal, id: i64) -> CommissionerResult<()> {
        self.owned(principal, id).await?;

        if !self.commissioners.delete(id).await? {
            return Err(CommissionerError::CommissionerNotFound(id));
        }
        Ok(())
    }

    pub async fn assign_to_order(
        &self,
        principal: &Principal,
        request: AssignOrder,
    ) -> CommissionerResult<OrderWithCommissioners> {
        OwnershipChecker::can_assign_orders(principal)?;

        let (Some(commissioner_id), Some(order_id)) = (request.commissioner_id, request.order_id)
        else {
            return Err(CommissionerError::validation(
                "Please provide commissionerId and orderId",
            ));
        };

        let commissioner = self
            .commissioners
            .find_by_id(commissioner_id)
            .await?
            .ok_or(CommissionerError::CommissionerNotFound(commissioner_id))?;
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(CommissionerError::OrderNotFound(order_id))?;

        OwnershipChecker::can_link_to_order(principal, commissioner.client_id, order.client_id)?;

        self.orders
            .attach_commissioner(order_id, commissioner_id)
            .await?;

        self.orders
            .with_commissioners(order_id)
            .await?
            .ok_or(CommissionerError::OrderNotFound(order_id))
    }

    /// Existence first (404), then ownership (403).
    async fn owned(&self, principal: &Principal, id: i64) -> CommissionerResult<Commissioner> {
        OwnershipChecker::require_client(principal)?;

        let commissioner = self
            .commissioners
            .find_by_id(id)
            .await?
            .ok_or(CommissionerError::CommissionerNotFound(id))?;

        let owned_ids = self.clients.commissioner_ids(principal.id).await?;
        OwnershipChecker::can_manage(&owned_ids, id)?;

        Ok(commissioner)
    }
}

fn map_write_error(err: DatabaseError) -> CommissionerError {
    match err {
        DatabaseError::Duplicate(_) => {
            CommissionerError::validation("Phone number is already registered")
        }
        DatabaseError::ForeignKey(_) => {
            CommissionerError::validation("Referenced service item or client does not exist")
        }
        other => CommissionerError::Database(other),
    }
}
