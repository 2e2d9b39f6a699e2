//! Commissioner REST endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use agora_auth::{Principal, Role};
use agora_clients::{AssignOrder, CommissionerPatch, NewCommissioner};
use agora_database::{Commissioner, OrderWithCommissioners};

use crate::error::{GatewayError, GatewayResult};
use crate::rest::{ErrorResponse, MessageOnlyResponse};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommissionerResponse {
    pub id: i64,
    pub name: String,
    pub identity_number: String,
    pub phone_number: String,
    pub service_item_id: Option<i64>,
    pub client_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Commissioner> for CommissionerResponse {
    fn from(commissioner: Commissioner) -> Self {
        Self {
            id: commissioner.id,
            name: commissioner.name,
            identity_number: commissioner.identity_number,
            phone_number: commissioner.phone_number,
            service_item_id: commissioner.service_item_id,
            client_id: commissioner.client_id,
            created_at: commissioner.created_at,
            updated_at: commissioner.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommissionerEnvelope {
    pub commissioner: CommissionerResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommissionersResponse {
    pub commissioners: Vec<CommissionerResponse>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCommissionerRequest {
    pub name: String,
    pub identity_number: String,
    pub phone_number: String,
    pub password: String,
    pub service_item_id: Option<i64>,
}

impl From<CreateCommissionerRequest> for NewCommissioner {
    fn from(body: CreateCommissionerRequest) -> Self {
        Self {
            name: body.name,
            identity_number: body.identity_number,
            phone_number: body.phone_number,
            password: body.password,
            service_item_id: body.service_item_id,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCommissionerRequest {
    pub name: Option<String>,
    pub identity_number: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
    pub service_item_id: Option<i64>,
}

impl From<UpdateCommissionerRequest> for CommissionerPatch {
    fn from(body: UpdateCommissionerRequest) -> Self {
        Self {
            name: body.name,
            identity_number: body.identity_number,
            phone_number: body.phone_number,
            password: body.password,
            service_item_id: body.service_item_id,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub phone_number: String,
    pub password: String,
}

/// Identity encoded in the issued token.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenUserResponse {
    pub user_id: i64,
    pub name: String,
    #[schema(value_type = String, example = "COMMISSIONER")]
    pub role: Role,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: TokenUserResponse,
    pub token: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignOrderRequest {
    pub commissioner_id: Option<i64>,
    pub order_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub client_id: i64,
    pub service_item_id: Option<i64>,
    pub status: String,
    pub created_at: String,
    pub commissioner_ids: Vec<i64>,
}

impl From<OrderWithCommissioners> for OrderResponse {
    fn from(joined: OrderWithCommissioners) -> Self {
        Self {
            id: joined.order.id,
            client_id: joined.order.client_id,
            service_item_id: joined.order.service_item_id,
            status: joined.order.status,
            created_at: joined.order.created_at,
            commissioner_ids: joined.commissioner_ids,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssignOrderResponse {
    pub message: String,
    pub order: OrderResponse,
}

#[utoipa::path(
    post,
    path = "/api/v1/commissioners/login",
    tag = "Commissioners",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; token also set as an HTTP-only cookie", body = LoginResponse),
        (status = 400, description = "Missing phone number or password", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<LoginRequest>, GatewayError>,
) -> GatewayResult<(CookieJar, Json<LoginResponse>)> {
    let login = state
        .commissioner_service()
        .login(&body.phone_number, &body.password)
        .await?;

    let auth = state.auth_config();
    let cookie = Cookie::build((auth.cookie_name.clone(), login.token.clone()))
        .http_only(true)
        .secure(auth.cookie_secure)
        .same_site(SameSite::Lax)
        .path("/");

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "Login Success".to_string(),
            user: TokenUserResponse {
                user_id: login.principal.id,
                name: login.principal.name,
                role: login.principal.role,
            },
            token: login.token,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/commissioners",
    tag = "Commissioners",
    request_body = CreateCommissionerRequest,
    responses(
        (status = 201, description = "Commissioner created", body = CommissionerEnvelope),
        (status = 400, description = "Missing fields or phone number taken", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller is not a client", body = ErrorResponse)
    )
)]
pub async fn create_commissioner(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    WithRejection(Json(body), _): WithRejection<Json<CreateCommissionerRequest>, GatewayError>,
) -> GatewayResult<(StatusCode, Json<CommissionerEnvelope>)> {
    let commissioner = state
        .commissioner_service()
        .create(&principal, body.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommissionerEnvelope {
            commissioner: commissioner.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/commissioners",
    tag = "Commissioners",
    responses(
        (status = 200, description = "The caller's commissioners", body = CommissionersResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller is not a client", body = ErrorResponse)
    )
)]
pub async fn list_commissioners(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> GatewayResult<Json<CommissionersResponse>> {
    let commissioners = state.commissioner_service().list(&principal).await?;

    Ok(Json(CommissionersResponse {
        commissioners: commissioners.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/commissioners/{id}",
    tag = "Commissioners",
    params(("id" = i64, Path, description = "Commissioner id")),
    responses(
        (status = 200, description = "Commissioner", body = CommissionerEnvelope),
        (status = 403, description = "Owned by another client", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_commissioner(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, GatewayError>,
) -> GatewayResult<Json<CommissionerEnvelope>> {
    let commissioner = state.commissioner_service().get(&principal, id).await?;

    Ok(Json(CommissionerEnvelope {
        commissioner: commissioner.into(),
    }))
}

#[utoipa::path(
    patch,
    path = "/api/v1/commissioners/{id}",
    tag = "Commissioners",
    params(("id" = i64, Path, description = "Commissioner id")),
    request_body = UpdateCommissionerRequest,
    responses(
        (status = 200, description = "Updated commissioner", body = CommissionerEnvelope),
        (status = 400, description = "Phone number taken", body = ErrorResponse),
        (status = 403, description = "Owned by another client", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_commissioner(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, GatewayError>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateCommissionerRequest>, GatewayError>,
) -> GatewayResult<Json<CommissionerEnvelope>> {
    let commissioner = state
        .commissioner_service()
        .update(&principal, id, body.into())
        .await?;

    Ok(Json(CommissionerEnvelope {
        commissioner: commissioner.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/commissioners/{id}",
    tag = "Commissioners",
    params(("id" = i64, Path, description = "Commissioner id")),
    responses(
        (status = 200, description = "Commissioner deleted", body = MessageOnlyResponse),
        (status = 403, description = "Owned by another client", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_commissioner(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, GatewayError>,
) -> GatewayResult<Json<MessageOnlyResponse>> {
    state.commissioner_service().delete(&principal, id).await?;

    Ok(Json(MessageOnlyResponse {
        message: "Commissioner has been deleted".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/commissioners/assign-order",
    tag = "Commissioners",
    request_body = AssignOrderRequest,
    responses(
        (status = 200, description = "Commissioner linked to the order", body = AssignOrderResponse),
        (status = 400, description = "Missing ids", body = ErrorResponse),
        (status = 403, description = "Caller may not assign orders", body = ErrorResponse),
        (status = 404, description = "Commissioner or order not found", body = ErrorResponse)
    )
)]
pub async fn assign_order(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    WithRejection(Json(body), _): WithRejection<Json<AssignOrderRequest>, GatewayError>,
) -> GatewayResult<Json<AssignOrderResponse>> {
    let order = state
        .commissioner_service()
        .assign_to_order(
            &principal,
            AssignOrder {
                commissioner_id: body.commissioner_id,
                order_id: body.order_id,
            },
        )
        .await?;

    Ok(Json(AssignOrderResponse {
        message: "Commissioner assigned to order".to_string(),
        order: order.into(),
    }))
}
