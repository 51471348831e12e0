use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::{Ready, ready};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::services::token_service::TokenService;

/// The verified caller, extracted from the `Authorization: Bearer` header.
/// Handlers that take one of these are unreachable without a valid token.
#[derive(Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub name: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<AuthenticatedUser, ApiError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or(ApiError::Unauthenticated("No token, authorization denied"))?
        .to_str()
        .map_err(|_| ApiError::Unauthenticated("Invalid header format"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthenticated("Invalid auth header format"))?
        .trim();

    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| ApiError::Internal("token service not configured".into()))?;

    let identity = tokens.verify(token)?;
    Ok(AuthenticatedUser {
        user_id: identity.user_id,
        name: identity.name,
    })
}
