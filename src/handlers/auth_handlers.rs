use actix_web::{HttpResponse, get, post, put, web};
use regex::Regex;
use uuid::Uuid;

use crate::AppState;
use crate::dtos::auth_dtos::{AuthOut, LoginIn, MsgUserOut, SignupIn, UpdateProfileIn};
use crate::errors::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::user::{BIO_MAX_LEN, PASSWORD_MIN_LEN, User};
use crate::repositories::user_repository::UserRepository;
use crate::services::password;
use crate::services::token_service::TokenService;

fn looks_like_email(email: &str) -> bool {
    let re = Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").unwrap();
    re.is_match(email)
}

#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    tokens: web::Data<TokenService>,
    body: web::Json<SignupIn>,
) -> Result<HttpResponse, ApiError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("Please provide a name".into()));
    }
    let email = body.email.trim().to_lowercase();
    if !looks_like_email(&email) {
        return Err(ApiError::Validation("Please provide a valid email".into()));
    }
    if body.password.len() < PASSWORD_MIN_LEN {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters long".into(),
        ));
    }

    if UserRepository::find_by_email(&state.pg_pool, &email)
        .await?
        .is_some()
    {
        return Err(ApiError::DuplicateEmail);
    }

    let user = User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email,
        password_hash: password::hash(&body.password)?,
        bio: String::new(),
    };
    UserRepository::insert(&state.pg_pool, &user).await?;

    let token = tokens.issue(user.id, &user.name)?;
    Ok(HttpResponse::Created().json(AuthOut {
        token,
        name: user.name,
        id: user.id,
    }))
}

/// Unknown email and wrong password answer identically, so callers cannot
/// probe which addresses have accounts.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    tokens: web::Data<TokenService>,
    body: web::Json<LoginIn>,
) -> Result<HttpResponse, ApiError> {
    let email = body.email.trim().to_lowercase();
    let user = UserRepository::find_by_email(&state.pg_pool, &email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !password::verify(&body.password, &user.password_hash)? {
        return Err(ApiError::InvalidCredentials);
    }

    let token = tokens.issue(user.id, &user.name)?;
    Ok(HttpResponse::Ok().json(AuthOut {
        token,
        name: user.name,
        id: user.id,
    }))
}

#[get("/profile")]
pub async fn get_profile(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let record = UserRepository::find_by_id(&state.pg_pool, user.user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    Ok(HttpResponse::Ok().json(record.public()))
}

#[put("/profile")]
pub async fn update_profile(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<UpdateProfileIn>,
) -> Result<HttpResponse, ApiError> {
    let name = body.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(ApiError::Validation("Name is required".into()));
    }

    let mut record = UserRepository::find_by_id(&state.pg_pool, user.user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    record.name = name.to_string();
    if let Some(bio) = &body.bio {
        if bio.chars().count() > BIO_MAX_LEN {
            return Err(ApiError::Validation(
                "Bio cannot exceed 500 characters".into(),
            ));
        }
        record.bio = bio.clone();
    }

    let updated = UserRepository::update_profile(&state.pg_pool, record.id, &record.name, &record.bio)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    Ok(HttpResponse::Ok().json(MsgUserOut {
        msg: "Profile updated successfully".into(),
        user: updated.public(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_check_accepts_ordinary_addresses() {
        assert!(looks_like_email("ada@example.com"));
        assert!(looks_like_email("ADA.LOVELACE+feed@sub.example.co.uk"));
    }

    #[test]
    fn email_check_rejects_garbage() {
        for bad in ["", "ada", "ada@", "@example.com", "ada@example", "a b@example.com"] {
            assert!(!looks_like_email(bad), "accepted {bad:?}");
        }
    }
}
