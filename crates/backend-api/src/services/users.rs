use mobilab_database::{
    CreateUserRequest, LabSummary, UpdateUserRequest, User, UserRepository, UserStatus,
};
use sqlx::SqlitePool;

use super::error::ServiceError;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Filters accepted by `GET /api/v1/users`. `id` and `email` resolve a
/// single user; `status`/`role_id` filter the listing.
#[derive(Debug, Default, Clone)]
pub struct UserFilter {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub status: Option<UserStatus>,
    pub role_id: Option<i64>,
}

pub async fn find(pool: &SqlitePool, filter: &UserFilter) -> Result<Vec<User>, ServiceError> {
    let repo = UserRepository::new(pool.clone());

    if let Some(id) = filter.id {
        return Ok(get_by_id(pool, id).await?.into_iter().collect());
    }
    if let Some(email) = &filter.email {
        return Ok(get_by_email(pool, email).await?.into_iter().collect());
    }
    if let Some(status) = filter.status {
        return Ok(repo.find_by_status(status).await?);
    }
    if let Some(role_id) = filter.role_id {
        return Ok(repo.find_by_role(role_id).await?);
    }

    Ok(repo.find_all().await?)
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, ServiceError> {
    if id <= 0 {
        return Err(ServiceError::bad_request("Invalid user ID"));
    }
    Ok(UserRepository::new(pool.clone()).find_by_id(id).await?)
}

pub async fn get_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, ServiceError> {
    validate_email(email)?;
    Ok(UserRepository::new(pool.clone()).find_by_email(email).await?)
}

pub async fn create(pool: &SqlitePool, request: &CreateUserRequest) -> Result<User, ServiceError> {
    validate_create(request)?;

    let repo = UserRepository::new(pool.clone());
    if repo.email_exists(&request.email).await? {
        return Err(ServiceError::bad_request(
            "User with this email already exists",
        ));
    }

    let mut to_create = request.clone();
    to_create.password = hash_password(&request.password);
    Ok(repo.create(&to_create).await?)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    request: &UpdateUserRequest,
) -> Result<User, ServiceError> {
    if id <= 0 {
        return Err(ServiceError::bad_request("Invalid user ID"));
    }

    let repo = UserRepository::new(pool.clone());
    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User not found"))?;

    validate_update(request)?;

    if let Some(email) = &request.email {
        if email != &existing.email && repo.email_exists(email).await? {
            return Err(ServiceError::bad_request(
                "User with this email already exists",
            ));
        }
    }

    let mut to_update = request.clone();
    if let Some(password) = &request.password {
        to_update.password = Some(hash_password(password));
    }
    Ok(repo.update(id, &to_update).await?)
}

/// Soft delete: the account is kept but marked disabled.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), ServiceError> {
    update(
        pool,
        id,
        &UpdateUserRequest {
            status: Some(UserStatus::Disabled),
            ..Default::default()
        },
    )
    .await?;
    Ok(())
}

pub async fn get_user_labs(pool: &SqlitePool, id: i64) -> Result<Vec<LabSummary>, ServiceError> {
    let user = get_by_id(pool, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User not found"))?;
    Ok(user.labs)
}

pub(crate) fn validate_email(email: &str) -> Result<(), ServiceError> {
    let email_regex = regex::Regex::new(EMAIL_PATTERN)
        .map_err(|e| ServiceError::internal(format!("Failed to compile email regex: {e}")))?;

    if email.len() > 255 || !email_regex.is_match(email) {
        return Err(ServiceError::bad_request("Valid email is required"));
    }
    Ok(())
}

pub(crate) fn validate_create(request: &CreateUserRequest) -> Result<(), ServiceError> {
    validate_email(&request.email)?;

    if request.name.trim().len() < 2 {
        return Err(ServiceError::bad_request(
            "Name must be at least 2 characters long",
        ));
    }
    if request.password.len() < 6 {
        return Err(ServiceError::bad_request(
            "Password must be at least 6 characters long",
        ));
    }
    if request.role_id <= 0 {
        return Err(ServiceError::bad_request("Valid role ID is required"));
    }
    if let Some(confirmation) = &request.password_confirmation {
        if confirmation != &request.password {
            return Err(ServiceError::bad_request(
                "Password and password confirmation do not match",
            ));
        }
    }
    Ok(())
}

fn validate_update(request: &UpdateUserRequest) -> Result<(), ServiceError> {
    if let Some(email) = &request.email {
        validate_email(email)?;
    }
    if let Some(name) = &request.name {
        if name.trim().len() < 2 {
            return Err(ServiceError::bad_request(
                "Name must be at least 2 characters long",
            ));
        }
    }
    if let Some(password) = &request.password {
        if password.len() < 6 {
            return Err(ServiceError::bad_request(
                "Password must be at least 6 characters long",
            ));
        }
        if let Some(confirmation) = &request.password_confirmation {
            if confirmation != password {
                return Err(ServiceError::bad_request(
                    "Password and password confirmation do not match",
                ));
            }
        }
    }
    if request.role_id.is_some_and(|id| id <= 0) {
        return Err(ServiceError::bad_request("Invalid role ID"));
    }
    Ok(())
}

// TODO: replace with argon2 once the admin app stops comparing stored
// passwords verbatim.
fn hash_password(password: &str) -> String {
    password.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateUserRequest {
        CreateUserRequest {
            email: "editor@example.com".to_string(),
            name: "Editor".to_string(),
            password: "secret-password".to_string(),
            password_confirmation: Some("secret-password".to_string()),
            phone: None,
            picture: None,
            role_id: 2,
            status: None,
        }
    }

    #[test]
    fn email_format_is_enforced() {
        assert!(validate_email("editor@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn create_validation_accepts_complete_payload() {
        assert!(validate_create(&valid_create()).is_ok());
    }

    #[test]
    fn short_password_is_rejected() {
        let mut request = valid_create();
        request.password = "short".to_string();
        request.password_confirmation = None;
        assert!(validate_create(&request).is_err());
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let mut request = valid_create();
        request.password_confirmation = Some("different".to_string());
        assert!(validate_create(&request).is_err());
    }

    #[test]
    fn update_rejects_nonpositive_role() {
        let request = UpdateUserRequest {
            role_id: Some(0),
            ..Default::default()
        };
        assert!(validate_update(&request).is_err());
    }
}
