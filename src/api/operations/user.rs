use validator::ValidateEmail;

use crate::database::{NewUser, StorageError, UserEntity, UserRepository};
use crate::error::{AppError, RegistrationFailure};
use crate::utils::{hash_password, verify_password};

/// 注册新用户，密码哈希后保存
pub async fn register_user(
    users: &dyn UserRepository,
    name: String,
    email: String,
    password: &str,
) -> Result<UserEntity, AppError> {
    if !email.validate_email() {
        tracing::warn!("Rejected registration with malformed email");
        return Err(AppError::RegistrationFailed(RegistrationFailure::Validation));
    }

    let password_hash = hash_password(password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        AppError::Internal
    })?;

    users
        .create(NewUser {
            name,
            email,
            password_hash,
        })
        .await
        .map_err(|e| {
            tracing::error!("Failed to register user: {:?}", e);
            match e {
                StorageError::UniqueViolation => {
                    AppError::RegistrationFailed(RegistrationFailure::Validation)
                }
                _ => AppError::RegistrationFailed(RegistrationFailure::Storage),
            }
        })
}

/// 校验邮箱和密码，成功时返回用户
pub async fn login_user(
    users: &dyn UserRepository,
    email: &str,
    password: &str,
) -> Result<UserEntity, AppError> {
    let user = users
        .find_by_email(email)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user by email: {:?}", e);
            AppError::from(e)
        })?
        .ok_or(AppError::UserNotFound)?;

    match verify_password(password, &user.password) {
        Ok(true) => Ok(user),
        Ok(false) => Err(AppError::IncorrectPassword),
        Err(e) => {
            tracing::error!("Stored password hash for user {} is unusable: {}", user.id, e);
            Err(AppError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    #[tokio::test]
    async fn registered_user_can_log_in() {
        let store = MemoryStore::new();
        let user = register_user(&store, "Test Account".into(), "test@example.com".into(), "1234567")
            .await
            .unwrap();
        assert_ne!(user.password, "1234567");

        let logged_in = login_user(&store, "test@example.com", "1234567").await.unwrap();
        assert_eq!(logged_in.id, user.id);
        assert_eq!(logged_in.name, "Test Account");
    }

    #[tokio::test]
    async fn duplicate_email_fails_with_validation_error() {
        let store = MemoryStore::new();
        register_user(&store, "A".into(), "dup@example.com".into(), "pw")
            .await
            .unwrap();
        let err = register_user(&store, "B".into(), "dup@example.com".into(), "pw")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "REG_FAIL");
        assert_eq!(err.to_string(), "Failed to register! (Validation error)");
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let store = MemoryStore::new();
        let err = register_user(&store, "A".into(), "not-an-email".into(), "pw")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "REG_FAIL");
    }

    #[tokio::test]
    async fn login_failures_are_distinguished() {
        let store = MemoryStore::new();
        register_user(&store, "A".into(), "a@example.com".into(), "right")
            .await
            .unwrap();

        let err = login_user(&store, "a@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.code(), "WRONG_PASS");

        let err = login_user(&store, "nobody@example.com", "right").await.unwrap_err();
        assert_eq!(err.code(), "NO_USER");
    }
}
