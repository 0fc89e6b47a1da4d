use std::fmt;

use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::cache::CacheError;
use crate::database::StorageError;
use crate::utils::error_codes;

/// 注册失败的原因，对外只暴露固定的分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationFailure {
    Validation,
    Storage,
}

impl fmt::Display for RegistrationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationFailure::Validation => f.write_str("Validation error"),
            RegistrationFailure::Storage => f.write_str("Storage error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Please authenticate first!")]
    NotAuthenticated,
    #[error("Failed to register! ({0})")]
    RegistrationFailed(RegistrationFailure),
    #[error("Failed to find user.")]
    UserNotFound,
    #[error("Incorrect password!")]
    IncorrectPassword,
    #[error("Too many requests, please try again later.")]
    RateLimited,
    #[error("Unable to connect to the database")]
    Connection,
    #[error("Internal server error")]
    Internal,
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotAuthenticated => error_codes::NO_AUTH,
            AppError::RegistrationFailed(_) => error_codes::REG_FAIL,
            AppError::UserNotFound => error_codes::NO_USER,
            AppError::IncorrectPassword => error_codes::WRONG_PASS,
            AppError::RateLimited => error_codes::RATE_LIMITED,
            AppError::Connection => error_codes::CONNECTION_ERROR,
            AppError::Internal => error_codes::INTERNAL_ERROR,
        }
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Connection(_) => AppError::Connection,
            _ => AppError::Internal,
        }
    }
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::Storage(storage) => storage.into(),
            CacheError::Export(_) => AppError::Internal,
        }
    }
}
