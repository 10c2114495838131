use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;
use crate::time_ctrl::ConfigError;

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    BadRequest(String),

    /// Такого игрока нет в партии.
    UnknownPlayer(PlayerId),

    /// Контроль времени не прошёл проверку.
    InvalidConfig(String),
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::InvalidConfig(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
