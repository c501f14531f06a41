use skycast_core::{AppError, ReqwestErrorExt, StorageError};
use skycast_services::HistoryError;

use super::IntoAppError;

impl IntoAppError for HistoryError {
    fn into_app_error(self) -> AppError {
        match self {
            HistoryError::Validation(s) => AppError::Validation(s),
            HistoryError::Storage(e) => AppError::Storage(e),
            HistoryError::Serialization(e) => AppError::Storage(StorageError::WriteFailed(e.to_string())),
            HistoryError::Backend { message, .. } => {
                AppError::Storage(StorageError::Unavailable(message))
            }
            HistoryError::Http(e) => AppError::Network(e.into_network_error()),
            HistoryError::Other(e) => AppError::Other(e),
        }
    }
}
