use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::model::QuantityError;
use crate::receipt::ReceiptError;
use crate::validate::ValidationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
    #[error("Failed to read settings: {0}")]
    SettingsRead(#[from] toml::de::Error),
    #[error("Failed to write settings: {0}")]
    SettingsWrite(#[from] toml::ser::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Prompt(#[from] inquire::InquireError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Quantity(#[from] QuantityError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Receipt(#[from] ReceiptError),
    #[error("'{0}' is not installed; compile {1:?} manually (e.g. brew install typst)")]
    CompilerMissing(String, PathBuf),
    #[error("Compilation of {0:?} failed")]
    CompileFailed(PathBuf),
}

impl AppError {
    /// Esc / Ctrl-C in a prompt.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            AppError::Prompt(
                inquire::InquireError::OperationCanceled | inquire::InquireError::OperationInterrupted
            )
        )
    }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
