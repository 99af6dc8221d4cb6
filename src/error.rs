//! Shop Error Types
//!
//! Errors raised while loading shop data and wiring the shop together.
//! Player-facing failures never surface these; they go through the message set.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or starting the shop.
#[derive(Error, Debug)]
pub enum ShopError {
    /// A data or config file could not be read.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data or config file is not valid TOML for its schema.
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The catalog parsed but violates a load-time rule.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Required message templates are absent from the configuration.
    #[error("missing message keys: {}", .0.join(", "))]
    MissingMessages(Vec<String>),

    /// quantity * price does not fit in the currency type.
    #[error("price overflow: {quantity} x {price}")]
    PriceOverflow { quantity: u32, price: u64 },

    /// Ledger database failure during startup.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ShopError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ShopError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        ShopError::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

pub type ShopResult<T> = Result<T, ShopError>;
