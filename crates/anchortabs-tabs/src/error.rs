//! Tab set error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabsError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Document error: {0}")]
    Dom(#[from] anchortabs_dom::DomError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
