//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Document error: {0}")]
    Dom(#[from] anchortabs_dom::DomError),

    #[error("Tab set error: {0}")]
    Tabs(#[from] anchortabs_tabs::TabsError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Tab set not found: {0}")]
    TabSetNotFound(usize),
}
