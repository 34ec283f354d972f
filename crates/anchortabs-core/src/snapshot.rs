//! Serializable view of a page's tab sets

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSetSnapshot {
    pub id: Uuid,
    /// Value of the marker attribute on the claimed container
    pub marker_value: Option<String>,
    pub active_key: Option<String>,
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// URL fragment shared by all tab sets
    pub fragment: String,
    pub tab_sets: Vec<TabSetSnapshot>,
}

impl PageSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Active key of every tab set, in bootstrap order
    pub fn active_keys(&self) -> Vec<Option<&str>> {
        self.tab_sets.iter().map(|t| t.active_key.as_deref()).collect()
    }
}
