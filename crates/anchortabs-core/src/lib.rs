//! anchortabs Core
//!
//! Page-level glue around the tab set state machine: bootstrapping every tab set on a
//! page, routing host clicks to the tab set that owns the clicked button, and
//! serializable snapshots of the resulting state.

mod error;
mod page;
mod snapshot;

pub use error::CoreError;
pub use page::Page;
pub use snapshot::{PageSnapshot, TabSetSnapshot};

// Re-export the building blocks
pub use anchortabs_dom::{
    ClickEvent, Document, DomError, ElementId, HtmlDocument, ListenerId, Location, PageLocation,
};
pub use anchortabs_tabs::{FragmentKeys, TabSet, TabsConfig, TabsError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
