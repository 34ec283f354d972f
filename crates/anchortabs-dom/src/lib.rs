//! anchortabs host document
//!
//! The tab state machine never talks to a browser directly. Everything it needs from
//! the host (element queries, attribute and class mutation, click listeners, the page
//! URL) goes through the [`Document`] and [`Location`] traits defined here.
//!
//! [`HtmlDocument`] is an in-memory host: markup is parsed with `scraper`, attribute
//! state is kept in a mutable overlay, and the page URL lives in a `url::Url` with a
//! small history stack.

mod error;
mod event;
mod host;
mod html;
mod location;

pub use error::DomError;
pub use event::ClickEvent;
pub use host::{Document, Location};
pub use html::{ElementId, HtmlDocument, ListenerId};
pub use location::PageLocation;

pub type Result<T> = std::result::Result<T, DomError>;

/// Check that `selector` is accepted by the selector engine used by [`HtmlDocument`].
pub fn validate_selector(selector: &str) -> Result<()> {
    scraper::Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| DomError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })
}
