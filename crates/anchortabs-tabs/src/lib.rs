//! anchortabs Tab Sets
//!
//! Turns a navigation element full of anchor links into a group of mutually exclusive
//! panels. Exactly one panel of an initialized tab set is active; clicking a bound
//! button switches panels and records the choice in the page's URL fragment.
//!
//! Several tab sets can share one page. They coordinate only through the fragment:
//! each one owns a single `:`-separated slot, see [`FragmentKeys`].

mod config;
mod error;
mod fragment;
mod href;
mod tabset;

pub use config::TabsConfig;
pub use error::TabsError;
pub use fragment::FragmentKeys;
pub use href::{fragment_of, resolve_href, resolve_key};
pub use tabset::TabSet;

pub type Result<T> = std::result::Result<T, TabsError>;
