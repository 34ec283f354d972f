//! Host contract
//!
//! A tab set only borrows elements from the host tree. It never creates or destroys
//! nodes: it reads markup, flips classes and attributes, and attaches one click
//! listener per bound button.

use std::fmt::Debug;
use std::hash::Hash;

use crate::Result;

/// Element tree operations a tab set needs from its host.
pub trait Document {
    /// Borrowed handle to an element in the host tree
    type Element: Copy + Eq + Hash + Debug;
    /// Handle to an attached click listener, used to detach it again
    type Listener: Copy + Eq + Debug;

    /// All elements matching `selector`, in document order. With a `scope`, only
    /// descendants of that element are returned.
    fn query_selector_all(
        &self,
        scope: Option<Self::Element>,
        selector: &str,
    ) -> Result<Vec<Self::Element>>;

    /// Immediate element children, in document order
    fn children(&self, element: Self::Element) -> Vec<Self::Element>;

    /// First element in document order whose `id` attribute equals `id`
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Lowercase local name (`a`, `li`, `div`, ...)
    fn local_name(&self, element: Self::Element) -> String;

    fn attribute(&self, element: Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&mut self, element: Self::Element, name: &str, value: &str);
    fn remove_attribute(&mut self, element: Self::Element, name: &str);

    fn has_attribute(&self, element: Self::Element, name: &str) -> bool {
        self.attribute(element, name).is_some()
    }

    fn has_class(&self, element: Self::Element, class: &str) -> bool;
    fn add_class(&mut self, element: Self::Element, class: &str);
    fn remove_class(&mut self, element: Self::Element, class: &str);

    /// Attach a click listener to `element`
    fn listen_click(&mut self, element: Self::Element) -> Self::Listener;

    /// Detach a listener. Unknown handles are ignored.
    fn unlisten_click(&mut self, listener: Self::Listener);

    /// Listeners that fire for a click on `target`, paired with the element each one is
    /// attached to, in bubbling order (target first, then ancestors).
    fn click_listeners(&self, target: Self::Element) -> Vec<(Self::Listener, Self::Element)>;
}

/// The page URL, as far as fragment bookkeeping is concerned.
pub trait Location {
    /// Text after the first `#` with percent-escapes decoded, or an empty string when
    /// the URL has no fragment
    fn fragment(&self) -> String;

    /// Replace the fragment of the current history entry in place.
    /// This must not create a new history entry.
    fn replace_fragment(&mut self, fragment: &str);
}
