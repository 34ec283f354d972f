//! In-memory HTML host
//!
//! Markup is parsed once with `scraper`. Element handles are indices in document
//! order. Attributes (and therefore classes) are copied into a mutable overlay, so
//! tab sets can flip classes without re-parsing. Selectors are evaluated by `scraper`
//! against the parsed markup: attributes changed after parsing are not visible to
//! selector queries, only to the attribute and class accessors.

use std::collections::BTreeMap;

use scraper::{ElementRef, Html, Selector};

use crate::error::DomError;
use crate::host::{Document, Location};
use crate::location::PageLocation;
use crate::Result;

/// Handle to an element of an [`HtmlDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// Handle to a click listener attached to an [`HtmlDocument`] element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Clone)]
struct ElementNode {
    name: String,
    attributes: Vec<(String, String)>,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Debug)]
pub struct HtmlDocument {
    html: Html,
    nodes: Vec<ElementNode>,
    listeners: BTreeMap<ListenerId, ElementId>,
    next_listener: u64,
    location: PageLocation,
}

impl HtmlDocument {
    /// Parse a full HTML document served from `url`
    pub fn parse(markup: &str, url: &str) -> Result<Self> {
        let location = PageLocation::parse(url)?;
        let html = Html::parse_document(markup);

        let flat = flatten(&html);
        let mut nodes: Vec<ElementNode> = flat
            .iter()
            .map(|(el, parent)| ElementNode {
                name: el.value().name().to_string(),
                attributes: el
                    .value()
                    .attrs()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
                parent: *parent,
                children: Vec::new(),
            })
            .collect();
        for index in 0..nodes.len() {
            if let Some(parent) = nodes[index].parent {
                nodes[parent].children.push(index);
            }
        }

        tracing::debug!(elements = nodes.len(), url = %location.href(), "Parsed document");

        Ok(Self {
            html,
            nodes,
            listeners: BTreeMap::new(),
            next_listener: 0,
            location,
        })
    }

    pub fn location(&self) -> &PageLocation {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut PageLocation {
        &mut self.location
    }

    /// Current URL as a string
    pub fn href(&self) -> &str {
        self.location.href()
    }

    /// The class list of `element`, in attribute order
    pub fn classes(&self, element: ElementId) -> Vec<String> {
        self.attribute(element, "class")
            .map(|value| value.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Number of click listeners currently attached anywhere in the document
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// First element in document order matching `selector`, like `document.querySelector`.
    /// Host-side convenience for locating elements to click; tab sets use
    /// [`Document::query_selector_all`].
    pub fn query_selector(&self, selector: &str) -> Result<Option<ElementId>> {
        Ok(self.query_selector_all(None, selector)?.into_iter().next())
    }

    fn node(&self, element: ElementId) -> Option<&ElementNode> {
        self.nodes.get(element.0)
    }

    fn node_mut(&mut self, element: ElementId) -> Option<&mut ElementNode> {
        self.nodes.get_mut(element.0)
    }

    fn is_descendant(&self, index: usize, ancestor: usize) -> bool {
        let mut current = self.nodes.get(index).and_then(|n| n.parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.nodes[parent].parent;
        }
        false
    }

    fn set_classes(&mut self, element: ElementId, classes: &[String]) {
        if classes.is_empty() {
            self.remove_attribute(element, "class");
        } else {
            self.set_attribute(element, "class", &classes.join(" "));
        }
    }
}

/// Elements of `html` in document order, each with the index of its parent element.
fn flatten(html: &Html) -> Vec<(ElementRef<'_>, Option<usize>)> {
    let mut out = Vec::new();
    let mut stack = vec![(html.root_element(), None)];

    while let Some((el, parent)) = stack.pop() {
        let index = out.len();
        out.push((el, parent));
        let children: Vec<ElementRef<'_>> = el.children().filter_map(ElementRef::wrap).collect();
        stack.extend(children.into_iter().rev().map(|child| (child, Some(index))));
    }

    out
}

impl Document for HtmlDocument {
    type Element = ElementId;
    type Listener = ListenerId;

    fn query_selector_all(
        &self,
        scope: Option<ElementId>,
        selector: &str,
    ) -> Result<Vec<ElementId>> {
        let parsed = Selector::parse(selector).map_err(|e| DomError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;

        Ok(flatten(&self.html)
            .iter()
            .enumerate()
            .filter(|(index, _)| scope.map_or(true, |s| self.is_descendant(*index, s.0)))
            .filter(|(_, (el, _))| parsed.matches(el))
            .map(|(index, _)| ElementId(index))
            .collect())
    }

    fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.node(element)
            .map(|n| n.children.iter().copied().map(ElementId).collect())
            .unwrap_or_default()
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .position(|n| n.attributes.iter().any(|(k, v)| k == "id" && v == id))
            .map(ElementId)
    }

    fn local_name(&self, element: ElementId) -> String {
        self.node(element)
            .map(|n| n.name.to_ascii_lowercase())
            .unwrap_or_default()
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.node(element)?
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        let Some(node) = self.node_mut(element) else {
            return;
        };
        match node.attributes.iter().position(|(k, _)| k == name) {
            Some(index) => node.attributes[index].1 = value.to_string(),
            None => node.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) {
        if let Some(node) = self.node_mut(element) {
            node.attributes.retain(|(k, _)| k != name);
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.attribute(element, "class")
            .is_some_and(|value| value.split_whitespace().any(|c| c == class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if self.node(element).is_none() || self.has_class(element, class) {
            return;
        }
        let mut classes = self.classes(element);
        classes.push(class.to_string());
        self.set_classes(element, &classes);
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if !self.has_class(element, class) {
            return;
        }
        let mut classes = self.classes(element);
        classes.retain(|c| c != class);
        self.set_classes(element, &classes);
    }

    fn listen_click(&mut self, element: ElementId) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, element);
        id
    }

    fn unlisten_click(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener);
    }

    fn click_listeners(&self, target: ElementId) -> Vec<(ListenerId, ElementId)> {
        let mut fired = Vec::new();
        let mut current = self.node(target).map(|_| target.0);

        while let Some(index) = current {
            let element = ElementId(index);
            fired.extend(
                self.listeners
                    .iter()
                    .filter(|(_, attached)| **attached == element)
                    .map(|(id, _)| (*id, element)),
            );
            current = self.nodes[index].parent;
        }

        fired
    }
}

impl Location for HtmlDocument {
    fn fragment(&self) -> String {
        self.location.fragment()
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.location.replace_fragment(fragment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
        <html><body>
            <ul id="nav" data-tabs>
                <li id="first"><a href="#one">One</a></li>
                <li class="item"><a href="#two">Two</a></li>
            </ul>
            <div id="one" class="panel">First</div>
            <div id="two">Second</div>
        </body></html>
    "##;

    fn doc() -> HtmlDocument {
        HtmlDocument::parse(PAGE, "https://example.com/page#two").unwrap()
    }

    #[test]
    fn test_query_selector_all_in_document_order() {
        let doc = doc();
        let links = doc.query_selector_all(None, "a").unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(doc.attribute(links[0], "href").as_deref(), Some("#one"));
        assert_eq!(doc.attribute(links[1], "href").as_deref(), Some("#two"));
    }

    #[test]
    fn test_scoped_query_excludes_scope_and_outsiders() {
        let doc = doc();
        let nav = doc.element_by_id("nav").unwrap();

        let scoped = doc.query_selector_all(Some(nav), "ul, li").unwrap();
        assert_eq!(scoped.len(), 2);
        assert!(scoped.iter().all(|el| doc.local_name(*el) == "li"));

        let panels = doc.query_selector_all(Some(nav), "div").unwrap();
        assert!(panels.is_empty());
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        let doc = doc();
        let err = doc.query_selector_all(None, "li[").unwrap_err();
        assert!(matches!(err, DomError::InvalidSelector { .. }));
    }

    #[test]
    fn test_children_are_direct_elements_only() {
        let doc = doc();
        let nav = doc.element_by_id("nav").unwrap();
        let children = doc.children(nav);

        assert_eq!(children.len(), 2);
        assert_eq!(children[0], doc.element_by_id("first").unwrap());
    }

    #[test]
    fn test_attribute_overlay() {
        let mut doc = doc();
        let nav = doc.element_by_id("nav").unwrap();

        assert!(doc.has_attribute(nav, "data-tabs"));
        assert!(!doc.has_attribute(nav, "data-tabs-set"));

        doc.set_attribute(nav, "data-tabs-set", "true");
        assert_eq!(doc.attribute(nav, "data-tabs-set").as_deref(), Some("true"));

        doc.remove_attribute(nav, "data-tabs-set");
        assert!(!doc.has_attribute(nav, "data-tabs-set"));
    }

    #[test]
    fn test_class_list_operations() {
        let mut doc = doc();
        let one = doc.element_by_id("one").unwrap();
        let two = doc.element_by_id("two").unwrap();

        doc.add_class(one, "active");
        doc.add_class(one, "active");
        assert_eq!(doc.classes(one), vec!["panel", "active"]);

        doc.remove_class(one, "panel");
        assert!(!doc.has_class(one, "panel"));
        assert!(doc.has_class(one, "active"));

        doc.add_class(two, "hidden");
        doc.remove_class(two, "hidden");
        assert_eq!(doc.attribute(two, "class"), None);
    }

    #[test]
    fn test_click_listeners_bubble_from_target() {
        let mut doc = doc();
        let first = doc.element_by_id("first").unwrap();
        let nav = doc.element_by_id("nav").unwrap();
        let link = doc.query_selector_all(Some(first), "a").unwrap()[0];

        let on_item = doc.listen_click(first);
        let on_nav = doc.listen_click(nav);

        let fired = doc.click_listeners(link);
        assert_eq!(fired, vec![(on_item, first), (on_nav, nav)]);

        doc.unlisten_click(on_item);
        assert_eq!(doc.click_listeners(link), vec![(on_nav, nav)]);
        assert_eq!(doc.listener_count(), 1);
    }

    #[test]
    fn test_location_delegation() {
        let mut doc = doc();
        assert_eq!(doc.fragment(), "two");

        doc.replace_fragment("one");
        assert_eq!(doc.href(), "https://example.com/page#one");
        assert_eq!(doc.location().history_len(), 1);
    }
}
