//! Button to panel resolution
//!
//! A button is either a hyperlink itself or an element containing one. Its panel key
//! is the fragment of that hyperlink's `href`.

use anchortabs_dom::Document;

/// The `href` of `element` if it is a hyperlink, otherwise of its first hyperlink
/// descendant in document order.
pub fn resolve_href<D: Document>(doc: &D, element: D::Element) -> Option<String> {
    if doc.local_name(element) == "a" {
        return doc.attribute(element, "href");
    }

    let mut stack: Vec<D::Element> = doc.children(element).into_iter().rev().collect();
    while let Some(candidate) = stack.pop() {
        if doc.local_name(candidate) == "a" {
            return doc.attribute(candidate, "href");
        }
        stack.extend(doc.children(candidate).into_iter().rev());
    }

    None
}

/// Text after the first `#` of `href`, if non-empty
pub fn fragment_of(href: &str) -> Option<&str> {
    href.split_once('#')
        .map(|(_, fragment)| fragment)
        .filter(|fragment| !fragment.is_empty())
}

/// Panel key targeted by `element`
pub fn resolve_key<D: Document>(doc: &D, element: D::Element) -> Option<String> {
    let href = resolve_href(doc, element)?;
    fragment_of(&href).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchortabs_dom::HtmlDocument;

    const BUTTONS: &str = r##"
        <html><body><div id="nav">
            <a id="direct" href="#alpha">Alpha</a>
            <li id="wrapped"><span><em>Beta</em><a href="/docs#beta">Beta</a></span><a href="#late">x</a></li>
            <li id="plain">No link</li>
            <a id="bare" href="/docs">Docs</a>
            <a id="empty" href="/docs#">Docs</a>
            <a id="nohref">Missing</a>
        </div></body></html>
    "##;

    fn doc() -> HtmlDocument {
        HtmlDocument::parse(BUTTONS, "https://example.com/").unwrap()
    }

    fn el(doc: &HtmlDocument, id: &str) -> anchortabs_dom::ElementId {
        doc.element_by_id(id).unwrap()
    }

    #[test]
    fn test_hyperlink_uses_own_href() {
        let doc = doc();
        assert_eq!(resolve_href(&doc, el(&doc, "direct")).as_deref(), Some("#alpha"));
    }

    #[test]
    fn test_container_uses_first_descendant_link() {
        let doc = doc();
        assert_eq!(
            resolve_href(&doc, el(&doc, "wrapped")).as_deref(),
            Some("/docs#beta")
        );
        assert_eq!(resolve_key(&doc, el(&doc, "wrapped")).as_deref(), Some("beta"));
    }

    #[test]
    fn test_unresolvable_buttons() {
        let doc = doc();
        assert_eq!(resolve_href(&doc, el(&doc, "plain")), None);
        assert_eq!(resolve_href(&doc, el(&doc, "nohref")), None);
        assert_eq!(resolve_key(&doc, el(&doc, "bare")), None);
        assert_eq!(resolve_key(&doc, el(&doc, "empty")), None);
    }

    #[test]
    fn test_fragment_of() {
        assert_eq!(fragment_of("#one"), Some("one"));
        assert_eq!(fragment_of("/page?x=1#two"), Some("two"));
        assert_eq!(fragment_of("#a#b"), Some("a#b"));
        assert_eq!(fragment_of("#"), None);
        assert_eq!(fragment_of("/page"), None);
    }
}
