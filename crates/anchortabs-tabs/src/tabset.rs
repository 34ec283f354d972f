//! Tab Set State Machine
//!
//! ```text
//! Inert --initialize--> Active(key) --open(other)--> Active(other)
//!   ^                        |
//!   +-------finalize---------+
//! ```
//!
//! While initialized, exactly one bound panel is active. Everything the tab set does to
//! the page is reversible: `finalize` strips the classes and attributes it applied and
//! detaches its listeners, leaving the markup ready for another `initialize`.

use std::collections::HashMap;
use std::fmt;

use anchortabs_dom::{ClickEvent, Document, Location};
use uuid::Uuid;

use crate::config::TabsConfig;
use crate::fragment::FragmentKeys;
use crate::href::resolve_key;
use crate::Result;

/// A button bound to its panel
#[derive(Debug, Clone, Copy)]
struct Entry<E, L> {
    button: E,
    panel: E,
    listener: L,
}

/// One group of mutually exclusive panels.
pub struct TabSet<D: Document> {
    id: Uuid,
    config: TabsConfig,
    /// Claimed navigation container. Kept across `finalize` for re-initialization.
    nav: Option<D::Element>,
    /// Never look beyond `nav` for a container
    pinned: bool,
    entries: HashMap<String, Entry<D::Element, D::Listener>>,
    active: Option<String>,
}

impl<D: Document + Location> TabSet<D> {
    /// Create an inert tab set. The configuration is validated here.
    pub fn new(config: TabsConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            id: Uuid::new_v4(),
            config,
            nav: None,
            pinned: false,
            entries: HashMap::new(),
            active: None,
        })
    }

    /// Create an inert tab set that will only ever claim `nav`.
    pub fn for_element(config: TabsConfig, nav: D::Element) -> Result<Self> {
        let mut tabs = Self::new(config)?;
        tabs.nav = Some(nav);
        tabs.pinned = true;
        Ok(tabs)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &TabsConfig {
        &self.config
    }

    pub fn nav(&self) -> Option<D::Element> {
        self.nav
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_initialized(&self) -> bool {
        self.active.is_some()
    }

    /// Bound panel keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn button(&self, key: &str) -> Option<D::Element> {
        self.entries.get(key).map(|e| e.button)
    }

    pub fn panel(&self, key: &str) -> Option<D::Element> {
        self.entries.get(key).map(|e| e.panel)
    }

    /// Whether `listener` is one of the click bindings of this tab set
    pub fn owns_listener(&self, listener: D::Listener) -> bool {
        self.entries.values().any(|e| e.listener == listener)
    }

    /// Claim a navigation container, bind its buttons and activate one panel.
    ///
    /// Returns `Ok(false)` when no unclaimed container exists or none of its buttons
    /// resolves to a panel; the page is left untouched in that case. `Err` is reserved
    /// for host failures.
    pub fn initialize(&mut self, host: &mut D) -> Result<bool> {
        if self.is_initialized() {
            tracing::warn!(tabset = %self.id, "Tab set already initialized");
            return Ok(true);
        }

        let Some(nav) = self.find_nav(host)? else {
            tracing::debug!(
                tabset = %self.id,
                selector = %self.config.nav_selector(),
                "No unclaimed navigation element"
            );
            return Ok(false);
        };

        let candidates = match &self.config.button_selector {
            Some(selector) => host.query_selector_all(Some(nav), selector)?,
            None => host.children(nav),
        };
        let requested = FragmentKeys::decode(&host.fragment(), self.config.fragment_separator);

        let mut entries: HashMap<String, Entry<D::Element, D::Listener>> = HashMap::new();
        let mut active: Option<String> = None;

        for button in candidates {
            let Some(key) = resolve_key(&*host, button) else {
                tracing::debug!(tabset = %self.id, ?button, "Skipping button without fragment link");
                continue;
            };
            let Some(panel) = host.element_by_id(&key) else {
                tracing::debug!(tabset = %self.id, key = %key, "Skipping button without panel");
                continue;
            };

            let listener = host.listen_click(button);
            let entry = Entry {
                button,
                panel,
                listener,
            };
            if let Some(replaced) = entries.insert(key.clone(), entry) {
                tracing::debug!(tabset = %self.id, key = %key, "Button rebinds an existing panel");
                host.unlisten_click(replaced.listener);
            }

            // Later matches overwrite earlier ones: the last bound key present in the
            // fragment wins.
            if active.is_none() || requested.contains(&key) {
                active = Some(key);
            }
        }

        let Some(active) = active else {
            tracing::debug!(tabset = %self.id, "No buttons resolved to panels");
            return Ok(false);
        };

        for (key, entry) in &entries {
            self.bind_styles(host, key, entry);
            self.deactivate(host, entry);
        }
        if let Some(entry) = entries.get(&active) {
            self.activate(host, entry);
        }
        self.claim(host, nav);

        tracing::info!(
            tabset = %self.id,
            panels = entries.len(),
            active = %active,
            "Tab set initialized"
        );

        self.nav = Some(nav);
        self.entries = entries;
        self.active = Some(active);

        Ok(true)
    }

    /// Switch to the panel bound to `key`.
    ///
    /// Does nothing and returns `false` when `key` is already active, is not bound, or
    /// the tab set is not initialized.
    pub fn open(&mut self, host: &mut D, key: &str) -> bool {
        let Some(previous) = self.active.clone() else {
            return false;
        };
        if previous == key {
            return false;
        }
        let (Some(current), Some(target)) = (
            self.entries.get(&previous).copied(),
            self.entries.get(key).copied(),
        ) else {
            return false;
        };

        self.deactivate(host, &current);
        self.activate(host, &target);

        if self.config.sync_fragment {
            let mut keys = FragmentKeys::decode(&host.fragment(), self.config.fragment_separator);
            let slot = keys.replace_or_append(Some(previous.as_str()), key);
            host.replace_fragment(&keys.encode());
            tracing::trace!(tabset = %self.id, slot, "Fragment slot written");
        }

        tracing::debug!(
            tabset = %self.id,
            from = %previous,
            to = %key,
            "Tab transition"
        );

        self.active = Some(key.to_string());
        true
    }

    /// React to a click on a bound button: suppress the default navigation and open
    /// the panel the button links to.
    pub fn handle_click(&mut self, host: &mut D, event: &mut ClickEvent<D::Element>) -> bool {
        event.prevent_default();

        match resolve_key(&*host, event.current_target()) {
            Some(key) => self.open(host, &key),
            None => false,
        }
    }

    /// Undo everything `initialize` applied. The configuration and navigation element
    /// are kept so the tab set can be initialized again.
    pub fn finalize(&mut self, host: &mut D) {
        if !self.is_initialized() {
            return;
        }

        let entries = std::mem::take(&mut self.entries);
        for entry in entries.values() {
            self.unbind_styles(host, entry);
            host.unlisten_click(entry.listener);
        }

        if let Some(nav) = self.nav {
            host.remove_attribute(nav, &self.config.claimed_attribute());
            if let Some(class) = &self.config.nav_class {
                host.remove_class(nav, class);
            }
            if self.config.aria {
                host.remove_attribute(nav, "role");
            }
        }

        self.active = None;
        tracing::info!(tabset = %self.id, panels = entries.len(), "Tab set finalized");
    }

    fn find_nav(&mut self, host: &D) -> Result<Option<D::Element>> {
        let claimed = self.config.claimed_attribute();

        if let Some(nav) = self.nav {
            if self.carries_marker(host, nav) {
                return Ok((!host.has_attribute(nav, &claimed)).then_some(nav));
            }
            tracing::debug!(tabset = %self.id, "Retained navigation element lost its marker");
            if self.pinned {
                return Ok(None);
            }
            self.nav = None;
        }

        // Hosts may answer selectors from stale markup; the live attributes decide.
        Ok(host
            .query_selector_all(None, &self.config.nav_selector())?
            .into_iter()
            .find(|el| self.carries_marker(host, *el) && !host.has_attribute(*el, &claimed)))
    }

    fn carries_marker(&self, host: &D, element: D::Element) -> bool {
        let value = host.attribute(element, &self.config.marker_attribute);
        self.config.is_marker_value(value.as_deref())
    }

    fn claim(&self, host: &mut D, nav: D::Element) {
        host.set_attribute(nav, &self.config.claimed_attribute(), "true");
        if let Some(class) = &self.config.nav_class {
            host.add_class(nav, class);
        }
        if self.config.aria {
            host.set_attribute(nav, "role", "tablist");
        }
    }

    fn bind_styles(&self, host: &mut D, key: &str, entry: &Entry<D::Element, D::Listener>) {
        if let Some(class) = &self.config.button_class {
            host.add_class(entry.button, class);
        }
        if let Some(class) = &self.config.panel_class {
            host.add_class(entry.panel, class);
        }
        if self.config.aria {
            host.set_attribute(entry.button, "role", "tab");
            host.set_attribute(entry.button, "aria-controls", key);
            host.set_attribute(entry.panel, "role", "tabpanel");
        }
    }

    fn unbind_styles(&self, host: &mut D, entry: &Entry<D::Element, D::Listener>) {
        for class in self.config.button_classes() {
            host.remove_class(entry.button, class);
        }
        for class in self.config.panel_classes() {
            host.remove_class(entry.panel, class);
        }
        if self.config.aria {
            for name in ["role", "aria-controls", "aria-selected"] {
                host.remove_attribute(entry.button, name);
            }
            for name in ["role", "aria-hidden"] {
                host.remove_attribute(entry.panel, name);
            }
        }
    }

    fn activate(&self, host: &mut D, entry: &Entry<D::Element, D::Listener>) {
        if let Some(class) = &self.config.active_button_class {
            host.add_class(entry.button, class);
        }
        if let Some(class) = &self.config.hidden_panel_class {
            host.remove_class(entry.panel, class);
        }
        if let Some(class) = &self.config.active_panel_class {
            host.add_class(entry.panel, class);
        }
        if self.config.aria {
            host.set_attribute(entry.button, "aria-selected", "true");
            host.set_attribute(entry.panel, "aria-hidden", "false");
        }
    }

    fn deactivate(&self, host: &mut D, entry: &Entry<D::Element, D::Listener>) {
        if let Some(class) = &self.config.active_button_class {
            host.remove_class(entry.button, class);
        }
        if let Some(class) = &self.config.active_panel_class {
            host.remove_class(entry.panel, class);
        }
        if let Some(class) = &self.config.hidden_panel_class {
            host.add_class(entry.panel, class);
        }
        if self.config.aria {
            host.set_attribute(entry.button, "aria-selected", "false");
            host.set_attribute(entry.panel, "aria-hidden", "true");
        }
    }
}

impl<D: Document> fmt::Debug for TabSet<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabSet")
            .field("id", &self.id)
            .field("nav", &self.nav)
            .field("active", &self.active)
            .field("panels", &self.entries.len())
            .finish_non_exhaustive()
    }
}
