//! Page bootstrap and click routing
//!
//! A [`Page`] owns the host document and every tab set found on it. Tab sets are
//! never given the host permanently; each operation borrows it, and clicks reported
//! by the host are routed to whichever tab set owns the listener that fired.

use std::fmt;

use anchortabs_dom::{ClickEvent, Document, Location};
use anchortabs_tabs::{TabSet, TabsConfig};

use crate::error::CoreError;
use crate::snapshot::{PageSnapshot, TabSetSnapshot};
use crate::Result;

pub struct Page<H: Document + Location> {
    host: H,
    config: TabsConfig,
    tab_sets: Vec<TabSet<H>>,
}

impl<H: Document + Location> Page<H> {
    /// Wrap `host` without touching it
    pub fn new(host: H, config: TabsConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            host,
            config,
            tab_sets: Vec::new(),
        })
    }

    /// Wrap `host` and initialize one tab set per marked container
    pub fn bootstrap(host: H, config: TabsConfig) -> Result<Self> {
        let mut page = Self::new(host, config)?;
        page.initialize_all()?;
        Ok(page)
    }

    /// Initialize a tab set for every marked container not yet claimed.
    /// Containers whose buttons resolve to no panel are skipped.
    ///
    /// Returns the number of tab sets created.
    pub fn initialize_all(&mut self) -> Result<usize> {
        let claimed = self.config.claimed_attribute();
        let containers = self
            .host
            .query_selector_all(None, &self.config.nav_selector())?;

        let mut created = 0;
        for nav in containers {
            let marker = self.host.attribute(nav, &self.config.marker_attribute);
            if !self.config.is_marker_value(marker.as_deref())
                || self.host.has_attribute(nav, &claimed)
                || self.tab_sets.iter().any(|t| t.nav() == Some(nav))
            {
                continue;
            }

            let mut tabs = TabSet::for_element(self.config.clone(), nav)?;
            if tabs.initialize(&mut self.host)? {
                self.tab_sets.push(tabs);
                created += 1;
            } else {
                tracing::debug!(?nav, "Skipping container without bindable buttons");
            }
        }

        tracing::info!(created, total = self.tab_sets.len(), "Page tab sets initialized");
        Ok(created)
    }

    /// Dispatch a click on `target` to every tab set listening along its ancestor
    /// chain. The returned event tells whether the default action was prevented.
    pub fn click(&mut self, target: H::Element) -> ClickEvent<H::Element> {
        let mut event = ClickEvent::new(target);

        for (listener, element) in self.host.click_listeners(target) {
            let Some(tabs) = self.tab_sets.iter_mut().find(|t| t.owns_listener(listener)) else {
                continue;
            };
            event.set_current_target(element);
            tabs.handle_click(&mut self.host, &mut event);
        }

        event
    }

    /// Open `key` on the tab set at `index` (bootstrap order)
    pub fn open(&mut self, index: usize, key: &str) -> Result<bool> {
        let tabs = self
            .tab_sets
            .get_mut(index)
            .ok_or(CoreError::TabSetNotFound(index))?;
        Ok(tabs.open(&mut self.host, key))
    }

    /// Tear down every tab set, keeping them around for [`reinitialize`](Self::reinitialize)
    pub fn finalize(&mut self) {
        for tabs in &mut self.tab_sets {
            tabs.finalize(&mut self.host);
        }
    }

    /// Re-initialize finalized tab sets, then pick up any new containers.
    /// Tab sets whose container no longer binds are dropped.
    pub fn reinitialize(&mut self) -> Result<usize> {
        let mut kept = Vec::with_capacity(self.tab_sets.len());
        for mut tabs in std::mem::take(&mut self.tab_sets) {
            if tabs.is_initialized() || tabs.initialize(&mut self.host)? {
                kept.push(tabs);
            } else {
                tracing::debug!(tabset = %tabs.id(), "Dropping tab set that no longer binds");
            }
        }
        self.tab_sets = kept;

        self.initialize_all()?;
        Ok(self.tab_sets.len())
    }

    pub fn tab_sets(&self) -> &[TabSet<H>] {
        &self.tab_sets
    }

    pub fn tab_set(&self, index: usize) -> Option<&TabSet<H>> {
        self.tab_sets.get(index)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            fragment: self.host.fragment(),
            tab_sets: self
                .tab_sets
                .iter()
                .map(|tabs| TabSetSnapshot {
                    id: tabs.id(),
                    marker_value: tabs
                        .nav()
                        .and_then(|nav| self.host.attribute(nav, &self.config.marker_attribute)),
                    active_key: tabs.active_key().map(str::to_string),
                    keys: tabs.keys().into_iter().map(str::to_string).collect(),
                })
                .collect(),
        }
    }
}

impl<H: Document + Location> fmt::Debug for Page<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("config", &self.config)
            .field("tab_sets", &self.tab_sets)
            .finish_non_exhaustive()
    }
}
