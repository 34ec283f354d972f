//! Page URL and session history

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::DomError;
use crate::host::Location;
use crate::Result;

/// The URL of a page plus its session history.
///
/// The last history entry is always the current URL. Fragment rewrites done by tab
/// sets replace that entry in place; only [`push_url`](Self::push_url) adds entries.
#[derive(Debug, Clone)]
pub struct PageLocation {
    history: Vec<Url>,
}

impl PageLocation {
    pub fn parse(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| DomError::InvalidUrl(format!("{url}: {e}")))?;
        Ok(Self { history: vec![url] })
    }

    pub fn url(&self) -> &Url {
        // history is never empty: constructed with one entry and never popped
        &self.history[self.history.len() - 1]
    }

    pub fn href(&self) -> &str {
        self.url().as_str()
    }

    /// Navigate to `url`, resolved against the current URL, adding a history entry.
    ///
    /// This is the host side of a user following a link or editing the address bar;
    /// tab sets themselves only ever call [`Location::replace_fragment`].
    pub fn push_url(&mut self, url: &str) -> Result<()> {
        let next = self
            .url()
            .join(url)
            .map_err(|e| DomError::InvalidUrl(format!("{url}: {e}")))?;
        tracing::debug!(from = %self.href(), to = %next, "Pushed history entry");
        self.history.push(next);
        Ok(())
    }

    /// Number of session history entries
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn current_mut(&mut self) -> &mut Url {
        let last = self.history.len() - 1;
        &mut self.history[last]
    }
}

impl Location for PageLocation {
    /// The fragment with percent-escapes decoded, so that keys written through
    /// [`replace_fragment`](Location::replace_fragment) read back unchanged.
    fn fragment(&self) -> String {
        let raw = self.url().fragment().unwrap_or_default();
        percent_decode_str(raw).decode_utf8_lossy().into_owned()
    }

    fn replace_fragment(&mut self, fragment: &str) {
        let current = self.current_mut();
        if fragment.is_empty() {
            current.set_fragment(None);
        } else {
            current.set_fragment(Some(fragment));
        }
        tracing::trace!(href = %self.href(), "Replaced URL fragment");
    }
}
