//! Tab set configuration

use serde::{Deserialize, Serialize};

use crate::error::TabsError;
use crate::Result;

/// Options fixed when a tab set is constructed.
///
/// Every class option is optional: `None` means the tab set never touches that class.
/// Missing fields in JSON fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    /// Attribute marking candidate navigation containers
    pub marker_attribute: String,
    /// Only claim containers whose marker attribute has this value
    pub marker_value: Option<String>,
    /// Selector for buttons inside the container; direct children when unset
    pub button_selector: Option<String>,
    pub active_button_class: Option<String>,
    pub active_panel_class: Option<String>,
    pub hidden_panel_class: Option<String>,
    /// Applied to every bound panel
    pub panel_class: Option<String>,
    /// Applied to the claimed navigation container
    pub nav_class: Option<String>,
    /// Applied to every bound button
    pub button_class: Option<String>,
    /// Rewrite the URL fragment on every transition
    pub sync_fragment: bool,
    /// Delimiter between tab set slots in the URL fragment
    pub fragment_separator: char,
    /// Maintain ARIA tab roles and states
    pub aria: bool,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            marker_attribute: "data-tabs".to_string(),
            marker_value: None,
            button_selector: None,
            active_button_class: Some("active".to_string()),
            active_panel_class: Some("active".to_string()),
            hidden_panel_class: Some("hidden".to_string()),
            panel_class: Some("tab".to_string()),
            nav_class: Some("tab-nav".to_string()),
            button_class: Some("tab-button".to_string()),
            sync_fragment: true,
            fragment_separator: ':',
            aria: true,
        }
    }
}

impl TabsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object and validate it. Unspecified options keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_marker_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.marker_attribute = attribute.into();
        self
    }

    pub fn with_marker_value(mut self, value: impl Into<String>) -> Self {
        self.marker_value = Some(value.into());
        self
    }

    pub fn with_button_selector(mut self, selector: impl Into<String>) -> Self {
        self.button_selector = Some(selector.into());
        self
    }

    pub fn with_sync_fragment(mut self, sync: bool) -> Self {
        self.sync_fragment = sync;
        self
    }

    pub fn with_fragment_separator(mut self, separator: char) -> Self {
        self.fragment_separator = separator;
        self
    }

    /// Attribute set on a container once a tab set has claimed it
    pub fn claimed_attribute(&self) -> String {
        format!("{}-set", self.marker_attribute)
    }

    /// Whether a marker attribute `value` (`None` when absent) marks a container
    /// this configuration may claim
    pub fn is_marker_value(&self, value: Option<&str>) -> bool {
        match (value, &self.marker_value) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(value), Some(wanted)) => value == wanted,
        }
    }

    /// Selector matching candidate navigation containers
    pub fn nav_selector(&self) -> String {
        match &self.marker_value {
            Some(value) => {
                let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
                format!("[{}=\"{}\"]", self.marker_attribute, escaped)
            }
            None => format!("[{}]", self.marker_attribute),
        }
    }

    /// Every class this configuration may apply to a button
    pub(crate) fn button_classes(&self) -> impl Iterator<Item = &str> {
        [&self.button_class, &self.active_button_class]
            .into_iter()
            .filter_map(|c| c.as_deref())
    }

    /// Every class this configuration may apply to a panel
    pub(crate) fn panel_classes(&self) -> impl Iterator<Item = &str> {
        [
            &self.panel_class,
            &self.active_panel_class,
            &self.hidden_panel_class,
        ]
        .into_iter()
        .filter_map(|c| c.as_deref())
    }

    pub fn validate(&self) -> Result<()> {
        let mut chars = self.marker_attribute.chars();
        let valid_marker = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid_marker {
            return Err(TabsError::InvalidConfig(format!(
                "marker attribute `{}` is not a valid attribute name",
                self.marker_attribute
            )));
        }

        let classes = [
            ("active_button_class", &self.active_button_class),
            ("active_panel_class", &self.active_panel_class),
            ("hidden_panel_class", &self.hidden_panel_class),
            ("panel_class", &self.panel_class),
            ("nav_class", &self.nav_class),
            ("button_class", &self.button_class),
        ];
        for (field, class) in classes {
            if let Some(class) = class {
                if class.is_empty() || class.chars().any(char::is_whitespace) {
                    return Err(TabsError::InvalidConfig(format!(
                        "{field} `{class}` must be a single non-empty class name"
                    )));
                }
            }
        }

        // Anything the URL would percent-encode could not be split on again.
        let separator = self.fragment_separator;
        if !separator.is_ascii_graphic() || "#%\"<>`".contains(separator) {
            return Err(TabsError::InvalidConfig(format!(
                "fragment separator {:?} cannot be used verbatim inside a URL fragment",
                self.fragment_separator
            )));
        }

        anchortabs_dom::validate_selector(&self.nav_selector())?;
        if let Some(selector) = &self.button_selector {
            anchortabs_dom::validate_selector(selector)?;
        }

        Ok(())
    }
}
