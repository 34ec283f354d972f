//! Click events delivered to bound buttons

/// A click travelling from its target up through its ancestors.
///
/// One event value is shared by every listener that fires for the same click, so a
/// listener calling [`prevent_default`](Self::prevent_default) is visible to the host
/// after dispatch finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent<E> {
    target: E,
    current_target: E,
    default_prevented: bool,
}

impl<E: Copy> ClickEvent<E> {
    pub fn new(target: E) -> Self {
        Self {
            target,
            current_target: target,
            default_prevented: false,
        }
    }

    /// The element the user actually clicked
    pub fn target(&self) -> E {
        self.target
    }

    /// The element whose listener is currently running
    pub fn current_target(&self) -> E {
        self.current_target
    }

    pub fn set_current_target(&mut self, element: E) {
        self.current_target = element;
    }

    /// Suppress the host's default navigation/scroll for this click
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_event_targets_clicked_element() {
        let event = ClickEvent::new(7u32);
        assert_eq!(event.target(), 7);
        assert_eq!(event.current_target(), 7);
        assert!(!event.default_prevented());
    }

    #[test]
    fn test_prevent_default_survives_retargeting() {
        let mut event = ClickEvent::new(1u32);
        event.prevent_default();
        event.set_current_target(2);

        assert!(event.default_prevented());
        assert_eq!(event.target(), 1);
        assert_eq!(event.current_target(), 2);
    }
}
