//! URL fragment multiplexing
//!
//! A page can host several independent tab sets but has only one URL fragment. The
//! fragment is therefore treated as a list of keys joined by a separator:
//!
//! ```text
//! https://example.com/install#linux:rust
//!                             ^^^^^ ^^^^
//!                             os    language
//! ```
//!
//! A tab set never assumes which slot is its own. On every transition it looks up
//! the key it is leaving and overwrites that slot, appending only when the key is
//! not present yet. Slots owned by other tab sets are left untouched.

use std::fmt;

/// The decoded key list of a URL fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentKeys {
    keys: Vec<String>,
    separator: char,
}

impl FragmentKeys {
    /// Split `fragment` (the text after `#`) on `separator`.
    /// An empty fragment has no keys; empty segments are kept as slots.
    pub fn decode(fragment: &str, separator: char) -> Self {
        let keys = if fragment.is_empty() {
            Vec::new()
        } else {
            fragment.split(separator).map(str::to_string).collect()
        };
        Self { keys, separator }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// Overwrite the first slot holding `previous` with `next`, or append `next` when
    /// `previous` is absent. Returns the slot written.
    pub fn replace_or_append(&mut self, previous: Option<&str>, next: &str) -> usize {
        match previous.and_then(|p| self.position(p)) {
            Some(slot) => {
                self.keys[slot] = next.to_string();
                slot
            }
            None => {
                self.keys.push(next.to_string());
                self.keys.len() - 1
            }
        }
    }

    /// Join the keys back into fragment text (without the leading `#`)
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FragmentKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, key) in self.keys.iter().enumerate() {
            if index > 0 {
                write!(f, "{}", self.separator)?;
            }
            f.write_str(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_splits_on_separator() {
        let keys = FragmentKeys::decode("linux:rust", ':');
        assert_eq!(keys.keys(), ["linux", "rust"]);

        let keys = FragmentKeys::decode("linux|rust", '|');
        assert_eq!(keys.keys(), ["linux", "rust"]);
    }

    #[test]
    fn test_empty_fragment_has_no_keys() {
        let keys = FragmentKeys::decode("", ':');
        assert!(keys.is_empty());
        assert_eq!(keys.encode(), "");
    }

    #[test]
    fn test_empty_segments_keep_their_slot() {
        let keys = FragmentKeys::decode("a::b", ':');
        assert_eq!(keys.keys(), ["a", "", "b"]);
        assert_eq!(keys.encode(), "a::b");
    }

    #[test]
    fn test_transition_overwrites_own_slot() {
        let mut keys = FragmentKeys::decode("a:b", ':');
        let slot = keys.replace_or_append(Some("a"), "c");

        assert_eq!(slot, 0);
        assert_eq!(keys.encode(), "c:b");
    }

    #[test]
    fn test_transition_appends_when_previous_missing() {
        let mut keys = FragmentKeys::decode("a:b", ':');
        assert_eq!(keys.replace_or_append(Some("x"), "y"), 2);
        assert_eq!(keys.encode(), "a:b:y");

        let mut keys = FragmentKeys::decode("", ':');
        assert_eq!(keys.replace_or_append(None, "first"), 0);
        assert_eq!(keys.encode(), "first");
    }

    #[test]
    fn test_only_first_matching_slot_is_replaced() {
        let mut keys = FragmentKeys::decode("a:b:a", ':');
        keys.replace_or_append(Some("a"), "z");
        assert_eq!(keys.encode(), "z:b:a");
    }

    #[test]
    fn test_other_slots_survive_reencoding() {
        let original = FragmentKeys::decode("one:two:three:four", ':');
        let mut updated = original.clone();
        updated.replace_or_append(Some("three"), "3");

        let decoded = FragmentKeys::decode(&updated.encode(), ':');
        assert_eq!(decoded.keys().len(), original.keys().len());
        for (index, (before, after)) in original.keys().iter().zip(decoded.keys()).enumerate() {
            if index == 2 {
                assert_eq!(after, "3");
            } else {
                assert_eq!(before, after);
            }
        }
    }
}
