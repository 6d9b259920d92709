//! # Option Lists
//!
//! Decoding of [`OptionList`] entries into an ordered key/label map:
//!
//! ```rust,ignore
//! let list = OptionList { options: &["0:男", "1:女"], bits: false };
//! assert_eq!(list.display(0), "男");
//! ```

use std::{collections::HashSet, fmt::Display};

use indexmap::IndexMap;

use crate::descriptor::OptionList;

impl OptionList {
    /// Key to label map in declaration order.
    ///
    /// `"key:label"` entries are split at the first `:` and both sides are
    /// trimmed; other entries are their own key and label. A repeated key keeps
    /// its first position and takes the later label.
    pub fn to_map(&self) -> IndexMap<String, String> {
        let mut map = IndexMap::with_capacity(self.options.len());
        for entry in self.options {
            match entry.split_once(':') {
                Some((key, label)) => map.insert(key.trim().to_string(), label.trim().to_string()),
                None => map.insert(entry.to_string(), entry.to_string()),
            };
        }
        map
    }

    /// Label of `value`, or `None` when it is not an option key.
    pub fn get(&self, value: impl Display) -> Option<String> {
        self.to_map().swap_remove(&value.to_string())
    }

    /// Label of `value`, or an empty string when it is not an option key.
    pub fn display(&self, value: impl Display) -> String {
        self.get(value).unwrap_or_default()
    }

    pub fn keys(&self) -> Vec<String> {
        self.to_map().into_keys().collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.to_map().into_values().collect()
    }

    /// True when every candidate is one of the option labels.
    pub fn verify<I, S>(&self, candidates: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: HashSet<String> = self.to_map().into_values().collect();
        candidates.into_iter().all(|c| labels.contains(c.as_ref()))
    }
}
