//! Value helpers driven by formatting descriptors.

use std::fmt::Write;

use chrono::NaiveDateTime;
use indexmap::IndexMap;

use crate::{
    descriptor::{DatePattern, Decimal, NullValue, SepChar, Trim},
    error::{Error, Result},
};

impl SepChar {
    /// Splits a list value. Items are trimmed and empty items dropped.
    pub fn split_list<'a>(&self, value: &'a str) -> Vec<&'a str> {
        value.split(self.list).map(str::trim).filter(|item| !item.is_empty()).collect()
    }

    /// Splits a map value into entries with `list`, then each entry at the
    /// first `map` character. Entries without a separator map to an empty value.
    pub fn split_map<'a>(&self, value: &'a str) -> IndexMap<&'a str, &'a str> {
        self.split_list(value)
            .into_iter()
            .map(|entry| match entry.split_once(self.map) {
                Some((key, val)) => (key.trim(), val.trim()),
                None => (entry, ""),
            })
            .collect()
    }

    pub fn join_list<I, S>(&self, items: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = String::new();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                out.push(self.list);
            }
            out.push_str(item.as_ref());
        }
        out
    }
}

impl Trim {
    pub fn apply<'a>(&self, value: &'a str) -> &'a str {
        value.trim()
    }
}

impl NullValue {
    pub fn is_null(&self, value: &str) -> bool {
        value == self.value
    }
}

impl DatePattern {
    pub fn format(&self, value: &NaiveDateTime) -> Result<String> {
        let mut out = String::new();
        write!(out, "{}", value.format(self.format)).map_err(|_| Error::DatePattern {
            pattern: self.format,
            reason: "unsupported format specifier".to_string(),
        })?;
        Ok(out)
    }

    pub fn parse(&self, value: &str) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(value, self.format)
            .map_err(|e| Error::DatePattern { pattern: self.format, reason: e.to_string() })
    }
}

impl Decimal {
    /// Renders `value` with `scale` fraction digits.
    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.scale.max(0) as usize, value)
    }
}
