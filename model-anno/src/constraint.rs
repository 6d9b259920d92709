//! # Validation Predicates
//!
//! Pure checks of a candidate value against a constraint descriptor. A failed
//! check answers `false`; constraints are assumed well formed when declared.

use std::{collections::HashMap, sync::Mutex};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::descriptor::{Decimal, Length, Match, NotEmpty, RangeDouble, RangeInt, RangeLong};

impl Length {
    /// Checks a length. `max`/`min` of zero or less leave that side unbounded.
    pub fn verify(&self, value: i64) -> bool {
        if self.fixed > 0 {
            return value == self.fixed;
        }
        if self.max > 0 && value > self.max {
            return false;
        }
        if self.min > 0 && value < self.min {
            return false;
        }
        true
    }

    /// Checks the length of a string in characters.
    pub fn verify_str(&self, value: &str) -> bool {
        self.verify(value.chars().count() as i64)
    }
}

impl RangeInt {
    pub fn verify(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl RangeLong {
    pub fn verify(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl RangeDouble {
    pub fn verify(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl NotEmpty {
    pub fn verify(&self, value: &str) -> bool {
        if self.trim { !value.trim().is_empty() } else { !value.is_empty() }
    }
}

static PATTERNS: Lazy<Mutex<HashMap<&'static str, Option<Regex>>>> = Lazy::new(|| Mutex::new(HashMap::new()));

impl Match {
    /// Compiles the pattern so that it must match the whole value.
    pub fn regex(&self) -> Result<Regex, regex::Error> {
        Regex::new(&format!("^(?:{})$", self.value))
    }

    /// The compiled pattern, built once per distinct pattern text.
    /// `None` when the pattern is malformed.
    pub fn compiled(&self) -> Option<Regex> {
        let mut cache = PATTERNS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        cache
            .entry(self.value)
            .or_insert_with(|| match self.regex() {
                Ok(re) => Some(re),
                Err(e) => {
                    log::warn!("invalid match pattern `{}`: {}", self.value, e);
                    None
                }
            })
            .clone()
    }

    /// Whole-value match. A malformed pattern never matches.
    pub fn verify(&self, value: &str) -> bool {
        self.compiled().is_some_and(|re| re.is_match(value))
    }
}

impl Decimal {
    /// Whether `value`, rounded to `scale` digits, fits into `precision` digits.
    pub fn verify(&self, value: f64) -> bool {
        if !value.is_finite() || self.scale < 0 || self.precision < self.scale {
            return false;
        }
        let factor = 10f64.powi(self.scale);
        let int_part = ((value.abs() * factor).round() / factor).trunc();
        let digits = if int_part == 0.0 { 0 } else { format!("{:.0}", int_part).len() as i32 };
        digits <= self.precision - self.scale
    }
}
