//! # Name Resolution
//!
//! Derives the name, label and description of an element from its
//! descriptors. Each resolver walks an explicit chain of candidates and takes
//! the first non-empty one:
//!
//! | resolver     | chain                                           |
//! |--------------|-------------------------------------------------|
//! | `user_name`  | `Name.value`, declared identifier               |
//! | `user_label` | `Label.value`, `user_name`                      |
//! | `user_desc`  | `Label.desc`, `Label.value`, `user_name`        |

use crate::{
    descriptor::{Comment, Exclude, Hidden, Label, Name},
    element::Element,
    error::{Error, Result},
};

/// First non-empty candidate of the chain.
fn first_present<I>(chain: I) -> Option<&'static str>
where
    I: IntoIterator<Item = Option<&'static str>>,
{
    chain.into_iter().flatten().find(|candidate| !candidate.is_empty())
}

impl Element {
    /// Name used for tables, columns, JSON keys and routes.
    ///
    /// Fails with [`Error::InvalidElement`] for a parameter declared without a
    /// name and without a `Name` descriptor. Other kinds always carry a
    /// non-empty identifier once [`Element::validate`] has passed.
    pub fn user_name(&self) -> Result<&'static str> {
        first_present([self.find::<Name>().map(|n| n.value), self.declared_name()])
            .ok_or_else(|| Error::InvalidElement(self.id().clone()))
    }

    pub fn user_label(&self) -> Result<&'static str> {
        match first_present([self.label_only()]) {
            Some(label) => Ok(label),
            None => self.user_name(),
        }
    }

    pub fn user_desc(&self) -> Result<&'static str> {
        let label = self.find::<Label>();
        match first_present([label.map(|l| l.desc), label.map(|l| l.value)]) {
            Some(desc) => Ok(desc),
            None => self.user_name(),
        }
    }

    /// The raw label value, without any fallback.
    pub fn label_only(&self) -> Option<&'static str> {
        self.find::<Label>().map(|l| l.value)
    }

    pub fn comment(&self) -> Option<&'static str> {
        self.find::<Comment>().map(|c| c.value)
    }

    /// Excluded from JSON output.
    pub fn is_excluded(&self) -> bool {
        self.has::<Exclude>()
    }

    /// Hidden from clients.
    pub fn is_hidden(&self) -> bool {
        self.has::<Hidden>()
    }
}
