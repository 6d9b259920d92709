//! # Model Elements
//!
//! A model element is anything metadata can be attached to: a class (struct),
//! a property (field), a function or a function parameter. An [`Element`]
//! pairs the element's identity with the descriptors declared on it.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::{
    descriptor::{Anno, Descriptor, DescriptorKind},
    error::{Error, Result},
};

/// The four kinds of element descriptors can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ElementKind {
    Class,
    Function,
    Property,
    Parameter,
}

/// Identity of a model element inside a registry.
///
/// Parameters are identified by position, since a parameter is not required
/// to carry a declared name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    Class(&'static str),
    Property { owner: &'static str, name: &'static str },
    Function { owner: Option<&'static str>, name: &'static str },
    Parameter { owner: Option<&'static str>, function: &'static str, index: usize },
}

impl ElementId {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Class(_) => ElementKind::Class,
            Self::Property { .. } => ElementKind::Property,
            Self::Function { .. } => ElementKind::Function,
            Self::Parameter { .. } => ElementKind::Parameter,
        }
    }

    /// The class owning this element, if any.
    pub fn owner(&self) -> Option<&'static str> {
        match self {
            Self::Class(_) => None,
            Self::Property { owner, .. } => Some(*owner),
            Self::Function { owner, .. } | Self::Parameter { owner, .. } => *owner,
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(name) => f.write_str(name),
            Self::Property { owner, name } => write!(f, "{}.{}", owner, name),
            Self::Function { owner: Some(owner), name } => write!(f, "{}.{}()", owner, name),
            Self::Function { owner: None, name } => write!(f, "{}()", name),
            Self::Parameter { owner: Some(owner), function, index } => {
                write!(f, "{}.{}()#{}", owner, function, index)
            }
            Self::Parameter { owner: None, function, index } => write!(f, "{}()#{}", function, index),
        }
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A model element together with its attached descriptors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    id: ElementId,
    kind: ElementKind,
    ident: Option<&'static str>,
    descriptors: Vec<Descriptor>,
}

impl Element {
    fn new(id: ElementId, ident: Option<&'static str>) -> Self {
        let kind = id.kind();
        Self { id, kind, ident, descriptors: Vec::new() }
    }

    pub fn class(name: &'static str) -> Self {
        Self::new(ElementId::Class(name), Some(name))
    }

    pub fn property(owner: &'static str, name: &'static str) -> Self {
        Self::new(ElementId::Property { owner, name }, Some(name))
    }

    /// A free function.
    pub fn function(name: &'static str) -> Self {
        Self::new(ElementId::Function { owner: None, name }, Some(name))
    }

    /// A function declared on `owner`, e.g. a controller action.
    pub fn method(owner: &'static str, name: &'static str) -> Self {
        Self::new(ElementId::Function { owner: Some(owner), name }, Some(name))
    }

    /// The parameter at `index` of a function. `ident` is `None` when the
    /// parameter was declared without a name.
    pub fn parameter(
        owner: Option<&'static str>,
        function: &'static str,
        index: usize,
        ident: Option<&'static str>,
    ) -> Self {
        Self::new(ElementId::Parameter { owner, function, index }, ident)
    }

    /// Attaches a descriptor.
    pub fn with(mut self, descriptor: impl Into<Descriptor>) -> Self {
        self.descriptors.push(descriptor.into());
        self
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// The identifier as declared in source, without a raw `r#` prefix.
    pub fn declared_name(&self) -> Option<&'static str> {
        self.ident.map(|ident| ident.strip_prefix("r#").unwrap_or(ident))
    }

    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// Returns the descriptor of the given kind, if attached.
    pub fn lookup(&self, kind: DescriptorKind) -> Option<&Descriptor> {
        self.descriptors.iter().find(|d| d.kind() == kind)
    }

    pub fn find<T: Anno>(&self) -> Option<&T> {
        self.lookup(T::KIND).and_then(T::extract)
    }

    pub fn has<T: Anno>(&self) -> bool {
        self.lookup(T::KIND).is_some()
    }

    /// Checks that every descriptor is allowed on this element kind and that
    /// no kind is attached more than once. Only parameters may lack a
    /// declared identifier; an empty one is [`Error::InvalidElement`].
    pub fn validate(&self) -> Result<()> {
        if self.kind != ElementKind::Parameter && self.declared_name().is_none_or(str::is_empty) {
            return Err(Error::InvalidElement(self.id.clone()));
        }

        for (pos, descriptor) in self.descriptors.iter().enumerate() {
            let kind = descriptor.kind();
            if !kind.allows(self.kind) {
                return Err(Error::InvalidTarget { element: self.id.clone(), target: self.kind, kind });
            }

            if self.descriptors[..pos].iter().any(|d| d.kind() == kind) {
                return Err(Error::DuplicateDescriptor { element: self.id.clone(), kind });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Hidden, Label, ModelTable, Name};

    #[test]
    fn ids_render_as_paths() {
        assert_eq!(Element::class("User").id().to_string(), "User");
        assert_eq!(Element::property("User", "name").id().to_string(), "User.name");
        assert_eq!(Element::method("Auth", "login").id().to_string(), "Auth.login()");
        assert_eq!(Element::function("ping").id().to_string(), "ping()");
        assert_eq!(Element::parameter(Some("Auth"), "login", 1, None).id().to_string(), "Auth.login()#1");
    }

    #[test]
    fn raw_identifiers_are_stripped() {
        let e = Element::property("Item", "r#type");
        assert_eq!(e.declared_name(), Some("type"));
    }

    #[test]
    fn find_returns_typed_descriptor() {
        let e = Element::class("User").with(Name { value: "users" }).with(ModelTable { version: 3 });
        assert_eq!(e.find::<ModelTable>().map(|t| t.version), Some(3));
        assert!(e.has::<Name>());
        assert!(!e.has::<Label>());
    }

    #[test]
    fn validate_rejects_wrong_target() {
        let e = Element::class("User").with(Hidden);
        assert!(matches!(
            e.validate(),
            Err(Error::InvalidTarget { kind: DescriptorKind::Hidden, target: ElementKind::Class, .. })
        ));
    }

    #[test]
    fn validate_rejects_duplicates() {
        let e = Element::property("User", "name").with(Name { value: "a" }).with(Name { value: "b" });
        assert!(matches!(e.validate(), Err(Error::DuplicateDescriptor { kind: DescriptorKind::Name, .. })));
    }

    #[test]
    fn validate_rejects_empty_identifiers() {
        assert!(matches!(Element::class("").validate(), Err(Error::InvalidElement(ElementId::Class("")))));
        assert!(matches!(Element::property("User", "r#").validate(), Err(Error::InvalidElement(_))));
        assert!(matches!(Element::method("User", "").with(Name { value: "x" }).validate(), Err(Error::InvalidElement(_))));
        assert!(Element::parameter(None, "sum", 0, None).validate().is_ok());
        assert!(Element::class("User").validate().is_ok());
    }
}
