//! # Metadata Registry
//!
//! The registry indexes every known element by [`ElementId`]. It is populated
//! once by a [`RegistryBuilder`] pass and is read-only afterwards, so a single
//! instance can be shared freely across threads.

use indexmap::IndexMap;
use log::{debug, warn};
use once_cell::sync::OnceCell;
use serde::{Serialize, Serializer};

use crate::{
    descriptor::{Anno, Descriptor, DescriptorKind},
    element::{Element, ElementId, ElementKind},
    error::{Error, Result},
    model::Model,
    schema::TableInfo,
};

// ============================================================================
// Registry Builder
// ============================================================================

/// Collects elements and validates them into a [`Registry`].
///
/// # Example
///
/// ```rust,ignore
/// let registry = Registry::builder()
///     .register::<User>()
///     .register::<Order>()
///     .element(Element::method("Auth", "login").with(Label { value: "Login", desc: "" }))
///     .build()?;
/// ```
#[derive(Debug)]
pub struct RegistryBuilder {
    strict: bool,
    pending: Vec<Element>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self { strict: true, pending: Vec::new() }
    }

    /// In strict mode (the default) registering the same element twice fails
    /// the build. Otherwise the later registration replaces the earlier one.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Queues the class element and all property elements of a model.
    pub fn register<T: Model>(mut self) -> Self {
        self.pending.push(T::element());
        self.pending.extend(T::fields());
        self
    }

    /// Queues a single element, e.g. a function or parameter.
    pub fn element(mut self, element: Element) -> Self {
        self.pending.push(element);
        self
    }

    pub fn elements<I: IntoIterator<Item = Element>>(mut self, elements: I) -> Self {
        self.pending.extend(elements);
        self
    }

    /// Validates descriptor targets and duplicates, then freezes the registry.
    pub fn build(self) -> Result<Registry> {
        let mut elements = IndexMap::with_capacity(self.pending.len());

        for element in self.pending {
            element.validate()?;
            let id = element.id().clone();
            if elements.contains_key(&id) {
                if self.strict {
                    return Err(Error::DuplicateElement(id));
                }
                warn!("element {} registered again, keeping the later registration", id);
            }
            elements.insert(id, element);
        }

        debug!("metadata registry built with {} elements", elements.len());
        Ok(Registry { elements })
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Registry
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Registry {
    elements: IndexMap<ElementId, Element>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Like [`Registry::get`], but unknown ids are an error.
    pub fn element(&self, id: &ElementId) -> Result<&Element> {
        self.get(id).ok_or_else(|| Error::UnknownElement(id.clone()))
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// The descriptor of `kind` attached to `id`, if any.
    pub fn lookup(&self, id: &ElementId, kind: DescriptorKind) -> Option<&Descriptor> {
        self.get(id).and_then(|e| e.lookup(kind))
    }

    pub fn find<T: Anno>(&self, id: &ElementId) -> Option<&T> {
        self.get(id).and_then(Element::find::<T>)
    }

    pub fn user_name(&self, id: &ElementId) -> Result<&'static str> {
        self.element(id)?.user_name()
    }

    pub fn user_label(&self, id: &ElementId) -> Result<&'static str> {
        self.element(id)?.user_label()
    }

    pub fn user_desc(&self, id: &ElementId) -> Result<&'static str> {
        self.element(id)?.user_desc()
    }

    /// Property elements of `owner` in registration order.
    pub fn fields_of<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.members(owner, ElementKind::Property)
    }

    pub fn functions_of<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.members(owner, ElementKind::Function)
    }

    /// Parameters of a function ordered by position.
    pub fn parameters_of(&self, owner: Option<&str>, function: &str) -> Vec<&Element> {
        let mut params: Vec<(usize, &Element)> = self
            .elements
            .iter()
            .filter_map(|(id, e)| match id {
                ElementId::Parameter { owner: o, function: f, index } if *o == owner && *f == function => {
                    Some((*index, e))
                }
                _ => None,
            })
            .collect();
        params.sort_by_key(|(index, _)| *index);
        params.into_iter().map(|(_, e)| e).collect()
    }

    fn members<'a>(&'a self, owner: &'a str, kind: ElementKind) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.values().filter(move |e| e.kind() == kind && e.id().owner() == Some(owner))
    }

    /// Table metadata of a registered class.
    pub fn table(&self, class: &'static str) -> Result<Option<TableInfo>> {
        let element = self.element(&ElementId::Class(class))?;
        TableInfo::from_elements(element, self.fields_of(class))
    }

    /// Metadata of every table or view backed class, in registration order.
    pub fn tables(&self) -> Result<Vec<TableInfo>> {
        let mut fields: IndexMap<&str, Vec<&Element>> = IndexMap::new();
        for element in self.elements.values() {
            if let ElementId::Property { owner, .. } = element.id() {
                fields.entry(*owner).or_default().push(element);
            }
        }

        let mut tables = Vec::new();
        for element in self.elements.values() {
            if let ElementId::Class(name) = element.id() {
                let members = fields.get(name).map(Vec::as_slice).unwrap_or_default();
                if let Some(table) = TableInfo::from_elements(element, members.iter().copied())? {
                    tables.push(table);
                }
            }
        }
        Ok(tables)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// JSON snapshot of all elements and their descriptors.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.elements.values())
    }
}

// ============================================================================
// Global Registry
// ============================================================================

static GLOBAL: OnceCell<Registry> = OnceCell::new();

/// Installs the process-wide registry. Only the first call succeeds.
pub fn install(registry: Registry) -> Result<&'static Registry> {
    let mut installed = false;
    let global = GLOBAL.get_or_init(|| {
        installed = true;
        registry
    });

    if !installed {
        return Err(Error::AlreadyInstalled);
    }
    debug!("global metadata registry installed ({} elements)", global.len());
    Ok(global)
}

/// The process-wide registry, once installed.
pub fn global() -> Option<&'static Registry> {
    GLOBAL.get()
}
