//! # Descriptor Catalog
//!
//! This module declares every metadata marker that can be attached to a model
//! element. Descriptors are plain immutable values: they carry configuration
//! for schema generators, serializers and form layers, and never change once
//! declared.
//!
//! Each descriptor type is wrapped by a variant of [`Descriptor`] and has a
//! matching [`DescriptorKind`], which also records the element kinds it may be
//! attached to.

use serde::Serialize;

use crate::element::ElementKind;

// ============================================================================
// Schema Descriptors
// ============================================================================

/// Marks a model as backed by a database table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModelTable {
    /// Schema version tag of the table.
    pub version: i32,
}

/// Marks a model as backed by a database view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModelView {
    /// Schema version tag of the view.
    pub version: i32,
}

/// Column-level schema constraints of a model field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModelField {
    /// Whether this column is (part of) the primary key.
    pub primary_key: bool,
    /// `0` disables auto increment, a positive value enables it and is the start value.
    pub auto_inc: i32,
    /// Whether the column carries a single-column UNIQUE constraint.
    pub unique: bool,
    /// Name of a composite unique group this column belongs to, empty for none.
    pub unique_name: &'static str,
    /// Whether an index should exist for this column.
    pub index: bool,
    /// Whether the column rejects NULL.
    pub not_null: bool,
    /// Literal default value, empty for none.
    pub default_value: &'static str,
}

impl ModelField {
    /// Start value of the auto increment sequence, if enabled.
    pub fn auto_inc_start(&self) -> Option<i32> {
        (self.auto_inc > 0).then_some(self.auto_inc)
    }

    pub fn unique_group(&self) -> Option<&'static str> {
        (!self.unique_name.is_empty()).then_some(self.unique_name)
    }

    pub fn default_literal(&self) -> Option<&'static str> {
        (!self.default_value.is_empty()).then_some(self.default_value)
    }
}

/// Numeric storage and formatting shape, e.g. `Decimal { precision: 11, scale: 2, pattern: "0.00" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decimal {
    pub precision: i32,
    pub scale: i32,
    pub pattern: &'static str,
}

impl Default for Decimal {
    fn default() -> Self {
        Self { precision: 11, scale: 2, pattern: "" }
    }
}

/// Binds a function to a stored SQL function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SqlFunction {
    pub value: &'static str,
}

/// Binds a function to a stored SQL procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SqlProcedure {
    pub value: &'static str,
}

/// Direction of a stored procedure parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ParamDirection {
    #[default]
    In,
    Out,
    InOut,
}

/// Whether the table of a model is created automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AutoCreateTable {
    pub value: bool,
}

impl Default for AutoCreateTable {
    fn default() -> Self {
        Self { value: true }
    }
}

// ============================================================================
// Serialization Descriptors
// ============================================================================

/// Always serialize this property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SerialMe;

/// A transient property that is never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TempValue {
    pub desc: &'static str,
}

/// Keep this element when stripping unused code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KeepMe;

/// Separator characters for collection-valued properties.
///
/// Lists use `list` only. Maps are first split into entries with `list`, then
/// each entry into key and value with `map`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SepChar {
    pub list: char,
    pub map: char,
}

impl Default for SepChar {
    fn default() -> Self {
        Self { list: ',', map: ':' }
    }
}

/// Exclude this property from JSON output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Exclude;

/// Hide this property from clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Hidden;

// ============================================================================
// Naming Descriptors
// ============================================================================

/// Overrides the inferred name of an element (table, column, JSON key, route).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Name {
    pub value: &'static str,
}

/// Human readable label and optional longer description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Label {
    pub value: &'static str,
    pub desc: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub value: &'static str,
}

// ============================================================================
// Formatting Descriptors
// ============================================================================

/// Ordered option entries, each either `"value"` or `"key:label"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionList {
    pub options: &'static [&'static str],
    /// The value is a bit set of option keys.
    pub bits: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberPattern {
    pub pattern: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StringFormat {
    pub pattern: &'static str,
}

/// A chrono `strftime` pattern used to render and parse dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatePattern {
    pub format: &'static str,
}

/// Text that stands for NULL in this property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NullValue {
    pub value: &'static str,
}

/// Trim surrounding whitespace of incoming values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Trim;

// ============================================================================
// Constraint Descriptors
// ============================================================================

/// Length constraint. When `fixed > 0` the value must equal it and `min`/`max`
/// are ignored, otherwise `max` and `min` apply only when positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Length {
    pub max: i64,
    pub min: i64,
    pub fixed: i64,
}

impl Default for Length {
    fn default() -> Self {
        Self { max: 255, min: 0, fixed: 0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeInt {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeLong {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeDouble {
    pub min: f64,
    pub max: f64,
}

/// The value must not be empty. Applies to strings and collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotEmpty {
    pub trim: bool,
}

impl Default for NotEmpty {
    fn default() -> Self {
        Self { trim: true }
    }
}

/// The value must match the regular expression `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Match {
    pub value: &'static str,
    pub msg: &'static str,
}

// ============================================================================
// Descriptor Enum
// ============================================================================

/// Typed access to a descriptor stored inside a [`Descriptor`].
pub trait Anno: Sized + 'static {
    /// The kind this descriptor type is stored under.
    const KIND: DescriptorKind;

    /// Borrows the descriptor if `descriptor` holds this type.
    fn extract(descriptor: &Descriptor) -> Option<&Self>;
}

macro_rules! descriptors {
    ($($variant:ident => [$($target:ident),+]),* $(,)?) => {
        /// Any descriptor of the catalog.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(tag = "kind", content = "args")]
        pub enum Descriptor {
            $($variant($variant),)*
        }

        /// Discriminant of [`Descriptor`], used for registry lookups.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub enum DescriptorKind {
            $($variant,)*
        }

        impl Descriptor {
            pub fn kind(&self) -> DescriptorKind {
                match self {
                    $(Self::$variant(_) => DescriptorKind::$variant,)*
                }
            }
        }

        impl DescriptorKind {
            /// Element kinds this descriptor may be attached to.
            pub fn targets(self) -> &'static [ElementKind] {
                match self {
                    $(Self::$variant => &[$(ElementKind::$target),+],)*
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)*
                }
            }
        }

        $(
            impl From<$variant> for Descriptor {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }

            impl Anno for $variant {
                const KIND: DescriptorKind = DescriptorKind::$variant;

                fn extract(descriptor: &Descriptor) -> Option<&Self> {
                    match descriptor {
                        Descriptor::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

descriptors! {
    ModelTable => [Class],
    ModelView => [Class],
    ModelField => [Property],
    Decimal => [Property, Parameter],
    SqlFunction => [Function],
    SqlProcedure => [Function],
    ParamDirection => [Parameter],
    AutoCreateTable => [Class],
    SerialMe => [Property],
    TempValue => [Property],
    KeepMe => [Class, Function, Property],
    SepChar => [Property, Parameter],
    OptionList => [Property, Parameter],
    NumberPattern => [Property, Parameter],
    StringFormat => [Property, Parameter],
    DatePattern => [Property, Parameter],
    Length => [Property, Parameter],
    Exclude => [Property, Function],
    Name => [Class, Property, Function, Parameter],
    Label => [Class, Property, Function, Parameter],
    Comment => [Class, Property, Function, Parameter],
    NullValue => [Property, Parameter],
    Hidden => [Property],
    Trim => [Property, Parameter],
    RangeInt => [Property, Parameter],
    RangeLong => [Property, Parameter],
    RangeDouble => [Property, Parameter],
    NotEmpty => [Property, Parameter],
    Match => [Property, Parameter],
}

impl DescriptorKind {
    pub fn allows(self, kind: ElementKind) -> bool {
        self.targets().contains(&kind)
    }
}

impl std::fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
