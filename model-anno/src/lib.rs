//! # model-anno
//!
//! Declarative metadata for data models: how structs, fields, functions and
//! parameters map to a relational schema, JSON output, validation rules and
//! RPC-style names.
//!
//! Metadata is attached with `#[derive(Model)]` and `#[anno(...)]` attributes,
//! or built by hand with [`Element`], and collected into a read-only
//! [`Registry`]. Consumers then resolve names and labels, check constraints
//! and read table metadata without any reflection at runtime.
//!
//! ```rust,ignore
//! use model_anno::{Model, Registry};
//!
//! #[derive(Model)]
//! #[anno(table(version = 1), label(value = "User", desc = "Registered account"))]
//! struct User {
//!     #[anno(field(primary_key, auto_inc = 1))]
//!     id: i64,
//!     #[anno(options("0:男", "1:女"))]
//!     gender: i32,
//! }
//!
//! let registry = Registry::builder().register::<User>().build()?;
//! assert_eq!(registry.user_desc(User::element().id())?, "Registered account");
//! ```

pub mod constraint;
pub mod descriptor;
pub mod element;
pub mod error;
pub mod model;
pub mod options;
pub mod registry;
pub mod resolve;
pub mod schema;
pub mod value;

pub use descriptor::{
    Anno, AutoCreateTable, Comment, DatePattern, Decimal, Descriptor, DescriptorKind, Exclude, Hidden, KeepMe,
    Label, Length, Match, ModelField, ModelTable, ModelView, Name, NotEmpty, NullValue, NumberPattern, OptionList,
    ParamDirection, RangeDouble, RangeInt, RangeLong, SepChar, SerialMe, SqlFunction, SqlProcedure, StringFormat,
    TempValue, Trim,
};
pub use element::{Element, ElementId, ElementKind};
pub use error::{Error, Result};
pub use model::Model;
pub use model_anno_macro::{AnnoEnum, Model};
pub use registry::{global, install, Registry, RegistryBuilder};
pub use schema::{ColumnInfo, TableInfo, TableKind};
