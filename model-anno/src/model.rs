use crate::{element::Element, error::Result, schema::TableInfo};

/// A type that carries model metadata.
///
/// This trait is typically implemented automatically via the `#[derive(Model)]` macro.
///
/// # Example
///
/// ```rust,ignore
/// use model_anno::Model;
///
/// #[derive(Model)]
/// #[anno(table(version = 1), name = "users", label = "User")]
/// struct User {
///     #[anno(field(primary_key, auto_inc = 1))]
///     id: i64,
///     #[anno(length(max = 32, min = 2), not_empty)]
///     name: String,
/// }
/// ```
pub trait Model {
    /// The struct identifier as declared.
    fn type_name() -> &'static str;

    /// The class element with its descriptors.
    fn element() -> Element;

    /// Property elements in declaration order.
    fn fields() -> Vec<Element>;

    /// Property element by declared identifier.
    fn field(name: &str) -> Option<Element> {
        Self::fields().into_iter().find(|f| f.declared_name() == Some(name))
    }

    /// Table or view metadata, `None` when the model is not table backed.
    fn table() -> Result<Option<TableInfo>> {
        TableInfo::from_elements(&Self::element(), &Self::fields())
    }
}
