//! # Table Schema View
//!
//! Read-only view of the relational metadata of a table or view backed model,
//! as consumed by schema generators. Nothing here produces SQL.

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    descriptor::{AutoCreateTable, Decimal, ModelField, ModelTable, ModelView, TempValue},
    element::Element,
    error::Result,
};

/// What backs a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TableKind {
    Table,
    View,
}

/// Metadata information about a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    /// The field identifier as declared.
    pub field: &'static str,
    /// The resolved column name.
    pub name: &'static str,
    pub primary_key: bool,
    /// Start value when the column auto increments.
    pub auto_inc: Option<i32>,
    pub unique: bool,
    /// Composite unique group the column belongs to.
    pub unique_name: Option<&'static str>,
    pub index: bool,
    pub not_null: bool,
    pub default_value: Option<&'static str>,
    pub decimal: Option<Decimal>,
    pub comment: Option<&'static str>,
}

impl ColumnInfo {
    fn from_element(element: &Element) -> Result<Self> {
        let field = element.find::<ModelField>().copied().unwrap_or_default();
        Ok(Self {
            field: element.declared_name().unwrap_or_default(),
            name: element.user_name()?,
            primary_key: field.primary_key,
            auto_inc: field.auto_inc_start(),
            unique: field.unique,
            unique_name: field.unique_group(),
            index: field.index,
            not_null: field.not_null,
            default_value: field.default_literal(),
            decimal: element.find::<Decimal>().copied(),
            comment: element.comment(),
        })
    }
}

/// Metadata of a table or view backed model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableInfo {
    pub name: &'static str,
    pub kind: TableKind,
    pub version: i32,
    pub auto_create: bool,
    pub comment: Option<&'static str>,
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    /// Builds the view from a class element and its property elements.
    ///
    /// Returns `Ok(None)` when the class is tagged neither `ModelTable` nor
    /// `ModelView`. `ModelTable` wins when both are present. Transient
    /// (`TempValue`) properties are not columns.
    pub fn from_elements<'a, I>(class: &Element, fields: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = &'a Element>,
    {
        let (kind, version) = match (class.find::<ModelTable>(), class.find::<ModelView>()) {
            (Some(table), _) => (TableKind::Table, table.version),
            (None, Some(view)) => (TableKind::View, view.version),
            (None, None) => return Ok(None),
        };

        let columns = fields
            .into_iter()
            .filter(|f| !f.has::<TempValue>())
            .map(ColumnInfo::from_element)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(Self {
            name: class.user_name()?,
            kind,
            version,
            auto_create: class.find::<AutoCreateTable>().copied().unwrap_or_default().value,
            comment: class.comment(),
            columns,
        }))
    }

    /// Looks a column up by resolved name.
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn primary_keys(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.iter().filter(|c| c.primary_key)
    }

    /// Column names of each named composite unique group, in declaration order.
    pub fn unique_groups(&self) -> IndexMap<&'static str, Vec<&'static str>> {
        let mut groups: IndexMap<&'static str, Vec<&'static str>> = IndexMap::new();
        for col in &self.columns {
            if let Some(group) = col.unique_name {
                groups.entry(group).or_default().push(col.name);
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Comment, Name};

    fn order_fields() -> Vec<Element> {
        vec![
            Element::property("Order", "id").with(ModelField { primary_key: true, auto_inc: 1, ..Default::default() }),
            Element::property("Order", "shop_id")
                .with(ModelField { unique_name: "uq_shop_no", index: true, ..Default::default() }),
            Element::property("Order", "no")
                .with(Name { value: "order_no" })
                .with(ModelField { unique_name: "uq_shop_no", not_null: true, ..Default::default() }),
            Element::property("Order", "amount")
                .with(Decimal { precision: 12, scale: 2, pattern: "0.00" })
                .with(ModelField { default_value: "0", ..Default::default() }),
            Element::property("Order", "cache").with(TempValue { desc: "computed" }),
        ]
    }

    #[test]
    fn untagged_class_has_no_table() {
        let info = TableInfo::from_elements(&Element::class("Order"), &order_fields()).unwrap();
        assert!(info.is_none());
    }

    #[test]
    fn table_columns_follow_field_metadata() {
        let class = Element::class("Order")
            .with(ModelTable { version: 4 })
            .with(Name { value: "orders" })
            .with(Comment { value: "customer orders" })
            .with(AutoCreateTable { value: false });
        let info = TableInfo::from_elements(&class, &order_fields()).unwrap().unwrap();

        assert_eq!(info.name, "orders");
        assert_eq!(info.kind, TableKind::Table);
        assert_eq!(info.version, 4);
        assert!(!info.auto_create);
        assert_eq!(info.comment, Some("customer orders"));
        assert_eq!(info.columns.len(), 4);

        let id = info.column("id").unwrap();
        assert!(id.primary_key);
        assert_eq!(id.auto_inc, Some(1));
        assert_eq!(info.primary_keys().count(), 1);

        let no = info.column("order_no").unwrap();
        assert_eq!(no.field, "no");
        assert!(no.not_null);

        let amount = info.column("amount").unwrap();
        assert_eq!(amount.default_value, Some("0"));
        assert_eq!(amount.decimal.map(|d| d.precision), Some(12));

        let groups = info.unique_groups();
        assert_eq!(groups.get("uq_shop_no"), Some(&vec!["shop_id", "order_no"]));
        assert!(info.column("cache").is_none());
    }

    #[test]
    fn view_defaults() {
        let class = Element::class("Summary").with(ModelView { version: 1 });
        let info = TableInfo::from_elements(&class, std::iter::empty()).unwrap().unwrap();
        assert_eq!(info.kind, TableKind::View);
        assert!(info.auto_create);
        assert_eq!(info.name, "Summary");
    }
}
