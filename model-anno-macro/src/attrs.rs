//! # Attribute Parsing
//!
//! Turns `#[anno(...)]` attributes into the descriptor constructors that are
//! attached to the generated elements.
//!
//! ```text
//! #[anno(table(version = 2), name = "users", label(value = "User", desc = "Accounts"))]
//! #[anno(field(primary_key, auto_inc = 1), length(max = 32), options("0:男", "1:女"))]
//! ```

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{meta::ParseNestedMeta, Attribute, Expr, Ident, LitBool, LitStr, Token};

/// Descriptors collected from the `#[anno(...)]` attributes of one item.
#[derive(Default)]
pub struct Anno {
    /// Descriptor constructor expressions, in declaration order.
    pub descriptors: Vec<TokenStream>,
    pub name: Option<LitStr>,
    pub label: Option<LitStr>,
}

impl Anno {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut anno = Anno::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("anno")) {
            attr.parse_nested_meta(|meta| anno.parse_meta(meta))?;
        }
        Ok(anno)
    }

    /// Resolved name literal, falling back to `ident` when no non-empty `name` is set.
    pub fn name_or(&self, ident: &str) -> String {
        match &self.name {
            Some(name) if !name.value().is_empty() => name.value(),
            _ => ident.to_string(),
        }
    }

    fn push(&mut self, tokens: TokenStream) {
        self.descriptors.push(tokens);
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let key = meta.path.require_ident()?.to_string();

        match key.as_str() {
            // markers
            "exclude" => self.push(quote!(model_anno::Exclude)),
            "hidden" => self.push(quote!(model_anno::Hidden)),
            "trim" => self.push(quote!(model_anno::Trim)),
            "serial" => self.push(quote!(model_anno::SerialMe)),
            "keep" => self.push(quote!(model_anno::KeepMe)),

            // single string payloads
            "name" => {
                let value: LitStr = meta.value()?.parse()?;
                self.push(quote!(model_anno::Name { value: #value }));
                self.name = Some(value);
            }
            "comment" => self.string(&meta, quote!(model_anno::Comment), "value")?,
            "null_value" => self.string(&meta, quote!(model_anno::NullValue), "value")?,
            "number_pattern" => self.string(&meta, quote!(model_anno::NumberPattern), "pattern")?,
            "string_format" => self.string(&meta, quote!(model_anno::StringFormat), "pattern")?,
            "date_pattern" => self.string(&meta, quote!(model_anno::DatePattern), "format")?,

            "label" => {
                let (value, desc) = if meta.input.peek(Token![=]) {
                    (meta.value()?.parse::<LitStr>()?, None)
                } else {
                    let args = Args::parse(&meta, &["value", "desc"])?;
                    let value = args.required::<LitStr>(&meta, "value")?;
                    (value, args.get("desc"))
                };
                let desc = desc.unwrap_or_else(|| quote!(""));
                self.push(quote!(model_anno::Label { value: #value, desc: #desc }));
                self.label = Some(value);
            }

            // schema
            "table" => {
                let args = Args::parse(&meta, &["version"])?;
                self.push(args.with_defaults(quote!(model_anno::ModelTable), &[("version", "version")]));
            }
            "view" => {
                let args = Args::parse(&meta, &["version"])?;
                self.push(args.with_defaults(quote!(model_anno::ModelView), &[("version", "version")]));
            }
            "auto_create_table" => {
                let value = if meta.input.peek(Token![=]) {
                    meta.value()?.parse::<LitBool>()?.value
                } else {
                    true
                };
                self.push(quote!(model_anno::AutoCreateTable { value: #value }));
            }
            "field" => {
                const FIELDS: &[(&str, &str)] = &[
                    ("primary_key", "primary_key"),
                    ("auto_inc", "auto_inc"),
                    ("unique", "unique"),
                    ("unique_name", "unique_name"),
                    ("index", "index"),
                    ("not_null", "not_null"),
                    ("default", "default_value"),
                ];
                let args = Args::parse(&meta, &keys(FIELDS))?;
                self.push(args.with_defaults(quote!(model_anno::ModelField), FIELDS));
            }
            "decimal" => {
                const FIELDS: &[(&str, &str)] = &[("precision", "precision"), ("scale", "scale"), ("pattern", "pattern")];
                let args = Args::parse(&meta, &keys(FIELDS))?;
                self.push(args.with_defaults(quote!(model_anno::Decimal), FIELDS));
            }

            // constraints
            "length" => {
                const FIELDS: &[(&str, &str)] = &[("max", "max"), ("min", "min"), ("fixed", "fixed")];
                let args = Args::parse(&meta, &keys(FIELDS))?;
                self.push(args.with_defaults(quote!(model_anno::Length), FIELDS));
            }
            "range_int" | "range_long" | "range_double" => {
                let args = Args::parse(&meta, &["min", "max"])?;
                let min = args.required::<Expr>(&meta, "min")?;
                let max = args.required::<Expr>(&meta, "max")?;
                self.push(match key.as_str() {
                    "range_int" => quote!(model_anno::RangeInt { min: #min, max: #max }),
                    "range_long" => quote!(model_anno::RangeLong { min: #min, max: #max }),
                    _ => quote!(model_anno::RangeDouble { min: (#min) as f64, max: (#max) as f64 }),
                });
            }
            "not_empty" => {
                let args = Args::parse(&meta, &["trim"])?;
                self.push(args.with_defaults(quote!(model_anno::NotEmpty), &[("trim", "trim")]));
            }
            "matches" => {
                let (value, msg) = if meta.input.peek(Token![=]) {
                    (meta.value()?.parse::<LitStr>()?, None)
                } else {
                    let args = Args::parse(&meta, &["value", "msg"])?;
                    (args.required::<LitStr>(&meta, "value")?, args.get("msg"))
                };
                let msg = msg.unwrap_or_else(|| quote!(""));
                self.push(quote!(model_anno::Match { value: #value, msg: #msg }));
            }
            "options" => self.options(&meta)?,

            // formatting
            "sep" => {
                let args = Args::parse(&meta, &["list", "map"])?;
                self.push(args.with_defaults(quote!(model_anno::SepChar), &[("list", "list"), ("map", "map")]));
            }
            "temp" => {
                let args = Args::parse(&meta, &["desc"])?;
                self.push(args.with_defaults(quote!(model_anno::TempValue), &[("desc", "desc")]));
            }

            _ => return Err(meta.error(format!("unknown anno attribute `{}`", key))),
        }
        Ok(())
    }

    /// `key = "literal"` into a single-field descriptor.
    fn string(&mut self, meta: &ParseNestedMeta, path: TokenStream, field: &str) -> syn::Result<()> {
        let value: LitStr = meta.value()?.parse()?;
        let field = format_ident!("{}", field);
        self.push(quote!(#path { #field: #value }));
        Ok(())
    }

    /// `options("0:男", "1:女", bits)`
    fn options(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        let content;
        syn::parenthesized!(content in meta.input);

        let mut entries: Vec<LitStr> = Vec::new();
        let mut bits = false;
        while !content.is_empty() {
            if content.peek(LitStr) {
                entries.push(content.parse()?);
            } else {
                let ident: Ident = content.parse()?;
                if ident != "bits" {
                    return Err(syn::Error::new(ident.span(), "expected an option string or `bits`"));
                }
                bits = true;
            }

            if content.is_empty() {
                break;
            }
            content.parse::<Token![,]>()?;
        }

        self.push(quote!(model_anno::OptionList { options: &[#(#entries),*], bits: #bits }));
        Ok(())
    }
}

fn keys(fields: &[(&'static str, &'static str)]) -> Vec<&'static str> {
    fields.iter().map(|(key, _)| *key).collect()
}

/// Arguments of a nested attribute: `key = expr` pairs and bare `flag`s.
struct Args {
    items: Vec<(Ident, Option<Expr>)>,
}

impl Args {
    /// Parses the optional parenthesized argument list, rejecting keys outside `known`.
    fn parse(meta: &ParseNestedMeta, known: &[&str]) -> syn::Result<Self> {
        let mut items = Vec::new();
        if !meta.input.peek(syn::token::Paren) {
            return Ok(Self { items });
        }

        meta.parse_nested_meta(|inner| {
            let ident = inner.path.require_ident()?.clone();
            if !known.iter().any(|k| ident == k) {
                return Err(inner.error(format!("unknown argument `{}`, expected one of: {}", ident, known.join(", "))));
            }
            let value = if inner.input.peek(Token![=]) { Some(inner.value()?.parse::<Expr>()?) } else { None };
            items.push((ident, value));
            Ok(())
        })?;
        Ok(Self { items })
    }

    /// The argument value; a bare flag reads as `true`.
    fn get(&self, key: &str) -> Option<TokenStream> {
        self.items.iter().find(|(ident, _)| ident == key).map(|(_, value)| match value {
            Some(expr) => quote!(#expr),
            None => quote!(true),
        })
    }

    fn required<T: syn::parse::Parse>(&self, meta: &ParseNestedMeta, key: &str) -> syn::Result<T> {
        match self.items.iter().find(|(ident, _)| ident == key) {
            Some((_, Some(expr))) => syn::parse2(quote!(#expr)),
            Some((ident, None)) => Err(syn::Error::new(ident.span(), format!("`{}` requires a value", key))),
            None => Err(meta.error(format!("missing required argument `{}`", key))),
        }
    }

    /// Struct literal with the given arguments, remaining fields from `Default`.
    fn with_defaults(&self, path: TokenStream, fields: &[(&str, &str)]) -> TokenStream {
        let assignments = fields.iter().filter_map(|(key, field)| {
            let value = self.get(key)?;
            let field = format_ident!("{}", field);
            Some(quote!(#field: #value))
        });
        quote!(#path { #(#assignments,)* ..::core::default::Default::default() })
    }
}
