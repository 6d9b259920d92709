use heck::{ToShoutySnakeCase, ToSnakeCase};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{ext::IdentExt, Data, DeriveInput, Fields};

use crate::attrs::Anno;

/// Expands the `#[derive(Model)]` macro.
///
/// This function parses the struct and field `#[anno(...)]` attributes to generate:
/// 1. The `impl Model` block with `type_name`, `element` and `fields`.
/// 2. A `<struct>_fields` module holding the resolved name of every field.
pub fn expand(ast: DeriveInput) -> TokenStream {
    match try_expand(&ast) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn try_expand(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let struct_name = &ast.ident;
    let vis = &ast.vis;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let fields = match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => return Err(syn::Error::new_spanned(struct_name, "Model must have named fields")),
        },
        _ => return Err(syn::Error::new_spanned(struct_name, "Model must be a struct")),
    };

    let type_name = struct_name.unraw().to_string();
    let class = Anno::from_attrs(&ast.attrs)?;
    let class_descriptors = &class.descriptors;

    let mut field_elements = Vec::with_capacity(fields.len());
    let mut field_consts = Vec::with_capacity(fields.len());

    for field in fields {
        let Some(ident) = &field.ident else { continue };
        let declared = ident.unraw().to_string();
        let anno = Anno::from_attrs(&field.attrs)?;
        let descriptors = &anno.descriptors;

        field_elements.push(quote! {
            model_anno::Element::property(#type_name, #declared) #(.with(#descriptors))*
        });

        let const_name = format_ident!("{}", declared.to_shouty_snake_case());
        let column = anno.name_or(&declared);
        field_consts.push(quote! {
            pub const #const_name: &str = #column;
        });
    }

    let fields_mod = format_ident!("{}_fields", type_name.to_snake_case());

    Ok(quote! {
        impl #impl_generics model_anno::Model for #struct_name #ty_generics #where_clause {
            fn type_name() -> &'static str {
                #type_name
            }

            fn element() -> model_anno::Element {
                model_anno::Element::class(#type_name) #(.with(#class_descriptors))*
            }

            fn fields() -> Vec<model_anno::Element> {
                vec![#(#field_elements),*]
            }
        }

        /// Resolved field names.
        #[allow(dead_code)]
        #vis mod #fields_mod {
            #(#field_consts)*
        }
    })
}
