//! # Enum Derive Macro Implementation
//!
//! This module implements the procedural macro expansion for `#[derive(AnnoEnum)]`.
//! It generates `Display` and `FromStr` implementations keyed by the variant
//! name (or its `name` override) and an `option_list()` whose entries pair
//! each key with its label.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{ext::IdentExt, Data, DeriveInput, Fields, LitStr};

use crate::attrs::Anno;

/// Expands the `#[derive(AnnoEnum)]` macro.
pub fn expand(ast: DeriveInput) -> TokenStream {
    match try_expand(&ast) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn try_expand(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &ast.ident;

    let variants = match &ast.data {
        Data::Enum(data_enum) => &data_enum.variants,
        _ => return Err(syn::Error::new_spanned(name, "AnnoEnum can only be derived for enums")),
    };

    if variants.is_empty() {
        return Err(syn::Error::new_spanned(name, "AnnoEnum needs at least one variant"));
    }

    let mut display_arms = Vec::new();
    let mut from_str_arms = Vec::new();
    let mut label_arms = Vec::new();
    let mut entries = Vec::new();

    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(variant, "AnnoEnum variants cannot carry fields"));
        }

        let anno = Anno::from_attrs(&variant.attrs)?;
        let known = usize::from(anno.name.is_some()) + usize::from(anno.label.is_some());
        if anno.descriptors.len() > known {
            return Err(syn::Error::new_spanned(variant, "only `name` and `label` are supported on enum variants"));
        }

        let variant_ident = &variant.ident;
        if let Some(name) = &anno.name {
            check_option_text(name, "name")?;
            if name.value().contains(':') {
                return Err(syn::Error::new(name.span(), "option key cannot contain `:`"));
            }
        }
        if let Some(label) = &anno.label {
            check_option_text(label, "label")?;
        }

        let key = anno.name_or(&variant_ident.unraw().to_string());
        let label = match &anno.label {
            Some(label) if !label.value().is_empty() => label.value(),
            _ => key.clone(),
        };
        let entry = format!("{}:{}", key, label);

        display_arms.push(quote! {
            Self::#variant_ident => f.write_str(#key),
        });
        from_str_arms.push(quote! {
            #key => Ok(Self::#variant_ident),
        });
        label_arms.push(quote! {
            Self::#variant_ident => #label,
        });
        entries.push(entry);
    }

    Ok(quote! {
        impl std::fmt::Display for #name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    #(#display_arms)*
                }
            }
        }

        impl std::str::FromStr for #name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    #(#from_str_arms)*
                    _ => Err(format!("Unknown variant: {}", s)),
                }
            }
        }

        impl #name {
            /// Option entries `"key:label"` in declaration order.
            pub fn option_list() -> model_anno::OptionList {
                model_anno::OptionList { options: &[#(#entries),*], bits: false }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    #(#label_arms)*
                }
            }
        }
    })
}

/// Option entries are trimmed when decoded, so keys and labels must already be.
fn check_option_text(lit: &LitStr, what: &str) -> syn::Result<()> {
    let value = lit.value();
    if value.trim() != value {
        return Err(syn::Error::new(lit.span(), format!("option {} cannot have surrounding whitespace", what)));
    }
    Ok(())
}
