//! # model-anno-macro
//!
//! Procedural macros for `model-anno`.
//!
//! - `#[derive(Model)]` attaches the `#[anno(...)]` metadata of a struct and
//!   its fields to generated model elements.
//! - `#[derive(AnnoEnum)]` turns a fieldless enum into an option list with
//!   `Display`/`FromStr` conversions.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod attrs;
mod derive_enum;
mod derive_model;

#[proc_macro_derive(Model, attributes(anno))]
pub fn model_derive(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    derive_model::expand(ast).into()
}

#[proc_macro_derive(AnnoEnum, attributes(anno))]
pub fn anno_enum_derive(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    derive_enum::expand(ast).into()
}
