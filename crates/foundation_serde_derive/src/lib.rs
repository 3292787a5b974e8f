#![forbid(unsafe_code)]

//! `#[derive(Serialize, Deserialize)]` for structs with named fields.
//!
//! Generated code names the framework as `::foundation_serde` unless the
//! container carries `#[serde(crate = "path")]`. Fields accept
//! `#[serde(rename = "name")]`, `#[serde(default)]` and
//! `#[serde(default = "path")]`.

mod ast;
mod attr;
mod de;
mod generics;
mod ser;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

#[proc_macro_derive(Serialize, attributes(serde))]
pub fn derive_serialize(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    ser::expand_derive_serialize(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[proc_macro_derive(Deserialize, attributes(serde))]
pub fn derive_deserialize(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    de::expand_derive_deserialize(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
