//! Serialize derive implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::ast::Container;
use crate::generics;

pub fn expand_derive_serialize(input: &DeriveInput) -> syn::Result<TokenStream> {
    let cont = Container::from_ast(input, "Serialize")?;
    let ident = cont.ident;
    let serde = &cont.serde_path;

    let bounded = generics::with_bound(cont.generics, syn::parse_quote!(#serde::Serialize));
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();

    let name = ident.to_string();
    let len = cont.fields.len();
    let mutability = if cont.fields.is_empty() {
        quote!()
    } else {
        quote!(mut)
    };
    let fields = cont.fields.iter().map(|field| {
        let member = field.member;
        let key = &field.name;
        quote! {
            #serde::ser::SerializeStruct::serialize_field(&mut __state, #key, &self.#member)?;
        }
    });

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics #serde::Serialize for #ident #ty_generics #where_clause {
            fn serialize<__S>(&self, __serializer: __S) -> ::core::result::Result<__S::Ok, __S::Error>
            where
                __S: #serde::Serializer,
            {
                let #mutability __state = #serde::Serializer::serialize_struct(__serializer, #name, #len)?;
                #(#fields)*
                #serde::ser::SerializeStruct::end(__state)
            }
        }
    })
}
