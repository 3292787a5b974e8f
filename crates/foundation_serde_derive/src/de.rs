//! Deserialize derive implementation.
//!
//! For a struct with fields `a` and `b` the expansion contains, inside
//! `deserialize`:
//!
//! * `const FIELDS: &[&str]`, the wire names in declaration order;
//! * `enum __Field`, one variant per field, deserialized through
//!   `deserialize_identifier` by `__FieldVisitor`, which rejects any other
//!   key with `unknown_field`;
//! * `__Visitor`, whose `visit_map` fills one `Option` slot per field,
//!   rejecting repeats with `duplicate_field` and absences with
//!   `missing_field` unless the field has a default.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::DeriveInput;

use crate::ast::Container;
use crate::attr::FieldDefault;
use crate::generics;

pub fn expand_derive_deserialize(input: &DeriveInput) -> syn::Result<TokenStream> {
    let cont = Container::from_ast(input, "Deserialize")?;
    let ident = cont.ident;
    let serde = &cont.serde_path;

    let (_, ty_generics, _) = cont.generics.split_for_impl();
    let de_generics = generics::with_de_lifetime(&generics::with_bound(
        cont.generics,
        syn::parse_quote!(#serde::Deserialize<'de>),
    ));
    let (de_impl_generics, de_ty_generics, de_where_clause) = de_generics.split_for_impl();

    let name = ident.to_string();
    let expecting = format!("struct {}", name);
    let wire_names: Vec<&str> = cont.fields.iter().map(|f| f.name.as_str()).collect();
    let variants: Vec<_> = (0..cont.fields.len())
        .map(|i| format_ident!("__field{}", i))
        .collect();

    let slots = cont.fields.iter().zip(&variants).map(|(field, slot)| {
        let ty = field.ty;
        quote! {
            let mut #slot: ::core::option::Option<#ty> = ::core::option::Option::None;
        }
    });

    let arms = cont.fields.iter().zip(&variants).map(|(field, slot)| {
        let key = &field.name;
        let ty = field.ty;
        quote! {
            __Field::#slot => {
                if ::core::option::Option::is_some(&#slot) {
                    return ::core::result::Result::Err(
                        <__A::Error as #serde::de::Error>::duplicate_field(#key),
                    );
                }
                #slot = ::core::option::Option::Some(
                    #serde::de::MapAccess::next_value::<#ty>(&mut __map)?,
                );
            }
        }
    });

    let finish = cont.fields.iter().zip(&variants).map(|(field, slot)| {
        let key = &field.name;
        match &field.default {
            FieldDefault::None => quote! {
                let #slot = #slot.ok_or_else(|| <__A::Error as #serde::de::Error>::missing_field(#key))?;
            },
            FieldDefault::Default => quote! {
                let #slot = #slot.unwrap_or_else(::core::default::Default::default);
            },
            FieldDefault::Function(path) => quote! {
                let #slot = #slot.unwrap_or_else(#path);
            },
        }
    });

    let members = cont.fields.iter().map(|field| field.member);

    Ok(quote! {
        #[automatically_derived]
        impl #de_impl_generics #serde::Deserialize<'de> for #ident #ty_generics #de_where_clause {
            fn deserialize<__D>(__deserializer: __D) -> ::core::result::Result<Self, __D::Error>
            where
                __D: #serde::Deserializer<'de>,
            {
                const FIELDS: &[&str] = &[#(#wire_names),*];

                #[allow(non_camel_case_types)]
                enum __Field {
                    #(#variants,)*
                }

                struct __FieldVisitor;

                impl<'de> #serde::de::Visitor<'de> for __FieldVisitor {
                    type Value = __Field;

                    fn expecting(&self, __formatter: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                        ::core::fmt::Formatter::write_str(__formatter, "field identifier")
                    }

                    fn visit_str<__E>(self, __value: &str) -> ::core::result::Result<__Field, __E>
                    where
                        __E: #serde::de::Error,
                    {
                        match __value {
                            #(#wire_names => ::core::result::Result::Ok(__Field::#variants),)*
                            _ => ::core::result::Result::Err(
                                <__E as #serde::de::Error>::unknown_field(__value, FIELDS),
                            ),
                        }
                    }
                }

                impl<'de> #serde::Deserialize<'de> for __Field {
                    fn deserialize<__D>(__deserializer: __D) -> ::core::result::Result<Self, __D::Error>
                    where
                        __D: #serde::Deserializer<'de>,
                    {
                        #serde::Deserializer::deserialize_identifier(__deserializer, __FieldVisitor)
                    }
                }

                #[allow(dead_code)]
                struct __Visitor #de_impl_generics #de_where_clause {
                    marker: ::core::marker::PhantomData<#ident #ty_generics>,
                    lifetime: ::core::marker::PhantomData<&'de ()>,
                }

                impl #de_impl_generics #serde::de::Visitor<'de> for __Visitor #de_ty_generics #de_where_clause {
                    type Value = #ident #ty_generics;

                    fn expecting(&self, __formatter: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                        ::core::fmt::Formatter::write_str(__formatter, #expecting)
                    }

                    fn visit_map<__A>(self, mut __map: __A) -> ::core::result::Result<Self::Value, __A::Error>
                    where
                        __A: #serde::de::MapAccess<'de>,
                    {
                        #(#slots)*
                        while let ::core::option::Option::Some(__key) =
                            #serde::de::MapAccess::next_key::<__Field>(&mut __map)?
                        {
                            match __key {
                                #(#arms)*
                            }
                        }
                        #(#finish)*
                        ::core::result::Result::Ok(#ident {
                            #(#members: #variants,)*
                        })
                    }
                }

                #serde::Deserializer::deserialize_struct(
                    __deserializer,
                    #name,
                    FIELDS,
                    __Visitor {
                        marker: ::core::marker::PhantomData,
                        lifetime: ::core::marker::PhantomData,
                    },
                )
            }
        }
    })
}
