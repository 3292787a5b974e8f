//! The shape a derive works from: a named-field struct and its attributes.

use std::collections::HashSet;

use syn::{parse_quote, Data, DeriveInput, Fields, Generics, Ident, Path, Type};

use crate::attr::{ContainerAttr, FieldAttr, FieldDefault};

pub struct Container<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    /// Path to the framework crate in generated code.
    pub serde_path: Path,
    pub fields: Vec<Field<'a>>,
}

pub struct Field<'a> {
    pub member: &'a Ident,
    pub ty: &'a Type,
    /// Name on the wire.
    pub name: String,
    pub default: FieldDefault,
}

impl<'a> Container<'a> {
    /// `derive` names the macro being expanded, for error messages.
    pub fn from_ast(input: &'a DeriveInput, derive: &str) -> syn::Result<Self> {
        let attrs = ContainerAttr::from_attrs(&input.attrs)?;
        let shape = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => Ok(&named.named),
                Fields::Unnamed(_) => Err("tuple structs"),
                Fields::Unit => Err("unit structs"),
            },
            Data::Enum(_) => Err("enums"),
            Data::Union(_) => Err("unions"),
        };
        let named = shape.map_err(|kind| {
            syn::Error::new_spanned(
                &input.ident,
                format!(
                    "#[derive({})] supports only structs with named fields, not {}",
                    derive, kind
                ),
            )
        })?;

        let mut fields = Vec::with_capacity(named.len());
        let mut seen = HashSet::new();
        for field in named {
            let member = field
                .ident
                .as_ref()
                .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
            let attrs = FieldAttr::from_attrs(&field.attrs)?;
            let name = attrs.rename.unwrap_or_else(|| unraw(member));
            if !seen.insert(name.clone()) {
                return Err(syn::Error::new_spanned(
                    member,
                    format!("more than one field is named `{}` on the wire", name),
                ));
            }
            fields.push(Field {
                member,
                ty: &field.ty,
                name,
                default: attrs.default,
            });
        }

        Ok(Container {
            ident: &input.ident,
            generics: &input.generics,
            serde_path: attrs
                .crate_path
                .unwrap_or_else(|| parse_quote!(::foundation_serde)),
            fields,
        })
    }
}

fn unraw(ident: &Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(stripped) => stripped.to_owned(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_for(input: DeriveInput) -> String {
        match Container::from_ast(&input, "Deserialize") {
            Ok(_) => panic!("expected the derive to be rejected"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn collects_wire_names_in_declaration_order() {
        let input: DeriveInput = parse_quote! {
            struct Rgb {
                r: u8,
                #[serde(rename = "green")]
                g: u8,
                r#type: u8,
            }
        };
        let container = Container::from_ast(&input, "Serialize").expect("named struct");
        let names: Vec<&str> = container.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["r", "green", "type"]);
        let path = &container.serde_path;
        assert!(path.leading_colon.is_some());
        assert_eq!(path.segments.len(), 1);
        assert_eq!(path.segments[0].ident, "foundation_serde");
    }

    #[test]
    fn rejects_shapes_without_named_fields() {
        assert_eq!(
            error_for(parse_quote!(struct Pair(u8, u8);)),
            "#[derive(Deserialize)] supports only structs with named fields, not tuple structs"
        );
        assert!(error_for(parse_quote!(struct Marker;)).ends_with("not unit structs"));
        assert!(error_for(parse_quote!(enum Color { Red })).ends_with("not enums"));
        assert!(error_for(parse_quote!(union Bits { a: u8 })).ends_with("not unions"));
    }

    #[test]
    fn rejects_colliding_wire_names() {
        let message = error_for(parse_quote! {
            struct Clash {
                a: u8,
                #[serde(rename = "a")]
                b: u8,
            }
        });
        assert_eq!(message, "more than one field is named `a` on the wire");
    }
}
