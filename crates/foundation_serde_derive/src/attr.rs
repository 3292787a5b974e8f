//! `#[serde(...)]` attribute parsing.

use syn::{Attribute, LitStr, Path, Token};

fn serde_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("serde"))
}

#[derive(Default)]
pub struct ContainerAttr {
    pub crate_path: Option<Path>,
}

impl ContainerAttr {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = ContainerAttr::default();
        for attr in serde_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("crate") {
                    if out.crate_path.is_some() {
                        return Err(meta.error("duplicate serde attribute `crate`"));
                    }
                    let lit: LitStr = meta.value()?.parse()?;
                    out.crate_path = Some(lit.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown serde container attribute, expected `crate`"))
                }
            })?;
        }
        Ok(out)
    }
}

/// What to do when a field is absent from the input.
#[derive(Default)]
pub enum FieldDefault {
    /// Absence is a `missing_field` error.
    #[default]
    None,
    /// `#[serde(default)]`: fill with `Default::default()`.
    Default,
    /// `#[serde(default = "path")]`: fill with `path()`.
    Function(Path),
}

#[derive(Default)]
pub struct FieldAttr {
    pub rename: Option<String>,
    pub default: FieldDefault,
}

impl FieldAttr {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = FieldAttr::default();
        for attr in serde_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if out.rename.is_some() {
                        return Err(meta.error("duplicate serde attribute `rename`"));
                    }
                    let lit: LitStr = meta.value()?.parse()?;
                    out.rename = Some(lit.value());
                    Ok(())
                } else if meta.path.is_ident("default") {
                    if !matches!(out.default, FieldDefault::None) {
                        return Err(meta.error("duplicate serde attribute `default`"));
                    }
                    out.default = if meta.input.peek(Token![=]) {
                        let lit: LitStr = meta.value()?.parse()?;
                        FieldDefault::Function(lit.parse()?)
                    } else {
                        FieldDefault::Default
                    };
                    Ok(())
                } else {
                    Err(meta.error("unknown serde field attribute, expected `rename` or `default`"))
                }
            })?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn reads_crate_path() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(crate = "my::serde")])];
        let parsed = ContainerAttr::from_attrs(&attrs).expect("crate attribute");
        let path = parsed.crate_path.expect("path set");
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        assert_eq!(segments, ["my", "serde"]);
    }

    #[test]
    fn ignores_foreign_attributes() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[doc = "hello"]), parse_quote!(#[allow(dead_code)])];
        let parsed = FieldAttr::from_attrs(&attrs).expect("no serde attributes");
        assert!(parsed.rename.is_none());
        assert!(matches!(parsed.default, FieldDefault::None));
    }

    #[test]
    fn reads_rename_and_default_forms() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(rename = "red", default)])];
        let parsed = FieldAttr::from_attrs(&attrs).expect("field attributes");
        assert_eq!(parsed.rename.as_deref(), Some("red"));
        assert!(matches!(parsed.default, FieldDefault::Default));

        let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(default = "defaults::level")])];
        let parsed = FieldAttr::from_attrs(&attrs).expect("default function");
        match parsed.default {
            FieldDefault::Function(path) => assert_eq!(path.segments.len(), 2),
            _ => panic!("expected a default function"),
        }
    }

    fn field_error(attrs: &[Attribute]) -> String {
        match FieldAttr::from_attrs(attrs) {
            Ok(_) => panic!("expected the field attributes to be rejected"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn rejects_unknown_and_repeated_keys() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(flatten)])];
        assert!(field_error(&attrs).contains("unknown serde field attribute"));

        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[serde(rename = "a")]),
            parse_quote!(#[serde(rename = "b")]),
        ];
        assert_eq!(field_error(&attrs), "duplicate serde attribute `rename`");

        let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(default, default = "f")])];
        assert_eq!(field_error(&attrs), "duplicate serde attribute `default`");

        let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(crate = "x", crate = "y")])];
        match ContainerAttr::from_attrs(&attrs) {
            Ok(_) => panic!("expected a repeated crate path to be rejected"),
            Err(err) => assert_eq!(err.to_string(), "duplicate serde attribute `crate`"),
        }
    }
}
