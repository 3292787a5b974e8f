use syn::{parse_quote, Generics, TypeParamBound};

/// Adds `bound` to every type parameter in the where clause.
pub fn with_bound(generics: &Generics, bound: TypeParamBound) -> Generics {
    let mut generics = generics.clone();
    let params: Vec<_> = generics.type_params().map(|param| param.ident.clone()).collect();
    let where_clause = generics.make_where_clause();
    for ident in params {
        where_clause.predicates.push(parse_quote!(#ident: #bound));
    }
    generics
}

/// Prepends the `'de` lifetime, outliving every lifetime the type borrows.
pub fn with_de_lifetime(generics: &Generics) -> Generics {
    let mut generics = generics.clone();
    let lifetimes: Vec<_> = generics
        .lifetimes()
        .map(|param| param.lifetime.clone())
        .collect();
    generics.params.insert(0, parse_quote!('de));
    let where_clause = generics.make_where_clause();
    for lifetime in lifetimes {
        where_clause.predicates.push(parse_quote!('de: #lifetime));
    }
    generics
}
