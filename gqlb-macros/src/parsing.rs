//! Parsing utilities for gqlb macros

use syn::{
    parse::{Parse, ParseStream},
    Attribute, Ident, LitStr, Path, Result, Token,
};

/// Arguments of `#[graphql_object(...)]`
#[derive(Debug, Default)]
pub struct ObjectConfig {
    pub name: Option<String>,
    pub extends: Vec<Path>,
}

impl Parse for ObjectConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut config = ObjectConfig::default();

        while !input.is_empty() {
            let key: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match key.to_string().as_str() {
                "name" => {
                    let value: LitStr = input.parse()?;
                    config.name = Some(value.value());
                }
                "extends" => {
                    // `extends = A, B` runs until the next `key =`
                    config.extends.push(input.parse()?);
                    while input.peek(Token![,]) && !input.peek3(Token![=]) {
                        input.parse::<Token![,]>()?;
                        if input.is_empty() {
                            break;
                        }
                        config.extends.push(input.parse()?);
                    }
                }
                _ => {
                    return Err(syn::Error::new(
                        key.span(),
                        format!("Unknown graphql_object option: {}", key),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(config)
    }
}

/// Value of `#[graphql(name = "...")]` among `attrs`, if any
pub fn graphql_name(attrs: &[Attribute]) -> Result<Option<String>> {
    let mut name = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("graphql")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                name = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported graphql attribute"))
            }
        })?;
    }

    Ok(name)
}

/// Drop `#[graphql(...)]` helper attributes
pub fn strip_graphql_attrs(attrs: &[Attribute]) -> Vec<Attribute> {
    attrs
        .iter()
        .filter(|attr| !attr.path().is_ident("graphql"))
        .cloned()
        .collect()
}
