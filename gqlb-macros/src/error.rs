//! Error handling for gqlb macros

use proc_macro2::{Span, TokenStream};
use syn::Error;

/// Macro-specific error types
#[derive(Debug)]
pub enum MacroError {
    /// Invalid `#[graphql_object]` target
    InvalidObjectDefinition(String),
    /// Invalid `GraphQLInput` target
    InvalidInputDefinition(String),
    /// Invalid `GraphQLEnum` target
    InvalidEnumDefinition(String),
}

impl MacroError {
    /// Convert to a syn::Error
    pub fn to_syn_error(&self, span: Span) -> Error {
        let message = match self {
            MacroError::InvalidObjectDefinition(msg) => {
                format!("Invalid graphql_object definition: {}", msg)
            }
            MacroError::InvalidInputDefinition(msg) => {
                format!("Invalid GraphQLInput definition: {}", msg)
            }
            MacroError::InvalidEnumDefinition(msg) => {
                format!("Invalid GraphQLEnum definition: {}", msg)
            }
        };
        Error::new(span, message)
    }

    /// Convert to compile-time error tokens
    pub fn to_compile_error(&self, span: Span) -> TokenStream {
        self.to_syn_error(span).to_compile_error()
    }
}

/// Result type for macro operations
pub type MacroResult<T> = std::result::Result<T, MacroError>;

/// Only plain structs with named fields can back an object type
pub fn validate_object_struct(item_struct: &syn::ItemStruct) -> MacroResult<()> {
    if !item_struct.generics.params.is_empty() {
        return Err(MacroError::InvalidObjectDefinition(
            "generic structs are not supported".to_string(),
        ));
    }

    match &item_struct.fields {
        syn::Fields::Named(_) => Ok(()),
        syn::Fields::Unnamed(_) => Err(MacroError::InvalidObjectDefinition(
            "tuple structs are not supported".to_string(),
        )),
        syn::Fields::Unit => Err(MacroError::InvalidObjectDefinition(
            "unit structs are not supported".to_string(),
        )),
    }
}

pub fn validate_input_struct(data: &syn::Data) -> MacroResult<&syn::FieldsNamed> {
    match data {
        syn::Data::Struct(syn::DataStruct {
            fields: syn::Fields::Named(fields),
            ..
        }) => Ok(fields),
        _ => Err(MacroError::InvalidInputDefinition(
            "only structs with named fields are supported".to_string(),
        )),
    }
}

pub fn validate_unit_enum(data: &syn::Data) -> MacroResult<Vec<&syn::Variant>> {
    let syn::Data::Enum(data) = data else {
        return Err(MacroError::InvalidEnumDefinition(
            "only enums are supported".to_string(),
        ));
    };

    if let Some(variant) = data
        .variants
        .iter()
        .find(|variant| !matches!(variant.fields, syn::Fields::Unit))
    {
        return Err(MacroError::InvalidEnumDefinition(format!(
            "variant `{}` carries data",
            variant.ident
        )));
    }

    Ok(data.variants.iter().collect())
}
