//! Utility functions for macro implementation

use quote::format_ident;
use syn::ext::IdentExt;
use syn::Ident;

/// Declared name of a Rust identifier, without any `r#` prefix
pub fn declared_name(ident: &Ident) -> String {
    ident.unraw().to_string()
}

pub fn setter_ident(ident: &Ident) -> Ident {
    format_ident!("set_{}", ident.unraw())
}

pub fn with_ident(ident: &Ident) -> Ident {
    format_ident!("with_{}", ident.unraw())
}

/// `Car` -> `CarFields`
pub fn fields_ident(ident: &Ident) -> Ident {
    format_ident!("{}Fields", ident.unraw())
}
