//! gqlb Procedural Macros
//!
//! This crate turns plain Rust declarations into types the query builder
//! understands:
//!
//! - `#[graphql_object]` rewrites a struct into a bag-backed schema type with
//!   typed accessors and a selector table
//! - `#[derive(GraphQLInput)]` renders a struct as an input object argument
//! - `#[derive(GraphQLEnum)]` renders unit variants as bare enum symbols

use proc_macro::TokenStream;

mod utils;
mod error;
mod parsing;
mod codegen;

use codegen::*;

/// Declare a schema-shaped object type
///
/// The struct's fields become entries of a `Bag`; each one gets a getter, a
/// setter, a builder-style `with_` method and a selector in the generated
/// `<Type>Fields` table.
///
/// # Examples
///
/// ```rust,ignore
/// use gqlb::{graphql_object, Query};
///
/// #[graphql_object(name = "Car", extends = Product)]
/// pub struct Car {
///     #[graphql(name = "Name")]
///     name: String,
///     price: f64,
///     color: Color,
/// }
///
/// let query = Query::<Car>::new("car")?
///     .add_field_by(|car| car.name)?
///     .add_sub_field(|car| car.color, |color| color.add_field_by(|c| c.red))?;
/// ```
#[proc_macro_attribute]
pub fn graphql_object(args: TokenStream, input: TokenStream) -> TokenStream {
    graphql_object_impl(args, input)
}

/// Render a struct as an input object argument
///
/// `None` fields are left out of the rendered object.
#[proc_macro_derive(GraphQLInput, attributes(graphql))]
pub fn derive_graphql_input(input: TokenStream) -> TokenStream {
    graphql_input_impl(input)
}

/// Render a unit-variant enum as bare enum symbols
#[proc_macro_derive(GraphQLEnum, attributes(graphql))]
pub fn derive_graphql_enum(input: TokenStream) -> TokenStream {
    graphql_enum_impl(input)
}
