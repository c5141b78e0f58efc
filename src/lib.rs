//! # gqlb: a fluent GraphQL query builder
//!
//! Builds GraphQL query text from plain Rust calls. A query node carries a
//! name, an optional alias, an ordered list of selected fields and nested
//! nodes, an ordered list of possible-type fragments and an ordered argument
//! map; `build` renders it to a compact string:
//!
//! ```text
//! car(id:"yk8h4vn0",km:2100,imported:true,page:{from:1,to:100}){Name Price Color{Red Green Blue}}
//! ```
//!
//! Fields can be chosen by literal name or through typed selectors generated
//! by `#[graphql_object]`; selectors are checked against the queried type.
//! Nothing here talks to a server: the output is text (or a JSON request
//! body, see [`operation`]).

#![warn(clippy::all)]

extern crate self as gqlb;

pub mod error;
pub mod naming;
pub mod value;
pub mod bag;
pub mod schema;
pub mod resolver;
pub mod query;
pub mod collection;
pub mod serializer;
pub mod operation;
pub mod config;

// Re-export procedural macros from gqlb-macros crate
pub use gqlb_macros::*;

pub use error::{QueryError, QueryResult};
pub use naming::{camel_case, pascal_case, Formatter, NamingStrategy, QueryOptions};
pub use value::{FromValue, Object, Record, ToObject, ToValue, Value};
pub use bag::Bag;
pub use schema::{Access, BagBacked, Collection, Field, FieldDescriptor, Schema, Untyped};
pub use query::{Query, QueryNode, Selection};
pub use collection::CollectionQuery;
pub use serializer::QuerySerializer;
pub use operation::{GraphQLRequest, Operation, OperationType};
pub use config::{BuilderConfig, NamingConvention};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
