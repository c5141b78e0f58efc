/// Operation envelope
///
/// `Query::build` renders a single selection level without any outer
/// envelope. `Operation` wraps one or more root nodes into a complete
/// document (`query Name{root1 root2}`) and produces the JSON request body a
/// GraphQL endpoint expects.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::collection::CollectionQuery;
use crate::error::{QueryError, QueryResult};
use crate::query::{Query, QueryNode};
use crate::schema::{BagBacked, Schema};

/// Kind of operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    #[default]
    Query,
    Mutation,
    Subscription,
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationType::Query => write!(f, "query"),
            OperationType::Mutation => write!(f, "mutation"),
            OperationType::Subscription => write!(f, "subscription"),
        }
    }
}

/// JSON body of a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub variables: Map<String, JsonValue>,
}

impl GraphQLRequest {
    pub fn to_json(&self) -> QueryResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A document made of one operation over one or more root nodes
#[derive(Debug, Clone, Default)]
pub struct Operation {
    operation_type: OperationType,
    name: Option<String>,
    /// `(name, type)` declarations in order
    declarations: Vec<(String, String)>,
    variables: Map<String, JsonValue>,
    roots: Vec<QueryNode>,
}

impl Operation {
    pub fn new(operation_type: OperationType) -> Self {
        Self {
            operation_type,
            name: None,
            declarations: Vec::new(),
            variables: Map::new(),
            roots: Vec::new(),
        }
    }

    pub fn query() -> Self {
        Self::new(OperationType::Query)
    }

    pub fn mutation() -> Self {
        Self::new(OperationType::Mutation)
    }

    pub fn subscription() -> Self {
        Self::new(OperationType::Subscription)
    }

    pub fn named(mut self, name: impl Into<String>) -> QueryResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(QueryError::invalid_name("operation name must not be empty"));
        }
        self.name = Some(name);
        Ok(self)
    }

    /// Declare `$name: type_name` and bind its value in the request
    ///
    /// Arguments refer to it through `Value::variable(name)`.
    pub fn variable(
        mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
        value: impl Serialize,
    ) -> QueryResult<Self> {
        let name = name.into();
        let type_name = type_name.into();
        if name.trim().is_empty() || type_name.trim().is_empty() {
            return Err(QueryError::invalid_name("variable name and type must not be empty"));
        }

        let value = serde_json::to_value(value)?;
        match self.declarations.iter_mut().find(|(declared, _)| *declared == name) {
            Some(declaration) => declaration.1 = type_name,
            None => self.declarations.push((name.clone(), type_name)),
        }
        self.variables.insert(name, value);
        Ok(self)
    }

    pub fn add_root(mut self, root: impl Into<QueryNode>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn operation_type(&self) -> OperationType {
        self.operation_type
    }

    pub fn roots(&self) -> &[QueryNode] {
        &self.roots
    }

    /// Render the full document
    pub fn build(&self) -> QueryResult<String> {
        let roots = self
            .roots
            .iter()
            .map(QueryNode::build)
            .collect::<QueryResult<Vec<_>>>()?;

        let mut text = self.operation_type.to_string();
        if let Some(name) = &self.name {
            text.push(' ');
            text.push_str(name);
        }
        if !self.declarations.is_empty() {
            let declarations: Vec<String> = self
                .declarations
                .iter()
                .map(|(name, type_name)| format!("${}:{}", name, type_name))
                .collect();
            text.push('(');
            text.push_str(&declarations.join(","));
            text.push(')');
        }
        text.push('{');
        text.push_str(&roots.join(" "));
        text.push('}');

        Ok(text)
    }

    pub fn to_request(&self) -> QueryResult<GraphQLRequest> {
        Ok(GraphQLRequest {
            query: self.build()?,
            operation_name: self.name.clone(),
            variables: self.variables.clone(),
        })
    }
}

impl<T: Schema> From<Query<T>> for QueryNode {
    fn from(query: Query<T>) -> Self {
        query.into_node()
    }
}

impl<T: BagBacked> From<CollectionQuery<T>> for QueryNode {
    fn from(query: CollectionQuery<T>) -> Self {
        query.into_query().into_node()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bag::Bag;
    use crate::schema::Untyped;
    use crate::value::Value;

    #[test]
    fn test_anonymous_query() {
        let car = Query::<Untyped>::new("car").unwrap().add_field("name");
        let operation = Operation::query().add_root(car);
        assert_eq!(operation.build().unwrap(), "query{car{name}}");
    }

    #[test]
    fn test_named_mutation_with_two_roots() {
        let create = Query::<Untyped>::new("createCar")
            .unwrap()
            .add_argument("name", "Bee")
            .add_field("id");
        let list = CollectionQuery::<Bag>::new("cars").unwrap().add_field("id");

        let operation = Operation::mutation()
            .named("CreateCar")
            .unwrap()
            .add_root(create)
            .add_root(list);

        assert_eq!(
            operation.build().unwrap(),
            "mutation CreateCar{createCar(name:\"Bee\"){id} cars{id}}"
        );
    }

    #[test]
    fn test_request_body() {
        let operation = Operation::query()
            .named("Ping")
            .unwrap()
            .add_root(Query::<Untyped>::new("ping").unwrap());

        let request = operation.to_request().unwrap();
        assert_eq!(
            request.to_json().unwrap(),
            r#"{"query":"query Ping{ping}","operationName":"Ping"}"#
        );

        let anonymous = Operation::query().add_root(Query::<Untyped>::new("ping").unwrap());
        assert_eq!(
            anonymous.to_request().unwrap().to_json().unwrap(),
            r#"{"query":"query{ping}"}"#
        );
    }

    #[test]
    fn test_variables() {
        let car = Query::<Untyped>::new("car")
            .unwrap()
            .add_argument("id", Value::variable("id"))
            .add_field("name");

        let operation = Operation::query()
            .named("GetCar")
            .unwrap()
            .variable("id", "ID!", "x1")
            .unwrap()
            .variable("km", "Int", 2100)
            .unwrap()
            .add_root(car);

        assert_eq!(
            operation.build().unwrap(),
            "query GetCar($id:ID!,$km:Int){car(id:$id){name}}"
        );

        let request = operation.to_request().unwrap();
        assert_eq!(request.variables["id"], serde_json::json!("x1"));
        assert_eq!(
            request.to_json().unwrap(),
            r#"{"query":"query GetCar($id:ID!,$km:Int){car(id:$id){name}}","operationName":"GetCar","variables":{"id":"x1","km":2100}}"#
        );
    }

    #[test]
    fn test_operation_name_required() {
        assert!(matches!(Operation::query().named(" "), Err(QueryError::InvalidName(_))));
    }
}
