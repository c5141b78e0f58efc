/// Field/property resolver
///
/// Turns a typed selector into the `FieldDescriptor` of the member it names,
/// checking that it is a direct property access and that the member belongs
/// to the queried type.

use crate::error::{QueryError, QueryResult};
use crate::schema::{Access, Field, FieldDescriptor, Schema};

/// Resolve a selector against the owner type `O`
pub fn resolve<O, D, P>(field: &Field<D, P>) -> QueryResult<FieldDescriptor>
where
    O: Schema,
    D: Schema,
{
    let selector = format!("{}.{}", D::TYPE_NAME, field.name());

    match field.access() {
        Access::Property => {}
        Access::Indexed(index) => {
            return Err(QueryError::invalid_selector(
                format!("{}.{}[{}]", D::TYPE_NAME, field.name(), index),
                "indexing is not a direct member access",
            ));
        }
        Access::Chained(through) => {
            return Err(QueryError::invalid_selector(
                format!("{}.{}.{}", D::TYPE_NAME, through, field.name()),
                "chained access is not a direct member access",
            ));
        }
        Access::Method => {
            return Err(QueryError::invalid_selector(selector, "member is not a property"));
        }
    }

    if !O::is_assignable_to::<D>() {
        return Err(QueryError::OwnerTypeMismatch {
            selector,
            owner: O::TYPE_NAME,
            declaring: D::TYPE_NAME,
        });
    }

    Ok(FieldDescriptor::new(field.name(), D::TYPE_NAME))
}
