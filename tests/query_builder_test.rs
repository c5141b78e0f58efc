//! End-to-end tests for the query builder over macro-generated schema types

use gqlb::*;
use pretty_assertions::assert_eq;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[graphql_object]
struct Product {
    #[graphql(name = "Id")]
    id: String,
}

#[graphql_object(extends = Product)]
struct Car {
    #[graphql(name = "Name")]
    name: String,
    #[graphql(name = "Price")]
    price: f64,
    #[graphql(name = "Color")]
    color: Color,
    #[graphql(name = "Wheels")]
    wheels: Vec<Wheel>,
}

#[graphql_object(extends = Car)]
struct Truck {
    #[graphql(name = "Payload")]
    payload: i32,
}

#[graphql_object]
struct Color {
    #[graphql(name = "Red")]
    red: i32,
    #[graphql(name = "Green")]
    green: i32,
    #[graphql(name = "Blue")]
    blue: i32,
}

#[graphql_object]
struct Wheel {
    #[graphql(name = "Size")]
    size: i32,
}

#[derive(GraphQLInput)]
struct Page {
    to: i32,
    from: i32,
    cursor: Option<String>,
}

#[derive(GraphQLEnum, Debug, Clone, Copy, PartialEq)]
enum Fuel {
    #[graphql(name = "PETROL")]
    Petrol,
    Diesel,
}

#[test]
fn test_car_query_with_arguments() {
    init_tracing();

    let query = Query::<Car>::new("car")
        .unwrap()
        .add_argument("id", "yk8h4vn0")
        .add_argument("km", 2100)
        .add_argument("imported", true)
        .add_argument("page", Page { to: 100, from: 1, cursor: None })
        .add_field_by(|car| car.name)
        .unwrap()
        .add_field_by(|car| car.price)
        .unwrap()
        .add_sub_field(
            |car| car.color,
            |color| {
                color
                    .add_field_by(|c| c.red)?
                    .add_field_by(|c| c.green)?
                    .add_field_by(|c| c.blue)
            },
        )
        .unwrap();

    assert_eq!(
        query.build().unwrap(),
        "car(id:\"yk8h4vn0\",km:2100,imported:true,page:{from:1,to:100}){Name Price Color{Red Green Blue}}"
    );
}

#[test]
fn test_alias() {
    let query = Query::<Car>::new("car")
        .unwrap()
        .alias("a")
        .unwrap()
        .add_argument("id", "x1")
        .add_field_by(|car| car.name)
        .unwrap()
        .add_field_by(|car| car.price)
        .unwrap();

    assert_eq!(query.build().unwrap(), "a:car(id:\"x1\"){Name Price}");
}

#[test]
fn test_inherited_member_selector() {
    let query = Query::<Car>::new("car")
        .unwrap()
        .add_field_by(|car| car.id)
        .unwrap();

    assert_eq!(query.build().unwrap(), "car{Id}");
}

#[test]
fn test_members_inherited_through_two_levels() {
    let query = Query::<Truck>::new("truck")
        .unwrap()
        .add_field_by(|truck| truck.id)
        .unwrap()
        .add_field_by(|truck| truck.name)
        .unwrap()
        .add_field_by(|truck| truck.payload)
        .unwrap();

    assert_eq!(query.build().unwrap(), "truck{Id Name Payload}");

    // assignability only runs towards supertypes
    let err = Query::<Product>::new("product")
        .unwrap()
        .add_field_by(|_| Truck::fields().payload)
        .unwrap_err();
    assert!(matches!(
        err,
        QueryError::OwnerTypeMismatch { owner: "Product", declaring: "Truck", .. }
    ));
}

#[test]
fn test_collection_field() {
    let query = Query::<Car>::new("car")
        .unwrap()
        .add_collection_field(|car| car.wheels, |wheel| wheel.add_field_by(|w| w.size))
        .unwrap();

    let node = query.select_list()[0].as_node().unwrap();
    assert_eq!(node.name(), "Wheels");
    assert_eq!(node.type_name(), "Wheel");
    assert_eq!(query.build().unwrap(), "car{Wheels{Size}}");
}

#[test]
fn test_typed_possible_type() {
    let query = Query::<Product>::new("products")
        .unwrap()
        .add_field_by(|p| p.id)
        .unwrap()
        .add_possible_type_with::<Car, _>(|car| car.add_field_by(|c| c.name))
        .unwrap();

    assert_eq!(query.build().unwrap(), "products{Id ... on Car{Name}}");
}

#[test]
fn test_selector_errors() {
    init_tracing();

    let car = || Query::<Car>::new("car").unwrap();

    let err = car().add_field_by(|c| c.wheels.at(0)).unwrap_err();
    assert!(matches!(err, QueryError::InvalidSelector { .. }));

    let err = car()
        .add_field_by(|c| c.color.then(Color::fields().red))
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidSelector { .. }));

    let err = car()
        .add_field_by(|_| Field::<Car, String>::method("DisplayName"))
        .unwrap_err();
    assert!(matches!(err, QueryError::InvalidSelector { .. }));

    let err = Query::<Color>::new("color")
        .unwrap()
        .add_field_by(|_| Car::fields().name)
        .unwrap_err();
    assert!(matches!(
        err,
        QueryError::OwnerTypeMismatch { owner: "Color", declaring: "Car", .. }
    ));
}

#[test]
fn test_naming_strategy_applies_to_children() {
    let query = Query::<Car>::with_options("car", QueryOptions::camel_case())
        .unwrap()
        .add_field_by(|car| car.name)
        .unwrap()
        .add_sub_field(|car| car.color, |color| color.add_field_by(|c| c.red))
        .unwrap();

    assert_eq!(query.build().unwrap(), "car{name color{red}}");
}

#[test]
fn test_formatter_sees_owner() {
    let options = QueryOptions::new().with_formatter(|field| format!("{}{}", field.owner, field.name));
    let query = Query::<Car>::with_options("car", options)
        .unwrap()
        .add_field_by(|car| car.id)
        .unwrap()
        .add_field_by(|car| car.name)
        .unwrap();

    assert_eq!(query.build().unwrap(), "car{ProductId CarName}");
}

#[test]
fn test_arguments_from_objects() {
    let page = Page { to: 100, from: 1, cursor: None };
    let query = Query::<Untyped>::new("cars")
        .unwrap()
        .add_arguments_from(&page)
        .add_field("id");
    assert_eq!(query.build().unwrap(), "cars(to:100,from:1){id}");

    let filter = Bag::new().with("to", 100).with("from", 1);
    let query = Query::<Untyped>::new("cars")
        .unwrap()
        .add_argument("filter", filter)
        .add_argument("page", page);
    assert_eq!(query.build().unwrap(), "cars(filter:{to:100,from:1},page:{from:1,to:100})");
}

#[test]
fn test_all_absent_arguments_suppressed() {
    let query = Query::<Car>::new("car")
        .unwrap()
        .add_argument("id", None::<String>)
        .add_field_by(|car| car.name)
        .unwrap();

    assert_eq!(query.build().unwrap(), "car{Name}");
}

#[test]
fn test_enum_arguments() {
    let query = Query::<Untyped>::new("cars")
        .unwrap()
        .add_argument("fuel", Fuel::Petrol)
        .add_argument("fallback", Fuel::Diesel)
        .add_argument("any", vec![Fuel::Petrol, Fuel::Diesel]);

    assert_eq!(query.build().unwrap(), "cars(fuel:PETROL,fallback:Diesel,any:[PETROL,Diesel])");
}

#[test]
fn test_generated_accessors() {
    let mut car = Car::new()
        .with_name("Bee".to_string())
        .with_price(10.5)
        .with_color(Color::new().with_red(255));
    car.set_wheels(vec![Wheel::new().with_size(17)]);

    assert_eq!(car.name().unwrap(), Some("Bee".to_string()));
    assert_eq!(car.price().unwrap(), Some(10.5));
    assert_eq!(car.color().unwrap().unwrap().red().unwrap(), Some(255));
    assert_eq!(car.wheels().unwrap().unwrap()[0].size().unwrap(), Some(17));

    assert_eq!(car.bag().keys().collect::<Vec<_>>(), vec!["Name", "Price", "Color", "Wheels"]);

    car.bag_mut().set("Name", 3);
    assert!(matches!(car.name(), Err(QueryError::TypeMismatch { .. })));
}

#[test]
fn test_bag_backed_argument() {
    let color = Color::new().with_red(1).with_green(2);
    let query = Query::<Untyped>::with_options("paint", QueryOptions::camel_case())
        .unwrap()
        .add_argument("color", &color)
        .add_arguments_from(&color);

    assert_eq!(query.build().unwrap(), "paint(color:{red:1,green:2},red:1,green:2)");
}

#[test]
fn test_enum_read_back() {
    let bag = Bag::new().with("fuel", Fuel::Petrol).with("name", "Diesel");
    assert_eq!(bag.get_property::<Fuel>("fuel").unwrap(), Some(Fuel::Petrol));
    assert_eq!(bag.get_property::<Fuel>("name").unwrap(), Some(Fuel::Diesel));
}

#[test]
fn test_operation_over_typed_roots() {
    let car = Query::<Car>::new("car")
        .unwrap()
        .add_argument("id", "x1")
        .add_field_by(|car| car.name)
        .unwrap();

    let request = Operation::query()
        .named("GetCar")
        .unwrap()
        .add_root(car)
        .to_request()
        .unwrap();

    assert_eq!(request.query, "query GetCar{car(id:\"x1\"){Name}}");
    assert_eq!(request.operation_name.as_deref(), Some("GetCar"));
}

#[test]
fn test_options_from_config() {
    let options = BuilderConfig::from_toml_str("naming = \"camel_case\"")
        .unwrap()
        .into_options();

    let query = Query::<Car>::with_options("car", options)
        .unwrap()
        .add_field_by(|car| car.price)
        .unwrap();

    assert_eq!(query.build().unwrap(), "car{price}");
}
