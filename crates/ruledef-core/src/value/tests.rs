use super::*;

#[test]
fn record_fields_are_addressable_by_name() {
    let order = Value::record([("category", Value::from("books")), ("amount", Value::from(42))]);

    assert_eq!(order.field("category"), Some(&Value::Text("books".to_string())));
    assert_eq!(order.field("amount"), Some(&Value::Int(42)));
    assert_eq!(order.field("missing"), None);
}

#[test]
fn field_lookup_on_non_record_is_none() {
    assert_eq!(Value::Int(1).field("x"), None);
    assert_eq!(Value::from_list(vec![1, 2]).field("x"), None);
}

#[test]
fn record_later_pairs_overwrite_earlier_pairs() {
    let value = Value::record([("a", 1), ("a", 2)]);

    assert_eq!(value.field("a"), Some(&Value::Int(2)));
}

#[test]
fn option_conversion_maps_none_to_null() {
    assert!(Value::from(None::<i64>).is_null());
    assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
}

#[test]
fn scalar_classification_excludes_nested_values() {
    assert!(Value::Uint(3).is_scalar());
    assert!(Value::Null.is_scalar());
    assert!(!Value::from_list(vec![1]).is_scalar());
    assert!(!Value::group(Value::Int(1), vec![]).is_scalar());
    assert!(!Value::record([("a", 1)]).is_scalar());
}
