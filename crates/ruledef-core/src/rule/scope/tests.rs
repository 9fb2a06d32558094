use super::*;

fn order() -> DataType {
    DataType::named("Order")
}

#[test]
fn child_scope_sees_parent_declarations_in_order() {
    let mut root = Scope::root("Rule");
    root.declare(DataType::named("Customer"), Some("c")).expect("declaration");
    root.declare(order(), Some("o")).expect("declaration");

    let mut child = root.child("Aggregate");
    child.declare(order(), Some("inner")).expect("declaration");

    assert_eq!(child.path(), "Rule/Aggregate");
    assert_eq!(child.visible_declarations().names(), vec!["c", "o", "inner"]);
    assert_eq!(root.visible_declarations().names(), vec!["c", "o"]);
}

#[test]
fn duplicate_visible_name_is_rejected() {
    let mut root = Scope::root("Rule");
    root.declare(order(), Some("o")).expect("declaration");

    let mut child = root.child("Aggregate");
    let err = child.declare(order(), Some("o")).unwrap_err();

    assert_eq!(
        err,
        ScopeError::DuplicateDeclaration {
            name: "o".to_string(),
            scope: "Rule/Aggregate".to_string(),
        }
    );
    assert!(child.own_declarations().is_empty());
}

#[test]
fn empty_name_is_rejected() {
    let mut root = Scope::root("Rule");

    assert_eq!(root.declare(order(), Some("")), Err(ScopeError::EmptyName));
}

#[test]
fn unnamed_declarations_get_unique_generated_names() {
    let mut root = Scope::root("Rule");
    root.declare(order(), Some("$var2$")).expect("declaration");

    let first = root.declare(order(), None).expect("declaration");
    let second = root.declare(order(), None).expect("declaration");

    assert_eq!(first.name(), "$var3$");
    assert_eq!(second.name(), "$var4$");
}

#[test]
fn adopt_skips_already_visible_declarations() {
    let mut root = Scope::root("Rule");
    let o = root.declare(order(), Some("o")).expect("declaration");

    let mut child = root.child("Pattern");
    let local = child.declare(DataType::named("Amount"), Some("amount")).expect("declaration");

    root.adopt(child.visible_declarations());

    assert_eq!(root.visible_declarations().names(), vec!["o", "amount"]);
    assert_eq!(root.lookup("amount"), Some(&local));
    assert_eq!(root.lookup("o"), Some(&o));
}

#[test]
fn full_name_is_scope_qualified() {
    let root = Scope::root("Rule");
    let decl = root.child("Aggregate").declare(order(), Some("o")).expect("declaration");

    assert_eq!(decl.full_name(), "Rule/Aggregate/o");
    assert_eq!(decl.scope(), "Rule/Aggregate");
}
