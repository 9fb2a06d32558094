use ruledef::{
    ErrorClass,
    core::{
        aggregate::{AggregationAction, AggregatorKind, GroupByAggregatorFactory},
        obs::{ObsEvent, with_sink},
        rule::AggregateError,
    },
    prelude::*,
};
use std::{cell::RefCell, rc::Rc};

struct Order;

impl FactType for Order {
    const TYPE_NAME: &'static str = "Order";
}

fn order(id: u64, category: &str, amount: i64) -> Fact {
    Fact::new(
        id,
        Value::record([
            ("category", Value::from(category)),
            ("amount", Value::from(amount)),
        ]),
    )
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn orders_by_category_end_to_end() {
    init_tracing();

    let mut rule = Scope::root("OrdersByCategory");
    rule.declare(DataType::named("Customer"), Some("customer"))
        .expect("declaration");

    let mut builder = AggregateBuilder::new(
        DataType::group(DataType::named("Text"), Order::data_type()),
        &rule,
    );
    builder
        .group_by(Selector::field("category"), Selector::Identity)
        .expect("group-by strategy")
        .pattern(Order::data_type(), Some("o"))
        .expect("source pattern")
        .condition(Condition::gt("amount", 0));

    let element = builder.build().expect("complete builder");

    assert_eq!(element.declarations().names(), vec!["customer", "o"]);
    assert_eq!(element.result_type().to_string(), "Group<Text, Order>");
    assert!(
        element
            .factory()
            .as_any()
            .downcast_ref::<GroupByAggregatorFactory>()
            .is_some()
    );

    let mut aggregator = element.factory().create();
    let results = aggregator.add(&[order(1, "books", 10), order(2, "books", 3)]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].action, AggregationAction::Added);
}

#[test]
fn incomplete_builder_is_a_configuration_error() {
    let rule = Scope::root("Incomplete");
    let mut builder = AggregateBuilder::new(DataType::list(Order::data_type()), &rule);
    builder.pattern(Order::data_type(), None).expect("source pattern");

    let err = builder.build().unwrap_err();

    assert_eq!(err.class(), ErrorClass::Configuration);
    assert!(matches!(
        err,
        ruledef::Error::Aggregate(AggregateError::MissingFactory)
    ));
}

#[test]
fn custom_sink_observes_strategy_selection() {
    #[derive(Default)]
    struct Kinds(RefCell<Vec<AggregatorKind>>);

    impl ruledef::core::obs::EventSink for Kinds {
        fn record(&self, event: &ObsEvent) {
            if let ObsEvent::StrategySelected { kind, .. } = event {
                self.0.borrow_mut().push(*kind);
            }
        }
    }

    let sink = Rc::new(Kinds::default());
    let rule = Scope::root("Observed");

    with_sink(sink.clone(), || {
        let mut builder = AggregateBuilder::new(DataType::list(Order::data_type()), &rule);
        builder.collect(Order::data_type()).expect("collect strategy");
        builder.project(Selector::field("amount")).expect("projection strategy");
    });

    assert_eq!(
        *sink.0.borrow(),
        vec![AggregatorKind::Collection, AggregatorKind::Projection]
    );
}

#[test]
fn config_file_drives_overwrite_policy() {
    let config = BuilderConfig::from_toml_str(
        r#"
        [aggregate]
        factory_overwrite = "reject"
        "#,
    )
    .expect("config should parse");
    let rule = Scope::root("Strict");

    let mut builder =
        AggregateBuilder::new(DataType::list(Order::data_type()), &rule).with_config(config);
    builder.collect(Order::data_type()).expect("collect strategy");
    let err = builder
        .aggregator_type(&TypeDescriptor::collection(Order::data_type()))
        .unwrap_err();

    assert_eq!(err.class(), ErrorClass::Structural);
}
