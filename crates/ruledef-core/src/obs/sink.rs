//! Event sink boundary.
//!
//! Builder logic MUST NOT depend on a concrete sink.
//! All instrumentation flows through `ObsEvent` and `EventSink`.
use crate::{aggregate::AggregatorKind, types::DataType};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn EventSink>>> = RefCell::new(None);
}

///
/// ObsEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ObsEvent {
    StrategySelected {
        scope: String,
        kind: AggregatorKind,
        name: String,
        replaced: bool,
    },
    StrategyRejected {
        scope: String,
        name: String,
        reason: &'static str,
    },
    SourceDeclared {
        scope: String,
        declaration: String,
        ty: DataType,
    },
    PatternBuilt {
        scope: String,
        declaration: String,
        conditions: usize,
    },
    AggregateBuilt {
        scope: String,
        result_type: DataType,
        kind: AggregatorKind,
        declarations: usize,
    },
    BuildRejected {
        scope: String,
        missing_factory: bool,
        missing_source: bool,
    },
}

///
/// EventSink
///

pub trait EventSink {
    fn record(&self, event: &ObsEvent);
}

///
/// TracingSink
///
/// Default sink: forwards every event to `tracing` with structured fields.
/// Rejections log at `warn`, everything else at `debug`.
///

pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &ObsEvent) {
        match event {
            ObsEvent::StrategySelected {
                scope,
                kind,
                name,
                replaced,
            } => {
                tracing::debug!(%scope, %kind, %name, replaced, "aggregation strategy selected");
            }
            ObsEvent::StrategyRejected {
                scope,
                name,
                reason,
            } => {
                tracing::warn!(%scope, %name, reason, "aggregation strategy rejected");
            }
            ObsEvent::SourceDeclared {
                scope,
                declaration,
                ty,
            } => {
                tracing::debug!(%scope, %declaration, %ty, "aggregate source declared");
            }
            ObsEvent::PatternBuilt {
                scope,
                declaration,
                conditions,
            } => {
                tracing::debug!(%scope, %declaration, conditions, "pattern element built");
            }
            ObsEvent::AggregateBuilt {
                scope,
                result_type,
                kind,
                declarations,
            } => {
                tracing::debug!(
                    %scope,
                    %result_type,
                    %kind,
                    declarations,
                    "aggregate element built"
                );
            }
            ObsEvent::BuildRejected {
                scope,
                missing_factory,
                missing_source,
            } => {
                tracing::warn!(
                    %scope,
                    missing_factory,
                    missing_source,
                    "aggregate element build rejected"
                );
            }
        }
    }
}

pub(crate) fn record(event: ObsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(&event),
        None => TracingSink.record(&event),
    }
}

/// Run a closure with a temporary sink override on this thread.
/// The previous sink is restored on every exit, including unwind.
pub fn with_sink<T>(sink: Rc<dyn EventSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn EventSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[derive(Default)]
    struct CountingSink {
        calls: RefCell<usize>,
    }

    impl EventSink for CountingSink {
        fn record(&self, _: &ObsEvent) {
            *self.calls.borrow_mut() += 1;
        }
    }

    fn event() -> ObsEvent {
        ObsEvent::BuildRejected {
            scope: "Rule".to_string(),
            missing_factory: true,
            missing_source: false,
        }
    }

    #[test]
    fn with_sink_routes_and_restores_nested_overrides() {
        let outer = Rc::new(CountingSink::default());
        let inner = Rc::new(CountingSink::default());

        // No override installed yet.
        record(event());
        assert_eq!(*outer.calls.borrow(), 0);

        with_sink(outer.clone(), || {
            record(event());

            with_sink(inner.clone(), || {
                record(event());
            });

            // Inner override was restored to outer override.
            record(event());
        });

        assert_eq!(*outer.calls.borrow(), 2);
        assert_eq!(*inner.calls.borrow(), 1);

        record(event());
        assert_eq!(*outer.calls.borrow(), 2);
    }

    #[test]
    fn with_sink_restores_previous_override_after_panic() {
        let outer = Rc::new(CountingSink::default());
        let inner = Rc::new(CountingSink::default());

        with_sink(outer.clone(), || {
            let result = catch_unwind(AssertUnwindSafe(|| {
                with_sink(inner.clone(), || {
                    record(event());
                    panic!("intentional panic inside sink override");
                });
            }));
            assert!(result.is_err());

            record(event());
        });

        assert_eq!(*inner.calls.borrow(), 1);
        assert_eq!(*outer.calls.borrow(), 1);
    }
}
