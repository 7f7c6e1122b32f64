// The process-wide lifecycle as a host drives it. Kept to a single test since the attached
// bridge is shared by the whole test binary.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use fgbridge::{host, AlwaysReady, ArgsFrame, BridgeConfig, Operation, ScriptValue};
use fgbridge_protocol::ScriptFunction;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{layer::Context, prelude::*, Layer};

/// Counts error events.
#[derive(Clone, Default)]
struct ErrorCount(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for ErrorCount {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }
}

fn errors_while(f: impl FnOnce()) -> usize {
    let count = ErrorCount::default();
    let subscriber = tracing_subscriber::registry().with(count.clone());
    tracing::subscriber::with_default(subscriber, f);

    count.0.load(Ordering::Relaxed)
}

fn invoke(operation: Operation, args: Vec<ScriptValue>) -> ScriptValue {
    let mut frame = ArgsFrame::new(args);
    let value = host::invoke(operation, &mut frame);
    assert!(frame.is_finished());
    value
}

#[test]
fn load_register_invoke_unload() {
    assert!(!host::is_loaded());
    assert_eq!(
        ScriptValue::Bool(false),
        invoke(Operation::ToggleFrameGenerationState, vec![])
    );

    let config = BridgeConfig {
        library: "fgbridge-missing-library-for-tests.dll".to_string(),
        ..Default::default()
    };
    assert!(!host::load_with(config, AlwaysReady));
    assert!(host::is_loaded());
    assert_eq!(Some(false), host::with_attached(|bridge| bridge.is_bound()));

    let mut functions: Vec<ScriptFunction> = Vec::new();
    host::post_register_types(&mut functions);
    assert_eq!(8, functions.len());

    assert_eq!(
        ScriptValue::String(host::query().version.to_string()),
        invoke(Operation::GetVersionAsString, vec![])
    );
    assert_eq!(
        ScriptValue::Int32(-1),
        invoke(Operation::GetFrameGenerationMode, vec![])
    );
    assert_eq!(
        ScriptValue::Bool(false),
        invoke(Operation::SetFrameGenerationMode, vec![ScriptValue::Int32(1)])
    );

    host::unload();
    host::unload();
    assert!(!host::is_loaded());

    let mut frame = ArgsFrame::default();
    assert_eq!(
        ScriptValue::String("Unknown".to_string()),
        host::invoke(Operation::GetVersionAsString, &mut frame)
    );
    assert!(frame.is_finished());

    let errors = errors_while(|| {
        for _ in 0..100 {
            assert_eq!(
                ScriptValue::Int32(-1),
                invoke(Operation::GetFrameGenerationMode, vec![])
            );
        }
    });
    assert_eq!(2, errors);
}
