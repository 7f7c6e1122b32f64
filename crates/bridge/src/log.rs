use std::fmt::Display;

use fgbridge_telemetry::Verbosity;
use tracing::{debug, error, trace, warn};

use crate::log_gate::LogGate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Severity {
    Error,
    Warn,
    Debug,
    DebugExt,
}

/// Bridge log lines: `[context] message`, filtered by verbosity and then by the [`LogGate`].
///
/// Lines dropped by verbosity never reach the gate, so they can't break up a run of repeats.
#[derive(Debug, Default)]
pub struct BridgeLog {
    verbosity: Verbosity,
    gate: LogGate,
}

impl BridgeLog {
    pub const fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            gate: LogGate::new(),
        }
    }

    pub fn error(&mut self, context: &str, message: impl Display) {
        self.emit(Severity::Error, context, message);
    }

    pub fn warn(&mut self, context: &str, message: impl Display) {
        self.emit(Severity::Warn, context, message);
    }

    pub fn debug(&mut self, context: &str, message: impl Display) {
        self.emit(Severity::Debug, context, message);
    }

    pub fn debug_ext(&mut self, context: &str, message: impl Display) {
        self.emit(Severity::DebugExt, context, message);
    }

    /// Forgets suppression state, e.g. after the bridge is re-initialized.
    pub fn reset(&mut self) {
        self.gate.reset();
    }

    fn enabled(&self, severity: Severity) -> bool {
        match severity {
            Severity::Error => true,
            Severity::Warn | Severity::Debug => self.verbosity.debug(),
            Severity::DebugExt => self.verbosity.debug_ext(),
        }
    }

    fn emit(&mut self, severity: Severity, context: &str, message: impl Display) {
        if !self.enabled(severity) {
            return;
        }

        let line = format!("[{context}] {message}");
        if !self.gate.should_log(&line) {
            return;
        }

        match severity {
            Severity::Error => error!("{line}"),
            Severity::Warn => warn!("{line}"),
            Severity::Debug => debug!("{line}"),
            Severity::DebugExt => trace!("{line}"),
        }
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::{
        fmt::Debug,
        sync::{Arc, Mutex},
    };

    use fgbridge_telemetry::Verbosity;
    use tracing::{
        field::{Field, Visit},
        Event, Level, Subscriber,
    };
    use tracing_subscriber::{layer::Context, prelude::*, Layer};

    use super::BridgeLog;

    /// Collects emitted events as `(level, message)`.
    #[derive(Clone, Default)]
    pub(crate) struct CapturedLogs(Arc<Mutex<Vec<(Level, String)>>>);

    impl CapturedLogs {
        pub(crate) fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<(Level, String)>) {
            let logs = CapturedLogs::default();
            let subscriber = tracing_subscriber::registry().with(logs.clone());
            let result = tracing::subscriber::with_default(subscriber, f);

            let lines = logs.0.lock().unwrap().clone();
            (result, lines)
        }
    }

    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    impl<S: Subscriber> Layer<S> for CapturedLogs {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.0
                .lock()
                .unwrap()
                .push((*event.metadata().level(), visitor.0));
        }
    }

    pub(crate) fn errors(lines: &[(Level, String)]) -> Vec<&str> {
        lines
            .iter()
            .filter(|(level, _)| *level == Level::ERROR)
            .map(|(_, line)| line.as_str())
            .collect()
    }

    #[test]
    fn quiet_only_emits_errors() {
        let ((), lines) = CapturedLogs::capture(|| {
            let mut log = BridgeLog::new(Verbosity::Quiet);
            log.debug("op", "called");
            log.warn("op", "odd");
            log.debug_ext("op", "details");
            log.error("op", "broken");
        });

        assert_eq!(vec![(Level::ERROR, "[op] broken".to_string())], lines);
    }

    #[test]
    fn extended_debug_emits_everything() {
        let ((), lines) = CapturedLogs::capture(|| {
            let mut log = BridgeLog::new(Verbosity::DebugExt);
            log.debug("op", "called");
            log.debug_ext("op", "details");
        });

        assert_eq!(
            vec![
                (Level::DEBUG, "[op] called".to_string()),
                (Level::TRACE, "[op] details".to_string()),
            ],
            lines
        );
    }

    #[test]
    fn repeated_errors_are_gated() {
        let ((), lines) = CapturedLogs::capture(|| {
            let mut log = BridgeLog::new(Verbosity::Quiet);
            for _ in 0..10 {
                log.error("op", "native library is not bound");
            }
        });

        assert_eq!(2, lines.len());
    }

    #[test]
    fn filtered_lines_do_not_break_a_run() {
        let ((), lines) = CapturedLogs::capture(|| {
            let mut log = BridgeLog::new(Verbosity::Quiet);
            for _ in 0..5 {
                log.error("op", "failed");
                log.debug("op", "called");
            }
        });

        assert_eq!(2, lines.len());
    }
}
