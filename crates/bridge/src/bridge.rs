use std::fmt::Debug;

use fgbridge_protocol::Operation;

use crate::{
    binding::Binding,
    config::BridgeConfig,
    error::BridgeError,
    log::BridgeLog,
    readiness::{AlwaysReady, HostState, Readiness},
};

const ATTACH: &str = "Attach";
const DETACH: &str = "Detach";

/// Everything one host connection needs: the native binding, the log and the readiness query.
///
/// A bridge starts out unbound. [`Bridge::attach`] binds the configured library and
/// [`Bridge::detach`] releases it again; operations on an unbound bridge fail with a logged
/// error and never reach native code.
pub struct Bridge {
    config: BridgeConfig,
    binding: Binding,
    log: BridgeLog,
    readiness: Box<dyn Readiness>,
}

impl Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("config", &self.config)
            .field("binding", &self.binding)
            .field("log", &self.log)
            .field("readiness", &self.readiness.state())
            .finish()
    }
}

impl Bridge {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            log: BridgeLog::new(config.verbosity()),
            config,
            binding: Binding::Unbound,
            readiness: Box::new(AlwaysReady),
        }
    }

    pub fn with_readiness<R: Readiness + 'static>(mut self, readiness: R) -> Self {
        self.readiness = Box::new(readiness);
        self
    }

    /// Binds the configured library, replacing any previous binding.
    ///
    /// Returns whether the bridge ended up bound. Failures are logged and leave it unbound.
    pub fn attach(&mut self) -> bool {
        match self.binding.bind(&self.config.library) {
            Ok(()) => {
                self.log
                    .debug(ATTACH, format_args!("bound {}", self.config.library));
                true
            }
            Err(error) => {
                self.log.error(ATTACH, &error);
                false
            }
        }
    }

    /// Releases the native library and forgets log suppression state.
    pub fn detach(&mut self) {
        if let Some(library) = self.binding.library() {
            self.log
                .debug(DETACH, format_args!("released {}", library.name()));
            self.binding.unbind();
        }

        self.log.reset();
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_bound()
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    #[cfg(test)]
    pub(crate) fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn log(&mut self) -> &mut BridgeLog {
        &mut self.log
    }

    /// Runs one operation against the binding if the host is ready.
    ///
    /// `None` means the operation failed and the failure was logged under the operation's name.
    pub(crate) fn run<T, F>(&mut self, operation: Operation, call: F) -> Option<T>
    where
        T: Debug,
        F: FnOnce(&Binding) -> Result<T, BridgeError>,
    {
        let context = operation.script_name();
        self.log.debug(context, "called");

        let state = self.readiness.state();
        if state != HostState::Ready {
            self.log.warn(
                context,
                format_args!("{} ({state})", BridgeError::HostNotReady),
            );
            return None;
        }

        match call(&self.binding) {
            Ok(value) => {
                self.log.debug_ext(context, format_args!("returned {value:?}"));
                Some(value)
            }
            Err(error) => {
                self.log.error(context, &error);
                None
            }
        }
    }
}
