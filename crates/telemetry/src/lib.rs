use std::{fs::OpenOptions, io, path::Path};

use tracing::dispatcher::SetGlobalDefaultError;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    prelude::*,
    EnvFilter,
};

/// How much the bridge logs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Errors only.
    #[default]
    Quiet,
    /// Adds warnings and debug lines.
    Debug,
    /// Adds extended debug lines on top of [`Verbosity::Debug`].
    DebugExt,
}

impl Verbosity {
    pub fn from_flags(debug: bool, debug_ext: bool) -> Self {
        match (debug, debug_ext) {
            (_, true) => Verbosity::DebugExt,
            (true, false) => Verbosity::Debug,
            (false, false) => Verbosity::Quiet,
        }
    }

    /// The default filter directive for this verbosity.
    pub const fn directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Debug => "debug",
            Verbosity::DebugExt => "trace",
        }
    }

    pub const fn debug(self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    pub const fn debug_ext(self) -> bool {
        matches!(self, Verbosity::DebugExt)
    }
}

#[derive(Default)]
pub struct TelemetryConfig {
    verbosity: Verbosity,
    console_writer: Option<BoxMakeWriter>,
    file_writer: Option<BoxMakeWriter>,
    file_worker: Option<WorkerGuard>,
}

impl TelemetryConfig {
    pub fn verbosity(self, verbosity: Verbosity) -> Self {
        Self { verbosity, ..self }
    }

    pub fn with_console_writer<W>(self, writer: W) -> Self
    where
        W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
    {
        Self {
            console_writer: Some(BoxMakeWriter::new(writer)),
            ..self
        }
    }

    /// Appends log lines to the file at `path` through a non-blocking writer.
    pub fn with_log_file(self, path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let (writer, guard) = tracing_appender::non_blocking(file);

        Ok(Self {
            file_writer: Some(BoxMakeWriter::new(writer)),
            file_worker: Some(guard),
            ..self
        })
    }
}

/// Keeps buffered log output flowing until dropped.
#[must_use]
pub struct TelemetryGuard {
    _file_worker: Option<WorkerGuard>,
}

/// Builds the filter for `verbosity`, letting `RUST_LOG` take precedence when it is set.
pub fn filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()))
}

/// Installs the global subscriber.
///
/// Fails if another subscriber is already installed, which happens when the host process
/// ships its own `tracing` setup or the bridge is loaded twice.
pub fn install(config: TelemetryConfig) -> Result<TelemetryGuard, SetGlobalDefaultError> {
    let TelemetryConfig {
        verbosity,
        console_writer,
        file_writer,
        file_worker,
    } = config;

    let subscriber = tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(filter(verbosity))
        .with(file_writer.map(|file_writer| {
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(file_writer)
        }))
        .with(console_writer.map(|writer| {
            fmt::layer()
                .compact()
                .with_ansi(true)
                .without_time()
                .with_target(false)
                .with_writer(writer)
        }));

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(TelemetryGuard {
        _file_worker: file_worker,
    })
}

#[cfg(test)]
mod test {
    use super::Verbosity;

    #[test]
    fn extended_debug_implies_debug() {
        let verbosity = Verbosity::from_flags(false, true);

        assert_eq!(Verbosity::DebugExt, verbosity);
        assert!(verbosity.debug());
        assert!(verbosity.debug_ext());
    }

    #[test]
    fn no_flags_is_quiet() {
        let verbosity = Verbosity::from_flags(false, false);

        assert_eq!(Verbosity::Quiet, verbosity);
        assert_eq!("error", verbosity.directive());
        assert!(!verbosity.debug());
    }

    #[test]
    fn levels_are_ordered() {
        assert!(Verbosity::Quiet < Verbosity::Debug);
        assert!(Verbosity::Debug < Verbosity::DebugExt);
        assert_eq!("debug", Verbosity::from_flags(true, false).directive());
    }
}
