use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::WrapErr;
use fgbridge_env::BridgeVars;
use fgbridge_telemetry::Verbosity;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::native::DEFAULT_LIBRARY;

/// Host command-line switch enabling debug logging.
pub const DEBUG_SWITCH: &str = "-deBridgeDebug";

/// Host command-line switch enabling extended debug logging.
pub const DEBUG_EXT_SWITCH: &str = "-deBridgeDebugExt";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BridgeConfig {
    /// Name or path of the native library to bind.
    pub library: String,

    pub debug: bool,

    pub debug_ext: bool,

    /// Append log lines to this file in addition to the host's log.
    pub log_file: Option<PathBuf>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            library: DEFAULT_LIBRARY.to_string(),
            debug: false,
            debug_ext: false,
            log_file: None,
        }
    }
}

impl BridgeConfig {
    /// Resolves the configuration for the current process.
    ///
    /// Layers, later ones winning: defaults, the TOML file named by `FGBRIDGE_CONFIG_FILE`,
    /// `FGBRIDGE_*` environment variables, the process's command-line switches.
    pub fn load() -> eyre::Result<Self> {
        Self::load_with_file(None)
    }

    /// Like [`BridgeConfig::load`], reading `config_file` instead of the file named in the
    /// environment when one is given.
    pub fn load_with_file(config_file: Option<&Path>) -> eyre::Result<Self> {
        let vars: BridgeVars = fgbridge_env::deserialize_from_env()
            .wrap_err("failed to read FGBRIDGE_ environment variables")?;

        let base = match config_file.or(vars.config_file.as_deref()) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        Ok(base.merge_env(vars).merge_args(std::env::args()))
    }

    /// [`BridgeConfig::load`], falling back to the defaults when a file or environment layer is
    /// broken. The command-line switches are applied either way, the report is handed back for
    /// logging once logging is up.
    pub fn load_or_default() -> (Self, Option<eyre::Report>) {
        Self::or_default(Self::load(), std::env::args())
    }

    fn or_default<I, S>(loaded: eyre::Result<Self>, args: I) -> (Self, Option<eyre::Report>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match loaded {
            Ok(config) => (config, None),
            Err(report) => (Self::default().merge_args(args), Some(report)),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> eyre::Result<Self> {
        let path = path.as_ref();
        let encoded_toml = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;

        let config = toml::from_str(&encoded_toml)
            .wrap_err_with(|| format!("failed to parse {}", path.display()))?;

        debug!(?path, "loaded configuration file");
        Ok(config)
    }

    pub fn merge_env(self, vars: BridgeVars) -> Self {
        Self {
            library: vars.library.unwrap_or(self.library),
            debug: vars.debug.unwrap_or(self.debug),
            debug_ext: vars.debug_ext.unwrap_or(self.debug_ext),
            log_file: vars.log_file.or(self.log_file),
        }
    }

    /// Turns on debug levels for the switches present in `args`.
    ///
    /// Switches only ever raise verbosity, and anything that isn't an exact switch is ignored,
    /// the rest of the command line belongs to the host.
    pub fn merge_args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        args.into_iter().fold(self, |config, arg| match arg.as_ref() {
            DEBUG_SWITCH => Self {
                debug: true,
                ..config
            },
            DEBUG_EXT_SWITCH => Self {
                debug_ext: true,
                ..config
            },
            _ => config,
        })
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.debug, self.debug_ext)
    }
}
