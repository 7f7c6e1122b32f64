use clap::*;
use fgbridge::{Operation, ScriptValue};
use fgbridge_protocol::{Mode, ParseModeError};

#[derive(Subcommand, Debug)]
#[command(flatten_help = true)]
pub enum Commands {
    /// Show the library, binding and current mode.
    Status,

    /// List the script functions registered with a host.
    Functions,

    /// Print the bridge version.
    Version,

    /// Print the current frame generation mode.
    Mode,

    /// Print whether frame generation is enabled.
    State,

    /// Print whether dynamic frame generation is enabled.
    DynamicState,

    /// Set the frame generation mode.
    SetMode {
        /// A mode name such as `dynamic-enabled`, or its number.
        #[clap(value_parser = parse_mode, allow_negative_numbers = true)]
        mode: i32,
    },

    /// Enable or disable frame generation.
    SetState {
        #[clap(action = ArgAction::Set)]
        enabled: bool,
    },

    /// Enable or disable dynamic frame generation.
    SetDynamicState {
        #[clap(action = ArgAction::Set)]
        enabled: bool,
    },

    /// Flip frame generation on whichever axis is current.
    Toggle,
}

/// Numbers are passed through unchecked so the bridge gets to reject them.
fn parse_mode(value: &str) -> Result<i32, ParseModeError> {
    match value.trim().parse::<i32>() {
        Ok(raw) => Ok(raw),
        Err(_) => value.parse::<Mode>().map(Mode::raw),
    }
}

impl Commands {
    /// The script call this command makes, if it maps onto one.
    pub fn call(&self) -> Option<(Operation, Vec<ScriptValue>)> {
        let call = match *self {
            Commands::Status | Commands::Functions => return None,
            Commands::Version => (Operation::GetVersionAsString, vec![]),
            Commands::Mode => (Operation::GetFrameGenerationMode, vec![]),
            Commands::State => (Operation::GetFrameGenerationState, vec![]),
            Commands::DynamicState => (Operation::GetDynamicFrameGenerationState, vec![]),
            Commands::SetMode { mode } => {
                (Operation::SetFrameGenerationMode, vec![ScriptValue::Int32(mode)])
            }
            Commands::SetState { enabled } => (
                Operation::SetFrameGenerationState,
                vec![ScriptValue::Bool(enabled)],
            ),
            Commands::SetDynamicState { enabled } => (
                Operation::SetDynamicFrameGenerationState,
                vec![ScriptValue::Bool(enabled)],
            ),
            Commands::Toggle => (Operation::ToggleFrameGenerationState, vec![]),
        };

        Some(call)
    }
}

#[cfg(test)]
mod test {
    use fgbridge::{Operation, ScriptValue};

    use super::{parse_mode, Commands};

    #[test]
    fn modes_parse_by_name_or_number() {
        assert_eq!(Ok(3), parse_mode("dynamic-enabled"));
        assert_eq!(Ok(1), parse_mode("Enabled"));
        assert_eq!(Ok(7), parse_mode("7"));
        assert_eq!(Ok(-2), parse_mode("-2"));
        assert!(parse_mode("sometimes").is_err());
    }

    #[test]
    fn setters_carry_their_argument() {
        assert_eq!(
            Some((
                Operation::SetDynamicFrameGenerationState,
                vec![ScriptValue::Bool(true)]
            )),
            Commands::SetDynamicState { enabled: true }.call()
        );
        assert_eq!(None, Commands::Status.call());
    }
}
