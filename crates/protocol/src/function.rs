use std::fmt::Display;

use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, VariantArray};

/// Script types used by the exposed functions, named as the host's reflection system knows them.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum ScriptType {
    Bool,
    Int32,
    String,
}

impl ScriptType {
    pub const fn name(self) -> &'static str {
        match self {
            ScriptType::Bool => "Bool",
            ScriptType::Int32 => "Int32",
            ScriptType::String => "String",
        }
    }
}

impl Display for ScriptType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct ScriptParam {
    pub name: &'static str,
    pub ty: ScriptType,
}

/// Declaration of a global script function as registered with the host.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct ScriptFunction {
    pub name: &'static str,
    pub params: &'static [ScriptParam],
    pub return_type: ScriptType,
}

impl Display for ScriptFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        for (idx, param) in self.params.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", param.name, param.ty)?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}

const NO_PARAMS: &[ScriptParam] = &[];

const MODE_PARAM: &[ScriptParam] = &[ScriptParam {
    name: "mode",
    ty: ScriptType::Int32,
}];

const SHOULD_ENABLE_PARAM: &[ScriptParam] = &[ScriptParam {
    name: "shouldEnable",
    ty: ScriptType::Bool,
}];

/// Every operation the bridge exposes to scripts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, VariantArray)]
pub enum Operation {
    GetVersionAsString,
    GetFrameGenerationMode,
    GetFrameGenerationState,
    GetDynamicFrameGenerationState,
    SetFrameGenerationMode,
    SetFrameGenerationState,
    SetDynamicFrameGenerationState,
    ToggleFrameGenerationState,
}

impl Operation {
    /// Name under which the operation is registered with the host.
    pub const fn script_name(self) -> &'static str {
        use Operation::*;
        match self {
            GetVersionAsString => "DLSSEnabler_GetVersionAsString",
            GetFrameGenerationMode => "DLSSEnabler_GetFrameGenerationMode",
            GetFrameGenerationState => "DLSSEnabler_GetFrameGenerationState",
            GetDynamicFrameGenerationState => "DLSSEnabler_GetDynamicFrameGenerationState",
            SetFrameGenerationMode => "DLSSEnabler_SetFrameGenerationMode",
            SetFrameGenerationState => "DLSSEnabler_SetFrameGenerationState",
            SetDynamicFrameGenerationState => "DLSSEnabler_SetDynamicFrameGenerationState",
            ToggleFrameGenerationState => "DLSSEnabler_ToggleFrameGenerationState",
        }
    }

    pub const fn params(self) -> &'static [ScriptParam] {
        use Operation::*;
        match self {
            SetFrameGenerationMode => MODE_PARAM,
            SetFrameGenerationState | SetDynamicFrameGenerationState => SHOULD_ENABLE_PARAM,
            GetVersionAsString
            | GetFrameGenerationMode
            | GetFrameGenerationState
            | GetDynamicFrameGenerationState
            | ToggleFrameGenerationState => NO_PARAMS,
        }
    }

    pub const fn return_type(self) -> ScriptType {
        use Operation::*;
        match self {
            GetVersionAsString => ScriptType::String,
            GetFrameGenerationMode => ScriptType::Int32,
            GetFrameGenerationState
            | GetDynamicFrameGenerationState
            | SetFrameGenerationMode
            | SetFrameGenerationState
            | SetDynamicFrameGenerationState
            | ToggleFrameGenerationState => ScriptType::Bool,
        }
    }

    /// Whether the operation may change the native library's mode.
    pub const fn is_mutating(self) -> bool {
        use Operation::*;
        matches!(
            self,
            SetFrameGenerationMode
                | SetFrameGenerationState
                | SetDynamicFrameGenerationState
                | ToggleFrameGenerationState
        )
    }

    pub const fn descriptor(self) -> ScriptFunction {
        ScriptFunction {
            name: self.script_name(),
            params: self.params(),
            return_type: self.return_type(),
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.script_name())
    }
}

#[cfg(test)]
mod test {
    use expect_test::expect;
    use strum::IntoEnumIterator;

    use super::{Operation, ScriptType};

    #[test]
    fn registration_table() {
        let table: Vec<_> = Operation::iter()
            .map(|op| op.descriptor().to_string())
            .collect();

        expect![[r#"
            DLSSEnabler_GetVersionAsString() -> String
            DLSSEnabler_GetFrameGenerationMode() -> Int32
            DLSSEnabler_GetFrameGenerationState() -> Bool
            DLSSEnabler_GetDynamicFrameGenerationState() -> Bool
            DLSSEnabler_SetFrameGenerationMode(mode: Int32) -> Bool
            DLSSEnabler_SetFrameGenerationState(shouldEnable: Bool) -> Bool
            DLSSEnabler_SetDynamicFrameGenerationState(shouldEnable: Bool) -> Bool
            DLSSEnabler_ToggleFrameGenerationState() -> Bool"#]]
        .assert_eq(&table.join("\n"));
    }

    #[test]
    fn setters_take_one_param_and_return_bool() {
        for op in Operation::iter().filter(|op| op.is_mutating()) {
            assert!(op.params().len() <= 1, "{op} takes more than one parameter");
            assert_eq!(ScriptType::Bool, op.return_type());
        }
    }
}
