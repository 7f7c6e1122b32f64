use fgbridge_protocol::{Operation, ScriptFunction};
use strum::IntoEnumIterator;

/// The host's reflection system, as seen during its post-register phase.
pub trait FunctionRegistry {
    fn register(&mut self, function: ScriptFunction, operation: Operation);
}

impl FunctionRegistry for Vec<ScriptFunction> {
    fn register(&mut self, function: ScriptFunction, _operation: Operation) {
        self.push(function);
    }
}

/// Declares every operation as a global script function.
pub fn register_functions(registry: &mut dyn FunctionRegistry) {
    for operation in Operation::iter() {
        registry.register(operation.descriptor(), operation);
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use fgbridge_protocol::{Operation, ScriptFunction, ScriptType};

    use super::{register_functions, FunctionRegistry};

    #[derive(Default)]
    struct ByName(HashMap<&'static str, Operation>);

    impl FunctionRegistry for ByName {
        fn register(&mut self, function: ScriptFunction, operation: Operation) {
            assert!(self.0.insert(function.name, operation).is_none());
        }
    }

    #[test]
    fn registers_each_operation_once() {
        let mut registry = ByName::default();
        register_functions(&mut registry);

        assert_eq!(8, registry.0.len());
        assert_eq!(
            Some(&Operation::ToggleFrameGenerationState),
            registry.0.get("DLSSEnabler_ToggleFrameGenerationState")
        );
    }

    #[test]
    fn setters_declare_one_parameter() {
        let mut functions = Vec::new();
        register_functions(&mut functions);

        let setters: Vec<_> = functions
            .iter()
            .filter(|function| function.name.contains("_Set"))
            .collect();

        assert_eq!(3, setters.len());
        for setter in setters {
            assert_eq!(1, setter.params.len());
            assert_eq!(ScriptType::Bool, setter.return_type);
        }
    }
}
