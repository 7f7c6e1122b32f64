use std::{collections::VecDeque, fmt::Display};

/// The host's view of a script call's arguments.
///
/// Parameters are read in declaration order. After the last one the frame must be advanced past
/// the end of the parameter list with [`ScriptFrame::finish`], even when the call fails.
pub trait ScriptFrame {
    fn read_bool(&mut self) -> Option<bool>;

    fn read_i32(&mut self) -> Option<i32>;

    fn finish(&mut self);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptValue {
    Bool(bool),
    Int32(i32),
    String(String),
}

impl Display for ScriptValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptValue::Bool(value) => value.fmt(f),
            ScriptValue::Int32(value) => value.fmt(f),
            ScriptValue::String(value) => value.fmt(f),
        }
    }
}

/// A frame over an owned argument list, for callers outside of a script runtime.
#[derive(Debug, Default)]
pub struct ArgsFrame {
    args: VecDeque<ScriptValue>,
    finished: bool,
}

impl ArgsFrame {
    pub fn new(args: impl IntoIterator<Item = ScriptValue>) -> Self {
        Self {
            args: args.into_iter().collect(),
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl ScriptFrame for ArgsFrame {
    fn read_bool(&mut self) -> Option<bool> {
        match self.args.front()? {
            ScriptValue::Bool(value) => {
                let value = *value;
                self.args.pop_front();
                Some(value)
            }
            _ => None,
        }
    }

    fn read_i32(&mut self) -> Option<i32> {
        match self.args.front()? {
            ScriptValue::Int32(value) => {
                let value = *value;
                self.args.pop_front();
                Some(value)
            }
            _ => None,
        }
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}
