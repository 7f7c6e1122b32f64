/// Suppresses runs of identical log lines.
///
/// A line equal to the previous one is let through once more and then held back until a
/// different line breaks the run, so a host polling the bridge every frame produces two lines
/// instead of thousands.
#[derive(Debug, Default)]
pub struct LogGate {
    last: Option<String>,
    repeated: bool,
}

impl LogGate {
    pub const fn new() -> Self {
        Self {
            last: None,
            repeated: false,
        }
    }

    pub fn should_log(&mut self, message: &str) -> bool {
        if self.last.as_deref() == Some(message) {
            let first_repeat = !self.repeated;
            self.repeated = true;
            return first_repeat;
        }

        self.last = Some(message.to_string());
        self.repeated = false;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
