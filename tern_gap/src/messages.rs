// This file is part of Tern.

// Tern is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
//
// Tern is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.

//! The messaging collaborator: how the core talks back to whoever drives it.

use strum_macros::Display;

/// Receives user-facing notices from a [Buffer](crate::Buffer).
///
/// Recoverable failures arrive through [report_error](Messenger::report_error) in addition to
/// being returned as `Err`. [report_fatal](Messenger::report_fatal) never returns: editing cannot
/// continue once it has been called.
pub trait Messenger {
    /// A success notice, such as the byte count of a save.
    fn report_info(&mut self, message: &str);
    /// A recoverable failure. The buffer is still usable.
    fn report_error(&mut self, message: &str);
    /// An unrecoverable failure. Implementations must not return.
    fn report_fatal(&mut self, message: &str) -> !;
}

/// Forwards every message to `tracing`, tagged with its [Severity]. A fatal message terminates
/// the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMessenger;

impl Messenger for LogMessenger {
    fn report_info(&mut self, message: &str) {
        tracing::info!(severity = %Severity::Info, "{}", message);
    }

    fn report_error(&mut self, message: &str) {
        tracing::error!(severity = %Severity::Error, "{}", message);
    }

    fn report_fatal(&mut self, message: &str) -> ! {
        tracing::error!(severity = %Severity::Fatal, "{}", message);
        std::process::exit(1)
    }
}

/// How serious a reported message is. Displays in lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// Sent through [Messenger::report_info].
    Info,
    /// Sent through [Messenger::report_error].
    Error,
    /// Sent through [Messenger::report_fatal].
    Fatal,
}

/// One message kept by a [RecordingMessenger].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Which report method received it.
    pub severity: Severity,
    /// The message as reported.
    pub text: String,
}

/// Keeps every message in the order it was reported.
///
/// A fatal report is recorded and then panics with the message text, so an embedding
/// application or a test can observe the unrecoverable path without the process exiting.
///
/// ### Examples
/// ```
/// use tern_gap::{Messenger, RecordingMessenger, Severity};
///
/// let mut messenger = RecordingMessenger::default();
/// messenger.report_info("File \"a.txt\" 3 bytes saved.");
///
/// let last = messenger.last().unwrap();
/// assert_eq!(last.severity, Severity::Info);
/// assert_eq!(last.severity.to_string(), "info");
/// ```
#[derive(Debug, Default, Clone)]
pub struct RecordingMessenger {
    /// Every message, oldest first.
    pub messages: Vec<Message>,
}

impl RecordingMessenger {
    /// The most recent message, i.e. what a status line would currently show.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Only the recoverable failures, oldest first.
    pub fn errors(&self) -> impl Iterator<Item = &Message> + '_ {
        self.messages
            .iter()
            .filter(|message| message.severity == Severity::Error)
    }

    fn record(&mut self, severity: Severity, message: &str) {
        self.messages.push(Message {
            severity,
            text: message.to_string(),
        });
    }
}

impl Messenger for RecordingMessenger {
    fn report_info(&mut self, message: &str) {
        self.record(Severity::Info, message);
    }

    fn report_error(&mut self, message: &str) {
        self.record(Severity::Error, message);
    }

    fn report_fatal(&mut self, message: &str) -> ! {
        self.record(Severity::Fatal, message);
        panic!("Fatal: {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn severity_displays_lowercase() {
        assert_eq!(Severity::Info.to_string(), "info");
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Fatal.to_string(), "fatal");
    }

    #[test]
    fn errors_skips_info() {
        let mut messenger = RecordingMessenger::default();
        messenger.report_info("saved");
        messenger.report_error("disk full");
        messenger.report_info("saved again");

        let errors: Vec<_> = messenger.errors().map(|m| m.text.as_str()).collect();
        assert_eq!(errors, vec!["disk full"]);
        assert_eq!(messenger.last().unwrap().text, "saved again");
    }
}
