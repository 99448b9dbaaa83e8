use std::io::Write;

/// A user-visible notification, the client's equivalent of a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Prints successes to stdout and errors to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        // A closed pipe is not worth failing the operation over.
        let _ = match notice {
            Notice::Success(message) => writeln!(std::io::stdout(), "{message}"),
            Notice::Error(message) => writeln!(std::io::stderr(), "error: {message}"),
        };
    }
}

/// Drops notifications; for embedding where the caller reports errors itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _notice: Notice) {}
}
