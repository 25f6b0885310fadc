//! Destination for the `print` builtin.
//!
//! Output goes to stdout by default. Tests and embedders that want to
//! inspect it install a buffer handler; `Silent` discards everything.
//! Dispatch is a plain enum match.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::registry::Builtin;
use crate::Value;

/// Where printed lines go.
#[derive(Debug)]
pub enum PrintHandler {
    /// Writes to the process stdout.
    Stdout,
    /// Appends to an in-memory buffer.
    Buffer(Mutex<String>),
    /// Discards output.
    Silent,
}

impl PrintHandler {
    /// Emit `line` followed by a newline.
    pub fn println(&self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::Buffer(buf) => {
                let mut buf = buf.lock();
                buf.push_str(line);
                buf.push('\n');
            }
            Self::Silent => {}
        }
    }

    /// Everything captured so far. Empty for handlers that don't capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(buf) => buf.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    /// Captured output split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.output().lines().map(str::to_owned).collect()
    }

    pub fn clear(&self) {
        if let Self::Buffer(buf) = self {
            buf.lock().clear();
        }
    }
}

/// Print handler shared between a session, its parallel children and the
/// `print` builtin.
pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}

/// The `print` builtin: arguments joined by single spaces, then a newline.
/// Always yields `Void`.
pub fn print_builtin(handler: SharedPrintHandler) -> Builtin {
    Builtin::new("print", move |args: &[Value]| {
        handler.println(&format_args_line(args));
        Ok(Value::Void)
    })
}

fn format_args_line(args: &[Value]) -> String {
    let mut line = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        line.push_str(&arg.to_string());
    }
    line
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
