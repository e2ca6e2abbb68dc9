// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Statement logging sink.

use std::{
    fmt,
    io::{self, Write},
    sync::Mutex
};

/// Byte sink that generated stores write each SQL statement to.
///
/// Logging is best-effort: a failing sink never fails the query that
/// produced the line. A store built without a logger uses
/// [`Logger::discard`].
pub struct Logger {
    sink: Mutex<Box<dyn Write + Send>>
}

impl Logger {
    /// Create a logger writing to `sink`.
    pub fn new(sink: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(sink))
        }
    }

    /// Create a logger that drops everything.
    pub fn discard() -> Self {
        Self::new(io::sink())
    }

    /// Write one statement followed by a newline.
    pub fn log(&self, statement: &str) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{statement}");
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::discard()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}
