//! Output text sink
//!
//! The generator appends lines to an [`Output`] instead of printing as
//! it goes, so traversal results can be captured and asserted on in
//! tests and written to stdout or a file by the CLI.

/// An accumulating text sink
#[derive(Debug, Default)]
pub struct Output {
    buf: String,
}

impl Output {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line of text
    pub fn line(&mut self, text: impl AsRef<str>) {
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
    }

    /// Append an empty line
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Append a multi-line block, prefixing each line with `indent`
    pub fn indented_lines(&mut self, indent: &str, text: &str) {
        for line in text.lines() {
            self.line(format!("{}{}", indent, line));
        }
    }

    /// Borrow the accumulated text
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consume the sink, returning the accumulated text
    pub fn into_string(self) -> String {
        self.buf
    }
}
