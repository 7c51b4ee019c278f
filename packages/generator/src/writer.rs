use crate::options::LineEnding;

const INDENT: &str = "    ";

/// Text buffer with indentation tracking
pub struct CodeWriter {
    buffer: String,
    indent_level: usize,
    line_ending: LineEnding,
}

impl CodeWriter {
    pub fn new(line_ending: LineEnding) -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            line_ending,
        }
    }

    /// Write an indented line
    pub fn add_line(&mut self, text: &str) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(text);
        self.new_line();
    }

    pub fn new_line(&mut self) {
        self.buffer.push_str(self.line_ending.as_str());
    }

    pub fn open_block(&mut self) {
        self.add_line("{");
        self.indent();
    }

    pub fn close_block(&mut self) {
        self.dedent();
        self.add_line("}");
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn into_output(self) -> String {
        self.buffer
    }
}
