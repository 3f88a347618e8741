//! Output sink: the boundary the interpreter writes finished lines to.
//!
//! The core only ever hands the sink complete message strings, one per
//! logical result. Rendering and autoscroll belong to the collaborator
//! behind the trait.

/// Receives one finished message line per call.
pub trait OutputSink {
    fn append(&mut self, line: &str);
}

/// Sink that collects lines into a vector.
///
/// Used by the shell to gather one command's output and by tests.
#[derive(Debug, Default)]
pub struct CollectSink {
    lines: Vec<String>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl OutputSink for CollectSink {
    fn append(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_sink_keeps_order() {
        let mut sink = CollectSink::new();
        sink.append("first");
        sink.append("second");
        assert_eq!(sink.lines(), &["first", "second"]);
    }
}
