//! Offset to line/column mapping

/// Zero-based line and column (in bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i as u32 + 1),
        );
        Self { line_starts }
    }

    pub fn line_col(&self, offset: u32) -> LineCol {
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        LineCol {
            line: line as u32,
            column: offset - self.line_starts[line],
        }
    }

    pub fn line(&self, offset: u32) -> u32 {
        self.line_col(offset).line
    }

    pub fn line_start(&self, line: u32) -> Option<u32> {
        self.line_starts.get(line as usize).copied()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("ab\ncd\n\nx");
        assert_eq!(index.line_col(0), LineCol { line: 0, column: 0 });
        assert_eq!(index.line_col(2), LineCol { line: 0, column: 2 });
        assert_eq!(index.line_col(3), LineCol { line: 1, column: 0 });
        assert_eq!(index.line_col(7), LineCol { line: 3, column: 0 });
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line_start(2), Some(6));
    }
}
