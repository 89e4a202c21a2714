use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedLine {
    pub number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub lines: Vec<NumberedLine>,
    pub start_line: usize,
    /// 0 for an empty file.
    pub end_line: usize,
    pub total_lines: usize,
}

/// A window of at most `max_lines` lines beginning at the clamped `start_line`.
pub fn preview(content: &str, start_line: i64, max_lines: usize) -> Preview {
    let all: Vec<&str> = content.lines().collect();
    let total = all.len();
    let start = start_line.clamp(1, total.max(1) as i64) as usize;
    let end = (start + max_lines.max(1) - 1).min(total);
    let lines = if total == 0 {
        Vec::new()
    } else {
        all[start - 1..end]
            .iter()
            .enumerate()
            .map(|(i, text)| NumberedLine { number: start + i, text: (*text).to_string() })
            .collect()
    };
    Preview { lines, start_line: start, end_line: end, total_lines: total }
}
