//! Reusable TUI widgets and text styling helpers.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Bottom status bar.
pub(crate) fn status_bar(msg: &str) -> Paragraph<'_> {
    Paragraph::new(format!(" {msg}"))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White))
}

/// Style applied to lines inside a fenced code block.
pub(crate) fn code_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Split message text into styled lines, rendering fenced code blocks
/// distinctly.
///
/// Lines between a ```` ``` ````-prefixed opener and a bare ```` ``` ````
/// closer are indented and styled with [`code_style`]; the fence markers
/// themselves become horizontal rules. The convention is purely
/// presentational; the engine stores snippets verbatim.
pub(crate) fn fenced_lines(text: &str, base: Style) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut in_code = false;

    for raw in text.lines() {
        let trimmed = raw.trim();
        if !in_code && trimmed.starts_with("```") {
            in_code = true;
            lines.push(Line::styled("╔═══════ code ═══════".to_string(), code_style()));
        } else if in_code && trimmed == "```" {
            in_code = false;
            lines.push(Line::styled("╚════════════════════".to_string(), code_style()));
        } else if in_code {
            lines.push(Line::styled(format!("  {raw}"), code_style()));
        } else {
            lines.push(Line::styled(raw.to_string(), base));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fences_become_rules() {
        let text = "intro\n```python\nprint(1)\n```\noutro";
        let lines = fenced_lines(text, Style::default());
        assert_eq!(lines.len(), 5);
        assert!(lines[1].to_string().contains("code"));
        assert!(lines[2].to_string().contains("print(1)"));
        assert!(lines[3].to_string().contains('╚'));
        assert_eq!(lines[4].to_string(), "outro");
    }

    #[test]
    fn unclosed_fence_styles_to_end() {
        let lines = fenced_lines("```python\nx = 1", Style::default());
        assert_eq!(lines.len(), 2);
        assert!(lines[1].to_string().contains("x = 1"));
    }
}
