//! Plain-text tables and detail cards for records

use records_core::{Career, Category, Student};
use unicode_width::UnicodeWidthStr;

/// A record that can be shown as a table row
pub trait Tabular {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

impl Tabular for Category {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Description"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.description.clone().unwrap_or_default(),
        ]
    }
}

impl Tabular for Career {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Category", "Duration", "Emoji"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.category.clone().unwrap_or_default(),
            self.duration.clone().unwrap_or_default(),
            self.emoji.clone().unwrap_or_default(),
        ]
    }
}

impl Tabular for Student {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Career"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.career.clone()]
    }
}

/// Terminal columns taken by `text`; emoji and CJK glyphs count double
pub fn width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn pad(text: &str, to: usize) -> String {
    let mut out = text.to_string();
    out.extend(std::iter::repeat(' ').take(to.saturating_sub(width(text))));
    out
}

/// Render `records` as a bordered table under `title`
pub fn render_table<T: Tabular>(title: &str, records: &[T]) -> String {
    let headers = T::headers();
    let rows: Vec<Vec<String>> = records.iter().map(Tabular::cells).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| width(h)).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(width(cell));
        }
    }

    let separator: String = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let separator = format!("+{}+", separator);

    let line = |cells: Vec<String>| {
        let joined = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!(" {} ", pad(cell, *w)))
            .collect::<Vec<_>>()
            .join("|");
        format!("|{}|", joined)
    };

    let mut out = vec![format!("{} ({})", title, records.len()), separator.clone()];
    out.push(line(headers.iter().map(|h| h.to_string()).collect()));
    out.push(separator.clone());
    if rows.is_empty() {
        out.push("  (no records)".to_string());
    }
    for row in rows {
        out.push(line(row));
    }
    out.push(separator);
    out.join("\n")
}

/// Render one record as a labelled card
pub fn render_card<T: Tabular>(title: &str, record: &T) -> String {
    let mut out = vec![format!("── {} ──", title)];
    for (header, cell) in T::headers().iter().zip(record.cells()) {
        let value = if cell.is_empty() { "-".to_string() } else { cell };
        out.push(format!("  {}: {}", header, value));
    }
    out.join("\n")
}
