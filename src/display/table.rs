//! Fixed-width text tables for chat delivery.
//!
//! Every report section renders through [`TextTable`], so all columns follow the same rule:
//! a cell is padded with trailing spaces up to its column width, and a cell that is already
//! wider is written as-is rather than cut.

/// Numeric and ratio columns.
pub const VALUE_WIDTH: usize = 10;
/// Map names in the team and ban tables.
pub const MAP_WIDTH: usize = 10;
/// Player names in the per-map rating table.
pub const PLAYER_WIDTH: usize = 15;
/// Player names in the season stat tables.
pub const STAT_PLAYER_WIDTH: usize = 14;

pub const SUBSTITUTE_MARKER: &str = " (S)";
pub const MISSING: &str = "-";

const MAP_PREFIX: &str = "de_";

pub fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    if len >= width {
        return cell.to_string();
    }

    let mut padded = String::with_capacity(cell.len() + width - len);
    padded.push_str(cell);
    padded.extend(std::iter::repeat(' ').take(width - len));
    padded
}

/// `de_mirage` -> `Mirage`. Anything without the prefix passes through untouched.
pub fn shorten_map_name(map: &str) -> String {
    match map.strip_prefix(MAP_PREFIX) {
        Some(rest) => {
            let mut chars = rest.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
        None => map.to_string(),
    }
}

/// Two decimals, halves rounded away from zero.
pub fn format_ratio(value: f64) -> String {
    format!("{:.2}", (value * 100.0).round() / 100.0)
}

pub fn player_label(name: &str, substitute: bool) -> String {
    if substitute {
        format!("{}{}", name, SUBSTITUTE_MARKER)
    } else {
        name.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextTable {
    widths: Vec<usize>,
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new(widths: Vec<usize>) -> Self {
        TextTable {
            widths,
            header: None,
            rows: Vec::new(),
        }
    }

    /// A leading column followed by `count` value columns.
    pub fn with_leading(leading: usize, count: usize) -> Self {
        let mut widths = vec![leading];
        widths.extend(std::iter::repeat(VALUE_WIDTH).take(count));
        Self::new(widths)
    }

    pub fn header<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = Some(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    fn render_line(&self, cells: &[String], out: &mut String) {
        for (i, cell) in cells.iter().enumerate() {
            // Extra cells beyond the declared columns use the value width.
            let width = self.widths.get(i).copied().unwrap_or(VALUE_WIDTH);
            out.push_str(&pad(cell, width));
        }
        out.push('\n');
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(header) = &self.header {
            self.render_line(header, &mut out);
        }
        for row in &self.rows {
            self.render_line(row, &mut out);
        }
        out
    }
}
