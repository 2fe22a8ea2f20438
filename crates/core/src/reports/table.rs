//! Labelled tables with aligned text and HTML rendering.

use pfi_shared::RenderConfig;
use rust_decimal::Decimal;

use super::html::escape_html;

/// CSS classes of every rendered HTML table.
pub const TABLE_CLASSES: &str = "table table-condensed table-hover table-bordered table-striped";

const ELLIPSIS: &str = "...";
const COLUMN_GAP: &str = "  ";

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// No value; rendered as the configured missing-value text.
    Empty,
    /// Free text, rendered as-is.
    Text(String),
    /// Exact amount, rendered at its own scale.
    Amount(Decimal),
    /// Derived statistic, rounded to the configured precision.
    Statistic(Decimal),
}

impl Cell {
    /// Renders the cell as text under `config`.
    #[must_use]
    pub fn display(&self, config: &RenderConfig) -> String {
        match self {
            Self::Empty => config.na_rep.clone(),
            Self::Text(text) => text.clone(),
            Self::Amount(value) => value.to_string(),
            Self::Statistic(value) => value.round_dp(config.precision).normalize().to_string(),
        }
    }
}

impl From<Option<Decimal>> for Cell {
    fn from(value: Option<Decimal>) -> Self {
        value.map_or(Self::Empty, Self::Amount)
    }
}

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        Self::Amount(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One body row: index labels and cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// One label per index level.
    pub index: Vec<String>,
    /// One cell per column.
    pub cells: Vec<Cell>,
}

/// A table with a (possibly multi-level) row index and column header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    index_names: Vec<String>,
    column_names: Vec<String>,
    columns: Vec<Vec<String>>,
    rows: Vec<TableRow>,
}

/// A visible row or column position, or the elided middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    At(usize),
    Gap,
}

/// Positions to show out of `len`, keeping the head and tail when `len`
/// exceeds `max`. A `max` of zero shows everything.
fn visible(len: usize, max: usize) -> Vec<Slot> {
    if max == 0 || len <= max {
        return (0..len).map(Slot::At).collect();
    }
    let head = max.div_ceil(2);
    let tail = max / 2;
    (0..head)
        .map(Slot::At)
        .chain(std::iter::once(Slot::Gap))
        .chain((len - tail..len).map(Slot::At))
        .collect()
}

fn is_truncated(rows: &[Slot], cols: &[Slot]) -> bool {
    rows.contains(&Slot::Gap) || cols.contains(&Slot::Gap)
}

fn cell_text(row: &TableRow, slot: Slot, config: &RenderConfig) -> String {
    match slot {
        Slot::At(col) => row
            .cells
            .get(col)
            .map_or_else(|| config.na_rep.clone(), |cell| cell.display(config)),
        Slot::Gap => ELLIPSIS.to_string(),
    }
}

impl Table {
    /// Creates an empty table with a single-level column header.
    #[must_use]
    pub fn new(index_names: Vec<String>, columns: Vec<String>) -> Self {
        Self {
            index_names,
            column_names: Vec::new(),
            columns: columns.into_iter().map(|label| vec![label]).collect(),
            rows: Vec::new(),
        }
    }

    /// Creates an empty table whose columns carry one label per header level.
    ///
    /// `column_names` names the header levels and is shown beside them.
    #[must_use]
    pub fn with_levels(
        index_names: Vec<String>,
        column_names: Vec<String>,
        columns: Vec<Vec<String>>,
    ) -> Self {
        Self {
            index_names,
            column_names,
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a body row.
    pub fn push_row(&mut self, index: Vec<String>, cells: Vec<Cell>) {
        self.rows.push(TableRow { index, cells });
    }

    /// Names of the index levels.
    #[must_use]
    pub fn index_names(&self) -> &[String] {
        &self.index_names
    }

    /// Column labels, one per header level.
    #[must_use]
    pub fn columns(&self) -> &[Vec<String>] {
        &self.columns
    }

    /// Body rows.
    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Number of header levels (at least one).
    #[must_use]
    pub fn header_depth(&self) -> usize {
        self.columns
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.column_names.len()))
            .max()
            .unwrap_or(0)
            .max(1)
    }

    /// Header labels for the visible columns, one line per level.
    ///
    /// Outer labels repeated by adjacent columns are blanked.
    fn header_lines(&self, slots: &[Slot]) -> Vec<Vec<String>> {
        let depth = self.header_depth();
        let mut lines = Vec::with_capacity(depth);
        for level in 0..depth {
            let mut line = Vec::with_capacity(slots.len());
            let mut previous: Option<&[String]> = None;
            for slot in slots {
                match slot {
                    Slot::At(col) => {
                        let labels = self.columns[*col].as_slice();
                        let label = labels.get(level).cloned().unwrap_or_default();
                        let repeated = level + 1 < depth
                            && previous.is_some_and(|prev| {
                                prev.len() > level && labels.len() > level
                                    && prev[..=level] == labels[..=level]
                            });
                        line.push(if repeated { String::new() } else { label });
                        previous = Some(labels);
                    }
                    Slot::Gap => {
                        line.push(ELLIPSIS.to_string());
                        previous = None;
                    }
                }
            }
            lines.push(line);
        }
        lines
    }

    fn has_index_names(&self) -> bool {
        self.index_names.iter().any(|name| !name.is_empty())
    }

    /// Renders the table as aligned text lines.
    ///
    /// Index columns are left-aligned and value columns right-aligned.
    /// Rows and columns beyond the configured limits are elided.
    #[must_use]
    pub fn render_text(&self, config: &RenderConfig) -> Vec<String> {
        let row_slots = visible(self.rows.len(), config.max_rows);
        let col_slots = visible(self.columns.len(), config.max_columns);
        let n_index = self.index_names.len();

        let mut grid: Vec<Vec<String>> = Vec::new();
        for (level, labels) in self.header_lines(&col_slots).into_iter().enumerate() {
            let mut line = vec![String::new(); n_index];
            if let (Some(last), Some(name)) = (line.last_mut(), self.column_names.get(level)) {
                name.clone_into(last);
            }
            line.extend(labels);
            grid.push(line);
        }
        if self.has_index_names() {
            let mut line = self.index_names.clone();
            line.extend(col_slots.iter().map(|_| String::new()));
            grid.push(line);
        }
        for slot in &row_slots {
            let line = match slot {
                Slot::At(r) => {
                    let row = &self.rows[*r];
                    let mut line: Vec<String> = (0..n_index)
                        .map(|i| row.index.get(i).cloned().unwrap_or_default())
                        .collect();
                    line.extend(col_slots.iter().map(|c| cell_text(row, *c, config)));
                    line
                }
                Slot::Gap => vec![ELLIPSIS.to_string(); n_index + col_slots.len()],
            };
            grid.push(line);
        }

        let width_count = n_index + col_slots.len();
        let mut widths = vec![0usize; width_count];
        for line in &grid {
            for (i, text) in line.iter().enumerate() {
                widths[i] = widths[i].max(text.chars().count());
            }
        }

        let mut out: Vec<String> = grid
            .iter()
            .map(|line| {
                line.iter()
                    .enumerate()
                    .map(|(i, text)| {
                        let width = widths[i];
                        if i < n_index {
                            format!("{text:<width$}")
                        } else {
                            format!("{text:>width$}")
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(COLUMN_GAP)
                    .trim_end()
                    .to_string()
            })
            .collect();

        if is_truncated(&row_slots, &col_slots) {
            out.push(String::new());
            out.push(format!(
                "[{} rows x {} columns]",
                self.rows.len(),
                self.columns.len()
            ));
        }
        out
    }

    /// Renders the table as HTML lines, escaping every label and cell.
    #[must_use]
    pub fn render_html(&self, config: &RenderConfig) -> Vec<String> {
        let row_slots = visible(self.rows.len(), config.max_rows);
        let col_slots = visible(self.columns.len(), config.max_columns);
        let n_index = self.index_names.len();
        let th = |text: &str| format!("<th>{}</th>", escape_html(text));
        let td = |text: &str| format!("<td>{}</td>", escape_html(text));

        let mut out = vec![
            format!(r#"<table border="1" class="dataframe {TABLE_CLASSES}">"#),
            "  <thead>".to_string(),
        ];
        for (level, labels) in self.header_lines(&col_slots).into_iter().enumerate() {
            let mut line = String::from(r#"    <tr style="text-align: right;">"#);
            for i in 0..n_index {
                let name = if i + 1 == n_index {
                    self.column_names.get(level).map_or("", String::as_str)
                } else {
                    ""
                };
                line.push_str(&th(name));
            }
            for label in &labels {
                line.push_str(&th(label));
            }
            line.push_str("</tr>");
            out.push(line);
        }
        if self.has_index_names() {
            let mut line = String::from("    <tr>");
            for name in &self.index_names {
                line.push_str(&th(name));
            }
            for _ in &col_slots {
                line.push_str(&th(""));
            }
            line.push_str("</tr>");
            out.push(line);
        }
        out.push("  </thead>".to_string());
        out.push("  <tbody>".to_string());
        for slot in &row_slots {
            let mut line = String::from("    <tr>");
            match slot {
                Slot::At(r) => {
                    let row = &self.rows[*r];
                    for i in 0..n_index {
                        line.push_str(&th(row.index.get(i).map_or("", String::as_str)));
                    }
                    for col in &col_slots {
                        line.push_str(&td(&cell_text(row, *col, config)));
                    }
                }
                Slot::Gap => {
                    for _ in 0..n_index {
                        line.push_str(&th(ELLIPSIS));
                    }
                    for _ in &col_slots {
                        line.push_str(&td(ELLIPSIS));
                    }
                }
            }
            line.push_str("</tr>");
            out.push(line);
        }
        out.push("  </tbody>".to_string());
        out.push("</table>".to_string());

        if is_truncated(&row_slots, &col_slots) {
            out.push(format!(
                "<p>{} rows \u{d7} {} columns</p>",
                self.rows.len(),
                self.columns.len()
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sums() -> Table {
        let mut table = Table::new(vec!["year".to_string()], vec!["amount".to_string()]);
        table.push_row(vec!["2019".to_string()], vec![Cell::Amount(dec!(-12.5))]);
        table.push_row(vec!["2020".to_string()], vec![Cell::Amount(dec!(950))]);
        table
    }

    #[test]
    fn test_visible_slots() {
        assert_eq!(visible(3, 0), vec![Slot::At(0), Slot::At(1), Slot::At(2)]);
        assert_eq!(visible(3, 3).len(), 3);
        assert_eq!(
            visible(5, 3),
            vec![Slot::At(0), Slot::At(1), Slot::Gap, Slot::At(4)]
        );
    }

    #[test]
    fn test_cell_display() {
        let config = RenderConfig {
            na_rep: "NaN".to_string(),
            precision: 2,
            ..RenderConfig::default()
        };
        assert_eq!(Cell::Empty.display(&config), "NaN");
        assert_eq!(Cell::Amount(dec!(1.50)).display(&config), "1.50");
        assert_eq!(Cell::Statistic(dec!(1.2345)).display(&config), "1.23");
        assert_eq!(Cell::Statistic(dec!(2.5000)).display(&config), "2.5");
        assert_eq!(Cell::from(None::<Decimal>).display(&config), "NaN");
    }

    #[test]
    fn test_render_text_aligns_columns() {
        let lines = sums().render_text(&RenderConfig::default());
        assert_eq!(
            lines,
            vec![
                "      amount".to_string(),
                "year".to_string(),
                "2019   -12.5".to_string(),
                "2020     950".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_text_truncates_rows() {
        let mut table = Table::new(vec![String::new()], vec!["n".to_string()]);
        for i in 0..10 {
            table.push_row(vec![i.to_string()], vec![Cell::Amount(Decimal::from(i))]);
        }
        let config = RenderConfig {
            max_rows: 4,
            ..RenderConfig::default()
        };
        let lines = table.render_text(&config);

        assert_eq!(lines.len(), 1 + 5 + 2);
        assert!(lines[3].starts_with("..."));
        assert!(lines[5].starts_with('9'));
        assert_eq!(lines.last().unwrap(), "[10 rows x 1 columns]");
    }

    #[test]
    fn test_multi_level_header_blanks_repeats() {
        let mut table = Table::with_levels(
            vec!["date".to_string()],
            vec!["year".to_string(), "month".to_string()],
            vec![
                vec!["2020".to_string(), "1".to_string()],
                vec!["2020".to_string(), "2".to_string()],
                vec!["All".to_string(), String::new()],
            ],
        );
        table.push_row(
            vec!["2020-01-01".to_string()],
            vec![Cell::Amount(dec!(1)), Cell::Empty, Cell::Amount(dec!(1))],
        );
        let lines = table.render_text(&RenderConfig::default());

        assert_eq!(lines[0].split_whitespace().collect::<Vec<_>>(), vec!["year", "2020", "All"]);
        assert_eq!(lines[1].split_whitespace().collect::<Vec<_>>(), vec!["month", "1", "2"]);
        assert_eq!(lines[2], "date");
    }

    #[test]
    fn test_render_html_escapes_and_classes() {
        let mut table = Table::new(vec![String::new()], vec!["desc".to_string()]);
        table.push_row(vec!["0".to_string()], vec![Cell::from("<script>&")]);
        let html = table.render_html(&RenderConfig::default()).join("\n");

        assert!(html.starts_with(
            r#"<table border="1" class="dataframe table table-condensed table-hover table-bordered table-striped">"#
        ));
        assert!(html.contains("<td>&lt;script&gt;&amp;</td>"));
        assert!(!html.contains("<script>"));
        assert!(html.ends_with("</table>"));
    }
}
