//! Ordered, nested, uniquely keyed report sections.

use pfi_shared::RenderConfig;

use super::error::ReportError;
use super::html::escape_html;
use super::table::Table;

/// A boxed lazy sequence of rendered lines.
pub type Lines<'a> = Box<dyn Iterator<Item = String> + 'a>;

/// Value stored under one report key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportValue {
    /// A table, rendered aligned in text and as an HTML table.
    Tabular(Table),
    /// A nested report, rendered recursively.
    Nested(ReportTree),
    /// Preformatted text.
    Text(String),
}

impl From<Table> for ReportValue {
    fn from(table: Table) -> Self {
        Self::Tabular(table)
    }
}

impl From<ReportTree> for ReportValue {
    fn from(tree: ReportTree) -> Self {
        Self::Nested(tree)
    }
}

impl From<String> for ReportValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ReportValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Heading style of one tree level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingStyle {
    /// Character repeated under each key in text output.
    pub underline: char,
    /// HTML heading level, 1-6.
    pub level: u8,
}

impl Default for HeadingStyle {
    fn default() -> Self {
        Self {
            underline: '-',
            level: 3,
        }
    }
}

impl HeadingStyle {
    /// Top-level heading style from `config`.
    #[must_use]
    pub fn root(config: &RenderConfig) -> Self {
        Self {
            underline: config.root_heading_char,
            level: config.root_heading_level.clamp(1, 6),
        }
    }

    /// Nested heading style from `config`.
    #[must_use]
    pub fn section(config: &RenderConfig) -> Self {
        Self {
            underline: config.section_heading_char,
            level: config.section_heading_level.clamp(1, 6),
        }
    }
}

/// An ordered collection of named report values.
///
/// Keys are unique within one level; insertion order is rendering order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTree {
    style: HeadingStyle,
    entries: Vec<(String, ReportValue)>,
}

impl ReportTree {
    /// Creates an empty tree with the given heading style.
    #[must_use]
    pub fn new(style: HeadingStyle) -> Self {
        Self {
            style,
            entries: Vec::new(),
        }
    }

    /// Heading style of this level.
    #[must_use]
    pub const fn style(&self) -> HeadingStyle {
        self.style
    }

    /// Inserts `value` under `name` at this level.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::DuplicateKey` if `name` is already present; the
    /// existing value is kept.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ReportValue>,
    ) -> Result<(), ReportError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(ReportError::DuplicateKey(name));
        }
        self.entries.push((name, value.into()));
        Ok(())
    }

    /// Looks up the value stored under `name` at this level.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::KeyNotFound` if `name` is absent.
    pub fn get(&self, name: &str) -> Result<&ReportValue, ReportError> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
            .ok_or_else(|| ReportError::KeyNotFound(name.to_string()))
    }

    /// Returns true if `name` is present at this level.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReportValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of entries at this level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if this level has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the tree as text lines, one entry at a time.
    ///
    /// Each entry yields its key, an underline as long as the key, the
    /// value's lines, then a blank line.
    pub fn render_text<'a>(&'a self, config: &'a RenderConfig) -> Lines<'a> {
        let underline = self.style.underline;
        Box::new(self.entries.iter().flat_map(move |(key, value)| {
            let heading = [
                key.clone(),
                underline.to_string().repeat(key.chars().count()),
            ];
            let body: Lines<'a> = match value {
                ReportValue::Tabular(table) => Box::new(table.render_text(config).into_iter()),
                ReportValue::Nested(tree) => tree.render_text(config),
                ReportValue::Text(text) => Box::new(text.lines().map(str::to_string)),
            };
            heading
                .into_iter()
                .chain(body)
                .chain(std::iter::once(String::new()))
        }))
    }

    /// Renders the tree as HTML fragment lines, one entry at a time.
    ///
    /// Each entry is a `<div>` classed by its key holding a heading, then a
    /// nested tree, a responsive table, or a `<pre>` block.
    pub fn render_html<'a>(&'a self, config: &'a RenderConfig) -> Lines<'a> {
        let level = self.style.level;
        Box::new(self.entries.iter().flat_map(move |(key, value)| {
            let key = escape_html(key);
            let open = [
                format!(r#"<div class="{key}">"#),
                format!("<h{level}>{key}</h{level}>"),
            ];
            let body: Lines<'a> = match value {
                ReportValue::Tabular(table) => Box::new(
                    std::iter::once(r#"<div class="table-responsive">"#.to_string())
                        .chain(table.render_html(config))
                        .chain(std::iter::once("</div>".to_string())),
                ),
                ReportValue::Nested(tree) => tree.render_html(config),
                ReportValue::Text(text) => Box::new(
                    [
                        r#"<pre class="pandas_str">"#.to_string(),
                        escape_html(text),
                        "</pre>".to_string(),
                    ]
                    .into_iter(),
                ),
            };
            open.into_iter()
                .chain(body)
                .chain(std::iter::once("</div>".to_string()))
        }))
    }
}
