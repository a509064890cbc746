//! Column descriptors and cell values.

use std::sync::Arc;

use serde_json::Value;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Width of a column as given in its descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnWidth {
    /// Share of the table width, `"25%"`.
    Percent(u16),
    /// Fixed width, `"120px"` or a bare number.
    Absolute(u16),
    /// Sized by the rendering surface.
    #[default]
    Auto,
}

impl ColumnWidth {
    /// Parses a width token. Unrecognised tokens mean [`ColumnWidth::Auto`].
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if let Some(percent) = token.strip_suffix('%') {
            return percent
                .trim()
                .parse()
                .map(Self::Percent)
                .unwrap_or_default();
        }
        token
            .strip_suffix("px")
            .unwrap_or(token)
            .trim()
            .parse()
            .map(Self::Absolute)
            .unwrap_or_default()
    }
}

/// What a cell shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellValue {
    /// Literal text.
    Text(String),
    /// A translation key, resolved when the table is rendered.
    Key(String),
    /// Nothing.
    #[default]
    Empty,
}

impl CellValue {
    /// Creates a cell showing the translation of `key`.
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    /// Converts a JSON value into display text.
    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::String(s) => Self::Text(s.clone()),
            Value::Bool(b) => Self::Text(b.to_string()),
            Value::Number(n) => Self::Text(n.to_string()),
            other => Self::Text(other.to_string()),
        }
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Style hints for a cell. The rendering surface decides how to apply them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellStyle {
    /// CSS-style colour, e.g. `#008A00`.
    pub color: Option<String>,
    pub bold: bool,
}

impl CellStyle {
    /// A style with only a colour set.
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            bold: false,
        }
    }
}

pub(crate) type ValueAccessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;
pub(crate) type StyleAccessor<T> = Arc<dyn Fn(&T) -> CellStyle + Send + Sync>;

/// One column of an entity table.
///
/// Without a value accessor, `key` is looked up as a dotted property path in
/// the row's JSON form (`"subscriptions.0.topic"`). A path that does not
/// resolve yields an empty cell.
///
/// # Example
///
/// ```
/// use mqtt_console_lib::format::format_bytes;
/// use mqtt_console_lib::model::KafkaTopic;
/// use mqtt_console_lib::table::ColumnDescriptor;
///
/// let size = ColumnDescriptor::<KafkaTopic>::new("size", "kafka.size", "10%")
///     .value(|topic| format_bytes(topic.size).into());
/// ```
pub struct ColumnDescriptor<T> {
    pub key: String,
    /// Translation key of the header.
    pub title: String,
    pub width: ColumnWidth,
    pub align: Alignment,
    value: Option<ValueAccessor<T>>,
    style: Option<StyleAccessor<T>>,
}

impl<T> ColumnDescriptor<T> {
    /// Creates a column reading `key` from each row.
    pub fn new(key: impl Into<String>, title: impl Into<String>, width: &str) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            width: ColumnWidth::parse(width),
            align: Alignment::Left,
            value: None,
            style: None,
        }
    }

    /// Computes the cell value from the row instead of reading `key`.
    pub fn value(mut self, accessor: impl Fn(&T) -> CellValue + Send + Sync + 'static) -> Self {
        self.value = Some(Arc::new(accessor));
        self
    }

    /// Attaches per-row style hints.
    pub fn style(mut self, accessor: impl Fn(&T) -> CellStyle + Send + Sync + 'static) -> Self {
        self.style = Some(Arc::new(accessor));
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Returns `true` if cells are read from the row's JSON form.
    pub(crate) fn needs_json(&self) -> bool {
        self.value.is_none()
    }

    /// Resolves the cell for `row`. `json` is the row's JSON form, required
    /// when [`needs_json`](Self::needs_json) is `true`.
    pub(crate) fn cell(&self, row: &T, json: Option<&Value>) -> CellValue {
        if let Some(accessor) = &self.value {
            return accessor(row);
        }
        json.and_then(|json| lookup(json, &self.key))
            .map(CellValue::from_json)
            .unwrap_or_default()
    }

    /// Style hints for `row`.
    pub(crate) fn cell_style(&self, row: &T) -> CellStyle {
        self.style
            .as_ref()
            .map(|accessor| accessor(row))
            .unwrap_or_default()
    }
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
