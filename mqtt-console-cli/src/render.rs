//! Plain-text table output.

use mqtt_console_lib::table::Alignment;
use mqtt_console_lib::table::ColumnWidth;
use mqtt_console_lib::table::RenderedTable;
use tabled::builder::Builder;
use tabled::settings::Style;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Terminal width used when `COLUMNS` is not set.
pub const DEFAULT_WIDTH: usize = 120;

/// Border and padding around each cell of a rounded table.
const CELL_FRAME: usize = 3;
const MIN_COLUMN: usize = 3;

/// Width of the terminal, from `COLUMNS`.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse().ok())
        .filter(|width| *width >= 20)
        .unwrap_or(DEFAULT_WIDTH)
}

struct Column {
    title: String,
    width: ColumnWidth,
    align: Alignment,
}

/// Formats `view` into at most `width` display cells per line.
///
/// Percentage widths share what is left after fixed and auto-sized
/// columns. Cells that do not fit are cut with `…`.
pub fn render_table(view: &RenderedTable, width: usize) -> String {
    let mut columns: Vec<Column> = view
        .headers
        .iter()
        .map(|header| Column {
            title: header.title.clone(),
            width: header.width,
            align: header.align,
        })
        .collect();
    let mut rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| row.cells.iter().map(|cell| cell.text.clone()).collect())
        .collect();

    if view.rows.iter().any(|row| !row.actions.is_empty()) {
        columns.push(Column {
            title: "Actions".to_string(),
            width: ColumnWidth::Auto,
            align: Alignment::Left,
        });
        for (cells, row) in rows.iter_mut().zip(&view.rows) {
            let labels: Vec<_> = row.actions.iter().map(|a| a.label.as_str()).collect();
            cells.push(labels.join(", "));
        }
    }

    let widths = column_widths(&columns, &rows, width);
    let mut builder = Builder::default();
    builder.push_record(
        columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| layout_cell(&column.title, *width, Alignment::Left)),
    );
    for row in &rows {
        builder.push_record(columns.iter().zip(&widths).enumerate().map(
            |(index, (column, width))| {
                let text = row.get(index).map(String::as_str).unwrap_or_default();
                layout_cell(text, *width, column.align)
            },
        ));
    }
    let mut table = builder.build();
    table.with(Style::rounded());

    let mut out = String::new();
    if !view.title.is_empty() {
        out.push_str(&view.title);
        out.push('\n');
    }
    out.push_str(&table.to_string());
    out.push('\n');
    if let Some(message) = &view.empty_message {
        out.push_str(message);
        out.push('\n');
    }
    if let Some(error) = &view.error {
        out.push_str(&format!("error: {error}\n"));
    }
    out.push_str(&summary(view));
    out.push('\n');
    out
}

/// `Page 2 of 3, 12 total`, plus a hint when more pages follow.
pub fn summary(view: &RenderedTable) -> String {
    let mut text = format!(
        "Page {} of {}, {} total",
        view.page + 1,
        view.total_pages.max(1),
        view.total_elements
    );
    if view.has_next {
        text.push_str(&format!(" (next: --page {})", view.page + 1));
    }
    text
}

fn column_widths(columns: &[Column], rows: &[Vec<String>], width: usize) -> Vec<usize> {
    let natural = |index: usize| {
        rows.iter()
            .filter_map(|row| row.get(index))
            .map(|cell| cell.width())
            .chain(std::iter::once(columns[index].title.width()))
            .max()
            .unwrap_or(0)
    };

    let frame = 1 + CELL_FRAME * columns.len();
    let mut fixed = 0;
    let mut percent_total = 0usize;
    let mut widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| match column.width {
            ColumnWidth::Absolute(w) => {
                fixed += usize::from(w);
                usize::from(w)
            }
            ColumnWidth::Auto => {
                let w = natural(index);
                fixed += w;
                w
            }
            ColumnWidth::Percent(p) => {
                percent_total += usize::from(p);
                0
            }
        })
        .collect();

    let share = width.saturating_sub(frame + fixed);
    let scale = percent_total.max(100);
    for (index, column) in columns.iter().enumerate() {
        if let ColumnWidth::Percent(p) = column.width {
            widths[index] = share * usize::from(p) / scale;
        }
    }
    widths.iter_mut().for_each(|w| *w = (*w).max(MIN_COLUMN));
    widths
}

/// Cuts and pads `text` to exactly `width` display cells.
fn layout_cell(text: &str, width: usize, align: Alignment) -> String {
    let text = fit(text, width);
    let pad = width.saturating_sub(text.width());
    let (left, right) = match align {
        Alignment::Left => (0, pad),
        Alignment::Right => (pad, 0),
        Alignment::Center => (pad / 2, pad - pad / 2),
    };
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

fn fit(text: &str, width: usize) -> String {
    // Cells are single-line.
    let text = text.replace(['\n', '\r'], " ");
    if text.width() <= width {
        return text;
    }
    let mut cut = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width.saturating_sub(1) {
            break;
        }
        cut.push(ch);
        used += w;
    }
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use mqtt_console_lib::table::CellStyle;
    use mqtt_console_lib::table::RenderedAction;
    use mqtt_console_lib::table::RenderedCell;
    use mqtt_console_lib::table::RenderedHeader;
    use mqtt_console_lib::table::RenderedRow;

    use super::*;

    fn header(title: &str, width: ColumnWidth) -> RenderedHeader {
        RenderedHeader {
            key: title.to_lowercase(),
            title: title.to_string(),
            width,
            align: Alignment::Left,
        }
    }

    fn row(index: usize, cells: &[&str]) -> RenderedRow {
        RenderedRow {
            index,
            cells: cells
                .iter()
                .map(|text| RenderedCell {
                    text: text.to_string(),
                    style: CellStyle::default(),
                })
                .collect(),
            actions: Vec::new(),
            selected: false,
        }
    }

    fn topics() -> RenderedTable {
        RenderedTable {
            title: "Topics".into(),
            headers: vec![
                header("Name", ColumnWidth::Percent(70)),
                header("Size", ColumnWidth::Percent(30)),
            ],
            rows: vec![row(0, &["orders", "1.00 KB"]), row(1, &["events", "500 B"])],
            page: 0,
            page_size: 5,
            total_pages: 1,
            total_elements: 2,
            ..RenderedTable::default()
        }
    }

    /// Lines of the table frame, without title and summary.
    fn frame(text: &str) -> Vec<&str> {
        text.lines()
            .filter(|line| line.starts_with(['╭', '│', '├', '╰']))
            .collect()
    }

    /// Display columns at which `│` appears in `line`.
    fn borders(line: &str) -> Vec<usize> {
        let mut column = 0;
        let mut found = Vec::new();
        for ch in line.chars() {
            if ch == '│' {
                found.push(column);
            }
            column += ch.width().unwrap_or(0);
        }
        found
    }

    #[test]
    fn test_percent_widths() {
        let text = render_table(&topics(), 42);
        assert_eq!(text.lines().next(), Some("Topics"));
        let lines = frame(&text);
        // Header, two rows, and three rules.
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|line| line.width() == 41));
        // 35 cells to share: 24 + 10.
        assert_eq!(borders(lines[1]), [0, 27, 40]);
        assert!(lines[1].starts_with("│ Name "));
        assert_eq!(text.lines().last(), Some("Page 1 of 1, 2 total"));
    }

    #[test]
    fn test_wide_characters_stay_aligned() {
        let mut view = topics();
        view.headers = vec![
            header("Topic", ColumnWidth::Percent(50)),
            header("Value", ColumnWidth::Percent(50)),
        ];
        view.rows = vec![
            row(0, &["传感器/温度", "21.5"]),
            row(1, &["sensor/temp", "21.5"]),
        ];
        let text = render_table(&view, 42);
        let rows: Vec<_> = frame(&text)
            .into_iter()
            .filter(|line| line.starts_with('│'))
            .map(borders)
            .collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| *row == rows[0]));
    }

    #[test]
    fn test_long_cells_are_cut() {
        let mut view = topics();
        view.rows = vec![
            row(0, &["a-very-long-topic-name", "1 B"]),
            row(1, &["传感器温度传感器温度传感器温度", "1 B"]),
        ];
        let text = render_table(&view, 27);
        // 20 cells to share: 14 + 6.
        assert!(text.contains("│ a-very-long-t… │"));
        // A wide character that would cross the edge leaves one blank cell.
        assert!(text.contains("│ 传感器温度传…  │"));
        assert!(frame(&text).iter().all(|line| line.width() == 27));
    }

    #[test]
    fn test_empty_page() {
        let mut view = topics();
        view.rows.clear();
        view.total_elements = 0;
        view.empty_message = Some("No Kafka topics found".into());
        let text = render_table(&view, 42);
        assert!(text.contains("\nNo Kafka topics found\n"));
        assert!(text.ends_with("Page 1 of 1, 0 total\n"));
    }

    #[test]
    fn test_actions_column_and_next_hint() {
        let mut view = topics();
        view.rows[0].actions.push(RenderedAction {
            name: "retained-message.delete".into(),
            label: "Delete".into(),
            icon: "delete".into(),
            is_mdi_icon: false,
        });
        view.has_next = true;
        view.total_pages = 2;
        let text = render_table(&view, 60);
        assert!(frame(&text)[1].trim_end().ends_with("Actions │"));
        assert!(text.contains("│ Delete  │"));
        assert!(text.ends_with("Page 1 of 2, 2 total (next: --page 1)\n"));
    }

    #[test]
    fn test_fit_pads_to_display_width() {
        assert_eq!(layout_cell("温度", 5, Alignment::Right), " 温度");
        assert_eq!(layout_cell("ab", 4, Alignment::Center), " ab ");
        assert_eq!(fit("two\nlines", 20), "two lines");
    }
}
