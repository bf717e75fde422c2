//! Response views - shape inference and the raw/table/cards renderers
//!
//! The renderers produce plain data; `ui` and `main` turn it into widgets.

use serde_json::{Map, Number, Value};

use crate::models::ViewMode;

/// Columns shown in table view, taken from the first record
pub const TABLE_MAX_COLUMNS: usize = 5;
/// Rows shown in table view
pub const TABLE_MAX_ROWS: usize = 10;
/// Fields listed per card
pub const CARD_MAX_FIELDS: usize = 6;
/// Cards shown in cards view
pub const MAX_CARDS: usize = 12;

/// What a response payload looks like, as far as the views care
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape<'a> {
    /// An array whose elements are all JSON objects (the empty array included)
    Records(Vec<&'a Map<String, Value>>),
    /// Any other array
    Sequence(&'a [Value]),
    Scalar(&'a Value),
}

impl<'a> ResponseShape<'a> {
    pub fn of(data: &'a Value) -> Self {
        match data {
            Value::Array(items) => {
                let records: Option<Vec<_>> = items.iter().map(Value::as_object).collect();
                match records {
                    Some(records) => ResponseShape::Records(records),
                    None => ResponseShape::Sequence(items),
                }
            }
            other => ResponseShape::Scalar(other),
        }
    }
}

/// Views that may be selected for this payload
pub fn legal_views(data: &Value) -> Vec<ViewMode> {
    match ResponseShape::of(data) {
        ResponseShape::Records(_) => vec![ViewMode::Raw, ViewMode::Table, ViewMode::Cards],
        ResponseShape::Sequence(_) | ResponseShape::Scalar(_) => vec![ViewMode::Raw],
    }
}

pub fn is_legal(data: &Value, mode: ViewMode) -> bool {
    legal_views(data).contains(&mode)
}

/// A table cell. Rows lacking one of the first record's keys get `Missing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCell {
    Text(String),
    Missing,
}

impl TableCell {
    pub fn as_str(&self) -> &str {
        match self {
            TableCell::Text(text) => text,
            TableCell::Missing => "",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<TableCell>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    /// Key and compact JSON literal of the value
    pub fields: Vec<(String, String)>,
}

/// A payload rendered for one view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedView {
    Raw(String),
    Table(TableView),
    Cards(Vec<Card>),
}

/// Render `data` for `mode`. Table and cards fall back to raw when the
/// payload is not an array of records.
pub fn render(data: &Value, mode: ViewMode) -> RenderedView {
    match (mode, ResponseShape::of(data)) {
        (ViewMode::Table, ResponseShape::Records(records)) => RenderedView::Table(render_table(&records)),
        (ViewMode::Cards, ResponseShape::Records(records)) => RenderedView::Cards(render_cards(&records)),
        _ => RenderedView::Raw(render_raw(data)),
    }
}

/// Pretty JSON of the whole payload. A bare string is shown as its text.
pub fn render_raw(data: &Value) -> String {
    match data {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

pub fn render_table(records: &[&Map<String, Value>]) -> TableView {
    let Some(first) = records.first() else {
        return TableView::default();
    };

    let columns: Vec<String> = first.keys().take(TABLE_MAX_COLUMNS).cloned().collect();

    let rows = records
        .iter()
        .take(TABLE_MAX_ROWS)
        .map(|record| {
            columns
                .iter()
                .map(|key| match record.get(key) {
                    Some(value) => TableCell::Text(display_string(value)),
                    None => TableCell::Missing,
                })
                .collect()
        })
        .collect();

    TableView { columns, rows }
}

pub fn render_cards(records: &[&Map<String, Value>]) -> Vec<Card> {
    records
        .iter()
        .take(MAX_CARDS)
        .enumerate()
        .map(|(index, record)| Card {
            title: format!("Item {}", index + 1),
            fields: record
                .iter()
                .take(CARD_MAX_FIELDS)
                .map(|(key, value)| (key.clone(), value.to_string()))
                .collect(),
        })
        .collect()
}

/// Loose display coercion used for table cells: strings lose their quotes,
/// arrays are joined with commas and objects collapse to a placeholder.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => display_number(n),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Whole floats print without a fractional part (`2.0` -> `2`)
fn display_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wide_records(count: usize) -> Value {
        Value::Array(
            (0..count)
                .map(|i| {
                    json!({
                        "id": i, "name": format!("user{i}"), "email": "x@y.z", "age": 30,
                        "active": true, "role": "admin", "team": "core", "city": "Lima"
                    })
                })
                .collect(),
        )
    }

    #[test]
    fn test_array_of_objects_allows_every_view() {
        let data = json!([{"a": 1}, {"a": 2}]);
        assert_eq!(legal_views(&data), vec![ViewMode::Raw, ViewMode::Table, ViewMode::Cards]);
    }

    #[test]
    fn test_array_of_scalars_is_raw_only() {
        assert_eq!(legal_views(&json!([1, 2, 3])), vec![ViewMode::Raw]);
    }

    #[test]
    fn test_object_is_raw_only() {
        assert_eq!(legal_views(&json!({})), vec![ViewMode::Raw]);
        assert_eq!(legal_views(&json!("Connection failed")), vec![ViewMode::Raw]);
    }

    #[test]
    fn test_empty_array_is_vacuously_records() {
        let data = json!([]);
        assert_eq!(legal_views(&data), vec![ViewMode::Raw, ViewMode::Table, ViewMode::Cards]);
        assert_eq!(render(&data, ViewMode::Table), RenderedView::Table(TableView::default()));
        assert_eq!(render(&data, ViewMode::Cards), RenderedView::Cards(Vec::new()));
    }

    #[test]
    fn test_null_or_nested_array_elements_are_not_records() {
        assert!(matches!(ResponseShape::of(&json!([{"a": 1}, null])), ResponseShape::Sequence(_)));
        assert!(matches!(ResponseShape::of(&json!([{"a": 1}, [1]])), ResponseShape::Sequence(_)));
    }

    #[test]
    fn test_table_truncates_rows_and_columns() {
        let data = wide_records(15);
        let RenderedView::Table(table) = render(&data, ViewMode::Table) else {
            panic!("expected table");
        };
        assert_eq!(table.rows.len(), TABLE_MAX_ROWS);
        assert_eq!(table.columns, vec!["id", "name", "email", "age", "active"]);
        assert!(table.rows.iter().all(|row| row.len() == TABLE_MAX_COLUMNS));
        assert_eq!(table.rows[9][1], TableCell::Text("user9".to_string()));
    }

    #[test]
    fn test_table_missing_key_renders_empty_cell() {
        let data = json!([{"a": 1, "b": 2}, {"b": 3}, {"b": 4, "a": 5, "c": 6}]);
        let RenderedView::Table(table) = render(&data, ViewMode::Table) else {
            panic!("expected table");
        };
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.rows[1], vec![TableCell::Missing, TableCell::Text("3".to_string())]);
        assert_eq!(table.rows[1][0].as_str(), "");
        // Cells follow the header keys, not the row's own key order
        assert_eq!(
            table.rows[2],
            vec![TableCell::Text("5".to_string()), TableCell::Text("4".to_string())]
        );
    }

    #[test]
    fn test_table_cells_use_display_coercion() {
        let data = json!([{"s": "plain", "n": null, "o": {"k": 1}, "l": [1, null, "x"], "f": 1.5}]);
        let table = match render(&data, ViewMode::Table) {
            RenderedView::Table(table) => table,
            other => panic!("expected table, got {other:?}"),
        };
        let cells: Vec<&str> = table.rows[0].iter().map(TableCell::as_str).collect();
        assert_eq!(cells, vec!["plain", "null", "[object Object]", "1,,x", "1.5"]);
    }

    #[test]
    fn test_whole_floats_display_as_integers() {
        let data = json!([{"a": 2.0, "b": -0.5, "c": [3.0, 4], "d": 10}]);
        let table = match render(&data, ViewMode::Table) {
            RenderedView::Table(table) => table,
            other => panic!("expected table, got {other:?}"),
        };
        let cells: Vec<&str> = table.rows[0].iter().map(TableCell::as_str).collect();
        assert_eq!(cells, vec!["2", "-0.5", "3,4", "10"]);
    }

    #[test]
    fn test_cards_truncate_count_and_fields() {
        let data = wide_records(15);
        let RenderedView::Cards(cards) = render(&data, ViewMode::Cards) else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), MAX_CARDS);
        assert_eq!(cards[0].title, "Item 1");
        assert_eq!(cards[11].title, "Item 12");
        assert!(cards.iter().all(|card| card.fields.len() == CARD_MAX_FIELDS));
        assert_eq!(cards[0].fields[5].0, "role");
    }

    #[test]
    fn test_cards_show_json_literals() {
        let data = json!([{"name": "Ada", "tags": ["a"], "meta": {"k": null}}]);
        let RenderedView::Cards(cards) = render(&data, ViewMode::Cards) else {
            panic!("expected cards");
        };
        assert_eq!(
            cards[0].fields,
            vec![
                ("name".to_string(), "\"Ada\"".to_string()),
                ("tags".to_string(), "[\"a\"]".to_string()),
                ("meta".to_string(), "{\"k\":null}".to_string()),
            ]
        );
    }

    #[test]
    fn test_raw_is_not_truncated() {
        let data = wide_records(15);
        let RenderedView::Raw(text) = render(&data, ViewMode::Raw) else {
            panic!("expected raw");
        };
        assert!(text.contains("user14"));
        assert!(text.contains("\"city\": \"Lima\""));
    }

    #[test]
    fn test_raw_shows_bare_strings_unquoted() {
        assert_eq!(render_raw(&json!("Connection failed")), "Connection failed");
        assert_eq!(render_raw(&json!(null)), "null");
    }

    #[test]
    fn test_table_request_on_non_records_falls_back_to_raw() {
        assert_eq!(render(&json!([1, 2]), ViewMode::Table), RenderedView::Raw("[\n  1,\n  2\n]".to_string()));
    }
}
