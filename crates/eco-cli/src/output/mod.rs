use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Columns shown first when present; the rest follow alphabetically.
const LEADING_COLUMNS: &[&str] = &["id", "question_id", "category", "status", "verdict"];

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => Ok(render_object_table(map)),
        scalar => {
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&["value"], &rows, table_options()))
        }
    }
}

/// Key/value listing. Nested objects are flattened one level as
/// `parent.child`; arrays of objects get their own table underneath.
fn render_object_table(map: Map<String, Value>) -> String {
    let mut pairs = Vec::new();
    let mut sections = Vec::new();

    for (key, value) in map {
        match value {
            Value::Object(inner) => {
                for (child, child_value) in inner {
                    pairs.push(vec![format!("{key}.{child}"), value_to_cell(&child_value)]);
                }
            }
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
                sections.push((key, items));
            }
            other => pairs.push(vec![key, value_to_cell(&other)]),
        }
    }
    pairs.sort_by(|a, b| a[0].cmp(&b[0]));

    let mut out = table::render_entity_table(&["key", "value"], &pairs, table_options());
    for (key, items) in sections {
        out.push_str(&format!("\n\n{key}:\n"));
        out.push_str(&render_array_table(&items));
    }
    out
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, table_options());
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    if headers.is_empty() {
        return String::from("(no columns)");
    }

    headers.sort_by(|a, b| column_rank(a).cmp(&column_rank(b)).then_with(|| a.cmp(b)));

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, table_options())
}

fn column_rank(header: &str) -> usize {
    LEADING_COLUMNS
        .iter()
        .position(|leading| *leading == header)
        .unwrap_or(LEADING_COLUMNS.len())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::{render, table::render_entity_table};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Tally {
        positive: u32,
        negative: u32,
    }

    #[derive(Serialize)]
    struct Row {
        verdict: &'static str,
        id: &'static str,
        establishment_id: &'static str,
    }

    #[derive(Serialize)]
    struct Report {
        overall: Tally,
        overall_rate: f64,
        rows: Vec<Row>,
    }

    fn report() -> Report {
        Report {
            overall: Tally {
                positive: 3,
                negative: 1,
            },
            overall_rate: 75.0,
            rows: vec![Row {
                verdict: "compliant",
                id: "res-1",
                establishment_id: "est-1",
            }],
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&report(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["overall"]["positive"], 3);
        assert_eq!(parsed["overall_rate"], 75.0);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&report(), OutputFormat::Raw).expect("raw render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["rows"][0]["id"], "res-1");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_flattens_nested_objects() {
        let out = render(&report(), OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("overall.positive"));
        assert!(out.contains("overall_rate"));
        assert!(out.contains("rows:"));
    }

    #[test]
    fn table_render_puts_id_and_verdict_first() {
        let rows = vec![Row {
            verdict: "not_compliant",
            id: "res-2",
            establishment_id: "est-9",
        }];
        let out = render(&rows, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("header line");
        let id_at = header.find("id").expect("id column");
        let verdict_at = header.find("verdict").expect("verdict column");
        let establishment_at = header.find("establishment_id").expect("establishment column");
        assert!(id_at < verdict_at);
        assert!(verdict_at < establishment_at);
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let rows: Vec<Row> = Vec::new();
        let out = render(&rows, OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }

    #[test]
    fn table_alignment_handles_mixed_widths() {
        let headers = ["id", "verdict", "establishment"];
        let rows = vec![
            vec!["res-1".to_string(), "compliant".to_string(), "Cafe".to_string()],
            vec![
                "res-200".to_string(),
                "not_compliant".to_string(),
                "Harbor Fish Market".to_string(),
            ],
        ];

        let table = render_entity_table(
            &headers,
            &rows,
            super::table::TableOptions {
                max_width: None,
                color: false,
            },
        );
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("verdict"));
        assert!(lines[1].chars().all(|c| c == '-'));
    }
}
