//! Text renderings of a [`ResultSet`].

use serde_json::Value as JsonValue;
use unicode_width::UnicodeWidthStr;

use crate::db::ResultSet;

pub fn format_value(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "NULL".to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(_) | JsonValue::Object(_) => value.to_string(),
    }
}

fn pad(text: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    if right_align {
        format!("{}{}", fill, text)
    } else {
        format!("{}{}", text, fill)
    }
}

/// Grid in the style of the MySQL command-line client; numbers are
/// right-aligned.
pub fn format_as_table(result: &ResultSet) -> String {
    if result.columns.is_empty() {
        return "Empty set\n".to_string();
    }

    let cells: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(format_value).collect())
        .collect();

    let mut widths: Vec<usize> = result.columns.iter().map(|c| c.width()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let separator: String = widths
        .iter()
        .map(|w| format!("+{}", "-".repeat(w + 2)))
        .collect::<String>()
        + "+\n";

    let mut output = separator.clone();
    let header: String = result
        .columns
        .iter()
        .zip(&widths)
        .map(|(name, w)| format!("| {} ", pad(name, *w, false)))
        .collect::<String>()
        + "|\n";
    output.push_str(&header);
    output.push_str(&separator);

    for (row, text) in result.rows.iter().zip(&cells) {
        let line: String = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let numeric = matches!(row.get(i), Some(JsonValue::Number(_)));
                let cell = text.get(i).map(String::as_str).unwrap_or("");
                format!("| {} ", pad(cell, *w, numeric))
            })
            .collect::<String>()
            + "|\n";
        output.push_str(&line);
    }

    output.push_str(&separator);
    let row_text = if result.row_count() == 1 { "row" } else { "rows" };
    output.push_str(&format!("{} {} in set\n", result.row_count(), row_text));

    output
}

pub fn format_as_csv(result: &ResultSet) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&result.columns)?;
    for row in &result.rows {
        writer.write_record(row.iter().map(format_value))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `{"columns": [...], "rows": [[...], ...]}`, keeping column order.
pub fn format_as_json(result: &ResultSet) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
}
