#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    /// Terminal width; wider columns shrink until the table fits.
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render an aligned table for string rows. Widths count characters, so
/// names with accents or the truncation ellipsis line up.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
                .max(6)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| {
            let text = truncate_text(header, *width);
            format_cell(&text, *width, false, false)
        })
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(strip_ansi(&header_line).chars().count());

    let row_lines = rows
        .iter()
        .map(|row| {
            widths
                .iter()
                .enumerate()
                .map(|(index, width)| {
                    let value = row.get(index).cloned().unwrap_or_else(|| "-".to_string());
                    let truncated = truncate_text(&value, *width);
                    let numeric = looks_numeric(&truncated);
                    let colored = if options.color {
                        colorize_status(&truncated)
                    } else {
                        truncated
                    };
                    format_cell(&colored, *width, numeric, options.color)
                })
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>();

    let mut lines = Vec::with_capacity(2 + row_lines.len());
    lines.push(header_line);
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

/// Shrink the widest column one character at a time until the table fits
/// `max_width`. Columns never shrink below their header or six characters.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].chars().count().max(6))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }

    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ','))
}

fn format_cell(value: &str, width: usize, numeric: bool, has_ansi: bool) -> String {
    let plain_len = if has_ansi {
        strip_ansi(value).chars().count()
    } else {
        value.chars().count()
    };
    let pad = width.saturating_sub(plain_len);
    if numeric {
        format!("{}{}", " ".repeat(pad), value)
    } else {
        format!("{}{}", value, " ".repeat(pad))
    }
}

/// Green for passing values, yellow for provisional ones, red for failures.
fn colorize_status(value: &str) -> String {
    let code = match value.to_ascii_lowercase().as_str() {
        "compliant" | "positive" | "submitted" | "true" => Some("32"),
        "draft" | "neutral" | "not_applicable" => Some("33"),
        "not_compliant" | "negative" | "comply_lacking_permits" | "provide_lacking_facilities" => {
            Some("31")
        }
        _ => None,
    };

    match code {
        Some(code) => format!("\u{1b}[{code}m{value}\u{1b}[0m"),
        None => value.to_string(),
    }
}

fn strip_ansi(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' && chars.peek() == Some(&'[') {
            let _ = chars.next();
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_cells_are_truncated_to_fit() {
        let rows = vec![vec![
            "qst-1".to_string(),
            "Wastewater discharge permit displayed at the entrance".to_string(),
        ]];
        let table = render_entity_table(
            &["id", "text"],
            &rows,
            TableOptions {
                max_width: Some(30),
                color: false,
            },
        );
        let last = table.lines().last().expect("row line");
        assert!(last.chars().count() <= 30);
        assert!(last.ends_with('…'));
    }

    #[test]
    fn verdicts_are_colored() {
        assert_eq!(colorize_status("compliant"), "\u{1b}[32mcompliant\u{1b}[0m");
        assert_eq!(colorize_status("not_compliant"), "\u{1b}[31mnot_compliant\u{1b}[0m");
        assert_eq!(colorize_status("res-1"), "res-1");
    }

    #[test]
    fn ansi_codes_do_not_count_toward_width() {
        assert_eq!(strip_ansi("\u{1b}[33mdraft\u{1b}[0m"), "draft");
    }

    #[test]
    fn numbers_are_right_aligned() {
        assert_eq!(format_cell("75.5", 8, true, false), "    75.5");
        assert_eq!(format_cell("Air", 8, false, false), "Air     ");
    }
}
