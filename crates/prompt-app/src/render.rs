//! Plain-text rendering of dispatch outcomes for the terminal.

use prompt_engine::{CommandHelp, CommandSummary};
use prompt_types::ResponseEnvelope;

/// Render a success envelope as an aligned table plus the status line.
pub fn render_envelope(envelope: &ResponseEnvelope) -> String {
    let mut lines = Vec::new();

    if !envelope.data.is_empty() {
        let columns = column_names(&envelope.data);
        let mut rows: Vec<Vec<String>> = Vec::new();
        for value in &envelope.data {
            rows.push(
                columns
                    .iter()
                    .map(|c| cell_text(value.get(c.as_str())))
                    .collect(),
            );
        }
        lines.extend(render_table(&columns, &rows));
    }

    if envelope.is_error {
        lines.push(format!("error: {}", envelope.output));
    } else {
        lines.push(envelope.output.clone());
    }

    if let Some(paging) = &envelope.paging_info {
        lines.push(format!(
            "page {} of {} ({} per page)",
            paging.page_no, paging.total_pages, paging.page_size,
        ));
    }

    lines.join("\n")
}

/// Render a help payload.
pub fn render_help(help: &CommandHelp) -> String {
    let mut lines = vec![help.name.clone(), format!("  {}", help.description)];
    if !help.options.is_empty() {
        lines.push("  Options:".to_string());
        for option in &help.options {
            let default = option
                .default
                .as_ref()
                .map(|d| format!(" (default: {d})"))
                .unwrap_or_default();
            lines.push(format!("    -{:<10} {}{default}", option.flag, option.description));
        }
    }
    lines.join("\n")
}

/// Render the `list` output: one line per registered command.
pub fn render_summaries(summaries: &[CommandSummary]) -> String {
    let headers = vec!["command".to_string(), "description".to_string()];
    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| vec![s.key.to_ascii_lowercase(), s.description.clone()])
        .collect();
    render_table(&headers, &rows).join("\n")
}

/// Column names from the first row object (serde_json keeps them sorted).
fn column_names(data: &[serde_json::Value]) -> Vec<String> {
    data.first()
        .and_then(|v| v.as_object())
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default()
}

fn cell_text(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Pad each column to its widest cell.
fn render_table(headers: &[String], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_row(headers)];
    for row in rows {
        lines.push(format_row(row));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt_types::ConsoleResult;

    #[test]
    fn envelope_renders_rows_output_and_paging() {
        let result = ConsoleResult::paged(
            vec![
                serde_json::json!({"userId": 1, "username": "jdoe"}),
                serde_json::json!({"userId": 2, "username": "bsmith"}),
            ],
            2,
            1,
            10,
            "Users found.",
            "No users found.",
        );
        let text = render_envelope(&ResponseEnvelope::from(result));
        assert!(text.contains("userId"));
        assert!(text.contains("jdoe"));
        assert!(text.contains("Users found."));
        assert!(text.contains("page 1 of 1 (10 per page)"));
    }

    #[test]
    fn error_envelope_is_prefixed() {
        let text = render_envelope(&ResponseEnvelope::from(ConsoleResult::error("boom")));
        assert_eq!(text, "error: boom");
    }

    #[test]
    fn help_lists_options_with_defaults() {
        let help = CommandHelp {
            name: "users.list-users".into(),
            description: "Lists users.".into(),
            options: vec![prompt_engine::HelpOption {
                flag: "max".into(),
                description: "Page size.".into(),
                default: Some("10".into()),
            }],
        };
        let text = render_help(&help);
        assert!(text.contains("users.list-users"));
        assert!(text.contains("-max"));
        assert!(text.contains("(default: 10)"));
    }
}
