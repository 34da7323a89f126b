use incydr_engine::{Result, iter_model_formatted};
use incydr_types::{Record, RenderHint, Value};
use owo_colors::OwoColorize;

const ITEM_SEPARATOR: &str = "---";

/// Box the given items, one or more lines each, under an optional title.
///
/// ```text
/// ╭─ tags ─╮
/// │ one    │
/// │ two    │
/// ╰────────╯
/// ```
pub fn list_as_panel<S: AsRef<str>>(
    items: &[S],
    sep: Option<&str>,
    title: Option<&str>,
) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        if idx > 0
            && let Some(sep) = sep
        {
            lines.push(sep);
        }
        lines.extend(item.as_ref().lines());
    }

    let title_width = title.map(|t| t.chars().count() + 2).unwrap_or(0);
    let width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(title_width);

    let top = match title {
        Some(title) => format!(
            "╭─ {} {}╮",
            title,
            "─".repeat(width + 2 - 3 - title.chars().count())
        ),
        None => format!("╭{}╮", "─".repeat(width + 2)),
    };

    let mut out = vec![top];
    for line in lines {
        let pad = width - line.chars().count();
        out.push(format!("│ {}{} │", line, " ".repeat(pad)));
    }
    out.push(format!("╰{}╯", "─".repeat(width + 2)));
    out.join("\n")
}

/// Render a record vertically as `name: value` lines over its flattened
/// fields, using the table rendering of each field where one is declared.
///
/// Lists get their own panel: lists of records become nested cards separated
/// by `---`, empty lists print as `name: []`.
pub fn model_as_card<S: AsRef<str>>(
    record: &Record,
    include: &[S],
    styled: bool,
) -> Result<String> {
    let mut out = Vec::new();

    for item in iter_model_formatted(record, include, true, Some(RenderHint::Table))? {
        let (name, value) = item?;
        match value {
            Value::List(items) if items.is_empty() => out.push(format!("{}: []", name)),
            Value::List(items) if matches!(items.first(), Some(Value::Record(_))) => {
                let cards = items
                    .iter()
                    .filter_map(Value::as_record)
                    .map(|child| model_as_card::<&str>(child, &[], false))
                    .collect::<Result<Vec<_>>>()?;
                out.push(list_as_panel(&cards, Some(ITEM_SEPARATOR), Some(&name)));
            }
            Value::List(items) => {
                let lines: Vec<String> = items.iter().map(Value::to_string).collect();
                out.push(list_as_panel(&lines, None, Some(&name)));
            }
            other if styled => out.push(format!("{}: {}", name.bold(), other)),
            other => out.push(format!("{}: {}", name, other)),
        }
    }

    Ok(out.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use incydr_models::ALERT_DETAILS;
    use serde_json::json;

    #[test]
    fn test_panel_widens_to_fit_title() {
        insta::assert_snapshot!(list_as_panel(&["one", "two"], None, Some("tags")), @r"
        ╭─ tags ─╮
        │ one    │
        │ two    │
        ╰────────╯
        ");
    }

    #[test]
    fn test_panel_with_separator_and_no_title() {
        insta::assert_snapshot!(list_as_panel(&["a\nbb", "c"], Some("---"), None), @r"
        ╭─────╮
        │ a   │
        │ bb  │
        │ --- │
        │ c   │
        ╰─────╯
        ");
    }

    #[test]
    fn test_alert_card() {
        let record = Record::from_json(
            &ALERT_DETAILS,
            &json!({
                "tenantId": "t",
                "type": "FED_FILE_NAME",
                "name": "Rule",
                "createdAt": "2020-02-19T01:57:45Z",
                "state": "OPEN",
                "notificationInfo": [],
                "watchlists": [
                    {"name": "Leavers", "type": "DEPARTING_EMPLOYEE", "isSignificant": true},
                ],
                "observations": [
                    {"id": "o1", "observedAt": "2020-02-19T01:57:45Z", "type": "FedCloud"},
                    {"id": "o2", "observedAt": "2020-02-20T08:00:00Z"},
                ],
            }),
        )
        .unwrap();

        let card = model_as_card(
            &record,
            &["name", "created_at", "watchlists", "notification_info", "observations"],
            false,
        )
        .unwrap();

        insta::assert_snapshot!(card, @r"
        name: Rule
        created_at: 2020-02-19T01:57:45Z
        ╭─ watchlists ───────────────────╮
        │ Leavers (DEPARTING_EMPLOYEE) * │
        ╰────────────────────────────────╯
        notification_info: []
        ╭─ observations ────────────────────╮
        │ id: o1                            │
        │ observed_at: 2020-02-19T01:57:45Z │
        │ last_observed_at: null            │
        │ type: FedCloud                    │
        │ data: null                        │
        │ ---                               │
        │ id: o2                            │
        │ observed_at: 2020-02-20T08:00:00Z │
        │ last_observed_at: null            │
        │ type: null                        │
        │ data: null                        │
        ╰───────────────────────────────────╯
        ");
    }
}
