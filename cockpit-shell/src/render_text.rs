//! Plain-text rendering of view trees for the terminal.

use cockpit_widgets::{ListRow, View};

const INDENT: &str = "  ";

pub fn render(view: &View) -> String {
    let mut out = String::new();
    write_block(&mut out, view);
    out
}

fn write_block(out: &mut String, view: &View) {
    match view {
        View::Column { children } => {
            for child in children {
                write_block(out, child);
            }
        }
        View::List { rows } => {
            for row in rows {
                write_row(out, row);
            }
        }
        other => {
            out.push_str(&inline(other));
            out.push('\n');
        }
    }
}

fn inline(view: &View) -> String {
    match view {
        View::Column { children } | View::Row { children } => {
            children.iter().map(inline).collect::<Vec<_>>().join(" ")
        }
        View::Heading { text } => format!("# {}", text),
        View::Text { text } => text.clone(),
        View::Button { label, disabled } => {
            if *disabled {
                format!("[{}] (disabled)", label)
            } else {
                format!("[{}]", label)
            }
        }
        View::Progress { .. } => "...".to_string(),
        View::Alert { message } => format!("error: {}", message),
        View::List { rows } => rows
            .iter()
            .map(|row| row.primary.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn write_row(out: &mut String, row: &ListRow) {
    out.push_str(&format!("- {}", row.primary));
    if let Some(badge) = &row.badge {
        out.push_str(&format!(" [{}]", badge.label));
    }
    out.push('\n');

    if let Some(secondary) = row.secondary.as_deref().filter(|s| !s.is_empty()) {
        out.push_str(&format!("{}{}\n", INDENT, secondary));
    }
}
