//! # View - Toolkit-Neutral View Tree
//!
//! Panels render into this small declarative tree; the host maps it onto its
//! own widgets (or, for the headless reference host, onto text).
//!
//! The tree is `Serialize` so hosts in another process can consume it as JSON.

use serde::Serialize;

/// Visual treatment of a status badge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Success,
    Neutral,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: String,
    pub tone: BadgeTone,
}

/// One list entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListRow {
    /// Stable identity across renders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub primary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    pub divider: bool,
}

impl ListRow {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            key: None,
            primary: primary.into(),
            secondary: None,
            badge: None,
            divider: false,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_secondary(mut self, secondary: impl Into<String>) -> Self {
        self.secondary = Some(secondary.into());
        self
    }

    pub fn with_badge(mut self, label: impl Into<String>, tone: BadgeTone) -> Self {
        self.badge = Some(Badge {
            label: label.into(),
            tone,
        });
        self
    }

    pub fn with_divider(mut self) -> Self {
        self.divider = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    Column { children: Vec<View> },
    Row { children: Vec<View> },
    Heading { text: String },
    Text { text: String },
    Button { label: String, disabled: bool },
    Progress { size: u32 },
    /// Error notice
    Alert { message: String },
    List { rows: Vec<ListRow> },
}

impl View {
    pub fn column(children: Vec<View>) -> Self {
        Self::Column { children }
    }

    pub fn row(children: Vec<View>) -> Self {
        Self::Row { children }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Self::Heading { text: text.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn button(label: impl Into<String>, disabled: bool) -> Self {
        Self::Button {
            label: label.into(),
            disabled,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Alert {
            message: message.into(),
        }
    }

    pub fn list(rows: Vec<ListRow>) -> Self {
        Self::List { rows }
    }

    /// Visit this node and all descendants depth-first
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a View)) {
        visit(self);
        if let Self::Column { children } | Self::Row { children } = self {
            for child in children {
                child.walk(visit);
            }
        }
    }

    /// All list rows in the tree, in order
    pub fn list_rows(&self) -> Vec<&ListRow> {
        let mut rows = Vec::new();
        self.walk(&mut |node| {
            if let View::List { rows: list } = node {
                rows.extend(list.iter());
            }
        });
        rows
    }

    /// Messages of all alerts in the tree
    pub fn alerts(&self) -> Vec<&str> {
        let mut alerts = Vec::new();
        self.walk(&mut |node| {
            if let View::Alert { message } = node {
                alerts.push(message.as_str());
            }
        });
        alerts
    }

    pub fn has_list(&self) -> bool {
        let mut found = false;
        self.walk(&mut |node| found |= matches!(node, View::List { .. }));
        found
    }

    pub fn has_progress(&self) -> bool {
        let mut found = false;
        self.walk(&mut |node| found |= matches!(node, View::Progress { .. }));
        found
    }

    /// Every piece of text the user can read, in document order
    pub fn texts(&self) -> Vec<&str> {
        let mut texts = Vec::new();
        self.walk(&mut |node| match node {
            View::Heading { text } | View::Text { text } => texts.push(text.as_str()),
            View::Button { label, .. } => texts.push(label.as_str()),
            View::Alert { message } => texts.push(message.as_str()),
            View::List { rows } => {
                for row in rows {
                    texts.push(row.primary.as_str());
                    if let Some(secondary) = &row.secondary {
                        texts.push(secondary.as_str());
                    }
                    if let Some(badge) = &row.badge {
                        texts.push(badge.label.as_str());
                    }
                }
            }
            View::Column { .. } | View::Row { .. } | View::Progress { .. } => {}
        });
        texts
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| *t == needle)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> View {
        View::column(vec![
            View::heading("Title"),
            View::button("Go", true),
            View::row(vec![View::Progress { size: 18 }, View::text("Working")]),
            View::list(vec![ListRow::new("one")
                .with_key("1")
                .with_secondary("/a")
                .with_badge("ok", BadgeTone::Success)]),
        ])
    }

    #[test]
    fn test_queries_walk_nested_nodes() {
        let view = sample();
        assert!(view.has_progress());
        assert!(view.has_list());
        assert!(view.alerts().is_empty());
        assert_eq!(view.list_rows().len(), 1);
        assert_eq!(view.texts(), vec!["Title", "Go", "Working", "one", "/a", "ok"]);
        assert!(view.contains_text("Working"));
        assert!(!view.contains_text("Work"));
    }

    #[test]
    fn test_json_shape() {
        let json = View::error("boom").to_json();
        assert_eq!(json["kind"], "alert");
        assert_eq!(json["message"], "boom");

        let json = sample().to_json();
        let row = &json["children"][3]["rows"][0];
        assert_eq!(row["key"], "1");
        assert_eq!(row["badge"]["tone"], "success");
    }
}
