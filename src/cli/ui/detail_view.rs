use std::cmp;

use crate::browse::RecordDetail;

/// A simple key/value pair for display.
pub struct DetailField {
    pub key: String,
    pub value: String,
}

/// A detail view model: title, fields and trailing tags.
pub struct DetailView {
    pub title: String,
    pub fields: Vec<DetailField>,
    pub tags: Vec<String>,
}

impl DetailView {
    /// Creates a new detail view with the provided title.
    pub fn new<T: Into<String>>(title: T) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Builds the view for an expanded record.
    pub fn from_record(detail: &RecordDetail) -> Self {
        let card = &detail.card;
        let mut view = Self::new(format!("{} · {}", card.title, card.subtitle))
            .with_field("Logo", card.logo.clone())
            .with_field("Link", card.link.clone());
        for line in &detail.lines {
            view.add_field(line.label, line.value.clone());
        }
        view.tags = detail.tags.clone();
        view
    }

    /// Adds a field to the view, returning self for chaining.
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.add_field(key, value);
        self
    }

    /// Adds a field to the view in-place.
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.fields.push(DetailField {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Rendered lines, framed by rules.
    pub fn render_lines(&self) -> Vec<String> {
        let mut body = self.render_fields();
        if !self.tags.is_empty() {
            body.push(String::new());
            body.push(format!(
                "  Requirements: {}",
                self.tags
                    .iter()
                    .map(|tag| format!("[{tag}]"))
                    .collect::<Vec<_>>()
                    .join(" ")
            ));
        }

        let max_line_len = cmp::max(
            self.title.chars().count(),
            body.iter().map(|line| line.chars().count()).max().unwrap_or(0),
        );
        let rule = horizontal_rule(cmp::max(max_line_len, 40));

        let mut lines = Vec::with_capacity(body.len() + 3);
        lines.push(self.title.clone());
        lines.push(rule.clone());
        lines.extend(body);
        lines.push(rule);
        lines
    }

    fn render_fields(&self) -> Vec<String> {
        let max_key_len = self
            .fields
            .iter()
            .map(|field| field.key.chars().count())
            .max()
            .unwrap_or(0);

        self.fields
            .iter()
            .map(|field| {
                let padding = max_key_len.saturating_sub(field.key.chars().count()) + 2;
                format!("  {}:{}{}", field.key, " ".repeat(padding), field.value)
            })
            .collect()
    }
}

fn horizontal_rule(len: usize) -> String {
    "─".repeat(len.max(1))
}
