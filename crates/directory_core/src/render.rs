//! Card view-models and their HTML markup.
//!
//! Building the model is pure; painting it is left to whoever owns the page.
//! Every record value is escaped before it reaches markup since the
//! activities document is not trusted input.

use crate::filter::FilterState;
use crate::options::{Dimension, FilterOptionSet};
use crate::schema::{present, ActivityRecord};

pub const DEFAULT_EMPTY_MESSAGE: &str = "No activities found. Try clearing filters.";
pub const DEFAULT_PLACEHOLDER: &str = "—";
pub const DEFAULT_UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    pub empty_message: String,
    pub placeholder: String,
    pub untitled: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            untitled: DEFAULT_UNTITLED.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub label: &'static str,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub title: String,
    pub description: Option<String>,
    pub facts: Vec<Fact>,
    pub tags: Vec<String>,
    pub links: Vec<LinkView>,
    pub how_to_apply: Option<String>,
}

impl CardView {
    pub fn from_record(record: &ActivityRecord, settings: &RenderSettings) -> Self {
        let mut facts = Vec::new();
        // Age, type and category always show; location and language only when set.
        for dimension in [Dimension::Age, Dimension::Type, Dimension::Category] {
            facts.push(Fact {
                label: dimension.label(),
                value: record
                    .dimension(dimension)
                    .unwrap_or(&settings.placeholder)
                    .to_string(),
            });
        }
        for dimension in [Dimension::Location, Dimension::Language] {
            if let Some(value) = record.dimension(dimension) {
                facts.push(Fact {
                    label: dimension.label(),
                    value: value.to_string(),
                });
            }
        }

        let mut links = Vec::new();
        if let Some(href) = present(&record.link) {
            links.push(LinkView {
                label: "Learn more",
                href: href.to_string(),
            });
        }
        if let Some(href) = present(&record.link2) {
            links.push(LinkView {
                label: "More info",
                href: href.to_string(),
            });
        }

        Self {
            title: present(&record.name).unwrap_or(&settings.untitled).to_string(),
            description: present(&record.description).map(str::to_string),
            facts,
            tags: record.tag_list(),
            links,
            how_to_apply: present(&record.how_to_apply).map(str::to_string),
        }
    }
}

/// What the grid should show for the current match set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderModel {
    Cards(Vec<CardView>),
    Empty { message: String },
}

impl RenderModel {
    pub fn build(records: &[&ActivityRecord], settings: &RenderSettings) -> Self {
        if records.is_empty() {
            return RenderModel::Empty {
                message: settings.empty_message.clone(),
            };
        }
        RenderModel::Cards(
            records
                .iter()
                .map(|record| CardView::from_record(record, settings))
                .collect(),
        )
    }

    pub fn card_count(&self) -> usize {
        match self {
            RenderModel::Cards(cards) => cards.len(),
            RenderModel::Empty { .. } => 0,
        }
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_grid(model: &RenderModel) -> String {
    match model {
        RenderModel::Empty { message } => format!(
            "<div class=\"activity-card empty\"><p>{}</p></div>\n",
            escape_html(message)
        ),
        RenderModel::Cards(cards) => cards.iter().map(render_card).collect(),
    }
}

fn render_card(card: &CardView) -> String {
    let mut html = String::new();
    html.push_str("<article class=\"activity-card\" role=\"listitem\">\n");
    html.push_str(&format!("  <h3>{}</h3>\n", escape_html(&card.title)));
    if let Some(description) = &card.description {
        html.push_str(&format!("  <p>{}</p>\n", escape_html(description)));
    }

    html.push_str("  <div class=\"kv\">\n");
    for fact in &card.facts {
        html.push_str(&format!(
            "    <div><strong>{}:</strong> {}</div>\n",
            fact.label,
            escape_html(&fact.value)
        ));
    }
    html.push_str("  </div>\n");

    if !card.tags.is_empty() {
        html.push_str("  <div class=\"tags\">");
        for tag in &card.tags {
            html.push_str(&format!("<span class=\"tag\">{}</span>", escape_html(tag)));
        }
        html.push_str("</div>\n");
    }

    if let Some(how) = &card.how_to_apply {
        html.push_str(&format!(
            "  <p class=\"how-to-apply\"><strong>How to apply:</strong> {}</p>\n",
            escape_html(how)
        ));
    }

    html.push_str("  <div class=\"card-actions\">");
    for link in &card.links {
        html.push_str(&format!(
            "<a class=\"btn\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            escape_html(&link.href),
            link.label
        ));
    }
    html.push_str("</div>\n");
    html.push_str("</article>\n");
    html
}

/// Search box plus one multi-select per dimension, current selection marked.
pub fn render_filter_controls(options: &FilterOptionSet, state: &FilterState) -> String {
    let mut html = String::new();
    html.push_str("<form class=\"filters\" method=\"get\">\n");
    html.push_str(&format!(
        "  <input type=\"search\" id=\"searchBar\" name=\"search\" placeholder=\"Search activities\" value=\"{}\">\n",
        escape_html(state.search())
    ));
    for dimension in Dimension::ALL {
        let selected = state.selected(dimension);
        html.push_str(&format!(
            "  <select id=\"{key}Filter\" name=\"{key}\" multiple aria-label=\"{label}\">\n",
            key = dimension.key(),
            label = dimension.label()
        ));
        for value in options.get(dimension) {
            let marker = if selected.contains(value) { " selected" } else { "" };
            let escaped = escape_html(value);
            html.push_str(&format!(
                "    <option value=\"{escaped}\"{marker}>{escaped}</option>\n"
            ));
        }
        html.push_str("  </select>\n");
    }
    html.push_str("  <button type=\"reset\" id=\"clearFilters\">Clear filters</button>\n");
    html.push_str("</form>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chess() -> ActivityRecord {
        ActivityRecord {
            name: Some("Chess Club".to_string()),
            age: Some("8-12".to_string()),
            kind: Some("Club".to_string()),
            category: Some("Strategy".to_string()),
            tags: Some("indoor, ,weekly".to_string()),
            link: Some("https://example.org/chess".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_card_view_placeholders() {
        let record = ActivityRecord {
            age: Some("8-12".to_string()),
            ..Default::default()
        };
        let card = CardView::from_record(&record, &RenderSettings::default());
        assert_eq!(card.title, "Untitled");
        assert_eq!(card.description, None);
        let values: Vec<&str> = card.facts.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(values, vec!["8-12", "—", "—"]);
        assert!(card.links.is_empty());
        assert!(card.tags.is_empty());
    }

    #[test]
    fn test_card_view_optional_facts_and_links() {
        let record = ActivityRecord {
            location: Some("Online".to_string()),
            link: Some("  ".to_string()),
            link2: Some("https://b.example".to_string()),
            ..Default::default()
        };
        let card = CardView::from_record(&record, &RenderSettings::default());
        assert_eq!(card.facts.len(), 4);
        assert_eq!(card.facts[3].label, "Location");
        assert_eq!(
            card.links,
            vec![LinkView {
                label: "More info",
                href: "https://b.example".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_model_is_single_placeholder() {
        let model = RenderModel::build(&[], &RenderSettings::default());
        assert_eq!(model.card_count(), 0);
        let html = render_grid(&model);
        assert_eq!(html.matches("class=\"activity-card").count(), 1);
        assert!(html.contains(DEFAULT_EMPTY_MESSAGE));
    }

    #[test]
    fn test_grid_renders_one_card_per_record() {
        let first = chess();
        let second = ActivityRecord {
            name: Some("Soccer".to_string()),
            ..Default::default()
        };
        let model = RenderModel::build(&[&first, &second], &RenderSettings::default());
        let html = render_grid(&model);
        assert_eq!(html.matches("<article").count(), 2);
        assert!(html.find("Chess Club").unwrap() < html.find("Soccer").unwrap());
    }

    #[test]
    fn test_tags_become_badges() {
        let record = chess();
        let model = RenderModel::build(&[&record], &RenderSettings::default());
        let html = render_grid(&model);
        assert!(html.contains("<span class=\"tag\">indoor</span><span class=\"tag\">weekly</span>"));
        assert_eq!(html.matches("class=\"tag\"").count(), 2);
    }

    #[test]
    fn test_links_open_new_context() {
        let record = chess();
        let html = render_grid(&RenderModel::build(&[&record], &RenderSettings::default()));
        assert!(html.contains(
            "<a class=\"btn\" href=\"https://example.org/chess\" target=\"_blank\" rel=\"noopener\">Learn more</a>"
        ));
    }

    #[test]
    fn test_markup_is_escaped_everywhere() {
        let record = ActivityRecord {
            name: Some("<script>alert(1)</script>".to_string()),
            description: Some("Tom & \"Jerry\"".to_string()),
            age: Some("<b>".to_string()),
            tags: Some("<i>x</i>".to_string()),
            link: Some("\" onclick=\"evil".to_string()),
            how_to_apply: Some("it's <easy>".to_string()),
            ..Default::default()
        };
        let html = render_grid(&RenderModel::build(&[&record], &RenderSettings::default()));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(!html.contains("<i>"));
        assert!(!html.contains("\" onclick"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Tom &amp; &quot;Jerry&quot;"));
        assert!(html.contains("it&#39;s &lt;easy&gt;"));
    }

    #[test]
    fn test_empty_message_is_escaped() {
        let settings = RenderSettings {
            empty_message: "<none>".to_string(),
            ..Default::default()
        };
        let html = render_grid(&RenderModel::build(&[], &settings));
        assert!(html.contains("&lt;none&gt;"));
    }

    #[test]
    fn test_search_box_shows_term_as_typed() {
        let html = render_filter_controls(
            &FilterOptionSet::default(),
            &FilterState::new().with_search("Chess"),
        );
        assert!(html.contains("name=\"search\" placeholder=\"Search activities\" value=\"Chess\""));
    }

    #[test]
    fn test_filter_controls_mark_selection() {
        let record = chess();
        let options = FilterOptionSet::derive(std::slice::from_ref(&record));
        let state = FilterState::new()
            .with_search("a\"b")
            .with_selection(Dimension::Category, ["Strategy"]);
        let html = render_filter_controls(&options, &state);
        assert!(html.contains("value=\"a&quot;b\""));
        assert!(html.contains("<option value=\"Strategy\" selected>Strategy</option>"));
        assert!(html.contains("<option value=\"8-12\">8-12</option>"));
        assert_eq!(html.matches("<select").count(), Dimension::ALL.len());
    }
}
