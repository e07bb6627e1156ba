//! Rendering primitives owned by the host framework.
//!
//! Renderers receive a `Host` explicitly and delegate to it wherever the plugin
//! extends a base behaviour, instead of resolving a parent implementation by name.
use askama::Template;

use crate::dom::escape_html;
use crate::i18n::{Locale, Messages};
use crate::models::Subscription;

/// A (label key, value markup) row of the details card.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
}

impl DetailRow {
    pub fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Action link description handed to [`Host::render_service_link`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceLink<'a> {
    pub icon: &'a str,
    pub href: &'a str,
    /// Message key of the tooltip
    pub title: &'a str,
    pub text: Option<&'a str>,
    /// Extra CSS class of the anchor
    pub class: Option<&'a str>,
    pub new_tab: bool,
}

pub trait Host {
    fn messages(&self) -> &Messages;

    /// Generic key rendering: the parameter value, or an empty string.
    fn render_key(&self, subscription: &Subscription, parameter: &str) -> String {
        subscription
            .parameter(parameter)
            .map(escape_html)
            .unwrap_or_default()
    }

    fn icon(&self, name: &str, tooltip: Option<&str>) -> String {
        match tooltip {
            Some(key) => format!(
                "<i class=\"fas fa-{}\" data-toggle=\"tooltip\" title=\"{}\"></i> ",
                escape_html(name),
                escape_html(self.messages().get(key))
            ),
            None => format!("<i class=\"fas fa-{}\"></i> ", escape_html(name)),
        }
    }

    fn render_service_link(&self, link: &ServiceLink<'_>) -> String {
        let class = match link.class {
            Some(c) => format!("feature {}", c),
            None => "feature".to_string(),
        };
        let target = if link.new_tab { " target=\"_blank\"" } else { "" };
        format!(
            "<a href=\"{}\" class=\"{}\" data-toggle=\"tooltip\" title=\"{}\"{}><i class=\"fas fa-{}\"></i>{}</a>",
            escape_html(link.href),
            escape_html(&class),
            escape_html(self.messages().get(link.title)),
            target,
            escape_html(link.icon),
            link.text.map(|t| format!(" {}", escape_html(t))).unwrap_or_default()
        )
    }

    /// Human readable size of a byte count, binary units.
    fn format_size(&self, bytes: u64) -> String {
        format_size(bytes)
    }

    /// Card of rows; `None` rows are skipped here, not by the renderers.
    fn generate_carousel(&self, subscription: &Subscription, rows: &[Option<DetailRow>], columns: usize) -> String;
}

const SIZE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];

pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if (value - value.round()).abs() < 0.05 {
        format!("{} {}", value.round() as u64, SIZE_UNITS[unit])
    } else {
        format!("{:.1} {}", value, SIZE_UNITS[unit])
    }
}

struct CarouselRow<'a> {
    label: &'a str,
    value: &'a str,
}

#[derive(Template)]
#[template(
    source = r#"<div class="carousel-details" data-subscription="{{ subscription }}" data-columns="{{ columns }}">{% for row in rows %}<div class="details-row"><span class="details-label">{{ row.label }}</span><span class="details-value">{{ row.value|safe }}</span></div>{% endfor %}</div>"#,
    ext = "html"
)]
struct CarouselTemplate<'a> {
    subscription: String,
    columns: usize,
    rows: Vec<CarouselRow<'a>>,
}

/// Stand-alone host used by the CLI, the preview server and tests.
#[derive(Clone, Debug)]
pub struct DefaultHost {
    messages: Messages,
}

impl DefaultHost {
    pub fn new(locale: Locale) -> Self {
        Self {
            messages: Messages::load(locale),
        }
    }
}

impl Default for DefaultHost {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl Host for DefaultHost {
    fn messages(&self) -> &Messages {
        &self.messages
    }

    fn generate_carousel(&self, subscription: &Subscription, rows: &[Option<DetailRow>], columns: usize) -> String {
        let template = CarouselTemplate {
            subscription: subscription.id.map(|id| id.to_string()).unwrap_or_default(),
            columns: columns.max(1),
            rows: rows
                .iter()
                .flatten()
                .map(|r| CarouselRow {
                    label: self.messages.get(&r.label),
                    value: &r.value,
                })
                .collect(),
        };
        match template.render() {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(%e, "Template render error");
                String::new()
            }
        }
    }
}
