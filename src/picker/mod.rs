//! Remote object picker attached to a form input.
//!
//! Builds lookup queries from the typed term, offers typed text as a new entry,
//! keeps only the latest response, and renders the selection summary block.
pub mod client;
pub mod options;
pub mod results;
pub mod tracker;

use std::fmt;
use std::sync::Arc;

use askama::Template;
use urlencoding::encode;

use crate::dom::{Element, Node};
use crate::error::Result;
use crate::form::FormContext;
use crate::models::{FormParameter, RemoteObject, Selection};

pub use client::{LookupClient, RemoteLookup};
pub use options::{PickerOptions, QuerySource, QueryTarget};
pub use results::unwrap_results;
pub use tracker::RequestTracker;

/// Lookup target: endpoint path, resolved prefix, the typed term and a query string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RemoteQuery {
    pub path: String,
    pub prefix: String,
    pub term: String,
    /// Query string without the leading `?`
    pub suffix: String,
}

impl RemoteQuery {
    /// `<path><prefix><encoded term>[?<suffix>]`, the term is always its own path segment.
    pub fn to_relative_url(&self) -> String {
        let mut url = format!("{}{}{}", self.path, self.prefix, encode(&self.term));
        if !self.suffix.is_empty() {
            url.push('?');
            url.push_str(&self.suffix);
        }
        url
    }
}

/// Optional handler notified after the picker handled a change.
#[derive(Clone)]
pub struct ChangeHandler(Arc<dyn Fn(&FormParameter, &Selection) + Send + Sync>);

impl ChangeHandler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&FormParameter, &Selection) + Send + Sync + 'static,
    {
        ChangeHandler(Arc::new(f))
    }
}

impl fmt::Debug for ChangeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChangeHandler(..)")
    }
}

#[derive(Debug, PartialEq)]
pub enum SearchOutcome {
    /// Below the minimum input length, nothing was requested
    TooShort,
    /// A later search was issued while this one was in flight
    Superseded,
    Results(Vec<RemoteObject>),
}

#[derive(Template)]
#[template(
    source = r#"<span class="picked-id">{{ id }}</span>{% if let Some(name) = name %} <span class="picked-name">{{ name }}</span>{% endif %}{% if let Some(key) = key %} <code class="picked-key">{{ key }}</code>{% endif %}{% if let Some(description) = description %}<br><em class="picked-description">{{ description }}</em>{% endif %}{% if is_new %} <span class="label label-warning picked-new">{{ new_marker }}</span>{% endif %}"#,
    ext = "html"
)]
struct SelectionTemplate<'a> {
    id: &'a str,
    name: Option<&'a str>,
    key: Option<&'a str>,
    description: Option<&'a str>,
    is_new: bool,
    new_marker: &'a str,
}

#[derive(Clone, Debug)]
pub struct RemotePicker {
    input_id: String,
    parameter: FormParameter,
    options: PickerOptions,
    fallback_node: String,
    tracker: Arc<RequestTracker>,
    on_change: Option<ChangeHandler>,
}

impl RemotePicker {
    pub fn new(
        input_id: &str,
        parameter: &FormParameter,
        options: PickerOptions,
        fallback_node: &str,
        on_change: Option<ChangeHandler>,
    ) -> Self {
        Self {
            input_id: input_id.to_string(),
            parameter: parameter.clone(),
            options,
            fallback_node: fallback_node.to_string(),
            tracker: Arc::new(RequestTracker::new()),
            on_change,
        }
    }

    pub fn input_id(&self) -> &str {
        &self.input_id
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    /// Query for `term`, `None` below the minimum input length.
    pub fn query(&self, term: &str, context: &FormContext) -> Option<RemoteQuery> {
        let term = term.trim();
        if term.chars().count() < self.options.min_input_length {
            return None;
        }
        let target = self.options.query.resolve(context, &self.fallback_node);
        Some(RemoteQuery {
            path: self.options.path.clone(),
            prefix: target.prefix,
            term: term.to_string(),
            suffix: target.suffix,
        })
    }

    /// Entry synthesized from typed text when new entries are allowed.
    pub fn create_search_choice(&self, term: &str) -> Option<RemoteObject> {
        let term = term.trim();
        if !self.options.allow_new || term.is_empty() {
            return None;
        }
        let id = if self.options.lowercase {
            term.to_lowercase()
        } else {
            term.to_string()
        };
        Some(RemoteObject {
            id,
            name: Some(term.to_string()),
            new: true,
            ..RemoteObject::default()
        })
    }

    /// Remote results, preceded by the typed entry when no result already has its id.
    pub fn candidates(&self, term: &str, results: Vec<RemoteObject>) -> Vec<RemoteObject> {
        match self.create_search_choice(term) {
            Some(choice) if !results.iter().any(|r| r.id.eq_ignore_ascii_case(&choice.id)) => {
                let mut all = Vec::with_capacity(results.len() + 1);
                all.push(choice);
                all.extend(results);
                all
            }
            _ => results,
        }
    }

    /// Runs a lookup for `term`; transport errors are returned as-is for the picker to display.
    pub async fn search<L: RemoteLookup>(&self, term: &str, context: &FormContext, lookup: &L) -> Result<SearchOutcome> {
        let Some(query) = self.query(term, context) else {
            return Ok(SearchOutcome::TooShort);
        };
        let sequence = self.tracker.issue();
        tracing::debug!(input = %self.input_id, sequence, url = %query.to_relative_url(), "Picker lookup");
        let response = lookup.lookup(&query).await;
        let response = match self.tracker.accept(sequence, response) {
            Ok(current) => current,
            Err(stale) => {
                if let Err(e) = stale {
                    tracing::debug!(input = %self.input_id, sequence, error = %e, "Superseded lookup failed");
                }
                return Ok(SearchOutcome::Superseded);
            }
        };
        let results = response?;
        Ok(SearchOutcome::Results(self.candidates(term, results)))
    }

    /// Replaces the summary block after the input with one describing the added entry.
    pub fn on_change(&self, container: &mut Element, selection: &Selection) {
        let alert_id = self.parameter.alert_id();
        container.remove_by_id(&alert_id);

        if let Some(added) = selection.added.as_ref().filter(|a| !a.id.is_empty()) {
            let body = self.render_selection(added);
            let block = Element::new("div")
                .with_id(&alert_id)
                .with_class("alert alert-info")
                .with_raw(&body);
            let input_id = self.input_id.as_str();
            if !container.insert_after(&|e: &Element| e.id.as_deref() == Some(input_id), Node::Element(block)) {
                tracing::warn!(input = input_id, "Picker input not found, selection summary dropped");
            }
        }

        if let Some(handler) = &self.on_change {
            (handler.0)(&self.parameter, selection);
        }
    }

    fn render_selection(&self, object: &RemoteObject) -> String {
        let template = SelectionTemplate {
            id: &object.id,
            name: object.name.as_deref().filter(|n| !n.is_empty()),
            key: object.display_key(),
            description: object.description.as_deref().filter(|d| !d.is_empty()),
            is_new: object.new,
            new_marker: &self.options.new_marker,
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn picker(options: PickerOptions, handler: Option<ChangeHandler>) -> RemotePicker {
        RemotePicker::new("p", &FormParameter::new("p", true), options, "service:vm:aws", handler)
    }

    fn form() -> Element {
        Element::new("form").with_child(
            Element::new("div")
                .with_class("form-group")
                .with_child(Element::new("input").with_id("p")),
        )
    }

    #[test]
    fn test_query_threshold_and_default_prefix() {
        let p = picker(PickerOptions::new("service/vm/aws/"), None);
        let context = FormContext::default();
        assert_eq!(p.query(" ", &context), None);
        let q = p.query("web 1", &context).unwrap();
        assert_eq!(q.to_relative_url(), "service/vm/aws/service:vm:aws/web%201");

        let selected = FormContext {
            node: Some("service:vm:aws:prod".into()),
            ..FormContext::default()
        };
        assert_eq!(p.query("x", &selected).unwrap().prefix, "service:vm:aws:prod/");
    }

    #[test]
    fn test_query_suffix_follows_term_segment() {
        let source = QuerySource::custom(|_: &FormContext| QueryTarget::prefix("n/").with_suffix("a=1&b="));
        let p = picker(PickerOptions::new("service/vm/aws/").with_query(source), None);
        let q = p.query("i-0 ab", &FormContext::default()).unwrap();
        assert_eq!(q.to_relative_url(), "service/vm/aws/n/i-0%20ab?a=1&b=");
    }

    #[test]
    fn test_new_entry_is_lowercased_and_marked() {
        let p = picker(PickerOptions::new("x/").allow_new(true, true), None);
        let choice = p.create_search_choice("MyId").unwrap();
        assert_eq!(choice.id, "myid");
        assert_eq!(choice.name.as_deref(), Some("MyId"));
        assert!(choice.new);

        let keep_case = picker(PickerOptions::new("x/").allow_new(true, false), None);
        assert_eq!(keep_case.create_search_choice("MyId").unwrap().id, "MyId");
        assert!(picker(PickerOptions::new("x/"), None).create_search_choice("MyId").is_none());
    }

    #[test]
    fn test_candidates_skip_known_ids() {
        let p = picker(PickerOptions::new("x/").allow_new(true, true), None);
        let found = RemoteObject {
            id: "i-1".into(),
            ..RemoteObject::default()
        };
        assert_eq!(p.candidates("I-1", vec![found.clone()]), vec![found.clone()]);
        let all = p.candidates("i-2", vec![found]);
        assert_eq!(all.len(), 2);
        assert!(all[0].new);
    }

    #[test]
    fn test_on_change_replaces_alert() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let p = picker(
            PickerOptions::new("x/").with_new_marker("to verify"),
            Some(ChangeHandler::new(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            })),
        );
        let mut container = form();
        let first = RemoteObject {
            id: "i-1".into(),
            name: Some("web".into()),
            pkey: Some("pk".into()),
            description: Some("front <b>".into()),
            ..RemoteObject::default()
        };
        p.on_change(&mut container, &Selection::added(first));
        p.on_change(
            &mut container,
            &Selection::added(RemoteObject {
                id: "i-2".into(),
                new: true,
                ..RemoteObject::default()
            }),
        );
        let html = container.to_html();
        assert_eq!(html.matches("id=\"p_alert\"").count(), 1);
        assert!(html.contains("<span class=\"picked-id\">i-2</span>"));
        assert!(html.contains("to verify"));
        assert!(html.find("id=\"p\"").unwrap() < html.find("p_alert").unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_on_change_summary_fields() {
        let p = picker(PickerOptions::new("x/"), None);
        let mut container = form();
        p.on_change(
            &mut container,
            &Selection::added(RemoteObject {
                id: "i-1".into(),
                name: Some("web".into()),
                pkey: Some("pk".into()),
                description: Some("front <b>".into()),
                ..RemoteObject::default()
            }),
        );
        let html = container.to_html();
        assert!(html.contains("<span class=\"picked-name\">web</span>"));
        assert!(html.contains("<code class=\"picked-key\">pk</code>"));
        assert!(html.contains("front &lt;b&gt;"));
        assert!(!html.contains("picked-new"));
    }

    #[test]
    fn test_on_change_without_added_only_clears() {
        let p = picker(PickerOptions::new("x/"), None);
        let mut container = form();
        p.on_change(
            &mut container,
            &Selection::added(RemoteObject {
                id: "i-1".into(),
                ..RemoteObject::default()
            }),
        );
        p.on_change(&mut container, &Selection::default());
        assert!(container.find_by_id("p_alert").is_none());
    }
}
