use std::fmt;
use std::sync::Arc;

use crate::form::FormContext;

pub const DEFAULT_MIN_INPUT_LENGTH: usize = 1;

/// Resolved lookup target around the typed term: `<prefix><term>?<suffix>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryTarget {
    /// Path placed between the endpoint path and the term
    pub prefix: String,
    /// Query string without the leading `?`, may be empty
    pub suffix: String,
}

impl QueryTarget {
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: String::new(),
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

/// Builds the lookup target of a typed term.
#[derive(Clone, Default)]
pub enum QuerySource {
    /// `<selected node>/`
    #[default]
    Node,
    /// Constant prefix, no query string
    Fixed(String),
    Custom(Arc<dyn Fn(&FormContext) -> QueryTarget + Send + Sync>),
}

impl fmt::Debug for QuerySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuerySource::Node => f.write_str("Node"),
            QuerySource::Fixed(s) => f.debug_tuple("Fixed").field(s).finish(),
            QuerySource::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl QuerySource {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&FormContext) -> QueryTarget + Send + Sync + 'static,
    {
        QuerySource::Custom(Arc::new(f))
    }

    /// Without a selected node the default prefix is `fallback_node/`.
    pub fn resolve(&self, context: &FormContext, fallback_node: &str) -> QueryTarget {
        match self {
            QuerySource::Node => QueryTarget::prefix(format!("{}/", context.node.as_deref().unwrap_or(fallback_node))),
            QuerySource::Fixed(s) => QueryTarget::prefix(s.as_str()),
            QuerySource::Custom(f) => f(context),
        }
    }
}

/// Settings of the remote picker attached to one input.
#[derive(Clone, Debug)]
pub struct PickerOptions {
    /// Endpoint path relative to the REST base, e.g. `service/vm/aws/`
    pub path: String,
    pub query: QuerySource,
    pub min_input_length: usize,
    /// Offer the typed text as a new entry when no result matches it
    pub allow_new: bool,
    /// Lower-case the id of a new entry
    pub lowercase: bool,
    /// Marker shown on entries that were typed rather than found remotely
    pub new_marker: String,
}

impl PickerOptions {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            query: QuerySource::default(),
            min_input_length: DEFAULT_MIN_INPUT_LENGTH,
            allow_new: false,
            lowercase: false,
            new_marker: "new".to_string(),
        }
    }

    pub fn with_query(mut self, query: QuerySource) -> Self {
        self.query = query;
        self
    }

    pub fn allow_new(mut self, allow_new: bool, lowercase: bool) -> Self {
        self.allow_new = allow_new;
        self.lowercase = lowercase;
        self
    }

    pub fn with_new_marker(mut self, marker: &str) -> Self {
        self.new_marker = marker.to_string();
        self
    }
}
