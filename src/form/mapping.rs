use std::collections::HashMap;
use std::sync::Arc;

use crate::dom::Element;
use crate::models::FormParameter;

use super::provider::{FieldDecorator, FieldProvider, Fieldset, StandardProvider};

/// Base provider of one parameter plus its decorators, in registration order.
#[derive(Clone, Default)]
struct ProviderChain {
    base: Option<Arc<dyn FieldProvider>>,
    decorators: Vec<Arc<dyn FieldDecorator>>,
}

/// Parameter name to field provider chain, shared by every extension of one form.
///
/// Invoking a chain runs its base provider (or the `standard` one), then every
/// decorator once, oldest first: the last registered wraps all the others.
#[derive(Clone)]
pub struct ProviderMapping {
    standard: Arc<dyn FieldProvider>,
    chains: HashMap<String, ProviderChain>,
}

impl Default for ProviderMapping {
    fn default() -> Self {
        Self::new(Arc::new(StandardProvider))
    }
}

impl std::fmt::Debug for ProviderMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut m = f.debug_map();
        for (name, chain) in &self.chains {
            m.entry(name, &(chain.base.is_some(), chain.decorators.len()));
        }
        m.finish()
    }
}

impl ProviderMapping {
    pub fn new(standard: Arc<dyn FieldProvider>) -> Self {
        Self {
            standard,
            chains: HashMap::new(),
        }
    }

    /// Replaces the whole chain of `name` with a new base provider.
    pub fn set_provider(&mut self, name: &str, provider: Arc<dyn FieldProvider>) {
        self.chains.insert(
            name.to_string(),
            ProviderChain {
                base: Some(provider),
                decorators: Vec::new(),
            },
        );
    }

    /// Wraps whatever is currently registered for `name`.
    pub fn wrap(&mut self, name: &str, decorator: Arc<dyn FieldDecorator>) {
        let chain = self.chains.entry(name.to_string()).or_default();
        chain.decorators.push(decorator);
        tracing::debug!(parameter = name, depth = chain.decorators.len(), "Field provider wrapped");
    }

    pub fn contains(&self, name: &str) -> bool {
        self.chains.contains_key(name)
    }

    /// Number of decorators registered for `name`.
    pub fn depth(&self, name: &str) -> usize {
        self.chains.get(name).map(|c| c.decorators.len()).unwrap_or(0)
    }

    pub fn build(&self, parameter: &FormParameter, container: &Element, input: Option<&Element>) -> Fieldset {
        let chain = self.chains.get(&parameter.name);
        let base = chain
            .and_then(|c| c.base.as_ref())
            .unwrap_or(&self.standard);
        let mut fieldset = base.build(parameter, container, input);
        if let Some(chain) = chain {
            for decorator in &chain.decorators {
                decorator.decorate(parameter, &mut fieldset);
            }
        }
        fieldset
    }
}
