use crate::dom::{Element, Node};
use crate::models::FormParameter;

use super::mapping::ProviderMapping;
use super::provider::Fieldset;
use super::values::{FormContext, FormValues};

/// State of one subscription creation form, owned by the host for the form's lifetime.
#[derive(Debug, Default)]
pub struct Configuration {
    /// Currently selected node, used as the default lookup prefix
    pub node: Option<String>,
    pub parameters: Vec<FormParameter>,
    pub providers: ProviderMapping,
    /// Root element the fieldsets are rendered into
    pub container: Element,
}

impl Configuration {
    pub fn new(node: Option<&str>, parameters: Vec<FormParameter>) -> Self {
        Self {
            node: node.map(str::to_string),
            parameters,
            providers: ProviderMapping::default(),
            container: Element::new("form"),
        }
    }

    /// Builds every parameter through its provider chain and mounts it in the container,
    /// replacing the fieldsets of a previous render.
    pub fn render(&mut self) -> Vec<Fieldset> {
        self.container.children.clear();
        let mut fieldsets = Vec::with_capacity(self.parameters.len());
        for parameter in &self.parameters {
            let fieldset = self.providers.build(parameter, &self.container, None);
            self.container.append(Node::Element(fieldset.element.clone()));
            fieldsets.push(fieldset);
        }
        fieldsets
    }

    /// Sets the `value` of an input already mounted in the container.
    pub fn set_value(&mut self, input_id: &str, value: &str) -> bool {
        match self.container.find_by_id_mut(input_id) {
            Some(input) => {
                input.set_attr("value", value);
                true
            }
            None => false,
        }
    }

    pub fn context(&self) -> FormContext {
        FormContext {
            node: self.node.clone(),
            values: FormValues::from_container(&self.container),
        }
    }
}
