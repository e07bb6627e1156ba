use std::collections::HashMap;

use crate::dom::Element;

/// Current values of the form inputs, keyed by input id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormValues {
    values: HashMap<String, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the `value` attribute of every identified `input` under `container`.
    pub fn from_container(container: &Element) -> Self {
        let mut values = FormValues::new();
        collect_inputs(container, &mut values);
        values
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    /// Trimmed value, empty when the field is unknown.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(|v| v.trim()).unwrap_or("")
    }
}

fn collect_inputs(element: &Element, values: &mut FormValues) {
    if element.tag == "input" {
        if let Some(id) = &element.id {
            values.set(id, element.attr("value").unwrap_or(""));
        }
    }
    for child in element.child_elements() {
        collect_inputs(child, values);
    }
}

/// What a picker sees when it builds a query: the selected node and the sibling values.
#[derive(Clone, Debug, Default)]
pub struct FormContext {
    pub node: Option<String>,
    pub values: FormValues,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_container_reads_nested_inputs() {
        let form = Element::new("form")
            .with_child(
                Element::new("div").with_child(
                    Element::new("input").with_id("a").with_attr("value", " key "),
                ),
            )
            .with_child(Element::new("input").with_id("b"))
            .with_child(Element::new("input").with_attr("value", "anonymous"));
        let values = FormValues::from_container(&form);
        assert_eq!(values.get("a"), "key");
        assert_eq!(values.get("b"), "");
        assert_eq!(values.get("missing"), "");
    }
}
