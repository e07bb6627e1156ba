use crate::dom::Element;
use crate::models::FormParameter;
use crate::picker::RemotePicker;

/// Rendered control(s) of one parameter, with the pickers attached to its inputs.
#[derive(Clone, Debug)]
pub struct Fieldset {
    pub element: Element,
    pub pickers: Vec<RemotePicker>,
}

impl Fieldset {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            pickers: Vec::new(),
        }
    }

    /// The input of `parameter`: the one with its id, else the first input.
    pub fn input(&self, parameter: &FormParameter) -> Option<&Element> {
        self.element
            .find(&|e: &Element| is_input_of(e, parameter))
            .or_else(|| self.element.find(&is_any_input))
    }

    pub fn input_mut(&mut self, parameter: &FormParameter) -> Option<&mut Element> {
        if self.element.find(&|e: &Element| is_input_of(e, parameter)).is_some() {
            self.element.find_mut(&|e: &Element| is_input_of(e, parameter))
        } else {
            self.element.find_mut(&is_any_input)
        }
    }

    pub fn attach(&mut self, picker: RemotePicker) {
        self.pickers.push(picker);
    }

    /// Last attached picker of an input, the one the user interacts with.
    pub fn picker(&self, input_id: &str) -> Option<&RemotePicker> {
        self.pickers.iter().rev().find(|p| p.input_id() == input_id)
    }
}

fn is_input_of(e: &Element, parameter: &FormParameter) -> bool {
    e.tag == "input" && e.id.as_deref() == Some(parameter.name.as_str())
}

fn is_any_input(e: &Element) -> bool {
    e.tag == "input"
}

/// Builds the base control of a parameter.
pub trait FieldProvider: Send + Sync {
    fn build(&self, parameter: &FormParameter, container: &Element, input: Option<&Element>) -> Fieldset;
}

impl<F> FieldProvider for F
where
    F: Fn(&FormParameter, &Element, Option<&Element>) -> Fieldset + Send + Sync,
{
    fn build(&self, parameter: &FormParameter, container: &Element, input: Option<&Element>) -> Fieldset {
        self(parameter, container, input)
    }
}

/// Augments the fieldset built by the providers registered before it.
pub trait FieldDecorator: Send + Sync {
    fn decorate(&self, parameter: &FormParameter, fieldset: &mut Fieldset);
}

impl<F> FieldDecorator for F
where
    F: Fn(&FormParameter, &mut Fieldset) + Send + Sync,
{
    fn decorate(&self, parameter: &FormParameter, fieldset: &mut Fieldset) {
        self(parameter, fieldset)
    }
}

/// The `standard` provider: a labelled text input, reusing `input` when the host passes one.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardProvider;

impl FieldProvider for StandardProvider {
    fn build(&self, parameter: &FormParameter, _container: &Element, input: Option<&Element>) -> Fieldset {
        let mut field = input.cloned().unwrap_or_else(|| {
            Element::new("input")
                .with_id(&parameter.name)
                .with_class("form-control")
                .with_attr("type", "text")
        });
        if parameter.mandatory {
            field.set_attr("required", "required");
        }
        let group = Element::new("div")
            .with_class("form-group")
            .with_child(
                Element::new("label")
                    .with_class("control-label")
                    .with_attr("for", &parameter.name)
                    .with_text(&parameter.name),
            )
            .with_child(field);
        Fieldset::new(group)
    }
}
