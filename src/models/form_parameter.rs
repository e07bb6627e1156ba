use serde::{Deserialize, Serialize};

/// A parameter of the subscription creation form.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FormParameter {
    pub name: String,
    #[serde(default)]
    pub mandatory: bool,
}

impl FormParameter {
    pub fn new(name: &str, mandatory: bool) -> Self {
        Self {
            name: name.to_string(),
            mandatory,
        }
    }

    /// Id of the alert block rendered after this parameter's input.
    pub fn alert_id(&self) -> String {
        format!("{}_alert", self.name)
    }
}
