use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::vm_descriptor::VmDescriptor;

/// A subscription bound to a cloud virtual machine, as fetched by the host.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Subscription {
    #[serde(default)]
    pub id: Option<i64>,
    /// Parameter name to value, `None` when the host sent no parameters at all
    #[serde(default)]
    pub parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub data: Option<SubscriptionData>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SubscriptionData {
    #[serde(default)]
    pub vm: Option<VmDescriptor>,
}

impl Subscription {
    /// Non-empty value of a parameter.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .as_ref()
            .and_then(|p| p.get(name))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn vm(&self) -> Option<&VmDescriptor> {
        self.data.as_ref().and_then(|d| d.vm.as_ref())
    }

    pub fn with_parameter(mut self, name: &str, value: &str) -> Self {
        self.parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_vm(mut self, vm: VmDescriptor) -> Self {
        self.data.get_or_insert_with(SubscriptionData::default).vm = Some(vm);
        self
    }
}
