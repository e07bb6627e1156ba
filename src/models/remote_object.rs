use serde::{Deserialize, Serialize};

/// An object returned by the remote lookup endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RemoteObject {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub pkey: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Set only on entries synthesized from user input, never sent by the endpoint
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub new: bool,
}

impl RemoteObject {
    /// Display key, preferring `key` over `pkey`.
    pub fn display_key(&self) -> Option<&str> {
        self.key
            .as_deref()
            .or(self.pkey.as_deref())
            .filter(|k| !k.is_empty())
    }
}

/// Picker change notification: the entry just added, if any.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    pub added: Option<RemoteObject>,
}

impl Selection {
    pub fn added(object: RemoteObject) -> Self {
        Self { added: Some(object) }
    }
}
