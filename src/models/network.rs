use serde::{Deserialize, Serialize};

/// One network attachment of a VM.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Network {
    #[serde(rename = "type", default)]
    pub kind: NetworkType,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub dns: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NetworkType {
    Public,
    Private,
    /// Any other type name, or none at all
    #[default]
    Unknown,
    Other(String),
}

impl NetworkType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "public" => NetworkType::Public,
            "private" => NetworkType::Private,
            "" => NetworkType::Unknown,
            other => NetworkType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NetworkType::Public => "public",
            NetworkType::Private => "private",
            NetworkType::Unknown => "",
            NetworkType::Other(s) => s,
        }
    }
}

impl Serialize for NetworkType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NetworkType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|r| NetworkType::parse(&r)).unwrap_or_default())
    }
}

impl Network {
    pub fn new(kind: &str, ip: &str, dns: Option<&str>) -> Self {
        Self {
            kind: NetworkType::parse(kind),
            ip: ip.to_string(),
            dns: dns.map(str::to_string),
        }
    }
}
