//! Provider profile: parameter names, endpoint path and detail-card schema.

pub const NODE_KEY: &str = "service:vm:aws";
pub const LOOKUP_PATH: &str = "service/vm/aws/";

pub const PARAMETER_ACCESS_KEY_ID: &str = "service:vm:aws:access-key-id";
pub const PARAMETER_SECRET_ACCESS_KEY: &str = "service:vm:aws:secret-access-key";
pub const PARAMETER_ACCOUNT: &str = "service:vm:aws:account";
pub const PARAMETER_REGION: &str = "service:vm:aws:region";
pub const PARAMETER_INSTANCE_ID: &str = "service:vm:aws:id";

/// Detail-card schema revision. The two are not compatible and are never merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Schema {
    /// `os`, `cpu`, `ram`, `vpc`, `az`
    #[default]
    Current,
    /// `description`, `numberOfCpus`, `memoryMB`, `containerName`
    Legacy,
}

impl Schema {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "current" | "" => Some(Schema::Current),
            "legacy" => Some(Schema::Legacy),
            _ => None,
        }
    }
}

/// How the features renderer finds the region for the instance console link.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RegionSource {
    /// Only the region parameter
    #[default]
    Parameter,
    /// The region parameter, else the VM availability zone without its zone letter
    ParameterOrZone,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    pub node: String,
    pub lookup_path: String,
    pub account_parameter: String,
    pub region_parameter: String,
    pub instance_parameter: String,
    pub access_key_parameter: String,
    pub secret_key_parameter: String,
    pub schema: Schema,
    pub region_source: RegionSource,
}

impl Default for Profile {
    fn default() -> Self {
        Self::aws(Schema::Current)
    }
}

impl Profile {
    pub fn aws(schema: Schema) -> Self {
        Self {
            node: NODE_KEY.to_string(),
            lookup_path: LOOKUP_PATH.to_string(),
            account_parameter: PARAMETER_ACCOUNT.to_string(),
            region_parameter: PARAMETER_REGION.to_string(),
            instance_parameter: PARAMETER_INSTANCE_ID.to_string(),
            access_key_parameter: PARAMETER_ACCESS_KEY_ID.to_string(),
            secret_key_parameter: PARAMETER_SECRET_ACCESS_KEY.to_string(),
            schema,
            region_source: RegionSource::default(),
        }
    }

    pub fn with_region_source(mut self, source: RegionSource) -> Self {
        self.region_source = source;
        self
    }
}

/// Region of an availability zone: `eu-west-1b` gives `eu-west-1`.
pub fn region_from_zone(az: &str) -> Option<&str> {
    let az = az.trim();
    let last = az.chars().last()?;
    if !last.is_ascii_alphabetic() {
        return None;
    }
    let region = &az[..az.len() - last.len_utf8()];
    (!region.is_empty()).then_some(region)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_from_zone() {
        assert_eq!(region_from_zone("eu-west-1b"), Some("eu-west-1"));
        assert_eq!(region_from_zone("us-east-1a "), Some("us-east-1"));
        assert_eq!(region_from_zone("eu-west-1"), None);
        assert_eq!(region_from_zone("a"), None);
        assert_eq!(region_from_zone(""), None);
    }

    #[test]
    fn test_schema_parse() {
        assert_eq!(Schema::parse("Legacy"), Some(Schema::Legacy));
        assert_eq!(Schema::parse(""), Some(Schema::Current));
        assert_eq!(Schema::parse("vcloud"), None);
    }
}
