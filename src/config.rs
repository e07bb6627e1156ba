use std::env;
use std::path::Path;

use crate::error::VmAwsError;
use crate::i18n::Locale;
use crate::profile::Schema;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/rest";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("VM_AWS_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

/// Unknown locales fall back to English.
pub fn get_locale() -> Locale {
    env::var("VM_AWS_LOCALE")
        .map(|l| Locale::parse(&l))
        .unwrap_or_default()
}

pub fn get_schema() -> Result<Schema, VmAwsError> {
    match env::var("VM_AWS_PROFILE") {
        Ok(raw) => Schema::parse(&raw)
            .ok_or_else(|| VmAwsError::Config(format!("unknown profile '{}'", raw.trim()))),
        Err(_) => Ok(Schema::default()),
    }
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Snapshot of the runtime settings used by the CLI and the preview server.
#[derive(Clone, Debug)]
pub struct Settings {
    pub api_base_url: String,
    pub locale: Locale,
    pub schema: Schema,
}

impl Settings {
    pub fn from_env(env_file: Option<&str>) -> Result<Self, VmAwsError> {
        load_env_file(env_file);
        Ok(Self {
            api_base_url: get_api_base_url(),
            locale: get_locale(),
            schema: get_schema()?,
        })
    }
}
