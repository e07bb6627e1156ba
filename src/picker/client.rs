use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde_json::Value;
use yansi::Paint;

use crate::error::{Result, VmAwsError};
use crate::models::RemoteObject;
use crate::utils::absolute_url;

use super::results::unwrap_results;
use super::RemoteQuery;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// Source of lookup results for a picker.
pub trait RemoteLookup {
    fn lookup(&self, query: &RemoteQuery) -> impl Future<Output = Result<Vec<RemoteObject>>> + Send;
}

/// `GET <base>/<relative path>?<query>` against the host REST API.
#[derive(Clone, Debug)]
pub struct LookupClient {
    client: reqwest::Client,
    base_url: String,
}

impl LookupClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("vm-aws/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, query: &RemoteQuery) -> String {
        absolute_url(&self.base_url, &query.to_relative_url())
    }

    /// Raw JSON body of a lookup.
    pub async fn fetch(&self, query: &RemoteQuery) -> Result<Value> {
        let url = self.url(query);
        log_output(format!(
            "Request:\n{} {} '{}'",
            Paint::new("curl").fg(yansi::Color::Green).bold(),
            Paint::new("-X GET").fg(yansi::Color::Yellow).bold(),
            Paint::new(&url).fg(yansi::Color::Cyan)
        ));
        tracing::info!(%url, "Lookup request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "Lookup rejected");
            return Err(VmAwsError::Status {
                status: status.as_u16(),
                url,
            });
        }
        let body: Value = response.json().await?;

        let json_str = serde_json::to_string(&body).unwrap_or_default();
        log_output(format!("Response:\n{}", Paint::new(json_str).rgb(100, 100, 100)));
        Ok(body)
    }
}

impl RemoteLookup for LookupClient {
    async fn lookup(&self, query: &RemoteQuery) -> Result<Vec<RemoteObject>> {
        let body = self.fetch(query).await?;
        Ok(unwrap_results(&body))
    }
}
