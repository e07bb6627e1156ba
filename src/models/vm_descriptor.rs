use serde::{Deserialize, Serialize};

use crate::models::network::Network;

/// VM payload resolved by the host (`data.vm`). Every field may be absent.
///
/// Carries both detail schemas: `cpu`/`ram` for the current one,
/// `numberOfCpus`/`memoryMB`/`containerName` for the legacy one.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VmDescriptor {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub os: Option<String>,
    pub cpu: Option<u32>,
    /// Memory in MB
    pub ram: Option<u64>,
    pub number_of_cpus: Option<u32>,
    #[serde(rename = "memoryMB")]
    pub memory_mb: Option<u64>,
    pub networks: Option<Vec<Network>>,
    pub account: Option<String>,
    pub vpc: Option<String>,
    /// Availability zone, includes the region (`eu-west-1b`)
    pub az: Option<String>,
    pub container_name: Option<String>,
}
