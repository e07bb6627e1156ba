use crate::dom::escape_html;
use crate::host::{DetailRow, Host};
use crate::models::{Subscription, VmDescriptor};
use crate::profile::Schema;

use super::network::render_networks;
use super::VmRenderer;

const AZ_INFO_URL: &str = "https://aws.amazon.com/about-aws/global-infrastructure/";
const DETAIL_COLUMNS: usize = 1;

impl<H: Host + ?Sized> VmRenderer<'_, H> {
    /// Details card of the bound VM.
    pub fn render_details_key(&self, subscription: &Subscription) -> String {
        let rows = self.detail_rows(subscription);
        self.host.generate_carousel(subscription, &rows, DETAIL_COLUMNS)
    }

    /// Ordered card rows; `None` stands for an absent value and is left to the carousel.
    pub fn detail_rows(&self, subscription: &Subscription) -> Vec<Option<DetailRow>> {
        let empty = VmDescriptor::default();
        let vm = subscription.vm().unwrap_or(&empty);
        let schema = self.profile.schema;

        let mut rows = vec![
            Some(DetailRow::new(&self.profile.instance_parameter, self.render_key(subscription))),
            text_row("name", vm.name.as_deref()),
        ];
        rows.push(match schema {
            Schema::Current => text_row("service:vm:os", vm.os.as_deref()),
            Schema::Legacy => text_row("description", vm.description.as_deref()),
        });
        rows.push(self.resources_row(vm, schema));
        rows.push(
            vm.networks
                .as_deref()
                .filter(|n| !n.is_empty())
                .map(|n| DetailRow::new("service:vm:network", render_networks(self.host, n))),
        );

        let account = subscription
            .parameter(&self.profile.account_parameter)
            .or(vm.account.as_deref());
        rows.push(account.map(|a| {
            DetailRow::new(
                "service:vm:aws:account",
                self.host.icon("server", Some("service:vm:aws:account")) + &escape_html(a),
            )
        }));
        rows.push(match schema {
            Schema::Current => vm.vpc.as_deref().map(|v| {
                DetailRow::new(
                    "service:vm:aws:vpc",
                    self.host.icon("server", Some("service:vm:aws:vpc")) + &escape_html(v),
                )
            }),
            Schema::Legacy => vm.container_name.as_deref().map(|c| {
                DetailRow::new(
                    "service:vm:aws:container",
                    self.host.icon("server", Some("service:vm:aws:container")) + &escape_html(c),
                )
            }),
        });
        rows.push(vm.az.as_deref().filter(|z| !z.is_empty()).map(|az| {
            DetailRow::new(
                "service:vm:aws:az",
                format!(
                    "{}<a href=\"{}\" target=\"_blank\">{}</a>",
                    self.host.icon("map-marker", Some("service:vm:aws:az")),
                    AZ_INFO_URL,
                    escape_html(az)
                ),
            )
        }));
        rows
    }

    fn resources_row(&self, vm: &VmDescriptor, schema: Schema) -> Option<DetailRow> {
        let (cpu, ram_mb) = match schema {
            Schema::Current => (vm.cpu, vm.ram),
            Schema::Legacy => (vm.number_of_cpus, vm.memory_mb),
        };
        if cpu.is_none() && ram_mb.is_none() {
            return None;
        }
        let bytes = ram_mb.unwrap_or(0).saturating_mul(1024 * 1024);
        Some(DetailRow::new(
            "service:vm:resources",
            format!(
                "{}{} CPU, {}",
                self.host.icon("sliders", None),
                cpu.unwrap_or(0),
                self.host.format_size(bytes)
            ),
        ))
    }
}

fn text_row(label: &str, value: Option<&str>) -> Option<DetailRow> {
    value
        .filter(|v| !v.is_empty())
        .map(|v| DetailRow::new(label, escape_html(v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::DefaultHost;
    use crate::models::Network;
    use crate::profile::{Profile, PARAMETER_ACCOUNT, PARAMETER_INSTANCE_ID};

    fn labels(rows: &[Option<DetailRow>]) -> Vec<Option<&str>> {
        rows.iter().map(|r| r.as_ref().map(|r| r.label.as_str())).collect()
    }

    fn full_vm() -> VmDescriptor {
        VmDescriptor {
            name: Some("web".into()),
            description: Some("front".into()),
            os: Some("LINUX".into()),
            cpu: Some(2),
            ram: Some(4096),
            number_of_cpus: Some(1),
            memory_mb: Some(512),
            networks: Some(vec![Network::new("public", "1.2.3.4", None)]),
            vpc: Some("vpc-1".into()),
            az: Some("eu-west-1a".into()),
            container_name: Some("vapp".into()),
            ..VmDescriptor::default()
        }
    }

    #[test]
    fn test_current_schema_order() {
        let host = DefaultHost::default();
        let r = VmRenderer::new(&host, Profile::default());
        let s = Subscription::default()
            .with_parameter(PARAMETER_INSTANCE_ID, "i-1")
            .with_parameter(PARAMETER_ACCOUNT, "123")
            .with_vm(full_vm());
        let rows = r.detail_rows(&s);
        assert_eq!(
            labels(&rows),
            vec![
                Some(PARAMETER_INSTANCE_ID),
                Some("name"),
                Some("service:vm:os"),
                Some("service:vm:resources"),
                Some("service:vm:network"),
                Some("service:vm:aws:account"),
                Some("service:vm:aws:vpc"),
                Some("service:vm:aws:az"),
            ]
        );
        assert!(rows[3].as_ref().unwrap().value.ends_with("2 CPU, 4 GB"));
        assert!(rows[7].as_ref().unwrap().value.contains("global-infrastructure"));
        assert_eq!(rows, r.detail_rows(&s));
    }

    #[test]
    fn test_legacy_schema_fields() {
        let host = DefaultHost::default();
        let r = VmRenderer::new(&host, Profile::aws(Schema::Legacy));
        let rows = r.detail_rows(&Subscription::default().with_vm(full_vm()));
        let l = labels(&rows);
        assert_eq!(l[2], Some("description"));
        assert_eq!(l[6], Some("service:vm:aws:container"));
        assert!(rows[3].as_ref().unwrap().value.ends_with("1 CPU, 512 MB"));
    }

    #[test]
    fn test_absent_values_are_placeholders() {
        let host = DefaultHost::default();
        let r = VmRenderer::new(&host, Profile::default());
        let rows = r.detail_rows(&Subscription::default().with_vm(VmDescriptor {
            name: Some("db".into()),
            networks: Some(vec![]),
            ..VmDescriptor::default()
        }));
        assert_eq!(rows.len(), 8);
        assert_eq!(
            labels(&rows),
            vec![Some(PARAMETER_INSTANCE_ID), Some("name"), None, None, None, None, None, None]
        );
    }

    #[test]
    fn test_details_without_vm_payload() {
        let host = DefaultHost::default();
        let r = VmRenderer::new(&host, Profile::default());
        let html = r.render_details_key(&Subscription::default());
        assert_eq!(html.matches("details-row").count(), 1);
    }
}
