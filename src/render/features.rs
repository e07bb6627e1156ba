use crate::dom::{Element, Node};
use crate::host::{Host, ServiceLink};
use crate::models::Subscription;
use crate::profile::{region_from_zone, RegionSource};

use super::VmRenderer;

/// Class marking the instance console link inside a rendered row.
pub const CONSOLE_CLASS: &str = "console";

pub fn signin_url(account: &str) -> String {
    format!("https://{}.signin.aws.amazon.com/console", account)
}

pub fn instance_console_url(region: &str, instance_id: &str) -> String {
    format!(
        "https://{region}.console.aws.amazon.com/ec2/v2/home?region={region}#Instances:search={instance_id}"
    )
}

impl<H: Host + ?Sized> VmRenderer<'_, H> {
    /// Console sign-in link when an account is set, instance console deep-link
    /// when both region and instance id are known.
    pub fn render_features(&self, subscription: &Subscription) -> String {
        let mut result = String::new();
        if let Some(account) = subscription.parameter(&self.profile.account_parameter) {
            result.push_str(&self.host.render_service_link(&ServiceLink {
                icon: "home",
                href: &signin_url(account),
                title: "service:vm:aws:console",
                new_tab: true,
                ..ServiceLink::default()
            }));
        }
        if let Some(link) = self.instance_console_link(subscription) {
            result.push_str(&link);
        }
        result
    }

    /// Appends the instance console link to a rendered details row, once.
    ///
    /// Returns whether the row was changed.
    pub fn append_console_link(&self, row: &mut Element, subscription: &Subscription) -> bool {
        if row.contains_class(CONSOLE_CLASS) {
            return false;
        }
        match self.instance_console_link(subscription) {
            Some(link) => {
                let holder = Element::new("span").with_class(CONSOLE_CLASS).with_raw(&link);
                row.append(Node::Text(" ".to_string()));
                row.append(Node::Element(holder));
                true
            }
            None => false,
        }
    }

    /// Region parameter, or the one inferred from the availability zone when the profile allows it.
    pub fn region(&self, subscription: &Subscription) -> Option<String> {
        if let Some(region) = subscription.parameter(&self.profile.region_parameter) {
            return Some(region.to_string());
        }
        match self.profile.region_source {
            RegionSource::Parameter => None,
            RegionSource::ParameterOrZone => subscription
                .vm()
                .and_then(|vm| vm.az.as_deref())
                .and_then(region_from_zone)
                .map(str::to_string),
        }
    }

    fn instance_console_link(&self, subscription: &Subscription) -> Option<String> {
        let instance_id = subscription.parameter(&self.profile.instance_parameter)?;
        let region = self.region(subscription)?;
        let href = instance_console_url(&region, instance_id);
        Some(self.host.render_service_link(&ServiceLink {
            icon: "desktop",
            href: &href,
            title: "service:vm:aws:instance-console",
            class: Some(CONSOLE_CLASS),
            new_tab: true,
            ..ServiceLink::default()
        }))
    }
}
