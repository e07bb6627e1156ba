use crate::host::Host;
use crate::models::Subscription;

use super::VmRenderer;

impl<H: Host + ?Sized> VmRenderer<'_, H> {
    /// Display label of the bound instance identifier.
    pub fn render_key(&self, subscription: &Subscription) -> String {
        self.host.render_key(subscription, &self.profile.instance_parameter)
    }
}
