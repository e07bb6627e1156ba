//! Subscription renderers: identity, feature links and details card.
//!
//! All of them are pure functions of the subscription they are given, except
//! [`VmRenderer::append_console_link`] which updates a row the host already rendered.
pub mod details;
pub mod features;
pub mod key;
pub mod network;

use crate::host::Host;
use crate::profile::Profile;

pub use network::{network_icon, render_networks};

/// Renderers of one provider profile, delegating base behaviour to `host`.
pub struct VmRenderer<'h, H: Host + ?Sized> {
    host: &'h H,
    profile: Profile,
}

impl<'h, H: Host + ?Sized> VmRenderer<'h, H> {
    pub fn new(host: &'h H, profile: Profile) -> Self {
        Self { host, profile }
    }

    pub fn host(&self) -> &'h H {
        self.host
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }
}
