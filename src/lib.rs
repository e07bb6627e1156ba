//! Amazon EC2 provider plugin for the subscription management UI.
//!
//! Renders the identity, feature links and details card of a VM subscription,
//! and configures the instance picker of the subscription creation form.
pub mod config;
pub mod configurator;
pub mod dom;
pub mod error;
pub mod form;
pub mod host;
pub mod i18n;
pub mod models;
pub mod picker;
pub mod profile;
pub mod render;
pub mod server;
pub mod utils;

pub use configurator::ParameterConfigurator;
pub use error::{Result, VmAwsError};
pub use host::{DefaultHost, Host};
pub use profile::Profile;
pub use render::VmRenderer;
