pub mod configuration;
pub mod mapping;
pub mod provider;
pub mod values;

pub use configuration::Configuration;
pub use mapping::ProviderMapping;
pub use provider::{FieldDecorator, FieldProvider, Fieldset, StandardProvider};
pub use values::{FormContext, FormValues};
