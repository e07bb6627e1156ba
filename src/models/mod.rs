pub mod subscription;
pub mod vm_descriptor;
pub mod network;
pub mod form_parameter;
pub mod remote_object;

pub use subscription::{Subscription, SubscriptionData};
pub use vm_descriptor::VmDescriptor;
pub use network::{Network, NetworkType};
pub use form_parameter::FormParameter;
pub use remote_object::{RemoteObject, Selection};
