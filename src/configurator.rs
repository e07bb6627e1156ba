//! Parameter configurator: installs the instance picker in the subscription form.
use std::sync::Arc;

use crate::form::{Configuration, FieldDecorator, Fieldset, FormContext};
use crate::host::Host;
use crate::models::FormParameter;
use crate::picker::{ChangeHandler, PickerOptions, QuerySource, QueryTarget, RemotePicker};
use crate::profile::Profile;
use crate::utils::build_query_string;

/// Empty search placeholder sent along with the credentials.
pub const SEARCH_VALUE_KEY: &str = "search[value]";

/// Decorator attaching a remote picker to the input built by the previous providers.
#[derive(Clone, Debug)]
pub struct RemotePickerDecorator {
    options: PickerOptions,
    fallback_node: String,
    on_change: Option<ChangeHandler>,
}

impl FieldDecorator for RemotePickerDecorator {
    fn decorate(&self, parameter: &FormParameter, fieldset: &mut Fieldset) {
        let name = parameter.name.as_str();
        let Some(input) = fieldset.input_mut(parameter) else {
            tracing::warn!(parameter = name, "No input to attach the picker to");
            return;
        };
        let input_id = input.id.get_or_insert_with(|| name.to_string()).clone();
        input.set_attr("data-picker", &self.options.path);
        tracing::debug!(parameter = %parameter.name, input = %input_id, "Remote picker attached");
        fieldset.attach(RemotePicker::new(
            &input_id,
            parameter,
            self.options.clone(),
            &self.fallback_node,
            self.on_change.clone(),
        ));
    }
}

pub struct ParameterConfigurator {
    profile: Profile,
    new_marker: String,
}

impl ParameterConfigurator {
    pub fn new<H: Host + ?Sized>(host: &H, profile: Profile) -> Self {
        Self {
            new_marker: host.messages().get("service:vm:aws:new").to_string(),
            profile,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Entry point called once per form: installs the instance id picker.
    pub fn configure_subscription_parameters(&self, configuration: &mut Configuration) {
        self.configure_with_handler(configuration, None);
    }

    pub fn configure_with_handler(&self, configuration: &mut Configuration, on_change: Option<ChangeHandler>) {
        let options = PickerOptions::new(&self.profile.lookup_path)
            .with_query(self.instance_query())
            .allow_new(true, true)
            .with_new_marker(&self.new_marker);
        self.register_remote_picker(configuration, &self.profile.instance_parameter, options, on_change);
    }

    /// Wraps the provider currently registered for `parameter` (or the standard one) with a picker.
    pub fn register_remote_picker(
        &self,
        configuration: &mut Configuration,
        parameter: &str,
        options: PickerOptions,
        on_change: Option<ChangeHandler>,
    ) {
        let decorator = RemotePickerDecorator {
            options,
            fallback_node: self.profile.node.clone(),
            on_change,
        };
        configuration.providers.wrap(parameter, Arc::new(decorator));
        tracing::info!(parameter, depth = configuration.providers.depth(parameter), "Remote picker registered");
    }

    /// `<node>/<term>?<access key>=..&<secret key>=..&search[value]=`, credentials taken from sibling fields.
    pub fn instance_query(&self) -> QuerySource {
        let node = self.profile.node.clone();
        let access = self.profile.access_key_parameter.clone();
        let secret = self.profile.secret_key_parameter.clone();
        QuerySource::custom(move |context: &FormContext| {
            let query = build_query_string(&[
                (access.as_str(), context.values.get(&access)),
                (secret.as_str(), context.values.get(&secret)),
                (SEARCH_VALUE_KEY, ""),
            ]);
            QueryTarget::prefix(format!("{}/", context.node.as_deref().unwrap_or(&node))).with_suffix(query)
        })
    }
}
