//! Operation-level annotations consumed by the API templates.

use tracing::{debug, warn};

use crate::config::{Flavor, GeneratorConfig};
use crate::example_value::example;
use crate::model::{Operation, Parameter};

/// Annotate operations in place.
///
/// - error identifier `<Pkg>:<api>:<operationId>` on every operation
/// - server flavor: request method name (`delete` becomes `del`)
/// - client flavor: `add_auth` injected where no auth method is declared
/// - `object_param` on parameters listed in the config
/// - a synthesized example literal on every parameter
pub fn annotate_operations(operations: &mut [Operation], config: &GeneratorConfig) {
    let error_root = config.error_identifier_root();
    let api_package = config.flavor.api_package();

    for op in operations.iter_mut() {
        op.annotations.error_identifier =
            Some(format!("{error_root}:{api_package}:{}", op.operation_id));

        match config.flavor {
            Flavor::Server => {
                op.annotations.method_verb = Some(op.method.server_verb().to_string());
            }
            Flavor::Client => {
                if let Some(auth) = &config.add_auth
                    && op.auth_methods.is_empty()
                {
                    debug!(operation = %op.operation_id, auth = %auth, "Adding auth method.");
                    op.auth_methods.push(auth.clone());
                }
            }
        }

        for param in &mut op.parameters {
            param.annotations.object_param = object_type(param, config);
            param.example_value = example(param);
        }
    }
}

/// Class a configured object parameter is passed as.
fn object_type(param: &Parameter, config: &GeneratorConfig) -> Option<String> {
    let object = config
        .object_params
        .iter()
        .find(|object| object.name == param.name || object.name == param.base_name)?;

    if let Some(declared) = param.data_type.model_name()
        && declared != object.base_type
    {
        warn!(
            parameter = %param.name,
            declared,
            configured = %object.base_type,
            "Object parameter type differs from the declared model, using the configured type."
        );
    }
    Some(object.base_type.clone())
}
