use std::collections::HashMap;

use ibmcloud_common::error::{codes, SdkError, SdkResult};

/// Fill the `{name}` variables of a parameterized service URL.
///
/// Each variable takes its value from `provided` when present, else from
/// `defaults`.
///
/// # Errors
/// `url-resolve-error` when `provided` names a variable that `defaults` does
/// not declare.
pub fn construct_service_url(
    parameterized_url: &str,
    defaults: &[(&str, &str)],
    provided: &HashMap<String, String>,
) -> SdkResult<String> {
    for name in provided.keys() {
        if !defaults.iter().any(|(known, _)| *known == name.as_str()) {
            return Err(SdkError::url(
                codes::URL_RESOLVE_ERROR,
                format!("'{name}' is an invalid variable name; valid names are {:?}", names(defaults)),
            ));
        }
    }

    let mut url = parameterized_url.to_string();
    for (name, default) in defaults {
        let value = provided.get(*name).map_or(*default, String::as_str);
        url = url.replace(&format!("{{{name}}}"), value);
    }
    Ok(url)
}

fn names<'a>(defaults: &[(&'a str, &str)]) -> Vec<&'a str> {
    defaults.iter().map(|(name, _)| *name).collect()
}
