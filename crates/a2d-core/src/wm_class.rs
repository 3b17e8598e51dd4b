//! `StartupWMClass` derivation from an app's launch URL.
//!
//! Chrome names the window of a URL-launched app after the URL's host and
//! path, so the entry must carry the same token for window matching.

use crate::config::NamingConfig;

/// Turn a launch URL into a window class token.
///
/// 1. Drop the query string from the first `?`.
/// 2. Drop a leading `scheme://`.
/// 3. Join host and path with `__`, ignoring a single trailing `/`.
/// 4. Replace every `:` and `/` with `_`.
pub fn derive_wm_class(launch_url: &str) -> String {
    let without_query = match launch_url.find('?') {
        Some(pos) => &launch_url[..pos],
        None => launch_url,
    };

    let location = match without_query.find("://") {
        Some(pos) => &without_query[pos + 3..],
        None => without_query,
    };

    let joined = match location.split_once('/') {
        Some((host, rest)) if location.ends_with('/') => {
            let path = rest.strip_suffix('/').unwrap_or(rest);
            if path.is_empty() {
                host.to_string()
            } else {
                format!("{host}__{path}")
            }
        }
        Some((host, rest)) => format!("{host}__{rest}"),
        None => location.to_string(),
    };

    joined.replace([':', '/'], "_")
}

/// `StartupWMClass` for an app: `crx_<app_id>` for packaged apps, the derived
/// token for URL apps.
pub fn startup_wm_class(app_id: &str, launch_url: &str) -> String {
    let derived = if launch_url.is_empty() {
        String::new()
    } else {
        derive_wm_class(launch_url)
    };

    if derived.is_empty() {
        format!("{}{}", NamingConfig::WM_CLASS_FALLBACK_PREFIX, app_id)
    } else {
        derived
    }
}
