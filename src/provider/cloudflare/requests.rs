//! Request bodies for the Cloudflare API v4.

use serde::Serialize;

/// Body of `PUT /zones/{zone}/custom_hostnames/fallback_origin`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateFallbackOriginRequest<'a> {
    pub origin: &'a str,
}

/// Path of the fallback origin singleton of a zone
pub fn fallback_origin_path(zone_id: &str) -> String {
    format!("zones/{zone_id}/custom_hostnames/fallback_origin")
}
