//! Base URL resolution for absolute redirects.
//!
//! Resolution order: the configured public URL, else the origin of the
//! inbound request, else nothing (the caller falls back to a relative
//! `Location`). Resolved per request, never cached.

/// Scheme and host an inbound request was addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: String,
    pub host: String,
}

impl RequestOrigin {
    /// Build the origin from raw header values.
    ///
    /// Proxy headers (`X-Forwarded-Host`, `X-Forwarded-Proto`) win over
    /// `Host`; only the first entry of a comma-separated list is used.
    pub fn from_headers(
        host: Option<&str>,
        forwarded_host: Option<&str>,
        forwarded_proto: Option<&str>,
    ) -> Option<Self> {
        let host = first_value(forwarded_host).or_else(|| first_value(host))?;
        let scheme = first_value(forwarded_proto)
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "http".to_string());
        Some(Self {
            scheme,
            host: host.to_string(),
        })
    }

    pub fn as_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

fn first_value(raw: Option<&str>) -> Option<&str> {
    raw.and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Pick the base URL for a redirect.
pub fn resolve_base_url(configured: Option<&str>, origin: Option<&RequestOrigin>) -> Option<String> {
    let configured = configured
        .map(|url| url.trim().trim_end_matches('/'))
        .filter(|url| !url.is_empty());
    match configured {
        Some(url) => Some(url.to_string()),
        None => origin.map(RequestOrigin::as_url),
    }
}

/// Join a base URL and an absolute path. Without a base the path is
/// returned unchanged.
pub fn absolute_url(base: Option<&str>, path: &str) -> String {
    match base {
        Some(base) => format!("{base}{path}"),
        None => path.to_string(),
    }
}
