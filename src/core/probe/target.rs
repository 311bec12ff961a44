//! Target URL validation for probes
//!
//! The HTTP stack accepts a surprising range of strings as request URIs, so
//! targets are parsed up front to turn obviously malformed input into a
//! descriptive error instead of an opaque client failure.

use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum UrlError {
    #[error("invalid URL: {0}")]
    ParseError(#[from] url::ParseError),
    #[error("unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),
    #[error("missing host in URL")]
    MissingHost,
}

/// Parse and validate a probe target
///
/// # Examples
/// - `http://192.168.1.10:5000/` → ok
/// - `https://nas.local/status` → ok
/// - `ftp://nas.local/` → `UnsupportedScheme`
/// - `not a url` → `ParseError`
pub fn parse_target_url(raw: &str) -> Result<Url, UrlError> {
    let url = Url::parse(raw.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::UnsupportedScheme(other.to_string())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Strip username and password from a URL for display and logging
///
/// Returns the input unchanged if it does not parse.
pub fn redact_userinfo(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) if !url.username().is_empty() || url.password().is_some() => {
            // Only fails for cannot-be-a-base URLs, which carry no userinfo
            let _ = url.set_username("");
            let _ = url.set_password(None);
            url.to_string()
        }
        _ => raw.to_string(),
    }
}
