use std::net::Ipv6Addr;

use reqwest::Url;

use crate::error::TransportError;

/// Turn a configured endpoint into a URL.
///
/// Accepts `host:port` (sent over plain HTTP) or a full `http://` /
/// `https://` URL. Any other scheme is rejected.
pub fn parse_endpoint(endpoint: &str) -> Result<Url, TransportError> {
    let candidate = if endpoint.contains("://") {
        endpoint.to_owned()
    } else {
        format!("http://{endpoint}")
    };

    let parsed = Url::parse(&candidate).map_err(|e| {
        TransportError::InvalidUrl(format!(
            "invalid endpoint `{endpoint}`: expected host:port or HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(TransportError::InvalidUrl(format!(
            "unsupported endpoint scheme `{other}`; expected http or https"
        ))),
    }
}

/// Build the daemon URL from a configured host and port.
///
/// `host` may carry a scheme and a path (`https://node.example/token`); the
/// port goes into the authority, never onto the path. A bare IPv6 address
/// such as `::1` is bracketed first.
pub fn endpoint_url(host: &str, port: u16) -> Result<Url, TransportError> {
    let host = if host.parse::<Ipv6Addr>().is_ok() {
        format!("[{host}]")
    } else {
        host.to_owned()
    };

    let mut url = parse_endpoint(&host)?;
    url.set_port(Some(port)).map_err(|()| {
        TransportError::InvalidUrl(format!("endpoint `{host}` cannot carry a port"))
    })?;
    Ok(url)
}
