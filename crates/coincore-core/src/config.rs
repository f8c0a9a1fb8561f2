use std::fmt;
use std::net::Ipv6Addr;
use std::path::Path;

use crate::error::CoreError;

/// Connection settings for one RPC daemon.
///
/// Built once and read-only afterwards. `host` may carry a scheme and a path
/// (`https://node.example/token`); the transport adds `http://` when it does
/// not and puts the port into the URL authority.
#[derive(Clone, PartialEq, Eq)]
pub struct Configuration {
    host: String,
    port: u16,
    login: String,
    password: String,
}

impl Configuration {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            login: login.into(),
            password: password.into(),
        }
    }

    /// Build a configuration whose credentials come from a node cookie file.
    ///
    /// The first line must be `username:password` with both halves
    /// non-empty, which is the format bitcoind writes to `.cookie`.
    pub fn from_cookie_file(
        host: impl Into<String>,
        port: u16,
        cookie_file: &Path,
    ) -> Result<Self, CoreError> {
        let (login, password) = read_cookie_file(cookie_file)?;
        Ok(Self::new(host, port, login, password))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// `host:port`, with a bare IPv6 host bracketed (`[::1]:8332`).
    ///
    /// Meant for plain hosts. The URL actually posted to comes from
    /// [`endpoint_url`](crate::transport::endpoint_url), which also handles
    /// hosts that carry a path.
    pub fn endpoint(&self) -> String {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn read_cookie_file(cookie_file: &Path) -> Result<(String, String), CoreError> {
    let content = std::fs::read_to_string(cookie_file).map_err(|e| {
        CoreError::Config(format!(
            "failed to read rpc cookie file {}: {e}",
            cookie_file.display()
        ))
    })?;
    let line = content
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .ok_or_else(|| {
            CoreError::Config(format!(
                "rpc cookie file {} is empty",
                cookie_file.display()
            ))
        })?;

    let (user, pass) = line.split_once(':').ok_or_else(|| {
        CoreError::Config(format!(
            "rpc cookie file {} must contain `username:password`",
            cookie_file.display()
        ))
    })?;
    if user.is_empty() || pass.is_empty() {
        return Err(CoreError::Config(format!(
            "rpc cookie file {} must contain non-empty `username:password`",
            cookie_file.display()
        )));
    }

    Ok((user.to_owned(), pass.to_owned()))
}
