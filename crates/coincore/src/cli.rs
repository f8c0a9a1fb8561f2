use std::path::PathBuf;

use clap::Parser;

/// coincore: send one JSON-RPC call to a Bitcoin/Litecoin Core style daemon
/// and print the raw response.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// RPC host, optionally with scheme (`https://node.example`).
    #[arg(long, default_value = "127.0.0.1", env = "COINCORE_RPC_HOST")]
    pub host: String,

    /// RPC port.
    #[arg(long, default_value = "8332", env = "COINCORE_RPC_PORT")]
    pub port: u16,

    /// RPC username.
    #[arg(long, env = "COINCORE_RPC_USER", conflicts_with = "cookie_file")]
    pub user: Option<String>,

    /// RPC password.
    #[arg(long, env = "COINCORE_RPC_PASS", requires = "user")]
    pub password: Option<String>,

    /// Read `user:password` from the node's cookie file instead.
    #[arg(long, env = "COINCORE_RPC_COOKIE")]
    pub cookie_file: Option<PathBuf>,

    /// Correlation id to send with the request.
    #[arg(long, conflicts_with = "random_id")]
    pub id: Option<String>,

    /// Send a random 16-hex-character correlation id.
    #[arg(long)]
    pub random_id: bool,

    /// Maximum outbound requests per second.
    #[arg(long)]
    pub requests_per_second: Option<u32>,

    /// Pretty-print the JSON response.
    #[arg(long)]
    pub pretty: bool,

    /// RPC method name, e.g. `getblockchaininfo`.
    pub method: String,

    /// Positional parameters. Each is parsed as JSON when possible and
    /// sent as a string otherwise.
    pub params: Vec<String>,
}
