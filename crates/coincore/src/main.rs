mod cli;

use clap::Parser;
use eyre::{eyre, WrapErr};

use coincore_core::transport::ReqwestTransport;
use coincore_core::{Configuration, CoreError, RpcClient, RpcError};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_level(true)
        .init();

    let config = match &args.cookie_file {
        Some(path) => Configuration::from_cookie_file(&args.host, args.port, path)
            .context("load rpc cookie file")?,
        None => Configuration::new(
            &args.host,
            args.port,
            args.user.clone().unwrap_or_default(),
            args.password.clone().unwrap_or_default(),
        ),
    };

    let mut transport = ReqwestTransport::new(&config).context("build HTTP transport")?;
    if let Some(limit) = args.requests_per_second {
        transport = transport
            .with_requests_per_second(limit)
            .context("configure rate limit")?;
    }
    let endpoint = transport.url().to_string();
    let client = RpcClient::with_transport(endpoint, transport);

    let params = args
        .params
        .iter()
        .map(String::as_str)
        .map(parse_param)
        .collect();
    let mut call = client.call(&args.method, params)?;

    let id = if args.random_id {
        Some(random_id())
    } else {
        args.id.clone()
    };
    if let Some(id) = id {
        tracing::debug!(rpc.id = %id, "attaching correlation id");
        call = call.with_id(id);
    }

    let body = call.await.map_err(|err| {
        let message = format_call_error(client.dispatcher().endpoint(), &err);
        eyre!(message).wrap_err(format!("while calling `{}`", args.method))
    })?;

    if args.pretty {
        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            Err(_) => println!("{body}"),
        }
    } else {
        println!("{body}");
    }

    Ok(())
}

/// Interpret a command-line parameter the way `bitcoin-cli` does: JSON when
/// it parses (`1`, `true`, `null`, `["a"]`), otherwise a plain string.
fn parse_param(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_owned()))
}

fn random_id() -> String {
    use rand::Rng;
    let bytes: [u8; 8] = rand::thread_rng().r#gen();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn format_call_error(endpoint: &str, err: &CoreError) -> String {
    let mut lines = vec![
        format!("RPC call to `{endpoint}` failed"),
        format!("error: {err}"),
    ];

    match err {
        CoreError::Rpc(RpcError::Authentication) => lines.push(
            "hint: authentication failed; verify --user/--password or --cookie-file".into(),
        ),
        CoreError::Rpc(RpcError::NotFound) => lines.push(
            "hint: the daemon does not know this method or path; check the method name".into(),
        ),
        CoreError::Transport(_) => lines.push(
            "hint: request could not be sent; verify host, port, and that the daemon is running"
                .into(),
        ),
        _ => {}
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_param_prefers_json() {
        assert_eq!(parse_param("1"), serde_json::json!(1));
        assert_eq!(parse_param("true"), serde_json::json!(true));
        assert_eq!(parse_param("null"), serde_json::Value::Null);
        assert_eq!(parse_param(r#"["a","b"]"#), serde_json::json!(["a", "b"]));
    }

    #[test]
    fn parse_param_falls_back_to_string() {
        assert_eq!(
            parse_param("0000000000000000000a1b2c"),
            serde_json::json!("0000000000000000000a1b2c")
        );
        assert_eq!(parse_param("CONSERVATIVE"), serde_json::json!("CONSERVATIVE"));
    }

    #[test]
    fn random_id_is_sixteen_hex_chars() {
        let id = random_id();
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn format_call_error_adds_auth_hint() {
        let message = format_call_error(
            "http://localhost:9332/",
            &CoreError::Rpc(RpcError::Authentication),
        );
        assert!(message.contains("localhost:9332"));
        assert!(message.contains("hint: authentication failed"));
    }

    #[test]
    fn format_call_error_keeps_server_message() {
        let err = CoreError::Rpc(RpcError::Server {
            message: "Block not found".to_owned(),
        });
        let message = format_call_error("http://localhost:9332/", &err);
        assert!(message.contains("error: Block not found"));
        assert!(!message.contains("hint:"));
    }
}
