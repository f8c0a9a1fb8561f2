use std::env;
use std::sync::Once;

use coincore_core::{Configuration, CoreError, RpcClient, RpcError};

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("coincore_core=debug")),
            )
            .with_target(true)
            .try_init();
    });
}

fn regtest_config() -> Configuration {
    let host = env::var("COINCORE_TEST_RPC_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let port = env::var("COINCORE_TEST_RPC_PORT")
        .ok()
        .map(|port| port.parse().expect("COINCORE_TEST_RPC_PORT must be a port"))
        .unwrap_or(18443);
    let user = env::var("COINCORE_TEST_RPC_USER").expect("COINCORE_TEST_RPC_USER must be set");
    let pass = env::var("COINCORE_TEST_RPC_PASS").expect("COINCORE_TEST_RPC_PASS must be set");
    Configuration::new(host, port, user, pass)
}

fn decode(body: &str) -> serde_json::Value {
    serde_json::from_str(body).expect("daemon response must be JSON")
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires local regtest bitcoind started with -rpcuser/-rpcpassword"]
async fn regtest_blockchain_calls_return_raw_envelopes() {
    init_tracing();
    let config = regtest_config();
    let client = RpcClient::from_config(&config).expect("rpc client must construct");

    eprintln!("[itest] getblockchaininfo against {}", config.endpoint());
    let raw = client
        .get_blockchain_info()
        .expect("no params to validate")
        .with_id("itest-info")
        .await
        .expect("getblockchaininfo must succeed");
    let info = decode(&raw);
    assert_eq!(info["id"], "itest-info");
    assert_eq!(info["result"]["chain"], "regtest");

    let raw = client
        .get_best_block_hash()
        .expect("no params to validate")
        .await
        .expect("getbestblockhash must succeed");
    let best = decode(&raw)["result"]
        .as_str()
        .expect("best block hash must be a string")
        .to_owned();
    assert_eq!(best.len(), 64, "block hash should be 64 hex characters");

    for verbosity in [0, 1, 2] {
        let raw = client
            .get_block(&best, verbosity)
            .expect("verbosity is allowed")
            .await
            .expect("getblock must succeed");
        assert!(decode(&raw)["error"].is_null());
    }
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires local regtest bitcoind started with -rpcuser/-rpcpassword"]
async fn regtest_daemon_errors_are_typed() {
    init_tracing();
    let config = regtest_config();
    let client = RpcClient::from_config(&config).expect("rpc client must construct");

    let err = client
        .get_block(&"00".repeat(32), 1)
        .expect("verbosity is allowed")
        .await
        .expect_err("unknown block must fail");
    assert!(
        matches!(err, CoreError::Rpc(RpcError::Server { .. })),
        "unexpected error: {err:?}"
    );

    let wrong = Configuration::new(
        config.host(),
        config.port(),
        "wrong",
        "credentials",
    );
    let client = RpcClient::from_config(&wrong).expect("rpc client must construct");
    let err = client
        .get_block_count()
        .expect("no params to validate")
        .await
        .expect_err("bad credentials must fail");
    assert!(matches!(err, CoreError::Rpc(RpcError::Authentication)));
}
