use serde_json::{json, Value};

use crate::config::Configuration;
use crate::error::{CoreError, ValidationError};
use crate::transport::{HttpTransport, ReqwestTransport};

use super::call::RpcCall;
use super::dispatch::Dispatcher;
use super::methods::{self, MethodSpec};

// ==============================================================================
// RpcClient: typed wrappers over the dispatcher
// ==============================================================================
//
// Every wrapper builds the positional parameter list for its RPC, validates
// it against the method's descriptor, and returns an `RpcCall`. Validation
// errors surface here, before any request exists; `.await` on the returned
// call performs the exchange.

pub struct RpcClient<T> {
    dispatcher: Dispatcher<T>,
}

impl RpcClient<ReqwestTransport> {
    /// Client for the configured daemon over a basic-auth reqwest transport.
    ///
    /// Fails here when the host and port do not form an HTTP(S) URL.
    pub fn from_config(config: &Configuration) -> Result<Self, CoreError> {
        let transport = ReqwestTransport::new(config)?;
        let endpoint = transport.url().to_string();
        Ok(Self::with_transport(endpoint, transport))
    }
}

impl<T: HttpTransport> RpcClient<T> {
    pub fn with_transport(endpoint: impl Into<String>, transport: T) -> Self {
        Self {
            dispatcher: Dispatcher::new(endpoint, transport),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    /// Prepare an arbitrary RPC by name.
    ///
    /// Registered methods are checked against their descriptor; unknown
    /// names are passed through unvalidated.
    pub fn call(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        if let Some(spec) = methods::lookup(method) {
            spec.validate(&params)?;
        }
        Ok(RpcCall::new(&self.dispatcher, method.to_owned(), params))
    }

    fn prepare(
        &self,
        spec: &'static MethodSpec,
        params: Vec<Value>,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        spec.validate(&params)?;
        Ok(RpcCall::new(&self.dispatcher, spec.name.to_owned(), params))
    }

    // --- Blockchain ---------------------------------------------------------

    /// Hash of the tip of the longest chain.
    pub fn get_best_block_hash(&self) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::GET_BEST_BLOCK_HASH, Vec::new())
    }

    /// Block `block_hash` as hex (verbosity 0), a JSON object (1), or a JSON
    /// object with decoded transactions (2). The daemon default is 1.
    pub fn get_block(
        &self,
        block_hash: &str,
        verbosity: i64,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::GET_BLOCK, vec![json!(block_hash), json!(verbosity)])
    }

    pub fn get_blockchain_info(&self) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::GET_BLOCKCHAIN_INFO, Vec::new())
    }

    pub fn get_block_count(&self) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::GET_BLOCK_COUNT, Vec::new())
    }

    /// Hash of the best-chain block at `height`.
    pub fn get_block_hash(&self, height: u64) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::GET_BLOCK_HASH, vec![json!(height)])
    }

    pub fn get_block_header(
        &self,
        block_hash: &str,
        verbose: bool,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::GET_BLOCK_HEADER,
            vec![json!(block_hash), json!(verbose)],
        )
    }

    /// Transaction count and rate over a window of `n_blocks` ending at
    /// `block_hash`. `None` leaves either bound to the daemon.
    pub fn get_chain_tx_stats(
        &self,
        n_blocks: Option<u64>,
        block_hash: Option<&str>,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::GET_CHAIN_TX_STATS,
            vec![json!(n_blocks), json!(block_hash)],
        )
    }

    pub fn get_difficulty(&self) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::GET_DIFFICULTY, Vec::new())
    }

    pub fn get_chain_tips(&self) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::GET_CHAIN_TIPS, Vec::new())
    }

    pub fn get_mempool_ancestors(
        &self,
        txid: &str,
        verbose: bool,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::GET_MEMPOOL_ANCESTORS,
            vec![json!(txid), json!(verbose)],
        )
    }

    pub fn get_mempool_descendants(
        &self,
        txid: &str,
        verbose: bool,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::GET_MEMPOOL_DESCENDANTS,
            vec![json!(txid), json!(verbose)],
        )
    }

    pub fn get_mempool_entry(&self, txid: &str) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::GET_MEMPOOL_ENTRY, vec![json!(txid)])
    }

    pub fn get_mempool_info(&self) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::GET_MEMPOOL_INFO, Vec::new())
    }

    pub fn get_raw_mempool(&self, verbose: bool) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::GET_RAW_MEMPOOL, vec![json!(verbose)])
    }

    /// Details of output `n` of `txid` if it is unspent. With
    /// `include_mempool`, outputs spent in the mempool are reported as spent.
    pub fn get_tx_out(
        &self,
        txid: &str,
        n: u32,
        include_mempool: bool,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::GET_TX_OUT,
            vec![json!(txid), json!(n), json!(include_mempool)],
        )
    }

    /// UTXO set statistics. Slow on large chains.
    pub fn get_tx_out_set_info(&self) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::GET_TX_OUT_SET_INFO, Vec::new())
    }

    // --- Control ------------------------------------------------------------

    /// Memory usage; `mode` is `stats` or `mallocinfo`.
    pub fn get_memory_info(&self, mode: &str) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::GET_MEMORY_INFO, vec![json!(mode)])
    }

    pub fn stop(&self) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::STOP, Vec::new())
    }

    pub fn uptime(&self) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::UPTIME, Vec::new())
    }

    // --- Raw transactions and utilities -------------------------------------

    /// Without `-txindex` this only finds mempool transactions, unless
    /// `block_hash` names the containing block.
    pub fn get_raw_transaction(
        &self,
        txid: &str,
        verbose: bool,
        block_hash: Option<&str>,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::GET_RAW_TRANSACTION,
            vec![json!(txid), json!(verbose), json!(block_hash)],
        )
    }

    /// Fee rate estimate for confirmation within `conf_target` blocks.
    /// `estimate_mode` is one of `UNSET`, `ECONOMICAL`, `CONSERVATIVE`.
    pub fn estimate_smart_fee(
        &self,
        conf_target: u32,
        estimate_mode: &str,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::ESTIMATE_SMART_FEE,
            vec![json!(conf_target), json!(estimate_mode)],
        )
    }

    pub fn validate_address(&self, address: &str) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::VALIDATE_ADDRESS, vec![json!(address)])
    }

    // --- Wallet -------------------------------------------------------------

    /// Add an `n_required`-of-`keys` multisig address to the wallet.
    /// `address_type` is one of `legacy`, `p2sh-segwit`, `bech32`.
    pub fn add_multisig_address(
        &self,
        n_required: u32,
        keys: &[&str],
        account: Option<&str>,
        address_type: Option<&str>,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::ADD_MULTISIG_ADDRESS,
            vec![
                json!(n_required),
                json!(keys),
                json!(account),
                json!(address_type),
            ],
        )
    }

    /// Wallet balance. `account` is deprecated by the daemon; pass `"*"`.
    pub fn get_balance(
        &self,
        account: &str,
        min_conf: u32,
        include_watch_only: bool,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::GET_BALANCE,
            vec![json!(account), json!(min_conf), json!(include_watch_only)],
        )
    }

    pub fn get_new_address(
        &self,
        account: Option<&str>,
        address_type: Option<&str>,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::GET_NEW_ADDRESS,
            vec![json!(account), json!(address_type)],
        )
    }

    pub fn get_received_by_address(
        &self,
        address: &str,
        min_conf: u32,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::GET_RECEIVED_BY_ADDRESS,
            vec![json!(address), json!(min_conf)],
        )
    }

    pub fn get_transaction(
        &self,
        txid: &str,
        include_watch_only: bool,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::GET_TRANSACTION,
            vec![json!(txid), json!(include_watch_only)],
        )
    }

    pub fn get_unconfirmed_balance(&self) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::GET_UNCONFIRMED_BALANCE, Vec::new())
    }

    pub fn get_wallet_info(&self) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::GET_WALLET_INFO, Vec::new())
    }

    /// Deprecated by the daemon in favour of labels.
    pub fn list_accounts(
        &self,
        min_conf: u32,
        include_watch_only: bool,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::LIST_ACCOUNTS,
            vec![json!(min_conf), json!(include_watch_only)],
        )
    }

    pub fn list_address_groupings(&self) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::LIST_ADDRESS_GROUPINGS, Vec::new())
    }

    /// Deprecated by the daemon in favour of labels.
    pub fn list_received_by_account(
        &self,
        min_conf: u32,
        include_empty: bool,
        include_watch_only: bool,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::LIST_RECEIVED_BY_ACCOUNT,
            vec![
                json!(min_conf),
                json!(include_empty),
                json!(include_watch_only),
            ],
        )
    }

    pub fn list_received_by_address(
        &self,
        min_conf: u32,
        include_empty: bool,
        include_watch_only: bool,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::LIST_RECEIVED_BY_ADDRESS,
            vec![
                json!(min_conf),
                json!(include_empty),
                json!(include_watch_only),
            ],
        )
    }

    /// Wallet transactions since `block_hash`, or all of them for `None`.
    pub fn list_since_block(
        &self,
        block_hash: Option<&str>,
        target_confirmations: u32,
        include_watch_only: bool,
        include_removed: bool,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::LIST_SINCE_BLOCK,
            vec![
                json!(block_hash),
                json!(target_confirmations),
                json!(include_watch_only),
                json!(include_removed),
            ],
        )
    }

    /// Up to `count` most recent transactions after skipping `skip`.
    pub fn list_transactions(
        &self,
        account: &str,
        count: u32,
        skip: u32,
        include_watch_only: bool,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::LIST_TRANSACTIONS,
            vec![
                json!(account),
                json!(count),
                json!(skip),
                json!(include_watch_only),
            ],
        )
    }

    /// Send `amount` (a decimal string, e.g. `"0.1"`) to `address`.
    pub fn send_to_address(
        &self,
        address: &str,
        amount: &str,
        options: &SendToAddressOptions,
    ) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(
            &methods::SEND_TO_ADDRESS,
            vec![
                json!(address),
                json!(amount),
                json!(options.comment),
                json!(options.comment_to),
                json!(options.subtract_fee_from_amount),
                json!(options.replaceable),
                json!(options.conf_target),
                json!(options.estimate_mode),
            ],
        )
    }

    pub fn list_wallets(&self) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::LIST_WALLETS, Vec::new())
    }

    /// Set the wallet fee rate per kB; `amount` is a decimal string.
    pub fn set_tx_fee(&self, amount: &str) -> Result<RpcCall<'_, T>, ValidationError> {
        self.prepare(&methods::SET_TX_FEE, vec![json!(amount)])
    }
}

/// Optional arguments of `sendtoaddress`, defaulting to the daemon's own
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendToAddressOptions {
    /// Wallet-local note about what the transaction is for.
    pub comment: Option<String>,
    /// Wallet-local note naming the recipient.
    pub comment_to: Option<String>,
    pub subtract_fee_from_amount: bool,
    /// Signal BIP 125 replaceability.
    pub replaceable: bool,
    pub conf_target: u32,
    pub estimate_mode: String,
}

impl Default for SendToAddressOptions {
    fn default() -> Self {
        Self {
            comment: None,
            comment_to: None,
            subtract_fee_from_amount: false,
            replaceable: false,
            conf_target: 6,
            estimate_mode: "UNSET".to_owned(),
        }
    }
}
