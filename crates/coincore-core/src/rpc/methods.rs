//! Method descriptors for every RPC the client wraps.
//!
//! A [`MethodSpec`] names the RPC and lists its positional parameters. Any
//! parameter restricted to an allow-list carries an [`AllowList`], so the
//! typed wrappers and the generic [`RpcClient::call`] validate through the
//! same table.
//!
//! [`RpcClient::call`]: super::RpcClient::call

use serde_json::Value;

use crate::error::ValidationError;

use super::validation::{invalid_value, validate_enum};

// ==============================================================================
// Allow-lists
// ==============================================================================

pub const VERBOSITY_LEVELS: &[i64] = &[0, 1, 2];
pub const MEMORY_INFO_MODES: &[&str] = &["stats", "mallocinfo"];
pub const FEE_ESTIMATE_MODES: &[&str] = &["UNSET", "ECONOMICAL", "CONSERVATIVE"];
pub const ADDRESS_TYPES: &[&str] = &["legacy", "p2sh-segwit", "bech32"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedValues {
    Integers(&'static [i64]),
    Strings(&'static [&'static str]),
}

/// Values accepted for one parameter, and the label used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowList {
    pub label: &'static str,
    pub values: AllowedValues,
}

impl AllowList {
    /// `null` always passes: it asks the daemon for its default.
    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        if value.is_null() {
            return Ok(());
        }

        match self.values {
            AllowedValues::Integers(allowed) => match value.as_i64() {
                Some(n) => validate_enum(&n, allowed, self.label),
                None => Err(invalid_value(self.label, allowed, &display_value(value))),
            },
            AllowedValues::Strings(allowed) => match value.as_str() {
                Some(s) => validate_enum(&s, allowed, self.label),
                None => Err(invalid_value(self.label, allowed, &display_value(value))),
            },
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ==============================================================================
// Descriptors
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub allowed: Option<AllowList>,
}

const fn param(name: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        allowed: None,
    }
}

const fn restricted(name: &'static str, label: &'static str, values: AllowedValues) -> ParamSpec {
    ParamSpec {
        name,
        allowed: Some(AllowList { label, values }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSpec {
    pub name: &'static str,
    pub params: &'static [ParamSpec],
}

impl MethodSpec {
    /// Check each restricted position against its allow-list.
    ///
    /// Arity is left to the daemon: newer releases accept trailing
    /// arguments this table does not list, and omitted ones take defaults.
    pub fn validate(&self, params: &[Value]) -> Result<(), ValidationError> {
        for (spec, value) in self.params.iter().zip(params) {
            if let Some(allowed) = &spec.allowed {
                allowed.check(value)?;
            }
        }
        Ok(())
    }
}

// Blockchain

pub static GET_BEST_BLOCK_HASH: MethodSpec = MethodSpec {
    name: "getbestblockhash",
    params: &[],
};
pub static GET_BLOCK: MethodSpec = MethodSpec {
    name: "getblock",
    params: &[
        param("blockhash"),
        restricted(
            "verbosity",
            "Verbosity",
            AllowedValues::Integers(VERBOSITY_LEVELS),
        ),
    ],
};
pub static GET_BLOCKCHAIN_INFO: MethodSpec = MethodSpec {
    name: "getblockchaininfo",
    params: &[],
};
pub static GET_BLOCK_COUNT: MethodSpec = MethodSpec {
    name: "getblockcount",
    params: &[],
};
pub static GET_BLOCK_HASH: MethodSpec = MethodSpec {
    name: "getblockhash",
    params: &[param("height")],
};
pub static GET_BLOCK_HEADER: MethodSpec = MethodSpec {
    name: "getblockheader",
    params: &[param("blockhash"), param("verbose")],
};
pub static GET_CHAIN_TX_STATS: MethodSpec = MethodSpec {
    name: "getchaintxstats",
    params: &[param("nblocks"), param("blockhash")],
};
pub static GET_DIFFICULTY: MethodSpec = MethodSpec {
    name: "getdifficulty",
    params: &[],
};
pub static GET_CHAIN_TIPS: MethodSpec = MethodSpec {
    name: "getchaintips",
    params: &[],
};
pub static GET_MEMPOOL_ANCESTORS: MethodSpec = MethodSpec {
    name: "getmempoolancestors",
    params: &[param("txid"), param("verbose")],
};
pub static GET_MEMPOOL_DESCENDANTS: MethodSpec = MethodSpec {
    name: "getmempooldescendants",
    params: &[param("txid"), param("verbose")],
};
pub static GET_MEMPOOL_ENTRY: MethodSpec = MethodSpec {
    name: "getmempoolentry",
    params: &[param("txid")],
};
pub static GET_MEMPOOL_INFO: MethodSpec = MethodSpec {
    name: "getmempoolinfo",
    params: &[],
};
pub static GET_RAW_MEMPOOL: MethodSpec = MethodSpec {
    name: "getrawmempool",
    params: &[param("verbose")],
};
pub static GET_TX_OUT: MethodSpec = MethodSpec {
    name: "gettxout",
    params: &[param("txid"), param("n"), param("include_mempool")],
};
pub static GET_TX_OUT_SET_INFO: MethodSpec = MethodSpec {
    name: "gettxoutsetinfo",
    params: &[],
};

// Control

pub static GET_MEMORY_INFO: MethodSpec = MethodSpec {
    name: "getmemoryinfo",
    params: &[restricted(
        "mode",
        "Mode",
        AllowedValues::Strings(MEMORY_INFO_MODES),
    )],
};
pub static STOP: MethodSpec = MethodSpec {
    name: "stop",
    params: &[],
};
pub static UPTIME: MethodSpec = MethodSpec {
    name: "uptime",
    params: &[],
};

// Raw transactions and utilities

pub static GET_RAW_TRANSACTION: MethodSpec = MethodSpec {
    name: "getrawtransaction",
    params: &[param("txid"), param("verbose"), param("blockhash")],
};
pub static ESTIMATE_SMART_FEE: MethodSpec = MethodSpec {
    name: "estimatesmartfee",
    params: &[
        param("conf_target"),
        restricted(
            "estimate_mode",
            "Mode",
            AllowedValues::Strings(FEE_ESTIMATE_MODES),
        ),
    ],
};
pub static VALIDATE_ADDRESS: MethodSpec = MethodSpec {
    name: "validateaddress",
    params: &[param("address")],
};

// Wallet

pub static ADD_MULTISIG_ADDRESS: MethodSpec = MethodSpec {
    name: "addmultisigaddress",
    params: &[
        param("nrequired"),
        param("keys"),
        param("account"),
        restricted(
            "address_type",
            "Account type",
            AllowedValues::Strings(ADDRESS_TYPES),
        ),
    ],
};
pub static GET_BALANCE: MethodSpec = MethodSpec {
    name: "getbalance",
    params: &[
        param("account"),
        param("minconf"),
        param("include_watchonly"),
    ],
};
pub static GET_NEW_ADDRESS: MethodSpec = MethodSpec {
    name: "getnewaddress",
    params: &[
        param("account"),
        restricted(
            "address_type",
            "Address type",
            AllowedValues::Strings(ADDRESS_TYPES),
        ),
    ],
};
pub static GET_RECEIVED_BY_ADDRESS: MethodSpec = MethodSpec {
    name: "getreceivedbyaddress",
    params: &[param("address"), param("minconf")],
};
pub static GET_TRANSACTION: MethodSpec = MethodSpec {
    name: "gettransaction",
    params: &[param("txid"), param("include_watchonly")],
};
pub static GET_UNCONFIRMED_BALANCE: MethodSpec = MethodSpec {
    name: "getunconfirmedbalance",
    params: &[],
};
pub static GET_WALLET_INFO: MethodSpec = MethodSpec {
    name: "getwalletinfo",
    params: &[],
};
pub static LIST_ACCOUNTS: MethodSpec = MethodSpec {
    name: "listaccounts",
    params: &[param("minconf"), param("include_watchonly")],
};
pub static LIST_ADDRESS_GROUPINGS: MethodSpec = MethodSpec {
    name: "listaddressgroupings",
    params: &[],
};
pub static LIST_RECEIVED_BY_ACCOUNT: MethodSpec = MethodSpec {
    name: "listreceivedbyaccount",
    params: &[
        param("minconf"),
        param("include_empty"),
        param("include_watchonly"),
    ],
};
pub static LIST_RECEIVED_BY_ADDRESS: MethodSpec = MethodSpec {
    name: "listreceivedbyaddress",
    params: &[
        param("minconf"),
        param("include_empty"),
        param("include_watchonly"),
    ],
};
pub static LIST_SINCE_BLOCK: MethodSpec = MethodSpec {
    name: "listsinceblock",
    params: &[
        param("blockhash"),
        param("target_confirmations"),
        param("include_watchonly"),
        param("include_removed"),
    ],
};
pub static LIST_TRANSACTIONS: MethodSpec = MethodSpec {
    name: "listtransactions",
    params: &[
        param("account"),
        param("count"),
        param("skip"),
        param("include_watchonly"),
    ],
};
pub static SEND_TO_ADDRESS: MethodSpec = MethodSpec {
    name: "sendtoaddress",
    params: &[
        param("address"),
        param("amount"),
        param("comment"),
        param("comment_to"),
        param("subtractfeefromamount"),
        param("replaceable"),
        param("conf_target"),
        restricted(
            "estimate_mode",
            "Estimate mode",
            AllowedValues::Strings(FEE_ESTIMATE_MODES),
        ),
    ],
};
pub static LIST_WALLETS: MethodSpec = MethodSpec {
    name: "listwallets",
    params: &[],
};
pub static SET_TX_FEE: MethodSpec = MethodSpec {
    name: "settxfee",
    params: &[param("amount")],
};

/// Every wrapped RPC, in registry order.
pub static METHODS: &[&MethodSpec] = &[
    &GET_BEST_BLOCK_HASH,
    &GET_BLOCK,
    &GET_BLOCKCHAIN_INFO,
    &GET_BLOCK_COUNT,
    &GET_BLOCK_HASH,
    &GET_BLOCK_HEADER,
    &GET_CHAIN_TX_STATS,
    &GET_DIFFICULTY,
    &GET_CHAIN_TIPS,
    &GET_MEMPOOL_ANCESTORS,
    &GET_MEMPOOL_DESCENDANTS,
    &GET_MEMPOOL_ENTRY,
    &GET_MEMPOOL_INFO,
    &GET_RAW_MEMPOOL,
    &GET_TX_OUT,
    &GET_TX_OUT_SET_INFO,
    &GET_MEMORY_INFO,
    &STOP,
    &UPTIME,
    &GET_RAW_TRANSACTION,
    &ESTIMATE_SMART_FEE,
    &VALIDATE_ADDRESS,
    &ADD_MULTISIG_ADDRESS,
    &GET_BALANCE,
    &GET_NEW_ADDRESS,
    &GET_RECEIVED_BY_ADDRESS,
    &GET_TRANSACTION,
    &GET_UNCONFIRMED_BALANCE,
    &GET_WALLET_INFO,
    &LIST_ACCOUNTS,
    &LIST_ADDRESS_GROUPINGS,
    &LIST_RECEIVED_BY_ACCOUNT,
    &LIST_RECEIVED_BY_ADDRESS,
    &LIST_SINCE_BLOCK,
    &LIST_TRANSACTIONS,
    &SEND_TO_ADDRESS,
    &LIST_WALLETS,
    &SET_TX_FEE,
];

pub fn lookup(name: &str) -> Option<&'static MethodSpec> {
    METHODS.iter().copied().find(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;

    #[test]
    fn registry_names_are_unique() {
        let names: HashSet<&str> = METHODS.iter().map(|spec| spec.name).collect();
        assert_eq!(names.len(), METHODS.len());
        assert_eq!(METHODS.len(), 38);
    }

    #[test]
    fn lookup_finds_registered_method() {
        let spec = lookup("getblock").expect("getblock must be registered");
        assert_eq!(spec.params.len(), 2);
        assert!(lookup("getblocktemplate").is_none());
    }

    #[test]
    fn validate_leaves_surplus_params_to_daemon() {
        GET_TX_OUT_SET_INFO
            .validate(&[json!("muhash")])
            .expect("hash_type is newer than this table");
        GET_BALANCE
            .validate(&[json!("*"), json!(0), json!(false), json!(true)])
            .expect("avoid_reuse is newer than this table");
    }

    #[test]
    fn validate_allows_null_for_optional_enum() {
        GET_NEW_ADDRESS
            .validate(&[Value::Null, Value::Null])
            .expect("null address type means server default");
    }

    #[test]
    fn validate_allows_trailing_params_to_be_omitted() {
        GET_BLOCK
            .validate(&[json!("abcd")])
            .expect("verbosity may be omitted");
    }

    #[test]
    fn validate_reports_wrongly_typed_value_raw() {
        let err = GET_BLOCK
            .validate(&[json!("abcd"), json!("two")])
            .expect_err("string verbosity must be rejected");
        assert_eq!(
            err.to_string(),
            "Verbosity has invalid value. Expected values are: 0,1,2, actual: two"
        );
    }

    #[test]
    fn validate_uses_per_method_label() {
        let err = SEND_TO_ADDRESS
            .validate(&[
                json!("addr"),
                json!("1"),
                Value::Null,
                Value::Null,
                json!(false),
                json!(false),
                json!(6),
                json!("FAST"),
            ])
            .expect_err("FAST is not a fee mode");
        assert_eq!(
            err.to_string(),
            "Estimate mode has invalid value. Expected values are: UNSET,ECONOMICAL,CONSERVATIVE, actual: FAST"
        );
    }
}
