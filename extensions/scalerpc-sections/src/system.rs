//! Node identity and account bookkeeping.

use crate::{AccountId, SystemHealth};
use scalerpc::rpc::{RpcCodecError, decode_native_result, encode_scale_param};
use scalerpc::scale::{ScaleRegistry, TypeKey};
use scalerpc_caller::error::RpcCallerError;
use scalerpc_caller::{RpcCallMethod, RpcOperationDescriptor, SectionDispatcher};
use serde_json::Value;

macro_rules! text_query {
    ($(#[$doc:meta])* $name:ident, $method:literal) => {
        $(#[$doc])*
        pub struct $name;

        impl RpcCallMethod for $name {
            const METHOD: &'static str = $method;

            type Params = ();
            type Output = String;

            fn encode_params(_: &ScaleRegistry, _: ()) -> Result<Vec<Value>, RpcCodecError> {
                Ok(Vec::new())
            }

            fn decode_result(_: &ScaleRegistry, value: Value) -> Result<String, RpcCodecError> {
                decode_native_result(value)
            }
        }
    };
}

text_query!(
    /// Chain name, e.g. `Development`.
    SystemChain,
    "system_chain"
);
text_query!(
    /// Node implementation name.
    SystemName,
    "system_name"
);
text_query!(SystemVersion, "system_version");

pub struct SystemHealthQuery;

impl RpcCallMethod for SystemHealthQuery {
    const METHOD: &'static str = "system_health";

    type Params = ();
    type Output = SystemHealth;

    fn encode_params(_: &ScaleRegistry, _: ()) -> Result<Vec<Value>, RpcCodecError> {
        Ok(Vec::new())
    }

    fn decode_result(_: &ScaleRegistry, value: Value) -> Result<SystemHealth, RpcCodecError> {
        decode_native_result(value)
    }
}

/// Next usable nonce for an account, counting pool transactions.
pub struct AccountNextIndex;

impl RpcCallMethod for AccountNextIndex {
    const METHOD: &'static str = "system_accountNextIndex";

    type Params = AccountId;
    type Output = u64;

    fn encode_params(
        registry: &ScaleRegistry,
        account: AccountId,
    ) -> Result<Vec<Value>, RpcCodecError> {
        Ok(vec![encode_scale_param(registry, account)?])
    }

    fn decode_result(_: &ScaleRegistry, value: Value) -> Result<u64, RpcCodecError> {
        decode_native_result(value)
    }

    fn param_keys() -> Vec<TypeKey> {
        vec![AccountId::TYPE_KEY]
    }
}

pub fn operations() -> Vec<RpcOperationDescriptor> {
    vec![
        SystemChain::descriptor(),
        SystemName::descriptor(),
        SystemVersion::descriptor(),
        SystemHealthQuery::descriptor(),
        AccountNextIndex::descriptor(),
    ]
}

#[derive(Clone)]
pub struct System {
    dispatcher: SectionDispatcher,
}

impl System {
    pub fn new(dispatcher: SectionDispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn chain(&self) -> Result<String, RpcCallerError> {
        self.dispatcher.call::<SystemChain>(()).await
    }

    pub async fn name(&self) -> Result<String, RpcCallerError> {
        self.dispatcher.call::<SystemName>(()).await
    }

    pub async fn version(&self) -> Result<String, RpcCallerError> {
        self.dispatcher.call::<SystemVersion>(()).await
    }

    pub async fn health(&self) -> Result<SystemHealth, RpcCallerError> {
        self.dispatcher.call::<SystemHealthQuery>(()).await
    }

    pub async fn account_next_index(&self, account: AccountId) -> Result<u64, RpcCallerError> {
        self.dispatcher.call::<AccountNextIndex>(account).await
    }
}
