//! Runtime storage queries.

use crate::{BlockHash, StorageKey};
use scalerpc::rpc::{
    RpcCodecError, decode_native_result, decode_optional_scale_result, decode_scale_result,
    encode_scale_param,
};
use scalerpc::scale::{ScaleRegistry, ScaleType, TypeKey};
use scalerpc_caller::error::RpcCallerError;
use scalerpc_caller::{RpcCallMethod, RpcOperationDescriptor, SectionDispatcher};
use serde_json::Value;
use std::marker::PhantomData;

/// Reads one storage entry and decodes it as `T`; absent entries are `None`.
///
/// The optional hash pins the read to a block; without it the best block is
/// used.
pub struct GetStorage<T>(PhantomData<T>);

impl<T: ScaleType + Send + 'static> RpcCallMethod for GetStorage<T> {
    const METHOD: &'static str = "state_getStorage";

    type Params = (StorageKey, Option<BlockHash>);
    type Output = Option<T>;

    fn encode_params(
        registry: &ScaleRegistry,
        (key, at): (StorageKey, Option<BlockHash>),
    ) -> Result<Vec<Value>, RpcCodecError> {
        let mut params = vec![encode_scale_param(registry, key)?];
        if let Some(at) = at {
            params.push(encode_scale_param(registry, at)?);
        }
        Ok(params)
    }

    fn decode_result(registry: &ScaleRegistry, value: Value) -> Result<Option<T>, RpcCodecError> {
        decode_optional_scale_result(registry, value)
    }

    fn param_keys() -> Vec<TypeKey> {
        vec![StorageKey::TYPE_KEY, BlockHash::TYPE_KEY]
    }

    fn result_keys() -> Vec<TypeKey> {
        vec![T::type_key()]
    }
}

/// Keys under a prefix, as stored at the best block.
pub struct GetKeys;

impl RpcCallMethod for GetKeys {
    const METHOD: &'static str = "state_getKeys";

    type Params = StorageKey;
    type Output = Vec<StorageKey>;

    fn encode_params(
        registry: &ScaleRegistry,
        prefix: StorageKey,
    ) -> Result<Vec<Value>, RpcCodecError> {
        Ok(vec![encode_scale_param(registry, prefix)?])
    }

    fn decode_result(
        registry: &ScaleRegistry,
        value: Value,
    ) -> Result<Vec<StorageKey>, RpcCodecError> {
        let items: Vec<Value> = decode_native_result(value)?;
        items
            .into_iter()
            .map(|item| decode_scale_result(registry, item))
            .collect()
    }

    fn param_keys() -> Vec<TypeKey> {
        vec![StorageKey::TYPE_KEY]
    }

    fn result_keys() -> Vec<TypeKey> {
        vec![StorageKey::TYPE_KEY]
    }
}

/// Only the non-generic operations; `GetStorage<T>` is validated per `T` by
/// its caller.
pub fn operations() -> Vec<RpcOperationDescriptor> {
    vec![GetKeys::descriptor()]
}

#[derive(Clone)]
pub struct State {
    dispatcher: SectionDispatcher,
}

impl State {
    pub fn new(dispatcher: SectionDispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn get_storage<T: ScaleType + Send + 'static>(
        &self,
        key: StorageKey,
        at: Option<BlockHash>,
    ) -> Result<Option<T>, RpcCallerError> {
        self.dispatcher.call::<GetStorage<T>>((key, at)).await
    }

    pub async fn get_keys(&self, prefix: StorageKey) -> Result<Vec<StorageKey>, RpcCallerError> {
        self.dispatcher.call::<GetKeys>(prefix).await
    }
}
