//! Block and header queries.

use crate::{BlockHash, BlockNumber, Header};
use scalerpc::rpc::{
    RpcCodecError, decode_native_result, decode_optional_scale_result, decode_scale_result,
    encode_native_param, encode_scale_param,
};
use scalerpc::scale::{ScaleRegistry, TypeKey};
use scalerpc_caller::error::RpcCallerError;
use scalerpc_caller::{
    RpcCallMethod, RpcOperationDescriptor, RpcSubscription, RpcSubscriptionMethod,
    SectionDispatcher,
};
use serde_json::Value;

/// Hash of the block at a height; `None` as parameter means the best block.
/// Unknown heights resolve to `None`.
pub struct GetBlockHash;

impl RpcCallMethod for GetBlockHash {
    const METHOD: &'static str = "chain_getBlockHash";

    type Params = Option<BlockNumber>;
    type Output = Option<BlockHash>;

    fn encode_params(
        _: &ScaleRegistry,
        number: Option<BlockNumber>,
    ) -> Result<Vec<Value>, RpcCodecError> {
        number
            .map(|number| encode_native_param(&number))
            .into_iter()
            .collect()
    }

    fn decode_result(
        registry: &ScaleRegistry,
        value: Value,
    ) -> Result<Option<BlockHash>, RpcCodecError> {
        decode_optional_scale_result(registry, value)
    }

    fn result_keys() -> Vec<TypeKey> {
        vec![BlockHash::TYPE_KEY]
    }
}

pub struct GetFinalizedHead;

impl RpcCallMethod for GetFinalizedHead {
    const METHOD: &'static str = "chain_getFinalizedHead";

    type Params = ();
    type Output = BlockHash;

    fn encode_params(_: &ScaleRegistry, _: ()) -> Result<Vec<Value>, RpcCodecError> {
        Ok(Vec::new())
    }

    fn decode_result(registry: &ScaleRegistry, value: Value) -> Result<BlockHash, RpcCodecError> {
        decode_scale_result(registry, value)
    }

    fn result_keys() -> Vec<TypeKey> {
        vec![BlockHash::TYPE_KEY]
    }
}

/// Header of the given block, or of the best block when no hash is passed.
pub struct GetHeader;

impl RpcCallMethod for GetHeader {
    const METHOD: &'static str = "chain_getHeader";

    type Params = Option<BlockHash>;
    type Output = Option<Header>;

    fn encode_params(
        registry: &ScaleRegistry,
        hash: Option<BlockHash>,
    ) -> Result<Vec<Value>, RpcCodecError> {
        hash.map(|hash| encode_scale_param(registry, hash))
            .into_iter()
            .collect()
    }

    fn decode_result(_: &ScaleRegistry, value: Value) -> Result<Option<Header>, RpcCodecError> {
        decode_native_result(value)
    }

    fn param_keys() -> Vec<TypeKey> {
        vec![BlockHash::TYPE_KEY]
    }
}

pub struct SubscribeNewHeads;

impl RpcSubscriptionMethod for SubscribeNewHeads {
    const SUBSCRIBE: &'static str = "chain_subscribeNewHeads";
    const UNSUBSCRIBE: &'static str = "chain_unsubscribeNewHeads";

    type Params = ();
    type Item = Header;

    fn encode_params(_: &ScaleRegistry, _: ()) -> Result<Vec<Value>, RpcCodecError> {
        Ok(Vec::new())
    }

    fn decode_item(_: &ScaleRegistry, value: Value) -> Result<Header, RpcCodecError> {
        decode_native_result(value)
    }
}

pub struct SubscribeFinalizedHeads;

impl RpcSubscriptionMethod for SubscribeFinalizedHeads {
    const SUBSCRIBE: &'static str = "chain_subscribeFinalizedHeads";
    const UNSUBSCRIBE: &'static str = "chain_unsubscribeFinalizedHeads";

    type Params = ();
    type Item = Header;

    fn encode_params(_: &ScaleRegistry, _: ()) -> Result<Vec<Value>, RpcCodecError> {
        Ok(Vec::new())
    }

    fn decode_item(_: &ScaleRegistry, value: Value) -> Result<Header, RpcCodecError> {
        decode_native_result(value)
    }
}

pub fn operations() -> Vec<RpcOperationDescriptor> {
    vec![
        GetBlockHash::descriptor(),
        GetFinalizedHead::descriptor(),
        GetHeader::descriptor(),
        SubscribeNewHeads::descriptor(),
        SubscribeFinalizedHeads::descriptor(),
    ]
}

#[derive(Clone)]
pub struct Chain {
    dispatcher: SectionDispatcher,
}

impl Chain {
    pub fn new(dispatcher: SectionDispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn get_block_hash(
        &self,
        number: Option<BlockNumber>,
    ) -> Result<Option<BlockHash>, RpcCallerError> {
        self.dispatcher.call::<GetBlockHash>(number).await
    }

    /// Hash of block zero.
    pub async fn genesis_hash(&self) -> Result<Option<BlockHash>, RpcCallerError> {
        self.get_block_hash(Some(BlockNumber(0))).await
    }

    pub async fn get_finalized_head(&self) -> Result<BlockHash, RpcCallerError> {
        self.dispatcher.call::<GetFinalizedHead>(()).await
    }

    pub async fn get_header(
        &self,
        hash: Option<BlockHash>,
    ) -> Result<Option<Header>, RpcCallerError> {
        self.dispatcher.call::<GetHeader>(hash).await
    }

    pub async fn subscribe_new_heads(&self) -> Result<RpcSubscription<Header>, RpcCallerError> {
        self.dispatcher.subscribe::<SubscribeNewHeads>(()).await
    }

    pub async fn subscribe_finalized_heads(
        &self,
    ) -> Result<RpcSubscription<Header>, RpcCallerError> {
        self.dispatcher.subscribe::<SubscribeFinalizedHeads>(()).await
    }
}
