//! Transaction pool and keystore operations.

use crate::{Extrinsic, ExtrinsicStatus, PublicKey};
use scalerpc::rpc::{
    RpcCodecError, decode_native_result, decode_scale_result, encode_native_param,
    encode_scale_param,
};
use scalerpc::scale::{H256, ScaleRegistry, ScaleType, TypeKey};
use scalerpc::utils::from_hex;
use scalerpc_caller::error::RpcCallerError;
use scalerpc_caller::{
    RpcCallMethod, RpcOperationDescriptor, RpcSubscription, RpcSubscriptionMethod,
    SectionDispatcher,
};
use serde_json::Value;

/// Whether the keystore holds the private half of `(public key, key type)`.
pub struct HasKey;

impl RpcCallMethod for HasKey {
    const METHOD: &'static str = "author_hasKey";

    type Params = (PublicKey, String);
    type Output = bool;

    fn encode_params(
        registry: &ScaleRegistry,
        (public_key, key_type): (PublicKey, String),
    ) -> Result<Vec<Value>, RpcCodecError> {
        Ok(vec![
            encode_scale_param(registry, public_key)?,
            encode_native_param(&key_type)?,
        ])
    }

    fn decode_result(_: &ScaleRegistry, value: Value) -> Result<bool, RpcCodecError> {
        decode_native_result(value)
    }

    fn param_keys() -> Vec<TypeKey> {
        vec![PublicKey::TYPE_KEY]
    }
}

/// Inserts a key pair derived from a secret URI into the keystore.
pub struct InsertKey;

impl RpcCallMethod for InsertKey {
    const METHOD: &'static str = "author_insertKey";

    /// `(key type, secret URI, public key)`.
    type Params = (String, String, PublicKey);
    type Output = ();

    fn encode_params(
        registry: &ScaleRegistry,
        (key_type, suri, public_key): (String, String, PublicKey),
    ) -> Result<Vec<Value>, RpcCodecError> {
        Ok(vec![
            encode_native_param(&key_type)?,
            encode_native_param(&suri)?,
            encode_scale_param(registry, public_key)?,
        ])
    }

    fn decode_result(_: &ScaleRegistry, value: Value) -> Result<(), RpcCodecError> {
        decode_native_result(value)
    }

    fn param_keys() -> Vec<TypeKey> {
        vec![PublicKey::TYPE_KEY]
    }
}

/// Submits an extrinsic and returns its hash.
pub struct SubmitExtrinsic;

impl RpcCallMethod for SubmitExtrinsic {
    const METHOD: &'static str = "author_submitExtrinsic";

    type Params = Extrinsic;
    type Output = H256;

    fn encode_params(
        registry: &ScaleRegistry,
        extrinsic: Extrinsic,
    ) -> Result<Vec<Value>, RpcCodecError> {
        Ok(vec![encode_scale_param(registry, extrinsic)?])
    }

    fn decode_result(registry: &ScaleRegistry, value: Value) -> Result<H256, RpcCodecError> {
        decode_scale_result(registry, value)
    }

    fn param_keys() -> Vec<TypeKey> {
        vec![Extrinsic::TYPE_KEY]
    }

    fn result_keys() -> Vec<TypeKey> {
        vec![H256::type_key()]
    }
}

/// Extrinsics currently sitting in the pool.
pub struct PendingExtrinsics;

impl RpcCallMethod for PendingExtrinsics {
    const METHOD: &'static str = "author_pendingExtrinsics";

    type Params = ();
    type Output = Vec<Extrinsic>;

    fn encode_params(_: &ScaleRegistry, _: ()) -> Result<Vec<Value>, RpcCodecError> {
        Ok(Vec::new())
    }

    fn decode_result(
        registry: &ScaleRegistry,
        value: Value,
    ) -> Result<Vec<Extrinsic>, RpcCodecError> {
        let items: Vec<Value> = decode_native_result(value)?;
        items
            .into_iter()
            .map(|item| decode_scale_result(registry, item))
            .collect()
    }

    fn result_keys() -> Vec<TypeKey> {
        vec![Extrinsic::TYPE_KEY]
    }
}

/// Generates fresh session keys and returns their concatenated public halves.
pub struct RotateKeys;

impl RpcCallMethod for RotateKeys {
    const METHOD: &'static str = "author_rotateKeys";

    type Params = ();
    type Output = Vec<u8>;

    fn encode_params(_: &ScaleRegistry, _: ()) -> Result<Vec<Value>, RpcCodecError> {
        Ok(Vec::new())
    }

    fn decode_result(_: &ScaleRegistry, value: Value) -> Result<Vec<u8>, RpcCodecError> {
        let text: String = decode_native_result(value)?;
        Ok(from_hex(&text)?)
    }
}

/// Submits an extrinsic and streams its pool status until it is final.
pub struct SubmitAndWatchExtrinsic;

impl RpcSubscriptionMethod for SubmitAndWatchExtrinsic {
    const SUBSCRIBE: &'static str = "author_submitAndWatchExtrinsic";
    const UNSUBSCRIBE: &'static str = "author_unwatchExtrinsic";

    type Params = Extrinsic;
    type Item = ExtrinsicStatus;

    fn encode_params(
        registry: &ScaleRegistry,
        extrinsic: Extrinsic,
    ) -> Result<Vec<Value>, RpcCodecError> {
        Ok(vec![encode_scale_param(registry, extrinsic)?])
    }

    fn decode_item(_: &ScaleRegistry, value: Value) -> Result<ExtrinsicStatus, RpcCodecError> {
        decode_native_result(value)
    }

    fn param_keys() -> Vec<TypeKey> {
        vec![Extrinsic::TYPE_KEY]
    }
}

pub fn operations() -> Vec<RpcOperationDescriptor> {
    vec![
        HasKey::descriptor(),
        InsertKey::descriptor(),
        SubmitExtrinsic::descriptor(),
        PendingExtrinsics::descriptor(),
        RotateKeys::descriptor(),
        SubmitAndWatchExtrinsic::descriptor(),
    ]
}

#[derive(Clone)]
pub struct Author {
    dispatcher: SectionDispatcher,
}

impl Author {
    pub fn new(dispatcher: SectionDispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn has_key(
        &self,
        public_key: PublicKey,
        key_type: &str,
    ) -> Result<bool, RpcCallerError> {
        self.dispatcher
            .call::<HasKey>((public_key, key_type.to_owned()))
            .await
    }

    pub async fn insert_key(
        &self,
        key_type: &str,
        suri: &str,
        public_key: PublicKey,
    ) -> Result<(), RpcCallerError> {
        self.dispatcher
            .call::<InsertKey>((key_type.to_owned(), suri.to_owned(), public_key))
            .await
    }

    pub async fn submit_extrinsic(&self, extrinsic: Extrinsic) -> Result<H256, RpcCallerError> {
        self.dispatcher.call::<SubmitExtrinsic>(extrinsic).await
    }

    pub async fn pending_extrinsics(&self) -> Result<Vec<Extrinsic>, RpcCallerError> {
        self.dispatcher.call::<PendingExtrinsics>(()).await
    }

    pub async fn rotate_keys(&self) -> Result<Vec<u8>, RpcCallerError> {
        self.dispatcher.call::<RotateKeys>(()).await
    }

    pub async fn submit_and_watch_extrinsic(
        &self,
        extrinsic: Extrinsic,
    ) -> Result<RpcSubscription<ExtrinsicStatus>, RpcCallerError> {
        self.dispatcher
            .subscribe::<SubmitAndWatchExtrinsic>(extrinsic)
            .await
    }
}
