use scalerpc::rpc::RpcCodecError;
use scalerpc::scale::{ScaleRegistry, TypeKey};
use serde_json::Value;

/// Whether an operation is a one-shot call or a subscription.
///
/// Being an enum, an operation can never be both or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcOperationKind {
    Call {
        method: &'static str,
    },
    Subscription {
        subscribe: &'static str,
        unsubscribe: &'static str,
    },
}

/// Static description of one section operation, checked at startup by
/// [`SectionDispatcher::validate_operations`](crate::SectionDispatcher::validate_operations).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcOperationDescriptor {
    pub name: &'static str,
    pub kind: RpcOperationKind,
    /// Keys that must have writers.
    pub param_keys: Vec<TypeKey>,
    /// Keys that must have readers.
    pub result_keys: Vec<TypeKey>,
}

impl RpcOperationDescriptor {
    pub fn wire_methods(&self) -> Vec<&'static str> {
        match self.kind {
            RpcOperationKind::Call { method } => vec![method],
            RpcOperationKind::Subscription {
                subscribe,
                unsubscribe,
            } => vec![subscribe, unsubscribe],
        }
    }
}

/// A remote procedure returning a single result.
pub trait RpcCallMethod {
    /// Wire method name, e.g. `author_hasKey`.
    const METHOD: &'static str;
    const NAME: &'static str = Self::METHOD;

    type Params: Send;
    type Output: Send + 'static;

    fn encode_params(
        registry: &ScaleRegistry,
        params: Self::Params,
    ) -> Result<Vec<Value>, RpcCodecError>;

    fn decode_result(registry: &ScaleRegistry, value: Value)
    -> Result<Self::Output, RpcCodecError>;

    fn param_keys() -> Vec<TypeKey> {
        Vec::new()
    }

    fn result_keys() -> Vec<TypeKey> {
        Vec::new()
    }

    fn descriptor() -> RpcOperationDescriptor {
        RpcOperationDescriptor {
            name: Self::NAME,
            kind: RpcOperationKind::Call {
                method: Self::METHOD,
            },
            param_keys: Self::param_keys(),
            result_keys: Self::result_keys(),
        }
    }
}

/// A remote event stream, opened by one method and closed by another.
pub trait RpcSubscriptionMethod {
    const SUBSCRIBE: &'static str;
    const UNSUBSCRIBE: &'static str;
    const NAME: &'static str = Self::SUBSCRIBE;

    type Params: Send;
    type Item: Send + 'static;

    fn encode_params(
        registry: &ScaleRegistry,
        params: Self::Params,
    ) -> Result<Vec<Value>, RpcCodecError>;

    fn decode_item(registry: &ScaleRegistry, value: Value) -> Result<Self::Item, RpcCodecError>;

    fn param_keys() -> Vec<TypeKey> {
        Vec::new()
    }

    fn item_keys() -> Vec<TypeKey> {
        Vec::new()
    }

    fn descriptor() -> RpcOperationDescriptor {
        RpcOperationDescriptor {
            name: Self::NAME,
            kind: RpcOperationKind::Subscription {
                subscribe: Self::SUBSCRIBE,
                unsubscribe: Self::UNSUBSCRIBE,
            },
            param_keys: Self::param_keys(),
            result_keys: Self::item_keys(),
        }
    }
}
