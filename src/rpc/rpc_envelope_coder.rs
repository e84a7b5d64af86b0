use super::{
    RpcCodecError, RpcErrorObject, RpcInbound, RpcNotification, RpcRequest, RpcResponse,
    SubscriptionId,
};
use crate::constants::JSONRPC_VERSION;
use serde_json::{Map, Value};

/// Turns calls into request text and classifies inbound text.
///
/// Stateless apart from the protocol-version switch, so one instance is
/// shared between the correlator and the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct RpcEnvelopeCoder {
    protocol_version: bool,
}

impl RpcEnvelopeCoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `"jsonrpc":"2.0"` to every request, for servers that insist on it.
    pub fn with_protocol_version(mut self) -> Self {
        self.protocol_version = true;
        self
    }

    pub fn encode(
        &self,
        id: u64,
        method: &str,
        params: Vec<Value>,
    ) -> Result<String, RpcCodecError> {
        let request = RpcRequest {
            jsonrpc: self.protocol_version.then(|| JSONRPC_VERSION.to_owned()),
            id,
            method: method.to_owned(),
            params,
        };
        Ok(serde_json::to_string(&request)?)
    }

    /// Never fails: anything that is not a well-formed response or
    /// notification comes back as [`RpcInbound::Malformed`].
    pub fn decode(&self, text: &str) -> RpcInbound {
        let value = match serde_json::from_str::<Value>(text) {
            Ok(value) => value,
            Err(err) => return RpcInbound::malformed(None, format!("invalid json: {err}")),
        };
        let Value::Object(object) = value else {
            return RpcInbound::malformed(None, "envelope is not a json object");
        };

        let id = match object.get("id") {
            None | Some(Value::Null) => None,
            Some(id) => match id.as_u64() {
                Some(id) => Some(id),
                None => return RpcInbound::malformed(None, format!("unsupported id {id}")),
            },
        };

        match id {
            Some(id) => Self::decode_response(id, object),
            None => Self::decode_notification(object),
        }
    }

    fn decode_response(id: u64, mut object: Map<String, Value>) -> RpcInbound {
        if let Some(error) = object.remove("error") {
            return match serde_json::from_value::<RpcErrorObject>(error) {
                Ok(error) => RpcInbound::Response(RpcResponse {
                    id,
                    outcome: Err(error),
                }),
                Err(err) => RpcInbound::malformed(Some(id), format!("invalid error object: {err}")),
            };
        }

        // A present `null` result is still a result.
        match object.remove("result") {
            Some(result) => RpcInbound::Response(RpcResponse {
                id,
                outcome: Ok(result),
            }),
            None => RpcInbound::malformed(Some(id), "response carries neither result nor error"),
        }
    }

    fn decode_notification(mut object: Map<String, Value>) -> RpcInbound {
        let Some(Value::String(method)) = object.remove("method") else {
            return RpcInbound::malformed(None, "envelope has neither id nor method");
        };
        let Some(Value::Object(mut params)) = object.remove("params") else {
            return RpcInbound::malformed(None, format!("notification `{method}` has no params object"));
        };
        let Some(subscription) = params.get("subscription").and_then(SubscriptionId::from_value)
        else {
            return RpcInbound::malformed(
                None,
                format!("notification `{method}` has no usable subscription id"),
            );
        };
        let Some(result) = params.remove("result") else {
            return RpcInbound::malformed(None, format!("notification `{method}` has no result"));
        };

        RpcInbound::Notification(RpcNotification {
            method,
            subscription,
            result,
        })
    }
}
