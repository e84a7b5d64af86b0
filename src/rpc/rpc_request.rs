use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outbound call envelope.
///
/// Field order is the wire order: `{"id":..,"method":..,"params":[..]}`,
/// preceded by `"jsonrpc":"2.0"` only when the coder is in strict mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    pub id: u64,
    pub method: String,
    pub params: Vec<Value>,
}
