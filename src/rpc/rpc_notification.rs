use super::SubscriptionId;
use serde_json::Value;

/// Server-pushed event for an open subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcNotification {
    pub method: String,
    pub subscription: SubscriptionId,
    pub result: Value,
}
