use crate::constants::DEFAULT_CALL_TIMEOUT;
use crate::error::RpcCallerError;
use crate::{
    RpcCallMethod, RpcCorrelator, RpcOperationDescriptor, RpcSubscription, RpcSubscriptionMethod,
};
use scalerpc::rpc::{RpcCodecError, RpcEnvelopeCoder};
use scalerpc::scale::ScaleRegistry;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Typed entry point used by section operations.
///
/// Encodes parameters with the shared registry, runs the request through the
/// correlator and decodes the result (or each notification) back into the
/// caller's type.
#[derive(Clone)]
pub struct SectionDispatcher {
    registry: Arc<ScaleRegistry>,
    coder: Arc<RpcEnvelopeCoder>,
    correlator: Arc<RpcCorrelator>,
    default_timeout: Option<Duration>,
}

impl SectionDispatcher {
    pub fn new(registry: Arc<ScaleRegistry>, correlator: Arc<RpcCorrelator>) -> Self {
        Self {
            registry,
            coder: Arc::clone(correlator.coder()),
            correlator,
            default_timeout: Some(DEFAULT_CALL_TIMEOUT),
        }
    }

    /// `None` waits indefinitely.
    pub fn with_default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn registry(&self) -> &Arc<ScaleRegistry> {
        &self.registry
    }

    pub fn coder(&self) -> &Arc<RpcEnvelopeCoder> {
        &self.coder
    }

    pub fn correlator(&self) -> &Arc<RpcCorrelator> {
        &self.correlator
    }

    pub async fn invoke_call<T, F>(
        &self,
        method: &str,
        params: Vec<Value>,
        decode: F,
    ) -> Result<T, RpcCallerError>
    where
        F: FnOnce(&ScaleRegistry, Value) -> Result<T, RpcCodecError>,
    {
        let value = self
            .correlator
            .invoke_call(method, params, self.default_timeout)
            .await?;
        decode(&self.registry, value).map_err(RpcCallerError::Decode)
    }

    pub async fn open_subscription<T, F>(
        &self,
        subscribe_method: &str,
        unsubscribe_method: &str,
        params: Vec<Value>,
        decode: F,
    ) -> Result<RpcSubscription<T>, RpcCallerError>
    where
        F: Fn(&ScaleRegistry, Value) -> Result<T, RpcCodecError> + Send + Sync + 'static,
    {
        let opened = self
            .correlator
            .open_subscription(
                subscribe_method,
                unsubscribe_method,
                params,
                self.default_timeout,
            )
            .await?;

        let registry = Arc::clone(&self.registry);
        Ok(RpcSubscription::new(
            opened,
            Arc::clone(&self.correlator),
            self.default_timeout,
            Arc::new(move |value| decode(&registry, value)),
        ))
    }

    pub async fn call<Op: RpcCallMethod>(
        &self,
        params: Op::Params,
    ) -> Result<Op::Output, RpcCallerError> {
        let params = Op::encode_params(&self.registry, params).map_err(RpcCallerError::Encode)?;
        self.invoke_call(Op::METHOD, params, Op::decode_result).await
    }

    pub async fn subscribe<Op: RpcSubscriptionMethod + 'static>(
        &self,
        params: Op::Params,
    ) -> Result<RpcSubscription<Op::Item>, RpcCallerError> {
        let params = Op::encode_params(&self.registry, params).map_err(RpcCallerError::Encode)?;
        self.open_subscription(Op::SUBSCRIBE, Op::UNSUBSCRIBE, params, Op::decode_item)
            .await
    }

    /// Fails fast on the first descriptor whose wire methods are empty or
    /// declared twice, or whose keys the registry cannot resolve.
    pub fn validate_operations(
        &self,
        operations: &[RpcOperationDescriptor],
    ) -> Result<(), RpcCallerError> {
        let mut seen = HashSet::new();

        for operation in operations {
            let invalid = |reason: String| RpcCallerError::InvalidOperation {
                operation: operation.name,
                reason,
            };

            for method in operation.wire_methods() {
                if method.is_empty() {
                    return Err(invalid("empty wire method".into()));
                }
                if !seen.insert(method) {
                    return Err(invalid(format!("wire method `{method}` declared twice")));
                }
            }

            self.registry
                .validate_writers(&operation.param_keys)
                .map_err(|err| invalid(err.to_string()))?;
            self.registry
                .validate_readers(&operation.result_keys)
                .map_err(|err| invalid(err.to_string()))?;
        }

        tracing::debug!(operations = operations.len(), "operation table validated");
        Ok(())
    }
}
