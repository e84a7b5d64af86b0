pub mod constants;
pub mod error;

mod memory_transport;
mod pending_calls;
mod rpc_correlator;
mod rpc_operation;
mod rpc_subscription;
mod section_dispatcher;
mod subscription_table;
mod transport;

pub use memory_transport::MemoryTransport;
pub use rpc_correlator::{OpenedSubscription, RpcCorrelator, SubscriptionEvent};
pub use rpc_operation::{
    RpcCallMethod, RpcOperationDescriptor, RpcOperationKind, RpcSubscriptionMethod,
};
pub use rpc_subscription::{RpcSubscription, RpcSubscriptionStopper};
#[cfg(feature = "tokio_support")]
pub use rpc_subscription::RpcSubscriptionTask;
pub use section_dispatcher::SectionDispatcher;
pub use transport::{RpcTransport, RpcTransportState};
