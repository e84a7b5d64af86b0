//! Typed sections of a Substrate-style node RPC surface.
//!
//! Each section module declares one marker type per remote operation
//! (implementing [`RpcCallMethod`](scalerpc_caller::RpcCallMethod) or
//! [`RpcSubscriptionMethod`](scalerpc_caller::RpcSubscriptionMethod)) plus a
//! thin facade that forwards to a [`SectionDispatcher`].

pub mod author;
pub mod chain;
pub mod state;
pub mod system;

mod types;
pub use types::*;

use scalerpc::scale::{FixedBytesCodec, RawBytesCodec, ScaleRegistry, ScaleRegistryBuilder};
use scalerpc_caller::error::RpcCallerError;
use scalerpc_caller::{RpcOperationDescriptor, SectionDispatcher};
use std::sync::Arc;

/// Registers the codecs for the named types the sections exchange.
pub fn register_section_types(builder: ScaleRegistryBuilder) -> ScaleRegistryBuilder {
    builder
        .register_codec(BlockHash::TYPE_KEY, FixedBytesCodec::new(32))
        .register_codec(PublicKey::TYPE_KEY, FixedBytesCodec::new(32))
        .register_codec(AccountId::TYPE_KEY, FixedBytesCodec::new(32))
        .register_codec(Extrinsic::TYPE_KEY, RawBytesCodec)
        .register_codec(StorageKey::TYPE_KEY, RawBytesCodec)
}

/// Primitive codecs plus every section type.
pub fn section_registry() -> ScaleRegistry {
    register_section_types(ScaleRegistryBuilder::new().with_primitives()).build()
}

/// Descriptors for every non-generic operation the sections define.
pub fn operation_table() -> Vec<RpcOperationDescriptor> {
    let mut operations = author::operations();
    operations.extend(chain::operations());
    operations.extend(state::operations());
    operations.extend(system::operations());
    operations
}

/// Entry point bundling the four section facades over one dispatcher.
#[derive(Clone)]
pub struct NodeSections {
    dispatcher: SectionDispatcher,
}

impl NodeSections {
    /// Validates the operation table against the dispatcher's registry.
    pub fn new(dispatcher: SectionDispatcher) -> Result<Self, RpcCallerError> {
        dispatcher.validate_operations(&operation_table())?;
        Ok(Self { dispatcher })
    }

    pub fn author(&self) -> author::Author {
        author::Author::new(self.dispatcher.clone())
    }

    pub fn chain(&self) -> chain::Chain {
        chain::Chain::new(self.dispatcher.clone())
    }

    pub fn state(&self) -> state::State {
        state::State::new(self.dispatcher.clone())
    }

    pub fn system(&self) -> system::System {
        system::System::new(self.dispatcher.clone())
    }

    pub fn dispatcher(&self) -> &SectionDispatcher {
        &self.dispatcher
    }

    pub fn registry(&self) -> &Arc<ScaleRegistry> {
        self.dispatcher.registry()
    }
}
