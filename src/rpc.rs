mod rpc_codec;
mod rpc_codec_error;
mod rpc_envelope_coder;
mod rpc_inbound;
mod rpc_notification;
mod rpc_request;
mod rpc_response;
mod subscription_id;

pub use rpc_codec::{
    decode_native_result, decode_optional_scale_result, decode_scale_result, encode_native_param,
    encode_scale_param,
};
pub use rpc_codec_error::RpcCodecError;
pub use rpc_envelope_coder::RpcEnvelopeCoder;
pub use rpc_inbound::RpcInbound;
pub use rpc_notification::RpcNotification;
pub use rpc_request::RpcRequest;
pub use rpc_response::{RpcErrorObject, RpcResponse};
pub use subscription_id::SubscriptionId;
