mod block_number;
mod extrinsic;
mod extrinsic_status;
mod fixed_hash;
mod header;
mod storage_key;
mod system_health;

pub use block_number::BlockNumber;
pub use extrinsic::Extrinsic;
pub use extrinsic_status::ExtrinsicStatus;
pub use fixed_hash::{AccountId, BlockHash, PublicKey};
pub use header::Header;
pub use storage_key::StorageKey;
pub use system_health::SystemHealth;
