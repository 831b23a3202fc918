//! Adapter implementations for the chain store port.

pub mod memory;
pub mod rpc;

pub use memory::InMemoryChainStore;
pub use rpc::CondenserRpcStore;
