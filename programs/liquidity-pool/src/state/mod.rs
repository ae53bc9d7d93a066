pub mod pool_config;

pub use pool_config::{PoolBumps, PoolConfig};
