mod ai;
mod app;
mod cache;
mod commit;
mod network;

pub use ai::{AiConfig, ProviderConfig, ProvidersConfig};
pub use app::{AppConfig, UIConfig};
pub use cache::CacheConfig;
pub use commit::CommitConfig;
pub use network::NetworkConfig;
