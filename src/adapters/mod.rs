// Adapters layer: concrete number providers.

pub mod static_provider;
pub mod web_provider;

pub use static_provider::StaticProvider;
pub use web_provider::WebProvider;
