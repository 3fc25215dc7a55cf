pub mod traits;
pub mod evolution;
pub mod run;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::EvolutionConfig;
pub use run::RunConfig;
pub use traits::ConfigSection;
