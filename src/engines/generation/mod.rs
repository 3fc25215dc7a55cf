pub mod evolution_engine;
pub mod genome;
pub mod history;
pub mod operators;
pub mod progress;

pub use genome::Individual;
pub use evolution_engine::{EvolutionEngine, ProgressCallback, Slot};
pub use history::RunHistory;
pub use progress::{
    ChannelProgressCallback, ConsoleProgressCallback, LogProgressCallback, ProgressMessage,
    SilentProgressCallback,
};
