pub mod config;
pub mod derive;
pub mod projection;
pub mod source;
pub mod store;

pub use config::{Config, RenderConfig, SourceConfig};
pub use projection::{Page, ViewProjector};
pub use source::FactSource;
pub use source::file::{FileSource, FileSourceError};
pub use source::memory::MemorySource;
pub use source::simulated::{SimulatedSource, SimulatedSourceError};
pub use store::FactStore;
