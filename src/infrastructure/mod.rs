// Infrastructure implementations for calltree.

pub mod concurrency;
pub mod model_loader;
pub mod sinks;

pub use model_loader::ModelLoader;
pub use sinks::{ConsoleSink, FileSink};
