//! chainharvest-core — foundation for the checkpointed event harvesting engine.
//!
//! # Architecture
//!
//! ```text
//! EventProcessor (chainharvest-elastic)
//!     ├── ProcessorConfig     (paging, scroll, delay + consumer seams)
//!     ├── EventFilter         (emitter / identifier / shard conditions)
//!     ├── EventHandler        (per-page delivery callback)
//!     └── CheckpointReader / CheckpointWriter (resumable position)
//! ```

pub mod checkpoint;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod handler;

pub use checkpoint::{
    reader_fn, writer_fn, CheckpointReader, CheckpointWriter, MemoryCheckpointStore,
};
pub use config::ProcessorConfig;
pub use error::HarvestError;
pub use event::Event;
pub use filter::EventFilter;
pub use handler::{events_fn, EventHandler};
