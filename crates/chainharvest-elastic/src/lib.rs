//! chainharvest-elastic — scroll fetcher, drain loop, and processor façade.
//!
//! # Architecture
//!
//! ```text
//! EventProcessor::start
//!     ├── validate config     (fixed precedence, fail fast)
//!     ├── resolve checkpoint  (CheckpointReader seam)
//!     ├── build_query         (first page only)
//!     └── drain loop          search → deliver → checkpoint → scroll → …
//!             └── HttpScrollClient (reqwest)
//! ```

pub mod builder;
pub mod http;
pub mod processor;
pub mod query;
pub mod scroll;

pub use builder::ProcessorBuilder;
pub use http::HttpScrollClient;
pub use processor::EventProcessor;
pub use query::build_query;
pub use scroll::{ScrollPage, ScrollingClient};
