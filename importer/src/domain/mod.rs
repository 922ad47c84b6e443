//! Domain logic for trace import
//!
//! - `assemble` - ingestion event batch assembly
//! - `merge` - deep structural merge for derived trace input/output
//! - `normalize` - decoding and key normalization of exported values
//! - `observation` - exported observation model
//! - `pipeline` - import orchestration across main and agent traces
//! - `segment` - handoff-based agent segmentation
//! - `toolcalls` - completion output reshaping for tool-call rendering

pub mod assemble;
pub mod merge;
pub mod normalize;
pub mod observation;
pub mod pipeline;
pub mod segment;
pub mod toolcalls;

pub use assemble::{IngestionEvent, assemble};
pub use observation::{Observation, ObservationKind};
pub use pipeline::{ImportPipeline, ImportReport};
pub use segment::{AgentSegment, split_agent_segments};
