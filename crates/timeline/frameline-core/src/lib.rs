//! Frameline Core (engine-agnostic)
//!
//! Keyframe timeline resolution. Given sparse authored keyframes, this crate
//! computes the value of every animated property at any time (snapshots) and
//! expands a timeline across its iterations and directions into breakpoints for
//! a declarative, sample-once keyframe export. Clocks and rendering stay with the
//! host: it supplies the current time and receives snapshots via [`SnapshotSink`].

pub mod baking;
pub mod config;
pub mod error;
pub mod export;
pub mod frame;
pub mod ids;
pub mod interp;
pub mod keyframes;
pub mod loader;
pub mod path;
pub mod resolver;
pub mod sampling;
pub mod sink;
pub mod state;
pub mod value;

pub type Result<T> = core::result::Result<T, TimelineError>;

// Re-exports for consumers
pub use baking::Breakpoint;
pub use config::{Config, THRESHOLD, TIME_PRECISION};
pub use error::TimelineError;
pub use export::{AnimationParams, KeyframesExport};
pub use frame::{Frame, Node};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use interp::{interpolate, Easing, Endpoint, StepPosition};
pub use keyframes::Keyframes;
pub use loader::{load_keyframes, load_keyframes_str, LoadOptions};
pub use path::PropertyPath;
pub use resolver::TimelineResolver;
pub use sink::SnapshotSink;
pub use state::{Direction, FillMode, IterationCount, TimelineOptions, TimelineState};
pub use value::{Composite, Number, Value, ValueKind};
