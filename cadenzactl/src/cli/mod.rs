//! Command implementations. Each takes its options plus an output sink so
//! tests can drive them without spawning the binary.

pub mod simulate;
pub mod view;

pub use simulate::{FrameRecord, OutputFormat, SimulateOptions, SimulationSummary};
pub use view::{ViewAction, open_store};
