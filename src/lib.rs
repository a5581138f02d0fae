#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod capture;
pub mod config;
pub mod dump;
pub mod error;
pub mod render;
pub mod snapshot;
pub mod ultimate;
pub mod vic;

pub use capture::acquire;
pub use config::{BypassLayout, BypassSettings, CaptureOptions, SystemConfig};
pub use error::{AcquisitionError, CaptureWarning, MalformedInput, TransportError};
pub use render::{RenderOutput, render_pipeline};
pub use snapshot::{MemoryBlocks, Snapshot};
pub use ultimate::{DeviceControl, UltimateClient};
