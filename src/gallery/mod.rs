//! Gallery harness: registry, table layout and per-cell dispatch.

mod dispatch;
mod layout;
mod registry;

pub use dispatch::{dispatch, error_text, Dispatched};
pub use layout::{build_layout, GridPlan, LayoutSink, COLUMNS};
pub use registry::{Descriptor, Registry, Strategy, Surface};

/// Height of every drawing surface, in CSS pixels.
pub const CELL_HEIGHT: u32 = 200;
