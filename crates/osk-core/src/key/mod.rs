//! Key definitions and their per-frame runtime state.
//!
//! - [`KeyDefinition`]: immutable description of a key
//! - [`KeyTable`]: validated set of definitions in layout order
//! - [`KeyRuntimeState`]: press timing, highlight and geometry of a key

mod definition;
mod state;
mod table;

pub use definition::KeyDefinition;
pub use state::{HighlightColor, KeyRuntimeState};
pub use table::KeyTable;
