//! Core data types shared across the crate.

mod selection;
mod slot;

pub use selection::{CellFlags, SelectionState, StepDirection};
pub use slot::{DaySlot, SlotRestrictions};
