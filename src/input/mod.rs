// Pointer gesture state machine and keyboard nudge input

pub mod controller;
pub mod types;

pub use controller::{DownOutcome, GestureState, PointerController, UpOutcome};
pub use types::{ArrowKey, GestureKind, Modifiers, PointerEvent, ResizeEdge};
