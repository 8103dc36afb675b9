//! Controller layer: UI events, form state transitions, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
