//! `hw-task`: the substrate multi-step jobs run on.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`outcome`]  | `StepOutcome<S>`, `TaskStatus`, `TaskEnd`                 |
//! | [`driver`]   | `TaskDriver<S>`: runs an ordered step list                |
//!
//! # Model
//!
//! A job is an ordered list of step labels `S` (usually a small `Copy` enum)
//! and a function that runs one step and says what happens next:
//!
//! - `Next`: fall through to the following step in the same tick;
//! - `Wait`: stay on this step and try again next tick (travel, waiting
//!   for a store cell);
//! - `JumpTo(s)`: re-enter step `s` in the same tick;
//! - `End(e)`: stop with a status.
//!
//! Running past the last step is success.  Nothing blocks: a step that is
//! waiting for the world to change returns `Wait` and is simply called again
//! on the next tick.

pub mod driver;
pub mod outcome;

#[cfg(test)]
mod tests;

pub use driver::{MAX_TRANSITIONS_PER_TICK, TaskDriver};
pub use outcome::{StepOutcome, TaskEnd, TaskStatus};
