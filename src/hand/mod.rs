//! Hand layout
//!
//! Cards are placed by a small per-card pipeline of stages. The controller
//! owns the cards, decides how much of the curve each one gets, and keeps
//! the focused card on top.

pub mod card;
pub mod controller;
pub mod layer_stack;
pub mod origin;
pub mod stage;

pub use card::{Card, CardId, Counter, CounterKind};
pub use controller::{FrameReport, HandController, depth_sequence};
pub use layer_stack::{LayerStack, StageSlot};
pub use origin::Origin;
pub use stage::{ArrangeStage, FocusStage, Stage, StageContext, StageError};
