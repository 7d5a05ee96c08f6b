pub mod actions;
pub mod host;
pub mod schedule;
pub mod session;
pub mod view;

pub use actions::{ActionEffect, ActionState, MediaAction, standard_actions};
pub use host::{DocumentHost, MemoryHost, dispatch};
pub use schedule::{FollowUp, FollowUpQueue};
pub use session::ResizeController;
pub use view::{MediaNodeView, NodeRequest, ViewState, derive_view_state};
