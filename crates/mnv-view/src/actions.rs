//! Toolbar action registry for media nodes.
//!
//! Each action is a descriptor: an identifier, an icon reference for the
//! rendering layer, a predicate deciding whether the action is currently
//! highlighted, and the effect activating it has on the node. The view
//! is polymorphic over the registry — it evaluates predicates and routes
//! effects without knowing any action's semantics, except that the
//! reserved `delete` identifier removes the node instead of patching it.
//!
//! Float and align are mutually exclusive placements, so every float
//! action clears the align attribute and vice versa.

use mnv_core::model::{AlignMode, AttrPatch, FloatMode, MediaAttrs};
use smallvec::{SmallVec, smallvec};

/// Identifier of the reserved node-removing action.
pub const DELETE_ACTION_ID: &str = "delete";

/// What activating an action does to the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEffect {
    /// Merge a partial attribute update into the node.
    Patch(AttrPatch),
    /// Remove the node from the document entirely.
    DeleteNode,
}

/// Descriptor for one toolbar button.
#[derive(Debug, Clone, Copy)]
pub struct MediaAction {
    pub id: &'static str,
    /// Icon class for the rendering layer (remixicon names).
    pub icon: &'static str,
    /// Is this action highlighted given the current attributes?
    pub is_active: fn(&MediaAttrs) -> bool,
    pub apply: fn(&MediaAttrs) -> ActionEffect,
}

/// One action's computed highlight state, in registry order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionState {
    pub id: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

/// Evaluate every action's predicate against the current attributes.
pub fn action_states(actions: &[MediaAction], attrs: &MediaAttrs) -> Vec<ActionState> {
    actions
        .iter()
        .map(|action| ActionState {
            id: action.id,
            icon: action.icon,
            active: (action.is_active)(attrs),
        })
        .collect()
}

fn float_patch(mode: FloatMode) -> ActionEffect {
    ActionEffect::Patch(AttrPatch {
        float: Some(mode),
        align: Some(AlignMode::None),
        ..AttrPatch::default()
    })
}

fn align_patch(mode: AlignMode) -> ActionEffect {
    ActionEffect::Patch(AttrPatch {
        align: Some(mode),
        float: Some(FloatMode::None),
        ..AttrPatch::default()
    })
}

/// The standard media toolbar: float left/right, align left/center/right,
/// and delete.
pub fn standard_actions() -> SmallVec<[MediaAction; 8]> {
    smallvec![
        MediaAction {
            id: "float-left",
            icon: "ri-layout-left-2-line",
            is_active: |attrs| attrs.float == FloatMode::Left,
            apply: |_| float_patch(FloatMode::Left),
        },
        MediaAction {
            id: "float-right",
            icon: "ri-layout-right-2-line",
            is_active: |attrs| attrs.float == FloatMode::Right,
            apply: |_| float_patch(FloatMode::Right),
        },
        MediaAction {
            id: "align-left",
            icon: "ri-align-left",
            is_active: |attrs| attrs.align == AlignMode::Left,
            apply: |_| align_patch(AlignMode::Left),
        },
        MediaAction {
            id: "align-center",
            icon: "ri-align-center",
            is_active: |attrs| attrs.align == AlignMode::Center,
            apply: |_| align_patch(AlignMode::Center),
        },
        MediaAction {
            id: "align-right",
            icon: "ri-align-right",
            is_active: |attrs| attrs.align == AlignMode::Right,
            apply: |_| align_patch(AlignMode::Right),
        },
        MediaAction {
            id: DELETE_ACTION_ID,
            icon: "ri-delete-bin-line",
            is_active: |_| false,
            apply: |_| ActionEffect::DeleteNode,
        },
    ]
}
