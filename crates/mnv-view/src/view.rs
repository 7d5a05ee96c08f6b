//! Media node view: presentation state and resize wiring.
//!
//! One `MediaNodeView` exists per embedded media node. It mirrors the
//! node's attributes, owns the drag controller plus the two pieces of
//! view-scoped state that outlive individual drags (the editing-surface
//! width, measured once, and the aspect ratio, captured once on load),
//! and turns pointer events into `NodeRequest` values for the host to
//! apply. It never touches the document directly.

use crate::actions::{
    ActionEffect, ActionState, DELETE_ACTION_ID, MediaAction, action_states, standard_actions,
};
use crate::schedule::{FollowUp, FollowUpQueue};
use crate::session::ResizeController;
use mnv_core::geometry::{AspectRatio, Dimensions, constrain_candidate};
use mnv_core::model::{AttrPatch, MediaAttrs, MediaKind};
use smallvec::SmallVec;

/// A request emitted toward the host document.
///
/// The host merges `UpdateAttrs` into the node's attribute set (and owns
/// document-model consistency and undo integration); `DeleteNode`
/// removes the node entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRequest {
    UpdateAttrs(AttrPatch),
    DeleteNode,
}

/// Renderable state derived from the current attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub kind: MediaKind,
    pub src: String,
    pub width: u32,
    pub height: u32,
    pub float_class: Option<&'static str>,
    pub align_class: Option<&'static str>,
    /// Whether the resize handle should render in its active state.
    pub resize_active: bool,
    pub actions: Vec<ActionState>,
}

/// Pure derivation of renderable state from attributes. Invoked whenever
/// the host reports an attribute change — no lifecycle coupling, so any
/// change-notification mechanism can drive it.
pub fn derive_view_state(
    attrs: &MediaAttrs,
    actions: &[MediaAction],
    resize_active: bool,
) -> ViewState {
    ViewState {
        kind: attrs.kind,
        src: attrs.src.clone(),
        width: attrs.width,
        height: attrs.height,
        float_class: attrs.float.css_class(),
        align_class: attrs.align.css_class(),
        resize_active,
        actions: action_states(actions, attrs),
    }
}

/// The interactive node view for one embedded image or video.
pub struct MediaNodeView {
    /// Mirror of the node's attributes; `None` until the host mounts the
    /// node and delivers the first snapshot.
    attrs: Option<MediaAttrs>,
    controller: ResizeController,
    /// Editing-surface width, measured once per view lifetime.
    container_width: Option<u32>,
    /// Intrinsic width/height ratio, captured once on media load.
    aspect_ratio: Option<AspectRatio>,
    actions: SmallVec<[MediaAction; 8]>,
    follow_ups: FollowUpQueue,
}

impl MediaNodeView {
    /// A view with the standard toolbar registry.
    pub fn new() -> Self {
        Self::with_actions(standard_actions())
    }

    /// A view with a custom toolbar registry.
    pub fn with_actions(actions: SmallVec<[MediaAction; 8]>) -> Self {
        Self {
            attrs: None,
            controller: ResizeController::new(),
            container_width: None,
            aspect_ratio: None,
            actions,
            follow_ups: FollowUpQueue::new(),
        }
    }

    pub fn attrs(&self) -> Option<&MediaAttrs> {
        self.attrs.as_ref()
    }

    pub fn aspect_ratio(&self) -> Option<AspectRatio> {
        self.aspect_ratio
    }

    pub fn resize_active(&self) -> bool {
        self.controller.is_active()
    }

    /// Host change notification: the node's attributes changed (by a
    /// resize update we emitted, by another collaborator, or on mount).
    pub fn attrs_changed(&mut self, attrs: MediaAttrs) {
        self.attrs = Some(attrs);
    }

    /// Record the editing surface's width. Only the first call measures;
    /// later calls are no-ops returning the cached value, so the resize
    /// ceiling cannot drift while the container reflows mid-drag.
    pub fn measure_container_once(&mut self, width: u32) -> u32 {
        *self.container_width.get_or_insert(width)
    }

    /// The media finished loading: capture the intrinsic ratio (once) and
    /// schedule the corrective pass that reconciles a node inserted with
    /// an explicit size against the true ratio of what actually loaded.
    pub fn media_loaded(&mut self, natural_width: u32, natural_height: u32) {
        if self.aspect_ratio.is_some() {
            return;
        }
        match AspectRatio::from_natural(natural_width, natural_height) {
            Some(ratio) => {
                self.aspect_ratio = Some(ratio);
                self.follow_ups.post(FollowUp::CorrectiveResize);
            }
            None => {
                log::warn!(
                    "media reported degenerate natural size {natural_width}x{natural_height}; staying not-ready"
                );
            }
        }
    }

    // ─── Resize entry points ─────────────────────────────────────────────

    /// Pointer-down on the resize handle.
    pub fn start_resize(&mut self, pointer_x: f64) {
        self.controller.start(pointer_x);
    }

    /// Pointer-move while a session may be active. Returns the attribute
    /// update to forward to the host, or `None` when the frame has no
    /// effect (inactive, not ready, unmounted, or rejected candidate).
    pub fn handle_pointer_move(&mut self, pointer_x: f64) -> Option<NodeRequest> {
        if !self.controller.is_active() {
            return None;
        }
        // Skipped frames still rebase, so the first accepted move after
        // the view becomes ready measures from the pointer's last
        // position rather than the drag origin.
        let Some(attrs) = &self.attrs else {
            log::warn!("media attributes unavailable during resize; skipping move");
            self.controller.rebase(pointer_x);
            return None;
        };
        let (Some(container_width), Some(ratio)) = (self.container_width, self.aspect_ratio)
        else {
            log::debug!("resize before container/ratio known; move ignored");
            self.controller.rebase(pointer_x);
            return None;
        };

        let current = Dimensions::new(attrs.width, attrs.height);
        self.controller
            .pointer_move(pointer_x, current, container_width, ratio)
            .map(|dims| NodeRequest::UpdateAttrs(AttrPatch::size(dims.width, dims.height)))
    }

    /// Pointer-up (or forced termination on blur/visibility loss).
    /// Idempotent when no session is active.
    pub fn stop_resize(&mut self) {
        self.controller.stop();
    }

    // ─── Deferred work ───────────────────────────────────────────────────

    /// Drain pending follow-up tasks. The host calls this after the
    /// current layout pass, once intrinsic dimensions are readable.
    pub fn flush_follow_ups(&mut self) -> Vec<NodeRequest> {
        let mut requests = Vec::new();
        while let Some(task) = self.follow_ups.pop() {
            match task {
                FollowUp::CorrectiveResize => {
                    if let Some(request) = self.corrective_resize() {
                        requests.push(request);
                    }
                }
            }
        }
        requests
    }

    /// Recompute a height consistent with the captured ratio at the
    /// current stored width. Emits nothing when the stored size already
    /// agrees, or when the node is not ready.
    fn corrective_resize(&self) -> Option<NodeRequest> {
        let attrs = self.attrs.as_ref()?;
        let Some(ratio) = self.aspect_ratio else {
            return None;
        };
        let Some(container_width) = self.container_width else {
            log::debug!("corrective resize before container measured; skipped");
            return None;
        };

        let current = Dimensions::new(attrs.width, attrs.height);
        let corrected = constrain_candidate(i64::from(current.width), container_width, ratio)?;
        (corrected != current)
            .then_some(NodeRequest::UpdateAttrs(AttrPatch::size(
                corrected.width,
                corrected.height,
            )))
    }

    // ─── Toolbar ─────────────────────────────────────────────────────────

    /// User activated a toolbar button. The reserved `delete` identifier
    /// removes the node; everything else applies the action's own effect.
    pub fn activate_action(&self, id: &str) -> Option<NodeRequest> {
        if id == DELETE_ACTION_ID {
            return Some(NodeRequest::DeleteNode);
        }
        let action = self.actions.iter().find(|a| a.id == id)?;
        let attrs = self.attrs.as_ref().or_else(|| {
            log::warn!("action {id:?} activated before attributes mounted; ignored");
            None
        })?;
        match (action.apply)(attrs) {
            ActionEffect::Patch(patch) => Some(NodeRequest::UpdateAttrs(patch)),
            ActionEffect::DeleteNode => Some(NodeRequest::DeleteNode),
        }
    }

    /// Current renderable state, or `None` before the first attribute
    /// snapshot arrives.
    pub fn view_state(&self) -> Option<ViewState> {
        self.attrs
            .as_ref()
            .map(|attrs| derive_view_state(attrs, &self.actions, self.controller.is_active()))
    }
}

impl Default for MediaNodeView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnv_core::model::{AlignMode, FloatMode};
    use pretty_assertions::assert_eq;

    fn image_attrs(width: u32, height: u32) -> MediaAttrs {
        MediaAttrs {
            src: "https://example.com/a.png".into(),
            kind: MediaKind::Image,
            width,
            height,
            float: FloatMode::None,
            align: AlignMode::None,
        }
    }

    fn ready_view(width: u32, height: u32) -> MediaNodeView {
        let mut view = MediaNodeView::new();
        view.attrs_changed(image_attrs(width, height));
        view.measure_container_once(800);
        view.media_loaded(800, 600);
        view.flush_follow_ups();
        view
    }

    #[test]
    fn view_state_before_mount_is_none() {
        let view = MediaNodeView::new();
        assert_eq!(view.view_state(), None);
    }

    #[test]
    fn derive_includes_classes_and_action_flags() {
        let mut attrs = image_attrs(400, 300);
        attrs.float = FloatMode::Left;
        let actions = standard_actions();

        let state = derive_view_state(&attrs, &actions, false);
        assert_eq!(state.kind, MediaKind::Image);
        assert_eq!(state.float_class, Some("f-left"));
        assert_eq!(state.align_class, None);
        assert!(!state.resize_active);
        let float_left = state.actions.iter().find(|a| a.id == "float-left").unwrap();
        assert!(float_left.active);
    }

    #[test]
    fn container_is_measured_exactly_once() {
        let mut view = MediaNodeView::new();
        assert_eq!(view.measure_container_once(800), 800);
        // Surface reflowed mid-drag: re-measure must not move the ceiling.
        assert_eq!(view.measure_container_once(640), 800);
    }

    #[test]
    fn moves_before_media_ready_are_ignored() {
        let mut view = MediaNodeView::new();
        view.attrs_changed(image_attrs(400, 300));
        view.measure_container_once(800);
        // No media_loaded yet: ratio unknown.
        view.start_resize(500.0);
        assert_eq!(view.handle_pointer_move(450.0), None);
    }

    #[test]
    fn moves_without_attrs_are_ignored() {
        let mut view = MediaNodeView::new();
        view.measure_container_once(800);
        view.media_loaded(800, 600);
        view.start_resize(500.0);
        assert_eq!(view.handle_pointer_move(450.0), None);
    }

    #[test]
    fn skipped_moves_rebase_for_the_first_ready_frame() {
        let mut view = MediaNodeView::new();
        view.attrs_changed(image_attrs(400, 300));
        view.measure_container_once(800);

        view.start_resize(500.0);
        // Ratio still unknown: the move is skipped but tracked.
        assert_eq!(view.handle_pointer_move(450.0), None);

        view.media_loaded(800, 600);
        view.flush_follow_ups();

        // Only the 50px since the skipped frame applies, not the full
        // 100px since drag start.
        let request = view.handle_pointer_move(400.0).unwrap();
        assert_eq!(
            request,
            NodeRequest::UpdateAttrs(AttrPatch::size(350, 263))
        );
    }

    #[test]
    fn moves_before_mount_rebase_for_later_frames() {
        let mut view = MediaNodeView::new();
        view.measure_container_once(800);
        view.media_loaded(800, 600);
        view.flush_follow_ups();

        view.start_resize(500.0);
        // No attribute snapshot yet: skipped but tracked.
        assert_eq!(view.handle_pointer_move(460.0), None);

        view.attrs_changed(image_attrs(400, 300));
        let request = view.handle_pointer_move(420.0).unwrap();
        assert_eq!(
            request,
            NodeRequest::UpdateAttrs(AttrPatch::size(360, 270))
        );
    }

    #[test]
    fn accepted_move_emits_size_patch() {
        let mut view = ready_view(400, 300);
        view.start_resize(500.0);
        let request = view.handle_pointer_move(450.0).unwrap();
        assert_eq!(
            request,
            NodeRequest::UpdateAttrs(AttrPatch::size(350, 263))
        );
    }

    #[test]
    fn ratio_is_captured_once() {
        let mut view = ready_view(400, 300);
        let before = view.aspect_ratio().unwrap();
        // A second load event (e.g. the video element re-reporting) is ignored.
        view.media_loaded(100, 100);
        assert_eq!(view.aspect_ratio().unwrap(), before);
    }

    #[test]
    fn degenerate_natural_size_stays_not_ready() {
        let mut view = MediaNodeView::new();
        view.attrs_changed(image_attrs(400, 300));
        view.measure_container_once(800);
        view.media_loaded(0, 600);
        assert!(view.aspect_ratio().is_none());
        assert_eq!(view.flush_follow_ups(), Vec::new());
    }

    #[test]
    fn corrective_resize_fixes_height_for_true_ratio() {
        let mut view = MediaNodeView::new();
        // Inserted square (400x400) but the actual media is 4:3.
        view.attrs_changed(image_attrs(400, 400));
        view.measure_container_once(800);
        view.media_loaded(800, 600);

        let requests = view.flush_follow_ups();
        assert_eq!(
            requests,
            vec![NodeRequest::UpdateAttrs(AttrPatch::size(400, 300))]
        );
    }

    #[test]
    fn corrective_resize_is_silent_when_size_agrees() {
        let mut view = MediaNodeView::new();
        view.attrs_changed(image_attrs(400, 300));
        view.measure_container_once(800);
        view.media_loaded(800, 600);
        assert_eq!(view.flush_follow_ups(), Vec::new());
    }

    #[test]
    fn corrective_resize_clamps_oversized_insert() {
        let mut view = MediaNodeView::new();
        // Inserted wider than the surface allows.
        view.attrs_changed(image_attrs(1200, 900));
        view.measure_container_once(800);
        view.media_loaded(800, 600);

        let requests = view.flush_follow_ups();
        assert_eq!(
            requests,
            vec![NodeRequest::UpdateAttrs(AttrPatch::size(800, 600))]
        );
    }

    #[test]
    fn delete_action_routes_to_node_removal() {
        let view = ready_view(400, 300);
        assert_eq!(view.activate_action("delete"), Some(NodeRequest::DeleteNode));
    }

    #[test]
    fn unknown_action_is_ignored() {
        let view = ready_view(400, 300);
        assert_eq!(view.activate_action("rotate-90"), None);
    }

    #[test]
    fn align_action_emits_exclusive_patch() {
        let view = ready_view(400, 300);
        let request = view.activate_action("align-center").unwrap();
        let NodeRequest::UpdateAttrs(patch) = request else {
            panic!("expected an attribute patch");
        };
        assert_eq!(patch.align, Some(AlignMode::Center));
        assert_eq!(patch.float, Some(FloatMode::None));
        assert_eq!(patch.width, None);
    }

    #[test]
    fn custom_registry_is_respected() {
        let actions: SmallVec<[MediaAction; 8]> = smallvec::smallvec![MediaAction {
            id: "caption",
            icon: "ri-text",
            is_active: |attrs| attrs.width > 300,
            apply: |_| ActionEffect::Patch(AttrPatch::default()),
        }];
        let mut view = MediaNodeView::with_actions(actions);
        view.attrs_changed(image_attrs(400, 300));

        let state = view.view_state().unwrap();
        assert_eq!(state.actions.len(), 1);
        assert_eq!(state.actions[0].id, "caption");
        assert!(state.actions[0].active);
    }
}
