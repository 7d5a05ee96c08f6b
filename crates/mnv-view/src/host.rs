//! Host document seam.
//!
//! The node view only ever consumes two primitives from the editing
//! framework — "read current node attributes" and "request attribute
//! update" — plus node deletion. `DocumentHost` is that boundary;
//! `MemoryHost` is the in-memory reference implementation used by the
//! integration tests and demos.

use crate::view::NodeRequest;
use mnv_core::model::{AttrPatch, MediaAttrs};

/// The primitives the editing framework provides for one media node.
/// The framework stays responsible for document-model consistency and
/// undo integration behind `update_attributes`.
pub trait DocumentHost {
    fn attributes(&self) -> Option<&MediaAttrs>;
    fn update_attributes(&mut self, patch: AttrPatch);
    fn delete_node(&mut self);
}

/// Route one node-view request to the host.
pub fn dispatch(host: &mut impl DocumentHost, request: NodeRequest) {
    match request {
        NodeRequest::UpdateAttrs(patch) => host.update_attributes(patch),
        NodeRequest::DeleteNode => host.delete_node(),
    }
}

/// In-memory host holding a single node's attributes.
#[derive(Debug, Default)]
pub struct MemoryHost {
    attrs: Option<MediaAttrs>,
    deleted: bool,
}

impl MemoryHost {
    pub fn new(attrs: MediaAttrs) -> Self {
        Self {
            attrs: Some(attrs),
            deleted: false,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}

impl DocumentHost for MemoryHost {
    fn attributes(&self) -> Option<&MediaAttrs> {
        self.attrs.as_ref()
    }

    fn update_attributes(&mut self, patch: AttrPatch) {
        if self.deleted {
            return;
        }
        if let Some(attrs) = &mut self.attrs {
            patch.apply_to(attrs);
        }
    }

    fn delete_node(&mut self) {
        self.deleted = true;
        self.attrs = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnv_core::model::{AlignMode, FloatMode, MediaKind};
    use pretty_assertions::assert_eq;

    fn host() -> MemoryHost {
        MemoryHost::new(MediaAttrs {
            src: "a.png".into(),
            kind: MediaKind::Image,
            width: 400,
            height: 300,
            float: FloatMode::None,
            align: AlignMode::None,
        })
    }

    #[test]
    fn update_merges_into_attributes() {
        let mut host = host();
        dispatch(
            &mut host,
            NodeRequest::UpdateAttrs(AttrPatch::size(350, 263)),
        );
        let attrs = host.attributes().unwrap();
        assert_eq!((attrs.width, attrs.height), (350, 263));
        assert_eq!(attrs.src, "a.png", "unpatched fields survive");
    }

    #[test]
    fn delete_removes_the_node() {
        let mut host = host();
        dispatch(&mut host, NodeRequest::DeleteNode);
        assert!(host.is_deleted());
        assert!(host.attributes().is_none());

        // Late updates from a stale view are dropped.
        dispatch(
            &mut host,
            NodeRequest::UpdateAttrs(AttrPatch::size(100, 100)),
        );
        assert!(host.attributes().is_none());
    }
}
