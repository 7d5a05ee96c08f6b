//! WASM bridge — exposes the media node view engine to a JavaScript host.
//!
//! Compiled via `wasm-pack build --target web` and loaded by the editor's
//! node-view glue. The host forwards pointer, load, and attribute-change
//! events; the bridge answers with JSON payloads the host applies through
//! its own `updateAttributes` / `deleteNode` primitives.

use mnv_core::model::MediaAttrs;
use mnv_view::view::{MediaNodeView, NodeRequest};
use serde_json::json;
use wasm_bindgen::prelude::*;

/// The JS-facing controller for one media node view.
#[wasm_bindgen]
pub struct MediaView {
    view: MediaNodeView,
}

#[wasm_bindgen]
impl MediaView {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_diagnostics_setup();
        Self {
            view: MediaNodeView::new(),
        }
    }

    /// Deliver the node's current attributes as JSON (the host's change
    /// notification). Returns `false` when the payload does not parse.
    pub fn set_attributes(&mut self, json: &str) -> bool {
        match serde_json::from_str::<MediaAttrs>(json) {
            Ok(attrs) => {
                self.view.attrs_changed(attrs);
                true
            }
            Err(err) => {
                log::warn!("rejected attribute payload: {err}");
                false
            }
        }
    }

    /// Record the editing surface's width (first call wins).
    pub fn measure_container(&mut self, width: u32) -> u32 {
        self.view.measure_container_once(width)
    }

    /// The media element finished loading; pass its intrinsic dimensions
    /// (`naturalWidth`/`naturalHeight` for images, `videoWidth`/
    /// `videoHeight` on `loadeddata` for video).
    pub fn media_loaded(&mut self, natural_width: u32, natural_height: u32) {
        self.view.media_loaded(natural_width, natural_height);
    }

    /// Drain deferred work after the current layout pass. Returns a JSON
    /// array of requests to apply.
    pub fn flush(&mut self) -> String {
        let requests: Vec<serde_json::Value> =
            self.view.flush_follow_ups().iter().map(request_json).collect();
        serde_json::Value::Array(requests).to_string()
    }

    /// Pointer-down on the resize handle.
    pub fn pointer_down(&mut self, client_x: f64) {
        self.view.start_resize(client_x);
    }

    /// Pointer-move during a drag. Returns the request as JSON, or
    /// `undefined` when the frame has no effect.
    pub fn pointer_move(&mut self, client_x: f64) -> Option<String> {
        self.view
            .handle_pointer_move(client_x)
            .map(|request| request_json(&request).to_string())
    }

    /// Pointer-up: end the drag.
    pub fn pointer_up(&mut self) {
        self.view.stop_resize();
    }

    /// Forced termination for window blur / visibility loss, where
    /// pointer-up never arrives. Safe to call with no active drag.
    pub fn pointer_cancel(&mut self) {
        self.view.stop_resize();
    }

    pub fn resize_active(&self) -> bool {
        self.view.resize_active()
    }

    /// Current renderable state as JSON, or `undefined` before the first
    /// attribute snapshot.
    pub fn view_state(&self) -> Option<String> {
        self.view.view_state().map(|state| {
            json!({
                "kind": state.kind.tag(),
                "src": state.src,
                "width": state.width,
                "height": state.height,
                "floatClass": state.float_class,
                "alignClass": state.align_class,
                "resizeActive": state.resize_active,
                "actions": state
                    .actions
                    .iter()
                    .map(|a| json!({ "id": a.id, "icon": a.icon, "active": a.active }))
                    .collect::<Vec<_>>(),
            })
            .to_string()
        })
    }

    /// User activated a toolbar button. Returns the request as JSON, or
    /// `undefined` for unknown identifiers.
    pub fn activate_action(&self, id: &str) -> Option<String> {
        self.view
            .activate_action(id)
            .map(|request| request_json(&request).to_string())
    }
}

impl Default for MediaView {
    fn default() -> Self {
        Self::new()
    }
}

fn request_json(request: &NodeRequest) -> serde_json::Value {
    match request {
        NodeRequest::UpdateAttrs(patch) => json!({ "type": "update_attrs", "attrs": patch }),
        NodeRequest::DeleteNode => json!({ "type": "delete_node" }),
    }
}

/// Route `log` records to the browser console and install a panic hook.
/// No-op outside wasm so native tests stay quiet.
fn console_diagnostics_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;

        struct ConsoleLogger;

        impl log::Log for ConsoleLogger {
            fn enabled(&self, _metadata: &log::Metadata) -> bool {
                true
            }

            fn log(&self, record: &log::Record) {
                let msg = format!("mnv {}: {}", record.level(), record.args());
                web_sys::console::debug_1(&msg.into());
            }

            fn flush(&self) {}
        }

        static LOGGER: ConsoleLogger = ConsoleLogger;
        static SETUP: Once = Once::new();
        SETUP.call_once(|| {
            let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(log::LevelFilter::Debug));
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("mnv WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
