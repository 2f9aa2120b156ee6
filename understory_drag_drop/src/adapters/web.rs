// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM adapter: drive handlers and containers from `web_sys::DragEvent`.
//!
//! ## Feature
//!
//! Enable with `web`. Only compiled for `wasm32` targets.
//!
//! ## Notes
//!
//! - [`DragDropEvent`] is implemented for `web_sys::DragEvent`. Effect strings the
//!   browser reports but this crate does not know read as `none` /
//!   `uninitialized`. Events without a `dataTransfer` report no types and
//!   ignore writes.
//! - [`DropContainerBinding`] attaches a shared container to an element's
//!   `dragenter`, `dragleave`, `dragover`, and `drop` events. Dispatch errors are
//!   thrown back into the browser's event loop as a JS `Error`.
//!
//! ```no_run
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_drag_drop::adapters::web::DropContainerBinding;
//! use understory_drag_drop::container::DropContainer;
//!
//! fn bind(target: &web_sys::EventTarget) -> Result<DropContainerBinding, wasm_bindgen::JsValue> {
//!     let container: DropContainer<web_sys::DragEvent> = DropContainer::new();
//!     // Register handlers before or after attaching; the binding shares the container.
//!     DropContainerBinding::attach(target, Rc::new(RefCell::new(container)))
//! }
//! ```

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{DragEvent, EventTarget};

use crate::container::DropContainer;
use crate::effect::{DropEffect, EffectAllowed};
use crate::event::{DragDropEvent, DropPhase};

impl DragDropEvent for DragEvent {
    fn types(&self) -> Vec<String> {
        self.data_transfer()
            .map(|dt| dt.types().iter().filter_map(|v| v.as_string()).collect())
            .unwrap_or_default()
    }

    fn drop_effect(&self) -> DropEffect {
        self.data_transfer()
            .and_then(|dt| dt.drop_effect().parse().ok())
            .unwrap_or_default()
    }

    fn set_drop_effect(&mut self, effect: DropEffect) {
        if let Some(dt) = self.data_transfer() {
            dt.set_drop_effect(effect.as_str());
        }
    }

    fn effect_allowed(&self) -> EffectAllowed {
        self.data_transfer()
            .and_then(|dt| dt.effect_allowed().parse().ok())
            .unwrap_or_default()
    }

    fn set_effect_allowed(&mut self, effect: EffectAllowed) {
        if let Some(dt) = self.data_transfer() {
            dt.set_effect_allowed(effect.as_str());
        }
    }

    fn data(&self, format: &str) -> Option<String> {
        // Browsers hide payloads outside of dragstart and drop: that reads as "".
        self.data_transfer()
            .and_then(|dt| dt.get_data(format).ok())
            .filter(|data| !data.is_empty())
    }

    fn set_data(&mut self, format: &str, data: &str) {
        if let Some(dt) = self.data_transfer() {
            if let Err(err) = dt.set_data(format, data) {
                warn!(format, ?err, "DataTransfer.setData rejected payload");
            }
        }
    }

    fn prevent_default(&mut self) {
        web_sys::Event::prevent_default(self);
    }

    fn default_prevented(&self) -> bool {
        web_sys::Event::default_prevented(self)
    }
}

type Listener = Closure<dyn FnMut(DragEvent) -> Result<(), JsValue>>;

const PHASES: [DropPhase; 4] = [
    DropPhase::Enter,
    DropPhase::Leave,
    DropPhase::Over,
    DropPhase::Drop,
];

/// A drop container attached to a DOM event target.
///
/// Dropping the binding removes its listeners.
pub struct DropContainerBinding {
    target: EventTarget,
    listeners: Vec<(DropPhase, Listener)>,
}

impl fmt::Debug for DropContainerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropContainerBinding")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl DropContainerBinding {
    /// Forward the drop-side drag events of `target` to `container`.
    pub fn attach<Err>(
        target: &EventTarget,
        container: Rc<RefCell<DropContainer<DragEvent, Err>>>,
    ) -> Result<Self, JsValue>
    where
        Err: fmt::Display + 'static,
    {
        let mut binding = Self {
            target: target.clone(),
            listeners: Vec::with_capacity(PHASES.len()),
        };
        for phase in PHASES {
            let container = Rc::clone(&container);
            let listener: Listener = Closure::new(move |mut event: DragEvent| {
                container
                    .borrow_mut()
                    .dispatch(phase, &mut event)
                    .map(|_| ())
                    .map_err(|err| JsValue::from(js_sys::Error::new(&err.to_string())))
            });
            target.add_event_listener_with_callback(
                phase.event_name(),
                listener.as_ref().unchecked_ref(),
            )?;
            // Pushed after registration so a failed attach only detaches what was added.
            binding.listeners.push((phase, listener));
        }
        Ok(binding)
    }
}

impl Drop for DropContainerBinding {
    fn drop(&mut self) {
        for (phase, listener) in self.listeners.drain(..) {
            if let Err(err) = self.target.remove_event_listener_with_callback(
                phase.event_name(),
                listener.as_ref().unchecked_ref(),
            ) {
                warn!(%phase, ?err, "failed to remove drag listener");
            }
        }
    }
}
