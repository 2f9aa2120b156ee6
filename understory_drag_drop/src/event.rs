// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host drag event surface consumed by handlers and containers.
//!
//! This crate does not define drag events. Hosts deliver their own (a DOM
//! `DragEvent`, a synthetic event from a canvas hit test, ...) and expose them
//! through [`DragDropEvent`]. [`SyntheticDragEvent`](crate::transfer::SyntheticDragEvent)
//! is the in-crate implementation.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::effect::{DropEffect, EffectAllowed};

/// A drag lifecycle event as seen by drag sources and drop targets.
///
/// Mutating operations take `&mut self`; a host whose events use interior
/// mutability can still implement them directly.
pub trait DragDropEvent {
    /// Payload type identifiers available on the current transfer, in transfer order.
    fn types(&self) -> Vec<String>;

    /// The resulting effect currently set on the transfer.
    fn drop_effect(&self) -> DropEffect;

    /// Set the resulting effect of the transfer.
    fn set_drop_effect(&mut self, effect: DropEffect);

    /// The effect declared by the drag source.
    fn effect_allowed(&self) -> EffectAllowed;

    /// Declare the allowed effect.
    ///
    /// Only meaningful while handling drag start; drop targets must treat the
    /// allowed effect as read-only.
    fn set_effect_allowed(&mut self, effect: EffectAllowed);

    /// The payload stored for `format`, if any.
    fn data(&self, format: &str) -> Option<String>;

    /// Store a payload for `format`.
    fn set_data(&mut self, format: &str, data: &str);

    /// Suppress the platform default action for this event.
    ///
    /// On enter and over, this marks the surface as a valid drop target. On
    /// drop, it keeps the platform from running its own drop behavior.
    fn prevent_default(&mut self);

    /// Returns `true` once [`prevent_default`](Self::prevent_default) has been called.
    fn default_prevented(&self) -> bool;
}

/// The drop-side lifecycle stage a container is dispatching.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DropPhase {
    /// The drag entered the drop surface.
    Enter,
    /// The drag left the drop surface.
    Leave,
    /// The drag moved over the drop surface.
    Over,
    /// The dragged item was released over the drop surface.
    Drop,
}

impl DropPhase {
    /// The platform event name for this phase.
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::Enter => "dragenter",
            Self::Leave => "dragleave",
            Self::Over => "dragover",
            Self::Drop => "drop",
        }
    }
}

impl fmt::Display for DropPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}
