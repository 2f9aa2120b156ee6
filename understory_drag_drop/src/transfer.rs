// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory drag payloads and events.
//!
//! Hosts without a native drag-and-drop surface (a canvas scene, a test
//! harness) build a [`SyntheticDragEvent`] and feed it through the same
//! handlers and containers a DOM host would use.
//!
//! ## Minimal example
//!
//! ```
//! use understory_drag_drop::effect::EffectAllowed;
//! use understory_drag_drop::event::DragDropEvent;
//! use understory_drag_drop::transfer::SyntheticDragEvent;
//!
//! let mut ev = SyntheticDragEvent::new();
//! ev.set_data("text", "hello");
//! ev.set_data("URL", "https://example.com/");
//! ev.set_effect_allowed(EffectAllowed::CopyLink);
//!
//! assert_eq!(ev.types(), ["text/plain", "text/uri-list"]);
//! assert_eq!(ev.data("text/plain").as_deref(), Some("hello"));
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::effect::{DropEffect, EffectAllowed};
use crate::event::DragDropEvent;

/// Payloads and negotiated effects of one drag operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataTransfer {
    entries: Vec<(String, String)>,
    drop_effect: DropEffect,
    effect_allowed: EffectAllowed,
}

impl DataTransfer {
    /// Create an empty transfer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload formats in insertion order.
    pub fn types(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(format, _)| format.as_str())
    }

    /// Returns `true` if no payload has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The payload for `format`, after format normalization.
    pub fn get_data(&self, format: &str) -> Option<&str> {
        let format = normalize_format(format);
        self.entries
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, data)| data.as_str())
    }

    /// Store `data` under `format`.
    ///
    /// Formats are ASCII-lowercased, `"text"` is stored as `"text/plain"` and
    /// `"url"` as `"text/uri-list"`. An existing entry keeps its position.
    pub fn set_data(&mut self, format: &str, data: &str) {
        let format = normalize_format(format);
        if let Some((_, existing)) = self.entries.iter_mut().find(|(f, _)| *f == format) {
            *existing = data.to_string();
        } else {
            self.entries.push((format, data.to_string()));
        }
    }

    /// Remove the payload for `format`, or every payload when `format` is `None`.
    pub fn clear_data(&mut self, format: Option<&str>) {
        match format {
            Some(format) => {
                let format = normalize_format(format);
                self.entries.retain(|(f, _)| *f != format);
            }
            None => self.entries.clear(),
        }
    }

    /// The resulting effect set by the current drop target.
    pub fn drop_effect(&self) -> DropEffect {
        self.drop_effect
    }

    /// Set the resulting effect.
    pub fn set_drop_effect(&mut self, effect: DropEffect) {
        self.drop_effect = effect;
    }

    /// The effect declared by the drag source.
    pub fn effect_allowed(&self) -> EffectAllowed {
        self.effect_allowed
    }

    /// Declare the allowed effect.
    pub fn set_effect_allowed(&mut self, effect: EffectAllowed) {
        self.effect_allowed = effect;
    }
}

fn normalize_format(format: &str) -> String {
    let lower = format.to_ascii_lowercase();
    match lower.as_str() {
        "text" => "text/plain".to_string(),
        "url" => "text/uri-list".to_string(),
        _ => lower,
    }
}

/// A drag event that lives entirely in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyntheticDragEvent {
    /// The transfer carried by this event.
    pub data_transfer: DataTransfer,
    default_prevented: bool,
}

impl SyntheticDragEvent {
    /// Create an event with an empty transfer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an event carrying `transfer`.
    pub fn from_transfer(transfer: DataTransfer) -> Self {
        Self {
            data_transfer: transfer,
            default_prevented: false,
        }
    }

    /// Create an event whose transfer advertises `types`, each with an empty payload.
    pub fn with_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut transfer = DataTransfer::new();
        for ty in types {
            transfer.set_data(ty.as_ref(), "");
        }
        Self::from_transfer(transfer)
    }

    /// Reuse this event for the next lifecycle stage: the transfer is kept,
    /// the default-prevented flag is cleared.
    pub fn reset_default(&mut self) {
        self.default_prevented = false;
    }
}

impl DragDropEvent for SyntheticDragEvent {
    fn types(&self) -> Vec<String> {
        self.data_transfer.types().map(ToString::to_string).collect()
    }

    fn drop_effect(&self) -> DropEffect {
        self.data_transfer.drop_effect()
    }

    fn set_drop_effect(&mut self, effect: DropEffect) {
        self.data_transfer.set_drop_effect(effect);
    }

    fn effect_allowed(&self) -> EffectAllowed {
        self.data_transfer.effect_allowed()
    }

    fn set_effect_allowed(&mut self, effect: EffectAllowed) {
        self.data_transfer.set_effect_allowed(effect);
    }

    fn data(&self, format: &str) -> Option<String> {
        self.data_transfer.get_data(format).map(ToString::to_string)
    }

    fn set_data(&mut self, format: &str, data: &str) {
        self.data_transfer.set_data(format, data);
    }

    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn set_data_normalizes_format_aliases() {
        let mut dt = DataTransfer::new();
        dt.set_data("Text", "a");
        dt.set_data("url", "https://example.com/");
        dt.set_data("Application/JSON", "{}");

        assert_eq!(
            dt.types().collect::<Vec<_>>(),
            vec!["text/plain", "text/uri-list", "application/json"]
        );
        assert_eq!(dt.get_data("TEXT/PLAIN"), Some("a"));
        assert_eq!(dt.get_data("URL"), Some("https://example.com/"));
    }

    #[test]
    fn set_data_replaces_in_place() {
        let mut dt = DataTransfer::new();
        dt.set_data("text/plain", "first");
        dt.set_data("text/html", "<b>x</b>");
        dt.set_data("text", "second");

        assert_eq!(dt.types().collect::<Vec<_>>(), vec!["text/plain", "text/html"]);
        assert_eq!(dt.get_data("text/plain"), Some("second"));
    }

    #[test]
    fn clear_data_single_and_all() {
        let mut dt = DataTransfer::new();
        dt.set_data("text/plain", "a");
        dt.set_data("text/html", "b");

        dt.clear_data(Some("TEXT"));
        assert_eq!(dt.types().collect::<Vec<_>>(), vec!["text/html"]);

        dt.clear_data(None);
        assert!(dt.is_empty());
        assert_eq!(dt.get_data("text/html"), None);
    }

    #[test]
    fn synthetic_event_tracks_prevent_default() {
        let mut ev = SyntheticDragEvent::with_types(["text/plain"]);
        assert!(!ev.default_prevented());

        ev.prevent_default();
        assert!(ev.default_prevented());

        ev.reset_default();
        assert!(!ev.default_prevented());
        assert_eq!(ev.types(), vec!["text/plain"]);
    }

    #[test]
    fn synthetic_event_forwards_effects_to_transfer() {
        let mut ev = SyntheticDragEvent::new();
        assert_eq!(ev.drop_effect(), DropEffect::None);
        assert_eq!(ev.effect_allowed(), EffectAllowed::Uninitialized);

        ev.set_effect_allowed(EffectAllowed::Move);
        ev.set_drop_effect(DropEffect::Move);

        assert_eq!(ev.data_transfer.effect_allowed(), EffectAllowed::Move);
        assert_eq!(ev.data_transfer.drop_effect(), DropEffect::Move);
    }
}
