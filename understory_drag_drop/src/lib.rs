// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drag_drop --heading-base-level=0

//! Understory Drag Drop: drag sources, drop targets, and a drop container that routes between them.
//!
//! ## Overview
//!
//! Platform drag-and-drop models (the HTML one in particular) deliver a stream of
//! lifecycle events: `dragstart`, `drag`, and `dragend` to the dragged item;
//! `dragenter`, `dragover`, `dragleave`, and `drop` to whatever is under the
//! pointer. This crate splits those into two roles:
//!
//! - [`DragHandler`]: an entity that can be dragged. It populates the transfer on
//!   drag start and cleans up on drag end.
//! - [`DropHandler`]: one kind of payload a drop surface accepts, selected by the
//!   transfer's payload types through [`DropHandler::can_handle`].
//!
//! A [`DropContainer`] owns the drop handlers of one surface. For each event it
//! picks the single handler that accepts the payload types, forwards to it, and
//! applies the default-action and drop-effect rules each lifecycle stage needs.
//! Two handlers accepting the same event is a registration defect and is
//! reported as [`DispatchError::AmbiguousHandler`].
//!
//! The crate does not define drag events. Hosts expose theirs through
//! [`DragDropEvent`]; [`SyntheticDragEvent`] is an in-memory implementation for
//! virtual surfaces (canvas scenes) and tests, and the `web` feature implements it
//! for `web_sys::DragEvent`.
//!
//! ## Effects
//!
//! The [`effect`] module mirrors the platform effect vocabulary:
//! [`EffectAllowed`] as declared by the source, [`DropEffect`] as answered by
//! the target, plus the [`EFFECT_MOVE_TYPES`](effect::EFFECT_MOVE_TYPES) and
//! [`EFFECT_COPY_TYPES`](effect::EFFECT_COPY_TYPES) membership sets.
//!
//! ## Example
//!
//! ```rust
//! use core::convert::Infallible;
//! use understory_drag_drop::{
//!     DragDropEvent, DragHandler, DropContainer, DropEffect, DropHandler, EffectAllowed,
//!     SyntheticDragEvent,
//! };
//!
//! // A card in a list: drags its id, disappears after a move.
//! struct Card { id: u32, removed: bool }
//!
//! impl DragHandler<SyntheticDragEvent> for Card {
//!     type Error = Infallible;
//!     fn handle_drag_start(&mut self, ev: &mut SyntheticDragEvent) -> Result<(), Infallible> {
//!         ev.set_data("application/x-card", &self.id.to_string());
//!         ev.set_effect_allowed(EffectAllowed::CopyMove);
//!         Ok(())
//!     }
//!     fn handle_drag(&mut self, _: &mut SyntheticDragEvent) -> Result<(), Infallible> { Ok(()) }
//!     fn handle_drag_end(&mut self, ev: &mut SyntheticDragEvent) -> Result<(), Infallible> {
//!         self.removed = ev.drop_effect() == DropEffect::Move;
//!         Ok(())
//!     }
//! }
//!
//! // A board column: accepts cards and moves them when allowed.
//! struct Column { cards: Vec<String> }
//!
//! impl DropHandler<SyntheticDragEvent> for Column {
//!     type Error = Infallible;
//!     fn can_handle(&self, types: &[String]) -> bool {
//!         types.iter().any(|t| t == "application/x-card")
//!     }
//!     fn handle_drag_enter(&mut self, ev: &mut SyntheticDragEvent) -> Result<(), Infallible> {
//!         let effect = if ev.effect_allowed().permits_move() {
//!             DropEffect::Move
//!         } else {
//!             DropEffect::Copy
//!         };
//!         ev.set_drop_effect(effect);
//!         Ok(())
//!     }
//!     fn handle_drag_leave(&mut self, _: &mut SyntheticDragEvent) -> Result<(), Infallible> { Ok(()) }
//!     fn handle_drag_over(&mut self, _: &mut SyntheticDragEvent) -> Result<(), Infallible> { Ok(()) }
//!     fn handle_drop(&mut self, ev: &mut SyntheticDragEvent) -> Result<(), Infallible> {
//!         self.cards.extend(ev.data("application/x-card"));
//!         Ok(())
//!     }
//! }
//!
//! let mut card = Card { id: 7, removed: false };
//! let mut container = DropContainer::new();
//! container.register_drop_handler(Column { cards: Vec::new() });
//!
//! let mut ev = SyntheticDragEvent::new();
//! card.handle_drag_start(&mut ev).unwrap();
//! container.handle_drag_enter(&mut ev).unwrap();
//! assert!(ev.default_prevented());
//! assert_eq!(ev.drop_effect(), DropEffect::Move);
//!
//! ev.reset_default();
//! container.handle_drop(&mut ev).unwrap();
//! card.handle_drag_end(&mut ev).unwrap();
//! assert!(card.removed);
//! ```
//!
//! ## Features
//!
//! - `std` (default): build `tracing` against the standard library.
//! - `web`: [`adapters`] for `web_sys::DragEvent` and DOM listener bindings (`wasm32` only).
//!
//! Dispatch logs through `tracing`; no subscriber is installed by this crate.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod container;
pub mod effect;
pub mod error;
pub mod event;
pub mod handler;
pub mod transfer;

pub use container::{AmbiguityHandling, DropContainer, EligibilityScan, HandlerId};
pub use effect::{DropEffect, EffectAllowed, EffectFlags};
pub use error::{AmbiguousHandlerError, DispatchError};
pub use event::{DragDropEvent, DropPhase};
pub use handler::{DragHandler, DropHandler};
pub use transfer::{DataTransfer, SyntheticDragEvent};
