// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop container: route drop-side drag events to the one competent handler.
//!
//! A [`DropContainer`] belongs to a single drop surface (an inventory list, a
//! canvas, ...). It keeps the [`DropHandler`]s registered for that surface and,
//! for each lifecycle event, forwards to the handler whose
//! [`can_handle`](DropHandler::can_handle) accepts the transfer's payload
//! types.
//!
//! ## Dispatch rules
//!
//! | Event | Side effect before selection | No eligible handler | One eligible handler |
//! |---|---|---|---|
//! | enter | - | prevent default | forward, then prevent default |
//! | leave | drop effect reset to `none` | nothing | forward |
//! | over  | - | nothing | forward, then prevent default |
//! | drop  | prevent default | nothing | forward |
//!
//! Two or more eligible handlers is a registration defect: the container
//! forwards to none of them and reports [`DispatchError::AmbiguousHandler`]
//! (or panics, see [`AmbiguityHandling`]). Side effects listed before
//! selection have already been applied at that point.
//!
//! ## Minimal example
//!
//! ```
//! use core::convert::Infallible;
//! use understory_drag_drop::container::DropContainer;
//! use understory_drag_drop::event::DragDropEvent;
//! use understory_drag_drop::handler::DropHandler;
//! use understory_drag_drop::transfer::SyntheticDragEvent;
//!
//! struct Links;
//!
//! impl DropHandler<SyntheticDragEvent> for Links {
//!     type Error = Infallible;
//!     fn can_handle(&self, types: &[String]) -> bool {
//!         types.iter().any(|t| t == "text/uri-list")
//!     }
//!     fn handle_drag_enter(&mut self, _: &mut SyntheticDragEvent) -> Result<(), Infallible> { Ok(()) }
//!     fn handle_drag_leave(&mut self, _: &mut SyntheticDragEvent) -> Result<(), Infallible> { Ok(()) }
//!     fn handle_drag_over(&mut self, _: &mut SyntheticDragEvent) -> Result<(), Infallible> { Ok(()) }
//!     fn handle_drop(&mut self, _: &mut SyntheticDragEvent) -> Result<(), Infallible> { Ok(()) }
//! }
//!
//! let mut container = DropContainer::new();
//! let links = container.register_drop_handler(Links);
//!
//! let mut ev = SyntheticDragEvent::with_types(["text/uri-list"]);
//! assert_eq!(container.handle_drag_over(&mut ev), Ok(Some(links)));
//! assert!(ev.default_prevented());
//!
//! // Nobody accepts plain text: dragover leaves the default alone.
//! let mut ev = SyntheticDragEvent::with_types(["text/plain"]);
//! assert_eq!(container.handle_drag_over(&mut ev), Ok(None));
//! assert!(!ev.default_prevented());
//! ```

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::effect::DropEffect;
use crate::error::{AmbiguousHandlerError, DispatchError};
use crate::event::{DragDropEvent, DropPhase};
use crate::handler::DropHandler;

/// Identifies a handler registered with a [`DropContainer`].
///
/// Ids are assigned in registration order, starting at zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(usize);

impl HandlerId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Registration index of the handler.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What a container does when more than one handler is eligible.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum AmbiguityHandling {
    /// Return [`DispatchError::AmbiguousHandler`].
    #[default]
    Error,
    /// Panic with the ambiguity message.
    ///
    /// For hosts that treat any registration defect as fatal.
    Panic,
}

/// How far a container scans its registry when computing eligibility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum EligibilityScan {
    /// Ask every registered handler; ambiguity errors list all matches.
    #[default]
    Exhaustive,
    /// Stop asking once a second match is found.
    ///
    /// Dispatch outcomes are identical to [`EligibilityScan::Exhaustive`];
    /// ambiguity errors list only the first two matches.
    StopAtSecondMatch,
}

/// Registry of drop handlers for one drop surface.
///
/// Handlers are kept in registration order and never reordered or
/// deduplicated. Dispatch borrows the container mutably, so handlers cannot be
/// registered while an event is being dispatched.
pub struct DropContainer<E: DragDropEvent, Err = Infallible> {
    handlers: Vec<Box<dyn DropHandler<E, Error = Err>>>,
    ambiguity: AmbiguityHandling,
    scan: EligibilityScan,
}

impl<E: DragDropEvent, Err> fmt::Debug for DropContainer<E, Err> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropContainer")
            .field("handlers", &self.handlers.len())
            .field("ambiguity", &self.ambiguity)
            .field("scan", &self.scan)
            .finish()
    }
}

impl<E: DragDropEvent, Err> Default for DropContainer<E, Err> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            ambiguity: AmbiguityHandling::default(),
            scan: EligibilityScan::default(),
        }
    }
}

impl<E: DragDropEvent, Err> DropContainer<E, Err> {
    /// Create an empty container with default policies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ambiguity policy.
    #[must_use]
    pub fn with_ambiguity_handling(mut self, ambiguity: AmbiguityHandling) -> Self {
        self.ambiguity = ambiguity;
        self
    }

    /// Set the eligibility scan policy.
    #[must_use]
    pub fn with_eligibility_scan(mut self, scan: EligibilityScan) -> Self {
        self.scan = scan;
        self
    }

    /// The ambiguity policy in effect.
    pub fn ambiguity_handling(&self) -> AmbiguityHandling {
        self.ambiguity
    }

    /// The eligibility scan policy in effect.
    pub fn eligibility_scan(&self) -> EligibilityScan {
        self.scan
    }

    /// Append `handler` to the registry.
    ///
    /// No deduplication or validation takes place; registering two handlers
    /// that accept the same payload types is only detected at dispatch.
    pub fn register_drop_handler<H>(&mut self, handler: H) -> HandlerId
    where
        H: DropHandler<E, Error = Err> + 'static,
    {
        let id = HandlerId::new(self.handlers.len());
        self.handlers.push(Box::new(handler));
        debug!(id = id.index(), "registered drop handler");
        id
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handler has been registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Ids of the handlers that accept `types`, in registration order.
    ///
    /// With [`EligibilityScan::StopAtSecondMatch`] at most two ids are returned.
    pub fn eligible_handlers(&self, types: &[String]) -> SmallVec<[HandlerId; 2]> {
        let mut eligible = SmallVec::new();
        for (index, handler) in self.handlers.iter().enumerate() {
            if !(**handler).can_handle(types) {
                continue;
            }
            eligible.push(HandlerId::new(index));
            if self.scan == EligibilityScan::StopAtSecondMatch && eligible.len() == 2 {
                break;
            }
        }
        eligible
    }

    /// Dispatch a drag-enter event.
    ///
    /// The default action is suppressed whether or not a handler is eligible;
    /// with one eligible handler, only after it returns successfully.
    pub fn handle_drag_enter(
        &mut self,
        event: &mut E,
    ) -> Result<Option<HandlerId>, DispatchError<Err>> {
        let Some(id) = self.select(DropPhase::Enter, event)? else {
            event.prevent_default();
            return Ok(None);
        };
        self.forward(id, DropPhase::Enter, event)?;
        event.prevent_default();
        Ok(Some(id))
    }

    /// Dispatch a drag-leave event.
    ///
    /// The drop effect is reset to [`DropEffect::None`] before anything else,
    /// so the surface never stays marked as a target after the drag leaves.
    pub fn handle_drag_leave(
        &mut self,
        event: &mut E,
    ) -> Result<Option<HandlerId>, DispatchError<Err>> {
        event.set_drop_effect(DropEffect::None);
        let Some(id) = self.select(DropPhase::Leave, event)? else {
            return Ok(None);
        };
        self.forward(id, DropPhase::Leave, event)?;
        Ok(Some(id))
    }

    /// Dispatch a drag-over event.
    ///
    /// The default action is only suppressed after an eligible handler ran, so
    /// a surface with no eligible handler stays "not a drop target".
    pub fn handle_drag_over(
        &mut self,
        event: &mut E,
    ) -> Result<Option<HandlerId>, DispatchError<Err>> {
        let Some(id) = self.select(DropPhase::Over, event)? else {
            return Ok(None);
        };
        self.forward(id, DropPhase::Over, event)?;
        event.prevent_default();
        Ok(Some(id))
    }

    /// Dispatch a drop event.
    ///
    /// The default action is suppressed before selection, whatever the outcome.
    pub fn handle_drop(&mut self, event: &mut E) -> Result<Option<HandlerId>, DispatchError<Err>> {
        event.prevent_default();
        let Some(id) = self.select(DropPhase::Drop, event)? else {
            return Ok(None);
        };
        self.forward(id, DropPhase::Drop, event)?;
        Ok(Some(id))
    }

    /// Dispatch `event` as `phase`.
    ///
    /// Equivalent to calling the matching `handle_*` method; useful for hosts
    /// that receive events tagged by name.
    pub fn dispatch(
        &mut self,
        phase: DropPhase,
        event: &mut E,
    ) -> Result<Option<HandlerId>, DispatchError<Err>> {
        match phase {
            DropPhase::Enter => self.handle_drag_enter(event),
            DropPhase::Leave => self.handle_drag_leave(event),
            DropPhase::Over => self.handle_drag_over(event),
            DropPhase::Drop => self.handle_drop(event),
        }
    }

    fn select(
        &self,
        phase: DropPhase,
        event: &E,
    ) -> Result<Option<HandlerId>, AmbiguousHandlerError> {
        let eligible = self.eligible_handlers(&event.types());
        trace!(%phase, eligible = eligible.len(), "dispatching drop event");
        match eligible.as_slice() {
            [] => Ok(None),
            [id] => Ok(Some(*id)),
            _ => {
                let err = AmbiguousHandlerError {
                    phase,
                    matches: eligible.to_vec(),
                };
                warn!(%phase, matches = eligible.len(), "ambiguous drop handlers");
                match self.ambiguity {
                    AmbiguityHandling::Error => Err(err),
                    AmbiguityHandling::Panic => panic!("{err}"),
                }
            }
        }
    }

    fn forward(
        &mut self,
        id: HandlerId,
        phase: DropPhase,
        event: &mut E,
    ) -> Result<(), DispatchError<Err>> {
        let handler = &mut *self.handlers[id.index()];
        let result = match phase {
            DropPhase::Enter => handler.handle_drag_enter(event),
            DropPhase::Leave => handler.handle_drag_leave(event),
            DropPhase::Over => handler.handle_drag_over(event),
            DropPhase::Drop => handler.handle_drop(event),
        };
        result.map_err(DispatchError::Handler)
    }
}
