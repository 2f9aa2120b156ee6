// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag source and drop target capabilities.
//!
//! A drag is self-describing: the dragged entity implements [`DragHandler`]
//! and reacts to its own lifecycle. A drop is one-to-many: a single drop
//! surface may accept many kinds of payload, so each kind is described by a
//! [`DropHandler`] and registered with a
//! [`DropContainer`](crate::container::DropContainer), which routes each event
//! to the one handler that accepts the transfer's payload types.
//!
//! ## Implementing a drop handler
//!
//! ```
//! use core::convert::Infallible;
//! use understory_drag_drop::effect::DropEffect;
//! use understory_drag_drop::event::DragDropEvent;
//! use understory_drag_drop::handler::DropHandler;
//! use understory_drag_drop::transfer::SyntheticDragEvent;
//!
//! #[derive(Default)]
//! struct TextDrop {
//!     dropped: Vec<String>,
//! }
//!
//! impl<E: DragDropEvent> DropHandler<E> for TextDrop {
//!     type Error = Infallible;
//!
//!     fn can_handle(&self, types: &[String]) -> bool {
//!         types.iter().any(|t| t == "text/plain")
//!     }
//!
//!     fn handle_drag_enter(&mut self, event: &mut E) -> Result<(), Infallible> {
//!         let effect = event.effect_allowed().preferred_drop_effect();
//!         event.set_drop_effect(effect);
//!         Ok(())
//!     }
//!
//!     fn handle_drag_leave(&mut self, _: &mut E) -> Result<(), Infallible> {
//!         Ok(())
//!     }
//!
//!     fn handle_drag_over(&mut self, _: &mut E) -> Result<(), Infallible> {
//!         Ok(())
//!     }
//!
//!     fn handle_drop(&mut self, event: &mut E) -> Result<(), Infallible> {
//!         self.dropped.extend(event.data("text/plain"));
//!         Ok(())
//!     }
//! }
//!
//! let mut handler = TextDrop::default();
//! let mut ev = SyntheticDragEvent::new();
//! ev.set_data("text/plain", "hi");
//! assert!(DropHandler::<SyntheticDragEvent>::can_handle(&handler, &ev.types()));
//! handler.handle_drop(&mut ev).unwrap();
//! assert_eq!(handler.dropped, ["hi"]);
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use crate::event::DragDropEvent;

/// An entity that can be dragged.
///
/// None of these methods fire for drags that start outside the application
/// (for example, files dragged from the desktop).
pub trait DragHandler<E: DragDropEvent + ?Sized> {
    /// Error raised when the handler cannot service an event.
    type Error;

    /// Called repeatedly while the entity is being dragged.
    ///
    /// This fires at high frequency; keep it cheap. Suppressing the default
    /// action here cancels the drag.
    fn handle_drag(&mut self, event: &mut E) -> Result<(), Self::Error>;

    /// Called when the drag ends, whether by drop or cancellation.
    ///
    /// This is the last event of a drag operation. Clean up here: after a
    /// completed move, remove the source item.
    fn handle_drag_end(&mut self, event: &mut E) -> Result<(), Self::Error>;

    /// Called when the user starts dragging the entity.
    ///
    /// Populate the transfer payloads and the allowed effect here.
    fn handle_drag_start(&mut self, event: &mut E) -> Result<(), Self::Error>;
}

/// A kind of payload a drop surface can accept.
pub trait DropHandler<E: DragDropEvent + ?Sized> {
    /// Error raised when the handler is given an event it cannot service.
    type Error;

    /// Returns `true` if this handler accepts a transfer advertising `types`.
    ///
    /// Must be a pure function of `types`: containers call it repeatedly and
    /// in isolation to decide which handler is eligible.
    fn can_handle(&self, types: &[String]) -> bool;

    /// The drag entered the drop surface.
    ///
    /// Only called after [`can_handle`](Self::can_handle) accepted this event's types.
    fn handle_drag_enter(&mut self, event: &mut E) -> Result<(), Self::Error>;

    /// The drag left the drop surface.
    ///
    /// Does not fire when the drag ends with a drop.
    fn handle_drag_leave(&mut self, event: &mut E) -> Result<(), Self::Error>;

    /// The drag moved over the drop surface.
    ///
    /// This fires every few hundred milliseconds; keep it cheap.
    fn handle_drag_over(&mut self, event: &mut E) -> Result<(), Self::Error>;

    /// The dragged item was dropped on the surface.
    fn handle_drop(&mut self, event: &mut E) -> Result<(), Self::Error>;
}

impl<E, H> DragHandler<E> for Box<H>
where
    E: DragDropEvent + ?Sized,
    H: DragHandler<E> + ?Sized,
{
    type Error = H::Error;

    fn handle_drag(&mut self, event: &mut E) -> Result<(), Self::Error> {
        (**self).handle_drag(event)
    }

    fn handle_drag_end(&mut self, event: &mut E) -> Result<(), Self::Error> {
        (**self).handle_drag_end(event)
    }

    fn handle_drag_start(&mut self, event: &mut E) -> Result<(), Self::Error> {
        (**self).handle_drag_start(event)
    }
}

impl<E, H> DropHandler<E> for Box<H>
where
    E: DragDropEvent + ?Sized,
    H: DropHandler<E> + ?Sized,
{
    type Error = H::Error;

    fn can_handle(&self, types: &[String]) -> bool {
        (**self).can_handle(types)
    }

    fn handle_drag_enter(&mut self, event: &mut E) -> Result<(), Self::Error> {
        (**self).handle_drag_enter(event)
    }

    fn handle_drag_leave(&mut self, event: &mut E) -> Result<(), Self::Error> {
        (**self).handle_drag_leave(event)
    }

    fn handle_drag_over(&mut self, event: &mut E) -> Result<(), Self::Error> {
        (**self).handle_drag_over(event)
    }

    fn handle_drop(&mut self, event: &mut E) -> Result<(), Self::Error> {
        (**self).handle_drop(event)
    }
}

// Shared handles let the registrant keep access to a handler after handing it
// to a container. Borrows are held only for the duration of one call.
impl<E, H> DropHandler<E> for Rc<RefCell<H>>
where
    E: DragDropEvent + ?Sized,
    H: DropHandler<E> + ?Sized,
{
    type Error = H::Error;

    fn can_handle(&self, types: &[String]) -> bool {
        self.borrow().can_handle(types)
    }

    fn handle_drag_enter(&mut self, event: &mut E) -> Result<(), Self::Error> {
        self.borrow_mut().handle_drag_enter(event)
    }

    fn handle_drag_leave(&mut self, event: &mut E) -> Result<(), Self::Error> {
        self.borrow_mut().handle_drag_leave(event)
    }

    fn handle_drag_over(&mut self, event: &mut E) -> Result<(), Self::Error> {
        self.borrow_mut().handle_drag_over(event)
    }

    fn handle_drop(&mut self, event: &mut E) -> Result<(), Self::Error> {
        self.borrow_mut().handle_drop(event)
    }
}

impl<E, H> DragHandler<E> for Rc<RefCell<H>>
where
    E: DragDropEvent + ?Sized,
    H: DragHandler<E> + ?Sized,
{
    type Error = H::Error;

    fn handle_drag(&mut self, event: &mut E) -> Result<(), Self::Error> {
        self.borrow_mut().handle_drag(event)
    }

    fn handle_drag_end(&mut self, event: &mut E) -> Result<(), Self::Error> {
        self.borrow_mut().handle_drag_end(event)
    }

    fn handle_drag_start(&mut self, event: &mut E) -> Result<(), Self::Error> {
        self.borrow_mut().handle_drag_start(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{DropEffect, EffectAllowed};
    use crate::transfer::SyntheticDragEvent;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Card {
        removed: bool,
        ticks: u32,
    }

    impl DragHandler<SyntheticDragEvent> for Card {
        type Error = &'static str;

        fn handle_drag(&mut self, _: &mut SyntheticDragEvent) -> Result<(), Self::Error> {
            self.ticks += 1;
            Ok(())
        }

        fn handle_drag_end(&mut self, event: &mut SyntheticDragEvent) -> Result<(), Self::Error> {
            if event.drop_effect() == DropEffect::Move {
                self.removed = true;
            }
            Ok(())
        }

        fn handle_drag_start(
            &mut self,
            event: &mut SyntheticDragEvent,
        ) -> Result<(), Self::Error> {
            if self.removed {
                return Err("card already moved");
            }
            event.set_data("application/x-card", "7");
            event.set_effect_allowed(EffectAllowed::CopyMove);
            Ok(())
        }
    }

    struct Accepts(&'static str);

    impl DropHandler<SyntheticDragEvent> for Accepts {
        type Error = &'static str;

        fn can_handle(&self, types: &[String]) -> bool {
            types.iter().any(|t| t == self.0)
        }

        fn handle_drag_enter(&mut self, _: &mut SyntheticDragEvent) -> Result<(), Self::Error> {
            Ok(())
        }

        fn handle_drag_leave(&mut self, _: &mut SyntheticDragEvent) -> Result<(), Self::Error> {
            Ok(())
        }

        fn handle_drag_over(&mut self, _: &mut SyntheticDragEvent) -> Result<(), Self::Error> {
            Ok(())
        }

        fn handle_drop(&mut self, event: &mut SyntheticDragEvent) -> Result<(), Self::Error> {
            if event.data(self.0).is_none() {
                return Err("missing payload");
            }
            Ok(())
        }
    }

    #[test]
    fn drag_source_lifecycle_through_shared_handle() {
        let card = Rc::new(RefCell::new(Card::default()));
        let mut source = card.clone();
        let mut ev = SyntheticDragEvent::new();

        source.handle_drag_start(&mut ev).unwrap();
        assert_eq!(ev.types(), ["application/x-card"]);
        assert_eq!(ev.effect_allowed(), EffectAllowed::CopyMove);

        source.handle_drag(&mut ev).unwrap();
        source.handle_drag(&mut ev).unwrap();
        ev.set_drop_effect(DropEffect::Move);
        source.handle_drag_end(&mut ev).unwrap();

        assert_eq!(card.borrow().ticks, 2);
        assert!(card.borrow().removed);
        assert_eq!(
            source.handle_drag_start(&mut SyntheticDragEvent::new()),
            Err("card already moved")
        );
    }

    #[test]
    fn boxed_drop_handler_forwards() {
        let mut boxed: Box<dyn DropHandler<SyntheticDragEvent, Error = &'static str>> =
            Box::new(Accepts("text/plain"));
        let types: Vec<String> = alloc::vec!["text/plain".into()];
        assert!(boxed.can_handle(&types));
        assert!(!boxed.can_handle(&[]));

        let mut ev = SyntheticDragEvent::with_types(["text/html"]);
        assert_eq!(boxed.handle_drop(&mut ev), Err("missing payload"));
    }
}
