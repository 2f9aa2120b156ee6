// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch errors.

use alloc::vec::Vec;
use core::fmt;

use crate::container::HandlerId;
use crate::event::DropPhase;

/// More than one registered drop handler accepted the same event.
///
/// This is a registration defect, not a runtime failure: the container has no
/// way to break the tie, so it forwards to none of the candidates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmbiguousHandlerError {
    /// The lifecycle stage being dispatched.
    pub phase: DropPhase,
    /// Ids of the matching handlers, in registration order.
    ///
    /// When the container stops scanning at the second match, only the first
    /// two are listed.
    pub matches: Vec<HandlerId>,
}

impl fmt::Display for AmbiguousHandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "multiple drop handlers (ids")?;
        for (i, id) in self.matches.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{}", id.index())?;
        }
        write!(
            f,
            ") accept the payload types of this {} event",
            self.phase
        )
    }
}

impl core::error::Error for AmbiguousHandlerError {}

/// Error returned by [`DropContainer`](crate::container::DropContainer) dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchError<E> {
    /// More than one handler was eligible.
    AmbiguousHandler(AmbiguousHandlerError),
    /// The selected handler failed.
    Handler(E),
}

impl<E> DispatchError<E> {
    /// Returns `true` for the ambiguous-handler configuration error.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::AmbiguousHandler(_))
    }
}

impl<E> From<AmbiguousHandlerError> for DispatchError<E> {
    fn from(err: AmbiguousHandlerError) -> Self {
        Self::AmbiguousHandler(err)
    }
}

impl<E: fmt::Display> fmt::Display for DispatchError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousHandler(err) => fmt::Display::fmt(err, f),
            Self::Handler(err) => write!(f, "drop handler failed: {err}"),
        }
    }
}

impl<E: core::error::Error + 'static> core::error::Error for DispatchError<E> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::AmbiguousHandler(err) => Some(err),
            Self::Handler(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use core::convert::Infallible;

    #[test]
    fn ambiguous_message_lists_ids_and_phase() {
        let err = AmbiguousHandlerError {
            phase: DropPhase::Drop,
            matches: vec![HandlerId::new(0), HandlerId::new(2)],
        };
        assert_eq!(
            err.to_string(),
            "multiple drop handlers (ids 0, 2) accept the payload types of this drop event"
        );

        let dispatch: DispatchError<Infallible> = err.into();
        assert!(dispatch.is_ambiguous());
        assert!(core::error::Error::source(&dispatch).is_some());
    }

    #[test]
    fn handler_error_is_wrapped() {
        let err: DispatchError<&str> = DispatchError::Handler("bad payload");
        assert!(!err.is_ambiguous());
        assert_eq!(err.to_string(), "drop handler failed: bad payload");
    }
}
