// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag effect vocabulary: what a drop will do, and what a drag source allows.
//!
//! A drag source declares an [`EffectAllowed`] once, when the drag starts. Drop
//! targets answer with a [`DropEffect`] while the pointer is over them. Both
//! carry the keyword strings used by the HTML drag-and-drop model, so values
//! round-trip through [`Display`](core::fmt::Display) and [`FromStr`].
//!
//! ## Minimal example
//!
//! ```
//! use understory_drag_drop::effect::{DropEffect, EffectAllowed, EFFECT_MOVE_TYPES};
//!
//! let allowed: EffectAllowed = "copyMove".parse().unwrap();
//! assert!(allowed.permits_move());
//! assert!(EFFECT_MOVE_TYPES.contains(&allowed));
//! assert!(allowed.permits(DropEffect::Copy));
//! assert!(!allowed.permits(DropEffect::Link));
//! assert_eq!(allowed.preferred_drop_effect(), DropEffect::Copy);
//! ```

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

/// The resulting effect of a drop, as set by a drop target.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DropEffect {
    /// Nothing happens if the dragged item is dropped here.
    #[default]
    None,
    /// No effect has been negotiated yet.
    Uninitialized,
    /// The dragged item is copied into the drop target.
    Copy,
    /// The dragged item is moved into the drop target; the source removes its copy.
    Move,
    /// The dragged item is linked from the drop target.
    Link,
}

impl DropEffect {
    /// Every drop effect, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Uninitialized,
        Self::Copy,
        Self::Move,
        Self::Link,
    ];

    /// The platform keyword for this effect.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Uninitialized => "uninitialized",
            Self::Copy => "copy",
            Self::Move => "move",
            Self::Link => "link",
        }
    }

    /// The single operation flag this effect performs, if any.
    pub const fn flags(self) -> EffectFlags {
        match self {
            Self::None | Self::Uninitialized => EffectFlags::empty(),
            Self::Copy => EffectFlags::COPY,
            Self::Move => EffectFlags::MOVE,
            Self::Link => EffectFlags::LINK,
        }
    }
}

impl fmt::Display for DropEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DropEffect {
    type Err = ParseEffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|effect| effect.as_str() == s)
            .ok_or_else(|| ParseEffectError::new(s))
    }
}

/// The set of operations a drag source permits.
///
/// Declared once by the drag source during drag start and read-only for the
/// rest of the drag operation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EffectAllowed {
    /// No operation is permitted.
    None,
    /// The source did not declare anything.
    #[default]
    Uninitialized,
    /// Copy only.
    Copy,
    /// Move only.
    Move,
    /// Link only.
    Link,
    /// Copy or move.
    CopyMove,
    /// Copy or link.
    CopyLink,
    /// Link or move.
    LinkMove,
    /// Copy, link, or move.
    All,
}

/// Allowed-effect values that permit a move.
pub const EFFECT_MOVE_TYPES: &[EffectAllowed] = &[
    EffectAllowed::Move,
    EffectAllowed::LinkMove,
    EffectAllowed::CopyMove,
    EffectAllowed::All,
];

/// Allowed-effect values that permit a copy.
pub const EFFECT_COPY_TYPES: &[EffectAllowed] = &[
    EffectAllowed::All,
    EffectAllowed::Copy,
    EffectAllowed::CopyLink,
    EffectAllowed::CopyMove,
];

impl EffectAllowed {
    /// Every allowed-effect value, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::None,
        Self::Uninitialized,
        Self::Copy,
        Self::Move,
        Self::Link,
        Self::CopyMove,
        Self::CopyLink,
        Self::LinkMove,
        Self::All,
    ];

    /// The platform keyword for this value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Uninitialized => "uninitialized",
            Self::Copy => "copy",
            Self::Move => "move",
            Self::Link => "link",
            Self::CopyMove => "copyMove",
            Self::CopyLink => "copyLink",
            Self::LinkMove => "linkMove",
            Self::All => "all",
        }
    }

    /// The operations this value permits.
    ///
    /// `None` and `Uninitialized` both map to the empty set.
    pub const fn flags(self) -> EffectFlags {
        match self {
            Self::None | Self::Uninitialized => EffectFlags::empty(),
            Self::Copy => EffectFlags::COPY,
            Self::Move => EffectFlags::MOVE,
            Self::Link => EffectFlags::LINK,
            Self::CopyMove => EffectFlags::COPY.union(EffectFlags::MOVE),
            Self::CopyLink => EffectFlags::COPY.union(EffectFlags::LINK),
            Self::LinkMove => EffectFlags::LINK.union(EffectFlags::MOVE),
            Self::All => EffectFlags::all(),
        }
    }

    /// The allowed-effect value for a set of operations.
    ///
    /// The empty set maps to [`EffectAllowed::None`]; `Uninitialized` is never produced.
    pub fn from_flags(flags: EffectFlags) -> Self {
        let copy = flags.contains(EffectFlags::COPY);
        let mv = flags.contains(EffectFlags::MOVE);
        let link = flags.contains(EffectFlags::LINK);
        match (copy, mv, link) {
            (false, false, false) => Self::None,
            (true, false, false) => Self::Copy,
            (false, true, false) => Self::Move,
            (false, false, true) => Self::Link,
            (true, true, false) => Self::CopyMove,
            (true, false, true) => Self::CopyLink,
            (false, true, true) => Self::LinkMove,
            (true, true, true) => Self::All,
        }
    }

    /// Returns `true` if this value is a member of [`EFFECT_MOVE_TYPES`].
    pub fn permits_move(self) -> bool {
        EFFECT_MOVE_TYPES.contains(&self)
    }

    /// Returns `true` if this value is a member of [`EFFECT_COPY_TYPES`].
    pub fn permits_copy(self) -> bool {
        EFFECT_COPY_TYPES.contains(&self)
    }

    /// Returns `true` if this value permits a link.
    pub fn permits_link(self) -> bool {
        self.flags().contains(EffectFlags::LINK)
    }

    /// Returns `true` if a drop target may answer with `effect`.
    ///
    /// [`DropEffect::None`] is always acceptable; [`DropEffect::Uninitialized`]
    /// only while the source is itself uninitialized.
    pub fn permits(self, effect: DropEffect) -> bool {
        match effect {
            DropEffect::None => true,
            DropEffect::Uninitialized => self == Self::Uninitialized,
            DropEffect::Copy => self.permits_copy(),
            DropEffect::Move => self.permits_move(),
            DropEffect::Link => self.permits_link(),
        }
    }

    /// The drop effect a platform picks by default for this value.
    pub const fn preferred_drop_effect(self) -> DropEffect {
        match self {
            Self::None => DropEffect::None,
            Self::Copy | Self::CopyLink | Self::CopyMove | Self::All | Self::Uninitialized => {
                DropEffect::Copy
            }
            Self::Link | Self::LinkMove => DropEffect::Link,
            Self::Move => DropEffect::Move,
        }
    }
}

impl fmt::Display for EffectAllowed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectAllowed {
    type Err = ParseEffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|effect| effect.as_str() == s)
            .ok_or_else(|| ParseEffectError::new(s))
    }
}

bitflags::bitflags! {
    /// Drag operations, independent of how they were declared.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EffectFlags: u8 {
        /// The item may be copied.
        const COPY = 0b0000_0001;
        /// The item may be moved.
        const MOVE = 0b0000_0010;
        /// The item may be linked.
        const LINK = 0b0000_0100;
    }
}

/// Error returned when a string is not a known effect keyword.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseEffectError {
    input: String,
}

impl ParseEffectError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseEffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown drag effect keyword {:?}", self.input)
    }
}

impl core::error::Error for ParseEffectError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_parse_back() {
        for effect in DropEffect::ALL {
            assert_eq!(effect.as_str().parse::<DropEffect>(), Ok(effect));
        }
        for allowed in EffectAllowed::ALL {
            assert_eq!(allowed.as_str().parse::<EffectAllowed>(), Ok(allowed));
        }
    }

    #[test]
    fn parsing_is_case_sensitive() {
        let err = "CopyMove".parse::<EffectAllowed>().unwrap_err();
        assert_eq!(err.input(), "CopyMove");
        assert!("MOVE".parse::<DropEffect>().is_err());
        assert!("copyMove".parse::<DropEffect>().is_err());
    }

    #[test]
    fn move_and_copy_sets_match_spelled_out_members() {
        let movers: alloc::vec::Vec<_> = EffectAllowed::ALL
            .into_iter()
            .filter(|a| a.permits_move())
            .collect();
        assert_eq!(
            movers,
            [
                EffectAllowed::Move,
                EffectAllowed::CopyMove,
                EffectAllowed::LinkMove,
                EffectAllowed::All,
            ]
        );

        let copiers: alloc::vec::Vec<_> = EffectAllowed::ALL
            .into_iter()
            .filter(|a| a.permits_copy())
            .collect();
        assert_eq!(
            copiers,
            [
                EffectAllowed::Copy,
                EffectAllowed::CopyMove,
                EffectAllowed::CopyLink,
                EffectAllowed::All,
            ]
        );
    }

    #[test]
    fn flag_membership_agrees_with_static_sets() {
        for allowed in EffectAllowed::ALL {
            let flags = allowed.flags();
            assert_eq!(
                flags.contains(EffectFlags::MOVE),
                allowed.permits_move(),
                "move mismatch for {allowed}"
            );
            assert_eq!(
                flags.contains(EffectFlags::COPY),
                allowed.permits_copy(),
                "copy mismatch for {allowed}"
            );
        }
    }

    #[test]
    fn from_flags_inverts_flags_except_uninitialized() {
        for allowed in EffectAllowed::ALL {
            let back = EffectAllowed::from_flags(allowed.flags());
            if allowed == EffectAllowed::Uninitialized {
                assert_eq!(back, EffectAllowed::None);
            } else {
                assert_eq!(back, allowed);
            }
        }
    }

    #[test]
    fn none_drop_effect_is_always_permitted() {
        for allowed in EffectAllowed::ALL {
            assert!(allowed.permits(DropEffect::None));
        }
        assert!(!EffectAllowed::None.permits(DropEffect::Copy));
        assert!(EffectAllowed::Uninitialized.permits(DropEffect::Uninitialized));
        assert!(!EffectAllowed::All.permits(DropEffect::Uninitialized));
    }

    #[test]
    fn preferred_drop_effect_is_permitted() {
        for allowed in EffectAllowed::ALL {
            if allowed == EffectAllowed::Uninitialized {
                continue;
            }
            let preferred = allowed.preferred_drop_effect();
            assert!(allowed.permits(preferred), "{allowed} -> {preferred}");
        }
        assert_eq!(EffectAllowed::LinkMove.preferred_drop_effect(), DropEffect::Link);
    }

    #[test]
    fn defaults() {
        assert_eq!(DropEffect::default(), DropEffect::None);
        assert_eq!(EffectAllowed::default(), EffectAllowed::Uninitialized);
    }
}
