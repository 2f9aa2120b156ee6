// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters for host drag-and-drop surfaces.
//!
//! - `web` (feature `web`, `wasm32` only): DOM `DragEvent` support and listener bindings.

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;
