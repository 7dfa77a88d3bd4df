// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

//! In-memory representation of a system model: identifiers, typed elements
//! and the graph that owns them.

pub mod element;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod graph;
pub mod ids;

pub use element::{Element, ElementKind, Layer};
pub use graph::{ModelGraph, RefStub};
pub use ids::{ElementId, IdError};
