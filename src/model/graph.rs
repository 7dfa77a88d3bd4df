// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use super::element::{Element, ElementKind, Layer};
use super::ids::ElementId;

/// A `{name, uuid}` reference stub pointing at another element.
///
/// The target may be absent from the graph ("missing relation" is not an
/// error); an unresolved stub has no name and is never promoted to primary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefStub {
    pub uuid: ElementId,
    pub name: Option<String>,
}

impl RefStub {
    /// Display name; unresolved stubs print as `None`.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("None")
    }
}

/// The in-memory source graph a walk reads from.
///
/// Owns all elements, keyed by uuid, preserving insertion order so that
/// root selections such as [`ModelGraph::all_ids`] are deterministic.
/// Read-only during a walk.
#[derive(Debug, Clone, Default)]
pub struct ModelGraph {
    elements: HashMap<ElementId, Element>,
    order: Vec<ElementId>,
}

impl ModelGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an element, replacing any previous element with the same
    /// uuid. The first insertion position is kept.
    pub fn insert(&mut self, element: Element) -> Option<Element> {
        let uuid = element.uuid.clone();
        let previous = self.elements.insert(uuid.clone(), element);
        if previous.is_none() {
            self.order.push(uuid);
        }
        previous
    }

    pub fn get(&self, uuid: &ElementId) -> Option<&Element> {
        self.elements.get(uuid)
    }

    pub fn get_by_str(&self, uuid: &str) -> Option<&Element> {
        self.elements.get(uuid)
    }

    pub fn contains(&self, uuid: &ElementId) -> bool {
        self.elements.contains_key(uuid)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All uuids in insertion order.
    pub fn all_ids(&self) -> Vec<ElementId> {
        self.order.clone()
    }

    /// The uuids of every element tagged with `layer`, in insertion order.
    pub fn layer_ids(&self, layer: Layer) -> Vec<ElementId> {
        self.order
            .iter()
            .filter(|id| {
                self.elements
                    .get(*id)
                    .is_some_and(|el| el.layer == Some(layer))
            })
            .cloned()
            .collect()
    }

    /// The uuids of every traceability artifact in the graph.
    pub fn artifact_ids(&self) -> Vec<ElementId> {
        self.order
            .iter()
            .filter(|id| {
                self.elements
                    .get(*id)
                    .is_some_and(|el| matches!(el.kind, ElementKind::TraceArtifact(_)))
            })
            .cloned()
            .collect()
    }

    /// Resolves a relation target to a `{name, uuid}` stub. Absent targets
    /// yield an unnamed stub rather than an error.
    pub fn stub(&self, uuid: &ElementId) -> RefStub {
        RefStub {
            uuid: uuid.clone(),
            name: self.elements.get(uuid).map(|el| el.name.clone()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.order.iter().filter_map(|id| self.elements.get(id))
    }
}
