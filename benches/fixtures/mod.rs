// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

//! Synthetic model graphs for benchmarks.

use capella_export::model::element::{ComponentData, Element, ElementKind};
use capella_export::model::{ElementId, ModelGraph};

fn id(value: String) -> ElementId {
    ElementId::new(value).expect("bench id")
}

/// One root with `width` children, each child with `width` grandchildren.
pub fn wide_model(width: usize) -> (ModelGraph, ElementId) {
    let mut graph = ModelGraph::new();
    let root = id("root".to_owned());

    let mut children = Vec::with_capacity(width);
    for i in 0..width {
        let child = id(format!("c{i}"));
        let mut grandchildren = Vec::with_capacity(width);
        for j in 0..width {
            let grandchild = id(format!("c{i}-{j}"));
            graph.insert(Element::new(
                grandchild.clone(),
                format!("Leaf {i}.{j}"),
                ElementKind::LogicalComponent(ComponentData::default()),
            ));
            grandchildren.push(grandchild);
        }
        graph.insert(Element::new(
            child.clone(),
            format!("Assembly {i}"),
            ElementKind::LogicalComponent(ComponentData {
                components: grandchildren,
                ..ComponentData::default()
            }),
        ));
        children.push(child);
    }

    graph.insert(Element::new(
        root.clone(),
        "Root",
        ElementKind::LogicalComponent(ComponentData {
            components: children,
            ..ComponentData::default()
        }),
    ));
    (graph, root)
}

/// A single chain of nested components, `depth` levels deep.
pub fn deep_model(depth: usize) -> (ModelGraph, ElementId) {
    let mut graph = ModelGraph::new();
    let root = id("d0".to_owned());

    for level in 0..depth {
        let child = if level + 1 < depth {
            vec![id(format!("d{}", level + 1))]
        } else {
            Vec::new()
        };
        graph.insert(Element::new(
            id(format!("d{level}")),
            format!("Level {level}"),
            ElementKind::LogicalComponent(ComponentData {
                components: child,
                ..ComponentData::default()
            }),
        ));
    }
    (graph, root)
}
