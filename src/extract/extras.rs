// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

//! Requirements, traceability relations, diagrams, and external artifacts.

use super::{stub_entries, Entry, Promotion, Record};
use crate::model::element::{ArtifactData, DiagramData, OutgoingRelationData, RequirementData};
use crate::model::graph::ModelGraph;

pub(super) fn requirement(graph: &ModelGraph, rec: &mut Record, data: &RequirementData) {
    rec.scalars.push(("long_name", data.long_name.clone()));
    rec.scalars.push(("prefix", data.prefix.clone()));
    rec.scalars.push(("chapter_name", data.chapter_name.clone()));
    if let Some(requirement_type) = &data.requirement_type {
        rec.push_ref("requirement_type", graph.stub(requirement_type));
    }
    rec.push_block(
        "relations",
        Promotion::Stub,
        stub_entries(graph, &data.relations),
    );
}

pub(super) fn outgoing_relation(graph: &ModelGraph, rec: &mut Record, data: &OutgoingRelationData) {
    rec.scalars.push(("long_name", data.long_name.clone()));
    if let Some(source) = &data.source {
        rec.push_ref("source", graph.stub(source));
    }
    if let Some(target) = &data.target {
        rec.push_ref("target", graph.stub(target));
    }
    if let Some(relation_type) = &data.relation_type {
        rec.push_ref("relation_type", graph.stub(relation_type));
    }
}

pub(super) fn diagram(graph: &ModelGraph, rec: &mut Record, data: &DiagramData) {
    rec.push_block("nodes", Promotion::Stub, stub_entries(graph, &data.nodes));
}

pub(super) fn artifact(graph: &ModelGraph, rec: &mut Record, data: &ArtifactData) {
    rec.scalars.push(("url", data.url.clone()));
    rec.scalars.push(("identifier", data.identifier.clone()));
    let links: Vec<Entry> = data
        .links
        .iter()
        .map(|link| {
            let mut entry = Entry::inline(link.kind.clone());
            entry
                .refs
                .push(("model_element", graph.stub(&link.model_element)));
            entry
        })
        .collect();
    rec.push_block("links", Promotion::Stub, links);
}

#[cfg(test)]
mod tests {
    use super::super::record_for;
    use crate::model::element::{ArtifactData, ArtifactLink, Element, ElementKind};
    use crate::model::fixtures::eid;
    use crate::model::graph::ModelGraph;

    #[test]
    fn artifact_links_name_the_linked_element() {
        let mut graph = ModelGraph::new();
        graph.insert(Element::new(
            eid("comp"),
            "Pump",
            ElementKind::LogicalComponent(Default::default()),
        ));
        graph.insert(Element::new(
            eid("art"),
            "REQ-001",
            ElementKind::TraceArtifact(ArtifactData {
                url: "https://alm.example.com/REQ-001".to_owned(),
                identifier: "REQ-001".to_owned(),
                links: vec![ArtifactLink {
                    kind: "satisfies".to_owned(),
                    model_element: eid("comp"),
                }],
            }),
        ));

        let rec = record_for(&graph, graph.get(&eid("art")).unwrap());
        assert!(rec.scalars.iter().any(|(k, _)| *k == "url"));
        let links = rec.blocks.iter().find(|b| b.label == "links").unwrap();
        assert_eq!(links.entries[0].name, "satisfies");
        assert_eq!(links.entries[0].refs[0].1.display_name(), "Pump");
    }
}
