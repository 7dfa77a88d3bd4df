// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

//! Small hand-built model graphs shared by unit tests.

use super::element::{
    Annotations, ArtifactData, ArtifactLink, ComponentData, ComponentExchangeData, Element,
    ElementKind, FunctionData, PortData, Region, StateData, StateMachineData, TransitionData,
};
use super::graph::ModelGraph;
use super::ids::ElementId;
use smol_str::SmolStr;

pub(crate) fn eid(value: &str) -> ElementId {
    ElementId::new(value).expect("element id")
}

/// A logical component `root` with two sub-components and one port carrying
/// one exchange to a port on `sub-b`. The canonical promotion scenario.
pub(crate) fn logical_assembly() -> (ModelGraph, ElementId) {
    let mut graph = ModelGraph::new();

    graph.insert(Element::new(
        eid("root"),
        "Root",
        ElementKind::LogicalComponent(ComponentData {
            components: vec![eid("sub-a"), eid("sub-b")],
            ports: vec![eid("p-root")],
            ..ComponentData::default()
        }),
    ));
    graph.insert(Element::new(
        eid("sub-a"),
        "Sub A",
        ElementKind::LogicalComponent(ComponentData::default()),
    ));
    graph.insert(Element::new(
        eid("sub-b"),
        "Sub B",
        ElementKind::LogicalComponent(ComponentData {
            ports: vec![eid("p-sub-b")],
            ..ComponentData::default()
        }),
    ));
    graph.insert(Element::new(
        eid("p-root"),
        "Root Out",
        ElementKind::ComponentPort(PortData {
            owner: Some(eid("root")),
            exchanges: vec![eid("ex-1")],
        }),
    ));
    graph.insert(Element::new(
        eid("p-sub-b"),
        "Sub B In",
        ElementKind::ComponentPort(PortData {
            owner: Some(eid("sub-b")),
            exchanges: vec![eid("ex-1")],
        }),
    ));
    graph.insert(Element::new(
        eid("ex-1"),
        "Telemetry",
        ElementKind::ComponentExchange(ComponentExchangeData {
            source: Some(eid("p-root")),
            target: Some(eid("p-sub-b")),
            ..ComponentExchangeData::default()
        }),
    ));

    (graph, eid("root"))
}

/// The logical assembly plus three traceability artifacts: one linked to
/// the root (rendered), one linked to the root port (referenced-only under
/// the default policy), and one linked to a component the walk never sees.
pub(crate) fn traced_assembly() -> (ModelGraph, ElementId) {
    let (mut graph, root) = logical_assembly();
    graph.insert(Element::new(
        eid("other"),
        "Elsewhere",
        ElementKind::LogicalComponent(ComponentData::default()),
    ));
    graph.insert(Element::new(
        eid("art-root"),
        "REQ-10",
        ElementKind::TraceArtifact(ArtifactData {
            url: "https://alm.example.com/REQ-10".to_owned(),
            identifier: "REQ-10".to_owned(),
            links: vec![ArtifactLink {
                kind: "satisfies".to_owned(),
                model_element: eid("root"),
            }],
        }),
    ));
    graph.insert(Element::new(
        eid("art-port"),
        "REQ-11",
        ElementKind::TraceArtifact(ArtifactData {
            url: "https://alm.example.com/REQ-11".to_owned(),
            identifier: "REQ-11".to_owned(),
            links: vec![ArtifactLink {
                kind: "verifies".to_owned(),
                model_element: eid("p-root"),
            }],
        }),
    ));
    graph.insert(Element::new(
        eid("art-other"),
        "REQ-12",
        ElementKind::TraceArtifact(ArtifactData {
            url: "https://alm.example.com/REQ-12".to_owned(),
            identifier: "REQ-12".to_owned(),
            links: vec![ArtifactLink {
                kind: "satisfies".to_owned(),
                model_element: eid("other"),
            }],
        }),
    ));
    (graph, root)
}

/// A component that lists itself as a sub-component.
pub(crate) fn self_referential_component() -> (ModelGraph, ElementId) {
    let mut graph = ModelGraph::new();
    graph.insert(Element::new(
        eid("ouro"),
        "Ouroboros",
        ElementKind::LogicalComponent(ComponentData {
            components: vec![eid("ouro")],
            ..ComponentData::default()
        }),
    ));
    (graph, eid("ouro"))
}

/// An element whose type tag has no dedicated template.
pub(crate) fn unknown_element() -> (ModelGraph, ElementId) {
    let mut graph = ModelGraph::new();
    graph.insert(
        Element::new(
            eid("odd"),
            "Odd One",
            ElementKind::Unknown {
                tag: SmolStr::new("Scenario"),
            },
        )
        .with_annotations(Annotations {
            constraints: vec![eid("ghost-constraint")],
            ..Annotations::default()
        }),
    );
    (graph, eid("odd"))
}

/// A state machine with one region, two states, one transition, and entry
/// functions wired to the active state.
pub(crate) fn mode_machine() -> (ModelGraph, ElementId) {
    let mut graph = ModelGraph::new();

    graph.insert(Element::new(
        eid("sm"),
        "Modes",
        ElementKind::StateMachine(StateMachineData {
            regions: vec![Region {
                name: "default".to_owned(),
                states: vec![eid("st-off"), eid("st-on")],
                transitions: vec![eid("tr-power")],
            }],
        }),
    ));
    graph.insert(Element::new(
        eid("st-off"),
        "Off",
        ElementKind::State(StateData {
            outgoing_transitions: vec![eid("tr-power")],
            ..StateData::default()
        }),
    ));
    graph.insert(Element::new(
        eid("st-on"),
        "On",
        ElementKind::State(StateData {
            incoming_transitions: vec![eid("tr-power")],
            entries: vec![eid("fn-boot")],
            ..StateData::default()
        }),
    ));
    graph.insert(Element::new(
        eid("tr-power"),
        "power on",
        ElementKind::StateTransition(TransitionData {
            guard: Some("power_available".to_owned()),
            source: Some(eid("st-off")),
            destination: Some(eid("st-on")),
            ..TransitionData::default()
        }),
    ));
    graph.insert(Element::new(
        eid("fn-boot"),
        "Boot",
        ElementKind::LogicalFunction(FunctionData::default()),
    ));

    (graph, eid("sm"))
}
