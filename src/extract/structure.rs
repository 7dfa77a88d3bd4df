// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

//! Structure-tree extraction: components, entities, and parts.

use super::{bool_scalar, endpoint, stub_entries, Entry, Promotion, Record};
use crate::model::element::{
    ComponentData, ElementKind, EntityData, NodeComponentData, PartData, PhysicalComponentData,
};
use crate::model::graph::ModelGraph;
use crate::model::ids::ElementId;

pub(super) fn component(graph: &ModelGraph, rec: &mut Record, data: &ComponentData) {
    rec.scalars.push(("is_human", bool_scalar(data.is_human)));
    rec.push_block(
        "components",
        Promotion::Expand,
        stub_entries(graph, &data.components),
    );
    rec.push_block(
        "allocated_functions",
        Promotion::Stub,
        stub_entries(graph, &data.allocated_functions),
    );
    rec.push_block("ports", Promotion::Stub, port_entries(graph, &data.ports));
    rec.push_block(
        "state_machines",
        Promotion::Stub,
        stub_entries(graph, &data.state_machines),
    );
}

pub(super) fn physical_component(graph: &ModelGraph, rec: &mut Record, data: &PhysicalComponentData) {
    match data {
        PhysicalComponentData::Node(node) => node_component(graph, rec, node),
        PhysicalComponentData::Behavior(behavior) => component(graph, rec, behavior),
    }
}

fn node_component(graph: &ModelGraph, rec: &mut Record, data: &NodeComponentData) {
    rec.scalars.push(("nature", "NODE".to_owned()));
    rec.scalars.push(("is_human", bool_scalar(data.is_human)));
    rec.push_block(
        "components",
        Promotion::Expand,
        stub_entries(graph, &data.components),
    );
    rec.push_block(
        "deployed_components",
        Promotion::Expand,
        stub_entries(graph, &data.deployed_components),
    );
    rec.push_block(
        "physical_ports",
        Promotion::Stub,
        port_entries(graph, &data.physical_ports),
    );
}

pub(super) fn entity(graph: &ModelGraph, rec: &mut Record, data: &EntityData) {
    rec.scalars.push(("is_human", bool_scalar(data.is_human)));
    rec.scalars.push(("is_actor", bool_scalar(data.is_actor)));
    rec.push_block(
        "entities",
        Promotion::Expand,
        stub_entries(graph, &data.entities),
    );
    rec.push_block(
        "activities",
        Promotion::Stub,
        stub_entries(graph, &data.activities),
    );
    rec.push_block(
        "state_machines",
        Promotion::Stub,
        stub_entries(graph, &data.state_machines),
    );
}

pub(super) fn part(graph: &ModelGraph, rec: &mut Record, data: &PartData) {
    if let Some(part_type) = &data.part_type {
        rec.push_ref("type", graph.stub(part_type));
    }
}

/// Port entries carry their attached exchanges inline, each exchange showing
/// the owners on both ends so a fragment reads without chasing uuids.
pub(super) fn port_entries(graph: &ModelGraph, ids: &[ElementId]) -> Vec<Entry> {
    ids.iter()
        .map(|port_id| {
            let mut entry = Entry::stub(graph.stub(port_id));
            if let Some(port) = graph.get(port_id) {
                let exchange_ids: &[ElementId] = match &port.kind {
                    ElementKind::FunctionInputPort(data)
                    | ElementKind::FunctionOutputPort(data)
                    | ElementKind::ComponentPort(data)
                    | ElementKind::PhysicalPort(data) => data.exchanges.as_slice(),
                    _ => &[],
                };
                let exchanges: Vec<Entry> = exchange_ids
                    .iter()
                    .map(|ex_id| exchange_entry(graph, ex_id))
                    .collect();
                if !exchanges.is_empty() {
                    entry.blocks.push(super::Block {
                        label: "exchanges",
                        promote: Promotion::Stub,
                        entries: exchanges,
                    });
                }
            }
            entry
        })
        .collect()
}

fn exchange_entry(graph: &ModelGraph, ex_id: &ElementId) -> Entry {
    let mut entry = Entry::stub(graph.stub(ex_id));
    if let Some(ex) = graph.get(ex_id) {
        let (source, target) = match &ex.kind {
            ElementKind::FunctionalExchange(data) => (&data.source, &data.target),
            ElementKind::ComponentExchange(data) => (&data.source, &data.target),
            ElementKind::PhysicalLink(data) => (&data.source, &data.target),
            _ => (&None, &None),
        };
        if let Some(source) = source {
            entry.refs.push(("source", endpoint(graph, source)));
        }
        if let Some(target) = target {
            entry.refs.push(("target", endpoint(graph, target)));
        }
    }
    entry
}
