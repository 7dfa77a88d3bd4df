// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

//! Exchange extraction: the five exchange kinds, ports, and exchange items.

use super::{endpoint, stub_entries, Promotion, Record};
use crate::model::element::{
    CommunicationMeanData, ComponentExchangeData, ExchangeItemData, ExchangeItemElementData,
    FunctionalExchangeData, InteractionData, PhysicalLinkData, PhysicalPathData, PortData,
};
use crate::model::graph::ModelGraph;

pub(super) fn functional_exchange(graph: &ModelGraph, rec: &mut Record, data: &FunctionalExchangeData) {
    ends(graph, rec, data.source.as_ref(), data.target.as_ref());
    rec.push_block(
        "exchange_items",
        Promotion::Stub,
        stub_entries(graph, &data.exchange_items),
    );
    rec.push_block(
        "involving_chains",
        Promotion::Stub,
        stub_entries(graph, &data.involving_chains),
    );
}

pub(super) fn interaction(graph: &ModelGraph, rec: &mut Record, data: &InteractionData) {
    ends(graph, rec, data.source.as_ref(), data.target.as_ref());
    rec.push_block(
        "exchange_items",
        Promotion::Stub,
        stub_entries(graph, &data.exchange_items),
    );
    rec.push_block(
        "involving_processes",
        Promotion::Stub,
        stub_entries(graph, &data.involving_processes),
    );
}

pub(super) fn component_exchange(graph: &ModelGraph, rec: &mut Record, data: &ComponentExchangeData) {
    ends(graph, rec, data.source.as_ref(), data.target.as_ref());
    rec.push_block(
        "exchange_items",
        Promotion::Stub,
        stub_entries(graph, &data.exchange_items),
    );
    rec.push_block(
        "allocated_functional_exchanges",
        Promotion::Stub,
        stub_entries(graph, &data.allocated_functional_exchanges),
    );
}

pub(super) fn communication_mean(graph: &ModelGraph, rec: &mut Record, data: &CommunicationMeanData) {
    ends(graph, rec, data.source.as_ref(), data.target.as_ref());
    rec.push_block(
        "allocated_exchange_items",
        Promotion::Stub,
        stub_entries(graph, &data.allocated_exchange_items),
    );
    rec.push_block(
        "allocated_interactions",
        Promotion::Stub,
        stub_entries(graph, &data.allocated_interactions),
    );
}

pub(super) fn physical_link(graph: &ModelGraph, rec: &mut Record, data: &PhysicalLinkData) {
    ends(graph, rec, data.source.as_ref(), data.target.as_ref());
    rec.push_block(
        "exchanges",
        Promotion::Stub,
        stub_entries(graph, &data.exchanges),
    );
    rec.push_block(
        "physical_paths",
        Promotion::Stub,
        stub_entries(graph, &data.physical_paths),
    );
}

pub(super) fn physical_path(graph: &ModelGraph, rec: &mut Record, data: &PhysicalPathData) {
    rec.push_block(
        "involved_items",
        Promotion::Stub,
        stub_entries(graph, &data.involved_items),
    );
    rec.push_block(
        "exchanges",
        Promotion::Stub,
        stub_entries(graph, &data.exchanges),
    );
}

pub(super) fn port(graph: &ModelGraph, rec: &mut Record, data: &PortData) {
    if let Some(owner) = &data.owner {
        rec.push_ref("owner", graph.stub(owner));
    }
    rec.push_block(
        "exchanges",
        Promotion::Stub,
        stub_entries(graph, &data.exchanges),
    );
}

pub(super) fn exchange_item(graph: &ModelGraph, rec: &mut Record, data: &ExchangeItemData) {
    rec.push_block(
        "elements",
        Promotion::Stub,
        stub_entries(graph, &data.elements),
    );
}

pub(super) fn exchange_item_element(
    graph: &ModelGraph,
    rec: &mut Record,
    data: &ExchangeItemElementData,
) {
    if let Some(abstract_type) = &data.abstract_type {
        rec.push_ref("abstract_type", graph.stub(abstract_type));
    }
}

/// Source and target resolve through port owners so the fragment names the
/// components (or functions) at the ends, not the ports.
fn ends(
    graph: &ModelGraph,
    rec: &mut Record,
    source: Option<&crate::model::ids::ElementId>,
    target: Option<&crate::model::ids::ElementId>,
) {
    if let Some(source) = source {
        rec.push_ref("source", endpoint(graph, source));
    }
    if let Some(target) = target {
        rec.push_ref("target", endpoint(graph, target));
    }
}

#[cfg(test)]
mod tests {
    use super::super::record_for;
    use crate::model::fixtures;

    #[test]
    fn exchange_endpoints_resolve_to_port_owners() {
        let (graph, _) = fixtures::logical_assembly();
        let ex = graph.get(&fixtures::eid("ex-1")).unwrap();
        let rec = record_for(&graph, ex);

        assert_eq!(rec.refs.len(), 2);
        assert_eq!(rec.refs[0].0, "source");
        assert_eq!(rec.refs[0].1.display_name(), "Root");
        assert_eq!(rec.refs[1].1.display_name(), "Sub B");
    }

    #[test]
    fn port_record_names_its_owner() {
        let (graph, _) = fixtures::logical_assembly();
        let port = graph.get(&fixtures::eid("p-sub-b")).unwrap();
        let rec = record_for(&graph, port);

        assert_eq!(rec.refs[0].0, "owner");
        assert_eq!(rec.refs[0].1.display_name(), "Sub B");
    }
}
