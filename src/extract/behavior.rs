// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

//! State machine extraction. Regions are inline data; their states and
//! transitions are structural children of the machine.

use super::{stub_entries, Block, Entry, Promotion, Record};
use crate::model::element::{PseudoStateData, StateData, StateMachineData, TransitionData};
use crate::model::graph::ModelGraph;

pub(super) fn state_machine(graph: &ModelGraph, rec: &mut Record, data: &StateMachineData) {
    let regions: Vec<Entry> = data
        .regions
        .iter()
        .map(|region| {
            let mut entry = Entry::inline(region.name.clone());
            if !region.states.is_empty() {
                entry.blocks.push(Block {
                    label: "states",
                    promote: Promotion::Expand,
                    entries: stub_entries(graph, &region.states),
                });
            }
            if !region.transitions.is_empty() {
                entry.blocks.push(Block {
                    label: "transitions",
                    promote: Promotion::Expand,
                    entries: stub_entries(graph, &region.transitions),
                });
            }
            entry
        })
        .collect();
    rec.push_block("regions", Promotion::Stub, regions);
}

pub(super) fn state(graph: &ModelGraph, rec: &mut Record, data: &StateData) {
    rec.push_block(
        "outgoing_transitions",
        Promotion::Stub,
        stub_entries(graph, &data.outgoing_transitions),
    );
    rec.push_block(
        "incoming_transitions",
        Promotion::Stub,
        stub_entries(graph, &data.incoming_transitions),
    );
    rec.push_block(
        "do_activity",
        Promotion::Stub,
        stub_entries(graph, &data.do_activity),
    );
    rec.push_block(
        "entries",
        Promotion::Stub,
        stub_entries(graph, &data.entries),
    );
    rec.push_block("exits", Promotion::Stub, stub_entries(graph, &data.exits));
}

pub(super) fn pseudo_state(graph: &ModelGraph, rec: &mut Record, data: &PseudoStateData) {
    rec.push_block(
        "outgoing_transitions",
        Promotion::Stub,
        stub_entries(graph, &data.outgoing_transitions),
    );
}

pub(super) fn transition(graph: &ModelGraph, rec: &mut Record, data: &TransitionData) {
    if let Some(guard) = &data.guard {
        rec.scalars.push(("guard", guard.clone()));
    }
    if let Some(source) = &data.source {
        rec.push_ref("source", graph.stub(source));
    }
    if let Some(destination) = &data.destination {
        rec.push_ref("destination", graph.stub(destination));
    }
    rec.push_block(
        "triggers",
        Promotion::Stub,
        stub_entries(graph, &data.triggers),
    );
    rec.push_block(
        "effects",
        Promotion::Stub,
        stub_entries(graph, &data.effects),
    );
}

#[cfg(test)]
mod tests {
    use super::super::{record_for, Promotion};
    use crate::model::fixtures;

    #[test]
    fn region_states_and_transitions_expand() {
        let (graph, sm) = fixtures::mode_machine();
        let rec = record_for(&graph, graph.get(&sm).unwrap());

        let regions = rec.blocks.iter().find(|b| b.label == "regions").unwrap();
        let region = &regions.entries[0];
        assert_eq!(region.name, "default");
        assert!(region.uuid.is_none());
        for block in &region.blocks {
            assert_eq!(block.promote, Promotion::Expand);
        }
    }

    #[test]
    fn transition_carries_guard_and_both_ends() {
        let (graph, _) = fixtures::mode_machine();
        let tr = graph.get(&fixtures::eid("tr-power")).unwrap();
        let rec = record_for(&graph, tr);

        assert!(rec
            .scalars
            .iter()
            .any(|(k, v)| *k == "guard" && v == "power_available"));
        assert_eq!(rec.refs[0].1.display_name(), "Off");
        assert_eq!(rec.refs[1].1.display_name(), "On");
    }
}
