// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

//! Function-tree extraction: functions, activities, capabilities, and the
//! flat involvement kinds (chains and processes).

use super::{structure::port_entries, stub_entries, Promotion, Record};
use crate::model::element::{CapabilityData, FunctionData, InvolvementData};
use crate::model::graph::ModelGraph;

/// Functions and operational activities share one shape; only the label of
/// the child block differs ("functions" vs "activities").
pub(super) fn function(
    graph: &ModelGraph,
    rec: &mut Record,
    data: &FunctionData,
    child_label: &'static str,
) {
    if let Some(owner) = &data.owner {
        rec.push_ref("owner", graph.stub(owner));
    }
    rec.push_block(
        child_label,
        Promotion::Expand,
        stub_entries(graph, &data.functions),
    );
    rec.push_block("inputs", Promotion::Stub, port_entries(graph, &data.inputs));
    rec.push_block(
        "outputs",
        Promotion::Stub,
        port_entries(graph, &data.outputs),
    );
}

pub(super) fn capability(graph: &ModelGraph, rec: &mut Record, data: &CapabilityData) {
    rec.push_block(
        "includes",
        Promotion::Stub,
        stub_entries(graph, &data.includes),
    );
    rec.push_block(
        "extends",
        Promotion::Stub,
        stub_entries(graph, &data.extends),
    );
    rec.push_block(
        "involved_entities",
        Promotion::Stub,
        stub_entries(graph, &data.involved_entities),
    );
    rec.push_block(
        "involved_activities",
        Promotion::Stub,
        stub_entries(graph, &data.involved_activities),
    );
    rec.push_block(
        "involved_processes",
        Promotion::Stub,
        stub_entries(graph, &data.involved_processes),
    );
}

pub(super) fn involvement(graph: &ModelGraph, rec: &mut Record, data: &InvolvementData) {
    rec.push_block(
        "involved",
        Promotion::Stub,
        stub_entries(graph, &data.involved),
    );
}
