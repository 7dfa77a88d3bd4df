// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

//! Turns a typed model element into an intermediate [`Record`].
//!
//! A record is a flat description of everything one exported fragment will
//! show: header scalars, singular references and labelled blocks of entries.
//! Every reference a record mentions is discoverable through
//! [`Record::discovered`], so the export walk never has to re-inspect the
//! element to learn what was mentioned.

mod behavior;
mod exchange;
mod extras;
mod function;
mod structure;

use crate::model::element::{Annotations, Element, ElementKind};
use crate::model::graph::{ModelGraph, RefStub};
use crate::model::ids::ElementId;
use smol_str::SmolStr;

/// How a discovered reference joins the export queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    /// Structural child, exported as its own fragment under the default policy.
    Expand,
    /// Mentioned by name and uuid only.
    Stub,
}

/// One item inside a [`Block`].
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub uuid: Option<ElementId>,
    pub scalars: Vec<(&'static str, String)>,
    pub refs: Vec<(&'static str, RefStub)>,
    pub blocks: Vec<Block>,
}

impl Entry {
    pub fn stub(stub: RefStub) -> Self {
        Entry {
            name: stub.display_name().to_owned(),
            uuid: Some(stub.uuid),
            scalars: Vec::new(),
            refs: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// An entry that is pure inline data, such as a state machine region.
    pub fn inline(name: impl Into<String>) -> Self {
        Entry {
            name: name.into(),
            uuid: None,
            scalars: Vec::new(),
            refs: Vec::new(),
            blocks: Vec::new(),
        }
    }
}

/// A labelled list of entries. Empty blocks are dropped at construction, so
/// a record only carries what its fragment will actually show.
#[derive(Debug, Clone)]
pub struct Block {
    pub label: &'static str,
    pub promote: Promotion,
    pub entries: Vec<Entry>,
}

/// Everything one fragment renders for a single element.
#[derive(Debug, Clone)]
pub struct Record {
    pub tag: SmolStr,
    pub name: String,
    pub uuid: ElementId,
    pub description: Option<String>,
    pub scalars: Vec<(&'static str, String)>,
    pub refs: Vec<(&'static str, RefStub)>,
    pub blocks: Vec<Block>,
}

impl Record {
    fn new(element: &Element) -> Self {
        let mut scalars = Vec::new();
        if let Some(layer) = element.layer {
            scalars.push(("layer", layer.as_str().to_owned()));
        }
        let description = if element.description.is_empty() {
            None
        } else {
            Some(element.description.clone())
        };
        Record {
            tag: SmolStr::new(element.type_tag()),
            name: element.name.clone(),
            uuid: element.uuid.clone(),
            description,
            scalars,
            refs: Vec::new(),
            blocks: Vec::new(),
        }
    }

    fn push_block(&mut self, label: &'static str, promote: Promotion, entries: Vec<Entry>) {
        if !entries.is_empty() {
            self.blocks.push(Block {
                label,
                promote,
                entries,
            });
        }
    }

    fn push_ref(&mut self, label: &'static str, stub: RefStub) {
        self.refs.push((label, stub));
    }

    /// Every reference this record mentions, paired with the promotion role
    /// of the position it was mentioned in.
    pub fn discovered(&self) -> Vec<(&ElementId, Promotion)> {
        fn walk<'a>(blocks: &'a [Block], out: &mut Vec<(&'a ElementId, Promotion)>) {
            for block in blocks {
                for entry in &block.entries {
                    if let Some(uuid) = &entry.uuid {
                        out.push((uuid, block.promote));
                    }
                    for (_, stub) in &entry.refs {
                        out.push((&stub.uuid, Promotion::Stub));
                    }
                    walk(&entry.blocks, out);
                }
            }
        }

        let mut out = Vec::new();
        for (_, stub) in &self.refs {
            out.push((&stub.uuid, Promotion::Stub));
        }
        walk(&self.blocks, &mut out);
        out
    }
}

/// Builds the record for one element, resolving every mentioned id against
/// the graph so missing targets degrade to nameless stubs instead of errors.
pub fn record_for(graph: &ModelGraph, element: &Element) -> Record {
    let mut rec = Record::new(element);

    match &element.kind {
        ElementKind::LogicalComponent(data) | ElementKind::SystemComponent(data) => {
            structure::component(graph, &mut rec, data)
        }
        ElementKind::PhysicalComponent(data) => structure::physical_component(graph, &mut rec, data),
        ElementKind::Entity(data) => structure::entity(graph, &mut rec, data),
        ElementKind::Part(data) => structure::part(graph, &mut rec, data),
        ElementKind::LogicalFunction(data)
        | ElementKind::SystemFunction(data)
        | ElementKind::PhysicalFunction(data) => function::function(graph, &mut rec, data, "functions"),
        ElementKind::OperationalActivity(data) => {
            function::function(graph, &mut rec, data, "activities")
        }
        ElementKind::OperationalCapability(data) => function::capability(graph, &mut rec, data),
        ElementKind::FunctionalChain(data) | ElementKind::OperationalProcess(data) => {
            function::involvement(graph, &mut rec, data)
        }
        ElementKind::FunctionalExchange(data) => exchange::functional_exchange(graph, &mut rec, data),
        ElementKind::Interaction(data) => exchange::interaction(graph, &mut rec, data),
        ElementKind::ComponentExchange(data) => exchange::component_exchange(graph, &mut rec, data),
        ElementKind::CommunicationMean(data) => exchange::communication_mean(graph, &mut rec, data),
        ElementKind::PhysicalLink(data) => exchange::physical_link(graph, &mut rec, data),
        ElementKind::PhysicalPath(data) => exchange::physical_path(graph, &mut rec, data),
        ElementKind::FunctionInputPort(data)
        | ElementKind::FunctionOutputPort(data)
        | ElementKind::ComponentPort(data)
        | ElementKind::PhysicalPort(data) => exchange::port(graph, &mut rec, data),
        ElementKind::ExchangeItem(data) => exchange::exchange_item(graph, &mut rec, data),
        ElementKind::ExchangeItemElement(data) => {
            exchange::exchange_item_element(graph, &mut rec, data)
        }
        ElementKind::StateMachine(data) => behavior::state_machine(graph, &mut rec, data),
        ElementKind::State(data) => behavior::state(graph, &mut rec, data),
        ElementKind::InitialPseudoState(data) => behavior::pseudo_state(graph, &mut rec, data),
        ElementKind::StateTransition(data) => behavior::transition(graph, &mut rec, data),
        ElementKind::StringPropertyValue(value) => {
            rec.scalars.push(("value", value.clone()));
        }
        ElementKind::FloatPropertyValue(value) => {
            rec.scalars.push(("value", format_float(*value)));
        }
        ElementKind::PropertyValueGroup => {}
        ElementKind::Requirement(data) => extras::requirement(graph, &mut rec, data),
        ElementKind::OutgoingRelation(data) => extras::outgoing_relation(graph, &mut rec, data),
        ElementKind::Diagram(data) => extras::diagram(graph, &mut rec, data),
        ElementKind::TraceArtifact(data) => extras::artifact(graph, &mut rec, data),
        ElementKind::Unknown { .. } => {}
    }

    annotations(graph, &mut rec, &element.annotations);
    rec
}

fn annotations(graph: &ModelGraph, rec: &mut Record, notes: &Annotations) {
    rec.push_block(
        "applied_property_value_groups",
        Promotion::Stub,
        stub_entries(graph, &notes.applied_property_value_groups),
    );
    rec.push_block(
        "applied_property_values",
        Promotion::Stub,
        stub_entries(graph, &notes.applied_property_values),
    );
    rec.push_block(
        "property_value_groups",
        Promotion::Stub,
        stub_entries(graph, &notes.property_value_groups),
    );
    rec.push_block(
        "property_values",
        Promotion::Stub,
        stub_entries(graph, &notes.property_values),
    );
    rec.push_block(
        "constraints",
        Promotion::Stub,
        stub_entries(graph, &notes.constraints),
    );
}

fn stub_entries(graph: &ModelGraph, ids: &[ElementId]) -> Vec<Entry> {
    ids.iter().map(|id| Entry::stub(graph.stub(id))).collect()
}

fn bool_scalar(value: bool) -> String {
    if value { "true" } else { "false" }.to_owned()
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Resolves an exchange endpoint. Ports defer to their owning component or
/// function so fragments name the thing a reader recognizes.
fn endpoint(graph: &ModelGraph, id: &ElementId) -> RefStub {
    if let Some(element) = graph.get(id) {
        let owner = match &element.kind {
            ElementKind::FunctionInputPort(data)
            | ElementKind::FunctionOutputPort(data)
            | ElementKind::ComponentPort(data)
            | ElementKind::PhysicalPort(data) => data.owner.as_ref(),
            _ => None,
        };
        if let Some(owner) = owner {
            return graph.stub(owner);
        }
    }
    graph.stub(id)
}
