// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

use smol_str::SmolStr;

use super::ids::ElementId;

/// Arcadia layer an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Operational,
    System,
    Logical,
    Physical,
}

impl Layer {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Operational => "OA",
            Self::System => "SA",
            Self::Logical => "LA",
            Self::Physical => "PA",
        }
    }
}

/// Relations shared by most element kinds: the property-value machinery and
/// constraints. Empty lists mean "relation absent", which is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    pub applied_property_value_groups: Vec<ElementId>,
    pub applied_property_values: Vec<ElementId>,
    pub property_value_groups: Vec<ElementId>,
    pub property_values: Vec<ElementId>,
    pub constraints: Vec<ElementId>,
}

impl Annotations {
    pub fn is_empty(&self) -> bool {
        self.applied_property_value_groups.is_empty()
            && self.applied_property_values.is_empty()
            && self.property_value_groups.is_empty()
            && self.property_values.is_empty()
            && self.constraints.is_empty()
    }
}

/// One node of the source model graph.
///
/// The graph is externally authored; an `Element` only records identity,
/// display fields and outbound relations as ids. Targets that are absent
/// from the containing [`ModelGraph`](super::graph::ModelGraph) are treated
/// as unresolved stubs, not errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub uuid: ElementId,
    pub name: String,
    pub description: String,
    pub layer: Option<Layer>,
    pub annotations: Annotations,
    pub kind: ElementKind,
}

impl Element {
    pub fn new(uuid: ElementId, name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            uuid,
            name: name.into(),
            description: String::new(),
            layer: None,
            annotations: Annotations::default(),
            kind,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = Some(layer);
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// The dispatch key used by extraction and rendering.
    pub fn type_tag(&self) -> &str {
        self.kind.type_tag()
    }
}

/// Structural relations of a structure-tree component (logical, system, or
/// physical behavior component).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentData {
    pub is_human: bool,
    pub components: Vec<ElementId>,
    pub allocated_functions: Vec<ElementId>,
    pub ports: Vec<ElementId>,
    pub state_machines: Vec<ElementId>,
}

/// Relations of a physical NODE component, which deploys behavior components
/// and exposes physical ports instead of component ports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeComponentData {
    pub is_human: bool,
    pub components: Vec<ElementId>,
    pub deployed_components: Vec<ElementId>,
    pub physical_ports: Vec<ElementId>,
}

/// A `PhysicalComponent` dispatches on its nature; NODE and BEHAVIOR carry
/// different relation sets and render through different templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhysicalComponentData {
    Node(NodeComponentData),
    Behavior(ComponentData),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityData {
    pub is_human: bool,
    pub is_actor: bool,
    pub entities: Vec<ElementId>,
    pub activities: Vec<ElementId>,
    pub state_machines: Vec<ElementId>,
}

/// Shared by the three function kinds and operational activities: owning
/// component (or entity), child functions, and typed input/output ports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionData {
    pub owner: Option<ElementId>,
    pub functions: Vec<ElementId>,
    pub inputs: Vec<ElementId>,
    pub outputs: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityData {
    pub includes: Vec<ElementId>,
    pub extends: Vec<ElementId>,
    pub involved_entities: Vec<ElementId>,
    pub involved_activities: Vec<ElementId>,
    pub involved_processes: Vec<ElementId>,
}

/// Functional chains and operational processes: a flat involvement list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvolvementData {
    pub involved: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionalExchangeData {
    pub source: Option<ElementId>,
    pub target: Option<ElementId>,
    pub exchange_items: Vec<ElementId>,
    pub involving_chains: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionData {
    pub source: Option<ElementId>,
    pub target: Option<ElementId>,
    pub exchange_items: Vec<ElementId>,
    pub involving_processes: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentExchangeData {
    pub source: Option<ElementId>,
    pub target: Option<ElementId>,
    pub exchange_items: Vec<ElementId>,
    pub allocated_functional_exchanges: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunicationMeanData {
    pub source: Option<ElementId>,
    pub target: Option<ElementId>,
    pub allocated_exchange_items: Vec<ElementId>,
    pub allocated_interactions: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhysicalLinkData {
    pub source: Option<ElementId>,
    pub target: Option<ElementId>,
    pub exchanges: Vec<ElementId>,
    pub physical_paths: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhysicalPathData {
    pub involved_items: Vec<ElementId>,
    pub exchanges: Vec<ElementId>,
}

/// Ports of all four kinds: the owning element plus the exchanges (or, for
/// physical ports, the physical links) attached to the port.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortData {
    pub owner: Option<ElementId>,
    pub exchanges: Vec<ElementId>,
}

/// A state-machine region. Regions are rendered inline and never promoted;
/// Capella does not expose them as addressable model elements here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub states: Vec<ElementId>,
    pub transitions: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateMachineData {
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateData {
    pub outgoing_transitions: Vec<ElementId>,
    pub incoming_transitions: Vec<ElementId>,
    pub do_activity: Vec<ElementId>,
    pub entries: Vec<ElementId>,
    pub exits: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PseudoStateData {
    pub outgoing_transitions: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionData {
    pub guard: Option<String>,
    pub source: Option<ElementId>,
    pub destination: Option<ElementId>,
    pub triggers: Vec<ElementId>,
    pub effects: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeItemData {
    pub elements: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeItemElementData {
    pub abstract_type: Option<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementData {
    pub long_name: String,
    pub prefix: String,
    pub chapter_name: String,
    pub requirement_type: Option<ElementId>,
    pub relations: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingRelationData {
    pub long_name: String,
    pub source: Option<ElementId>,
    pub target: Option<ElementId>,
    pub relation_type: Option<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramData {
    pub nodes: Vec<ElementId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartData {
    pub part_type: Option<ElementId>,
}

/// One traceability link from an external artifact to a model element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLink {
    pub kind: String,
    pub model_element: ElementId,
}

/// An external traceability artifact (e.g. a Polarion work item).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactData {
    pub url: String,
    pub identifier: String,
    pub links: Vec<ArtifactLink>,
}

/// The concrete kind of an element, one variant per known Capella type tag.
///
/// The tag set is closed; anything else lands in [`ElementKind::Unknown`],
/// which renders through the generic template and is never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    LogicalComponent(ComponentData),
    SystemComponent(ComponentData),
    PhysicalComponent(PhysicalComponentData),
    Entity(EntityData),
    LogicalFunction(FunctionData),
    SystemFunction(FunctionData),
    PhysicalFunction(FunctionData),
    OperationalActivity(FunctionData),
    OperationalCapability(CapabilityData),
    FunctionalChain(InvolvementData),
    OperationalProcess(InvolvementData),
    Interaction(InteractionData),
    FunctionalExchange(FunctionalExchangeData),
    ComponentExchange(ComponentExchangeData),
    CommunicationMean(CommunicationMeanData),
    PhysicalLink(PhysicalLinkData),
    PhysicalPath(PhysicalPathData),
    FunctionInputPort(PortData),
    FunctionOutputPort(PortData),
    ComponentPort(PortData),
    PhysicalPort(PortData),
    StateMachine(StateMachineData),
    State(StateData),
    InitialPseudoState(PseudoStateData),
    StateTransition(TransitionData),
    StringPropertyValue(String),
    FloatPropertyValue(f64),
    PropertyValueGroup,
    ExchangeItem(ExchangeItemData),
    ExchangeItemElement(ExchangeItemElementData),
    Requirement(RequirementData),
    OutgoingRelation(OutgoingRelationData),
    Diagram(DiagramData),
    Part(PartData),
    TraceArtifact(ArtifactData),
    Unknown { tag: SmolStr },
}

impl ElementKind {
    /// The Capella class name used as dispatch key and rendered as `type:`.
    pub fn type_tag(&self) -> &str {
        match self {
            Self::LogicalComponent(_) => "LogicalComponent",
            Self::SystemComponent(_) => "SystemComponent",
            Self::PhysicalComponent(_) => "PhysicalComponent",
            Self::Entity(_) => "Entity",
            Self::LogicalFunction(_) => "LogicalFunction",
            Self::SystemFunction(_) => "SystemFunction",
            Self::PhysicalFunction(_) => "PhysicalFunction",
            Self::OperationalActivity(_) => "OperationalActivity",
            Self::OperationalCapability(_) => "OperationalCapability",
            Self::FunctionalChain(_) => "FunctionalChain",
            Self::OperationalProcess(_) => "OperationalProcess",
            Self::Interaction(_) => "Interaction",
            Self::FunctionalExchange(_) => "FunctionalExchange",
            Self::ComponentExchange(_) => "ComponentExchange",
            Self::CommunicationMean(_) => "CommunicationMean",
            Self::PhysicalLink(_) => "PhysicalLink",
            Self::PhysicalPath(_) => "PhysicalPath",
            Self::FunctionInputPort(_) => "FunctionInputPort",
            Self::FunctionOutputPort(_) => "FunctionOutputPort",
            Self::ComponentPort(_) => "ComponentPort",
            Self::PhysicalPort(_) => "PhysicalPort",
            Self::StateMachine(_) => "StateMachine",
            Self::State(_) => "State",
            Self::InitialPseudoState(_) => "InitialPseudoState",
            Self::StateTransition(_) => "StateTransition",
            Self::StringPropertyValue(_) => "StringPropertyValue",
            Self::FloatPropertyValue(_) => "FloatPropertyValue",
            Self::PropertyValueGroup => "PropertyValueGroup",
            Self::ExchangeItem(_) => "ExchangeItem",
            Self::ExchangeItemElement(_) => "ExchangeItemElement",
            Self::Requirement(_) => "Requirement",
            Self::OutgoingRelation(_) => "CapellaOutgoingRelation",
            Self::Diagram(_) => "Diagram",
            Self::Part(_) => "Part",
            Self::TraceArtifact(_) => "Traceability_Artifact",
            Self::Unknown { tag } => tag.as_str(),
        }
    }
}
