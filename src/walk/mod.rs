// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

//! The export walk: breadth-first over the model graph from a set of roots,
//! one fragment per visited element, every mention deduplicated by uuid.

use crate::extract::{record_for, Promotion, Record};
use crate::model::element::ElementKind;
use crate::model::graph::{ModelGraph, RefStub};
use crate::model::ids::ElementId;
use crate::model::Layer;
use crate::render;
use crate::sanitize::{ImageSanitizer, SanitizeError};
use crate::xref::TeamcenterIndex;
use smol_str::SmolStr;
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;

/// Which discovered references join the walk as fragments of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferencePolicy {
    /// Only the requested roots are exported.
    RootsOnly,
    /// Roots plus their structural children, transitively.
    #[default]
    Children,
    /// Every mentioned element that exists in the graph.
    All,
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub policy: ReferencePolicy,
    /// Directory for images extracted from descriptions.
    pub image_dir: PathBuf,
    /// Append traceability artifacts that link to an exported element.
    pub include_linked_artifacts: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            policy: ReferencePolicy::default(),
            image_dir: PathBuf::from("capella_yaml_images"),
            include_linked_artifacts: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotInModel,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotInModel => f.write_str("not in model"),
        }
    }
}

/// A requested root that could not be exported.
#[derive(Debug, Clone)]
pub struct SkippedElement {
    pub uuid: ElementId,
    pub reason: SkipReason,
}

/// One rendered element.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub uuid: ElementId,
    pub tag: SmolStr,
    pub name: String,
    pub yaml: String,
}

/// The result of one walk: fragments in emission order, plus everything that
/// was mentioned without getting a fragment of its own.
#[derive(Debug, Default)]
pub struct Export {
    pub fragments: Vec<Fragment>,
    pub referenced: Vec<RefStub>,
    pub skipped: Vec<SkippedElement>,
    pub images_written: usize,
}

impl Export {
    /// The complete YAML document.
    pub fn yaml(&self) -> String {
        let mut out = String::from(render::PREAMBLE);
        for fragment in &self.fragments {
            out.push_str(&fragment.yaml);
        }
        out
    }
}

#[derive(Debug)]
pub enum ExportError {
    Sanitize(SanitizeError),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Sanitize(_) => f.write_str("failed to extract description images"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Sanitize(source) => Some(source),
        }
    }
}

impl From<SanitizeError> for ExportError {
    fn from(source: SanitizeError) -> Self {
        ExportError::Sanitize(source)
    }
}

/// Walks a model graph and renders fragments.
///
/// The exporter borrows the graph and never mutates it; all walk state lives
/// inside a single [`Exporter::export`] call, so one exporter can serve any
/// number of exports.
pub struct Exporter<'a> {
    graph: &'a ModelGraph,
    teamcenter: Option<&'a TeamcenterIndex>,
    options: ExportOptions,
}

impl<'a> Exporter<'a> {
    pub fn new(graph: &'a ModelGraph) -> Self {
        Exporter {
            graph,
            teamcenter: None,
            options: ExportOptions::default(),
        }
    }

    pub fn with_teamcenter(mut self, index: &'a TeamcenterIndex) -> Self {
        self.teamcenter = Some(index);
        self
    }

    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Exports the whole model: every layer root in OA, SA, LA, PA order.
    pub fn export_model(&self) -> Result<Export, ExportError> {
        let mut roots = Vec::new();
        for layer in [
            Layer::Operational,
            Layer::System,
            Layer::Logical,
            Layer::Physical,
        ] {
            roots.extend(self.graph.layer_ids(layer));
        }
        self.export(&roots)
    }

    /// Exports the given roots and, per policy, what they reach.
    pub fn export(&self, roots: &[ElementId]) -> Result<Export, ExportError> {
        let mut walk = Walk {
            exporter: self,
            queue: VecDeque::new(),
            enqueued: HashSet::new(),
            visited: HashSet::new(),
            mentioned: Vec::new(),
            sanitizer: None,
            export: Export::default(),
        };

        for root in roots {
            if self.graph.contains(root) {
                walk.enqueue(root);
            } else {
                tracing::warn!(uuid = %root, "requested root is not in the model");
                walk.export.skipped.push(SkippedElement {
                    uuid: root.clone(),
                    reason: SkipReason::NotInModel,
                });
            }
        }

        walk.drain()?;
        if self.options.include_linked_artifacts {
            walk.promote_linked_artifacts()?;
        }
        Ok(walk.finish())
    }
}

/// State of one export call.
struct Walk<'a, 'g> {
    exporter: &'a Exporter<'g>,
    queue: VecDeque<ElementId>,
    /// The single admission gate: an id enters the queue at most once.
    enqueued: HashSet<ElementId>,
    visited: HashSet<ElementId>,
    /// Mentioned ids in discovery order, possibly repeated.
    mentioned: Vec<ElementId>,
    sanitizer: Option<ImageSanitizer>,
    export: Export,
}

impl Walk<'_, '_> {
    fn enqueue(&mut self, id: &ElementId) {
        if self.enqueued.insert(id.clone()) {
            self.queue.push_back(id.clone());
        }
    }

    fn drain(&mut self) -> Result<(), ExportError> {
        while let Some(id) = self.queue.pop_front() {
            self.emit(&id)?;
        }
        Ok(())
    }

    fn emit(&mut self, id: &ElementId) -> Result<(), ExportError> {
        let first_visit = self.visited.insert(id.clone());
        debug_assert!(first_visit, "element visited twice");

        let Some(element) = self.exporter.graph.get(id) else {
            // admission checks graph membership, so this cannot happen
            return Ok(());
        };
        let mut record = record_for(self.exporter.graph, element);
        self.scrub_description(&mut record)?;

        let teamcenter = self
            .exporter
            .teamcenter
            .and_then(|index| index.get(id.as_ref()));
        let yaml = render::fragment(&record, teamcenter);
        tracing::debug!(uuid = %id, tag = %record.tag, "rendered fragment");

        for (mention, promote) in record.discovered() {
            let admit = match self.exporter.options.policy {
                ReferencePolicy::RootsOnly => false,
                ReferencePolicy::Children => promote == Promotion::Expand,
                ReferencePolicy::All => true,
            };
            if admit && self.exporter.graph.contains(mention) {
                self.enqueue(mention);
            } else {
                self.mentioned.push(mention.clone());
            }
        }

        self.export.fragments.push(Fragment {
            uuid: id.clone(),
            tag: record.tag.clone(),
            name: record.name.clone(),
            yaml,
        });
        Ok(())
    }

    /// Runs descriptions with embedded images through the sanitizer. The
    /// sanitizer (and its directory) only comes into being when an export
    /// actually meets an inline image.
    fn scrub_description(&mut self, record: &mut Record) -> Result<(), ExportError> {
        let Some(description) = &record.description else {
            return Ok(());
        };
        if !description.contains("data:image/") {
            return Ok(());
        }
        if self.sanitizer.is_none() {
            self.sanitizer = Some(ImageSanitizer::new(&self.exporter.options.image_dir)?);
        }
        if let Some(sanitizer) = &mut self.sanitizer {
            record.description = Some(sanitizer.sanitize(description)?);
        }
        Ok(())
    }

    /// Appends traceability artifacts whose links point at an element the
    /// walk touched, rendered or referenced-only alike. Runs after the main
    /// drain so the walk decides what counts as touched before artifacts
    /// are considered.
    fn promote_linked_artifacts(&mut self) -> Result<(), ExportError> {
        let linked: Vec<ElementId> = {
            let mut touched: HashSet<&ElementId> = self.visited.iter().collect();
            touched.extend(self.mentioned.iter());
            self.exporter
                .graph
                .artifact_ids()
                .into_iter()
                .filter(|id| !self.enqueued.contains(id))
                .filter(|id| {
                    self.exporter.graph.get(id).is_some_and(|artifact| {
                        match &artifact.kind {
                            ElementKind::TraceArtifact(data) => data
                                .links
                                .iter()
                                .any(|link| touched.contains(&link.model_element)),
                            _ => false,
                        }
                    })
                })
                .collect()
        };

        for id in linked {
            self.enqueue(&id);
        }
        self.drain()
    }

    fn finish(mut self) -> Export {
        let mut seen = HashSet::new();
        for id in self.mentioned {
            if !self.enqueued.contains(&id) && seen.insert(id.clone()) {
                self.export.referenced.push(self.exporter.graph.stub(&id));
            }
        }
        if let Some(sanitizer) = &self.sanitizer {
            self.export.images_written = sanitizer.images_written();
        }
        self.export
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    #[test]
    fn children_policy_exports_root_and_subcomponents_once() {
        let (graph, root) = fixtures::logical_assembly();
        let export = Exporter::new(&graph).export(&[root.clone(), root]).unwrap();

        let uuids: Vec<&str> = export
            .fragments
            .iter()
            .map(|f| f.uuid.as_ref())
            .collect();
        assert_eq!(uuids, ["root", "sub-a", "sub-b"]);
        // ports and exchanges stay stubs
        assert!(export.referenced.iter().any(|s| s.uuid.as_ref() == "p-root"));
        assert!(export.referenced.iter().any(|s| s.uuid.as_ref() == "ex-1"));
    }

    #[test]
    fn all_policy_pulls_in_every_mentioned_element() {
        let (graph, root) = fixtures::logical_assembly();
        let options = ExportOptions {
            policy: ReferencePolicy::All,
            ..ExportOptions::default()
        };
        let export = Exporter::new(&graph)
            .with_options(options)
            .export(&[root])
            .unwrap();

        assert_eq!(export.fragments.len(), graph.len());
        assert!(export.referenced.is_empty());
    }

    #[test]
    fn roots_only_policy_emits_exactly_the_roots() {
        let (graph, root) = fixtures::logical_assembly();
        let options = ExportOptions {
            policy: ReferencePolicy::RootsOnly,
            ..ExportOptions::default()
        };
        let export = Exporter::new(&graph)
            .with_options(options)
            .export(&[root])
            .unwrap();
        assert_eq!(export.fragments.len(), 1);
    }

    #[test]
    fn self_reference_renders_a_single_fragment() {
        let (graph, root) = fixtures::self_referential_component();
        let export = Exporter::new(&graph).export(&[root]).unwrap();
        assert_eq!(export.fragments.len(), 1);
    }

    #[test]
    fn unknown_root_is_skipped_and_reported() {
        let (graph, _) = fixtures::logical_assembly();
        let ghost = fixtures::eid("ghost");
        let export = Exporter::new(&graph).export(&[ghost]).unwrap();

        assert!(export.fragments.is_empty());
        assert_eq!(export.skipped.len(), 1);
        assert_eq!(export.skipped[0].reason, SkipReason::NotInModel);
    }

    #[test]
    fn unresolved_mention_lands_in_referenced_without_a_name() {
        let (graph, id) = fixtures::unknown_element();
        let export = Exporter::new(&graph).export(&[id]).unwrap();

        let stub = export
            .referenced
            .iter()
            .find(|s| s.uuid.as_ref() == "ghost-constraint")
            .expect("unresolved constraint stub");
        assert!(stub.name.is_none());
    }

    #[test]
    fn artifacts_linked_to_rendered_or_referenced_elements_are_appended() {
        let (graph, root) = fixtures::traced_assembly();
        let export = Exporter::new(&graph).export(&[root]).unwrap();

        let uuids: Vec<&str> = export
            .fragments
            .iter()
            .map(|f| f.uuid.as_ref())
            .collect();
        // structural fragments first, then the artifact pass; the artifact
        // linked to the port counts because the port was referenced
        assert_eq!(uuids, ["root", "sub-a", "sub-b", "art-root", "art-port"]);
        assert!(!uuids.contains(&"art-other"));
    }

    #[test]
    fn artifact_promotion_can_be_disabled() {
        let (graph, root) = fixtures::traced_assembly();
        let options = ExportOptions {
            include_linked_artifacts: false,
            ..ExportOptions::default()
        };
        let export = Exporter::new(&graph)
            .with_options(options)
            .export(&[root])
            .unwrap();

        assert!(export
            .fragments
            .iter()
            .all(|f| f.tag != "Traceability_Artifact"));
        assert_eq!(export.fragments.len(), 3);
    }

    #[test]
    fn document_starts_with_the_preamble() {
        let (graph, root) = fixtures::logical_assembly();
        let export = Exporter::new(&graph).export(&[root]).unwrap();
        assert!(export.yaml().starts_with("---\n"));
        assert!(export.yaml().contains("objects:\n  - name: Root\n"));
    }
}
