// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

//! YAML export of Capella system-architecture models.
//!
//! The crate walks an in-memory model graph breadth-first from a set of
//! roots, renders one YAML fragment per visited element, and deduplicates
//! every mention by uuid. Elements referenced but not expanded appear as
//! `{name, uuid}` stubs. Optional extras: Teamcenter item/revision
//! cross-references parsed from the `.capella` file, extraction of inline
//! base64 images from descriptions, and traceability artifacts appended
//! when they link to an exported element.
//!
//! ```no_run
//! use capella_export::model::{Element, ElementId, ElementKind, ModelGraph};
//! use capella_export::store::{self, WriteDurability};
//! use capella_export::walk::Exporter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = ModelGraph::new();
//! let root = ElementId::new("2b1bbf4a")?;
//! graph.insert(Element::new(
//!     root.clone(),
//!     "System",
//!     ElementKind::LogicalComponent(Default::default()),
//! ));
//!
//! let export = Exporter::new(&graph).export(&[root])?;
//! store::write_export("out".as_ref(), &export, WriteDurability::BestEffort)?;
//! # Ok(())
//! # }
//! ```

pub mod extract;
pub mod model;
pub mod render;
pub mod sanitize;
pub mod store;
pub mod walk;
pub mod xref;

pub use model::{Element, ElementId, ElementKind, Layer, ModelGraph, RefStub};
pub use walk::{Export, ExportError, ExportOptions, Exporter, ReferencePolicy};
pub use xref::{TcItemRevision, TeamcenterIndex};
