// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

//! Teamcenter cross-references.
//!
//! Capella projects synchronized with Teamcenter carry `smw:TcItemRevision`
//! extension elements inside the `.capella` file. This module parses them
//! into an index keyed by the uuid of the owning model element, so fragments
//! can show the item/revision pair and a deep link into Teamcenter.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const EXTENSION_TAG: &[u8] = b"ownedExtensions";
const EXTENSION_TYPE: &str = "smw:TcItemRevision";

/// One synchronized Teamcenter item revision, keyed by the uuid of the
/// Capella element it annotates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TcItemRevision {
    /// Uuid of the owning Capella element.
    pub id: String,
    pub tcuid: String,
    pub stable_tc_id: String,
    pub item_id: String,
    pub revision_id: String,
    /// Deep link into the Teamcenter active workspace.
    pub url: String,
}

#[derive(Debug)]
pub enum XrefError {
    Read { path: PathBuf, source: io::Error },
    MissingCapellaFile { path: PathBuf },
    Xml { source: quick_xml::Error },
}

impl std::fmt::Display for XrefError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            XrefError::Read { path, .. } => {
                write!(f, "failed to read {}", path.display())
            }
            XrefError::MissingCapellaFile { path } => {
                write!(f, "no .capella file next to {}", path.display())
            }
            XrefError::Xml { .. } => write!(f, "malformed model XML"),
        }
    }
}

impl std::error::Error for XrefError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            XrefError::Read { source, .. } => Some(source),
            XrefError::MissingCapellaFile { .. } => None,
            XrefError::Xml { source } => Some(source),
        }
    }
}

/// Lookup table of Teamcenter item revisions by owning element uuid.
#[derive(Debug, Default)]
pub struct TeamcenterIndex {
    items: HashMap<String, TcItemRevision>,
}

impl TeamcenterIndex {
    /// Parses the given `.capella` file. `base_url` is the Teamcenter active
    /// workspace root, e.g. `https://tc.example.com/awc`.
    pub fn from_capella_file(path: &Path, base_url: &str) -> Result<Self, XrefError> {
        let xml = fs::read_to_string(path).map_err(|source| XrefError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_xml(&xml, base_url)
    }

    /// Resolves the `.capella` file sitting next to an `.aird` file, the
    /// layout every Capella project uses.
    pub fn from_aird_sibling(aird: &Path, base_url: &str) -> Result<Self, XrefError> {
        let capella = aird.with_extension("capella");
        if !capella.is_file() {
            return Err(XrefError::MissingCapellaFile {
                path: aird.to_path_buf(),
            });
        }
        Self::from_capella_file(&capella, base_url)
    }

    pub fn from_xml(xml: &str, base_url: &str) -> Result<Self, XrefError> {
        let mut reader = Reader::from_str(xml);
        let mut items = HashMap::new();
        // ids of all open elements, innermost last
        let mut id_stack: Vec<Option<String>> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    record_extension(e, &id_stack, base_url, &mut items);
                    id_stack.push(attr_value(e, "id"));
                }
                Ok(Event::Empty(ref e)) => {
                    record_extension(e, &id_stack, base_url, &mut items);
                }
                Ok(Event::End(_)) => {
                    id_stack.pop();
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(source) => return Err(XrefError::Xml { source }),
            }
        }

        Ok(TeamcenterIndex { items })
    }

    pub fn get(&self, uuid: &str) -> Option<&TcItemRevision> {
        self.items.get(uuid)
    }

    /// Uuid of the element synchronized with the given item/revision pair.
    pub fn find_uuid_by_item_revision(&self, item_id: &str, revision_id: &str) -> Option<&str> {
        self.items
            .values()
            .find(|item| item.item_id == item_id && item.revision_id == revision_id)
            .map(|item| item.id.as_str())
    }

    /// Same lookup from a combined `item/revision` string such as `096065/A`.
    pub fn find_uuid_by_item_revision_str(&self, combined: &str) -> Option<&str> {
        let (item_id, revision_id) = combined.split_once('/')?;
        self.find_uuid_by_item_revision(item_id.trim(), revision_id.trim())
    }

    pub fn items(&self) -> impl Iterator<Item = &TcItemRevision> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn attr_value(e: &BytesStart<'_>, wanted: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == wanted.as_bytes() {
            return Some(String::from_utf8_lossy(&attr.value).into_owned());
        }
    }
    None
}

fn record_extension(
    e: &BytesStart<'_>,
    id_stack: &[Option<String>],
    base_url: &str,
    items: &mut HashMap<String, TcItemRevision>,
) {
    if e.name().as_ref() != EXTENSION_TAG {
        return;
    }
    if attr_value(e, "xsi:type").as_deref() != Some(EXTENSION_TYPE) {
        return;
    }
    let Some(owner) = id_stack.iter().rev().find_map(|id| id.clone()) else {
        tracing::warn!("TcItemRevision extension without an owning element id");
        return;
    };
    let tcuid = attr_value(e, "tcuid").unwrap_or_default();
    let item = TcItemRevision {
        url: teamcenter_url(base_url, &tcuid),
        id: owner.clone(),
        tcuid,
        stable_tc_id: attr_value(e, "stableTcId").unwrap_or_default(),
        item_id: attr_value(e, "itemId").unwrap_or_default(),
        revision_id: attr_value(e, "revisionId").unwrap_or_default(),
    };
    items.insert(owner, item);
}

fn teamcenter_url(base_url: &str, tcuid: &str) -> String {
    format!(
        "{}/#/com.siemens.splm.clientfx.tcui.xrt.showObject?uid={tcuid}",
        base_url.trim_end_matches('/')
    )
}
