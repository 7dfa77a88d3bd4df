// SPDX-FileCopyrightText: © Siemens AG
// SPDX-License-Identifier: Apache-2.0

//! Pure YAML rendering of records. No I/O and no shared state: the same
//! record always renders to the same fragment.

use crate::extract::{Block, Entry, Record};
use crate::xref::TcItemRevision;
use std::fmt::Write as _;

/// Document head shared by every export. Fragments are appended under
/// `objects:`.
pub const PREAMBLE: &str = "---\n\
# YAML file for system model relationships\n\
model:\n\
  schema: capella\n\
objects:\n";

/// Renders one record to its YAML fragment. The fragment is a single list
/// item under `objects:`; the optional Teamcenter item adds a `teamcenter`
/// mapping to the header.
pub fn fragment(record: &Record, teamcenter: Option<&TcItemRevision>) -> String {
    let mut out = String::new();
    line(&mut out, 1, &format!("- name: {}", scalar(&record.name)));
    line(&mut out, 2, &format!("type: {}", scalar(&record.tag)));
    line(&mut out, 2, &format!("uuid: {}", record.uuid));
    if let Some(description) = &record.description {
        line(
            &mut out,
            2,
            &format!("description: {}", quoted(description)),
        );
    }
    for (key, value) in &record.scalars {
        line(&mut out, 2, &format!("{key}: {}", scalar(value)));
    }
    if let Some(item) = teamcenter {
        line(&mut out, 2, "teamcenter:");
        // item ids can carry leading zeros, so they are always quoted
        line(&mut out, 3, &format!("item_id: {}", quoted(&item.item_id)));
        line(
            &mut out,
            3,
            &format!("revision_id: {}", scalar(&item.revision_id)),
        );
        line(&mut out, 3, &format!("url: {}", scalar(&item.url)));
    }
    for (label, stub) in &record.refs {
        line(&mut out, 2, &format!("{label}:"));
        line(&mut out, 3, &format!("name: {}", scalar(&stub.display_name())));
        line(&mut out, 3, &format!("uuid: {}", stub.uuid));
    }
    for block in &record.blocks {
        render_block(&mut out, 2, block);
    }
    out
}

fn render_block(out: &mut String, depth: usize, block: &Block) {
    line(out, depth, &format!("{}:", block.label));
    for entry in &block.entries {
        render_entry(out, depth + 1, entry);
    }
}

fn render_entry(out: &mut String, depth: usize, entry: &Entry) {
    line(out, depth, &format!("- name: {}", scalar(&entry.name)));
    if let Some(uuid) = &entry.uuid {
        line(out, depth + 1, &format!("uuid: {uuid}"));
    }
    for (key, value) in &entry.scalars {
        line(out, depth + 1, &format!("{key}: {}", scalar(value)));
    }
    for (label, stub) in &entry.refs {
        line(out, depth + 1, &format!("{label}:"));
        line(
            out,
            depth + 2,
            &format!("name: {}", scalar(&stub.display_name())),
        );
        line(out, depth + 2, &format!("uuid: {}", stub.uuid));
    }
    for block in &entry.blocks {
        render_block(out, depth + 1, block);
    }
}

fn line(out: &mut String, depth: usize, content: &str) {
    let _ = writeln!(out, "{:indent$}{content}", "", indent = depth * 2);
}

/// Plain scalars stay unquoted unless YAML would misread them.
fn scalar(value: &str) -> String {
    let needs_quoting = value.is_empty()
        || value.contains(|c: char| c == ':' || c == '#' || c == '"' || c == '\n')
        || value.starts_with(|c: char| {
            c.is_whitespace() || matches!(c, '-' | '?' | '&' | '*' | '!' | '|' | '>' | '%' | '@' | '[' | ']' | '{' | '}' | ',')
        })
        || value.ends_with(char::is_whitespace);
    if needs_quoting {
        quoted(value)
    } else {
        value.to_owned()
    }
}

/// Double-quoted scalar. Newlines collapse to spaces so descriptions stay on
/// one line.
fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' | '\r' => out.push(' '),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
