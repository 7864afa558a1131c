// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Script text emission for node trees

use super::format::write_arguments;
use crate::ast::Node;
use crate::error::Result;
use std::sync::Arc;
use tracing::debug;

/// Counters for one serializer run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SerializerStats {
    /// Nodes whose text was built during this run
    pub emitted: usize,
    /// Nodes whose text was already cached on the node
    pub reused: usize,
}

/// Single-walk serializer.
///
/// The text of every node is cached on the node itself, so a subtree that
/// is shared between several parents (or serialized again later) is built
/// once. The output is always the full expansion. The walk recurses once
/// per tree level.
#[derive(Debug, Default)]
pub struct Serializer {
    stats: SerializerStats,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> SerializerStats {
        self.stats
    }

    /// Script text for `node` and its subtree
    pub fn serialize(&mut self, node: &Node) -> Result<Arc<str>> {
        let text = self.emit(node);
        debug!(
            emitted = self.stats.emitted,
            reused = self.stats.reused,
            "serialized tree"
        );
        text
    }

    fn emit(&mut self, node: &Node) -> Result<Arc<str>> {
        let cell = node.script_cell();
        if let Some(cached) = cell.get() {
            self.stats.reused += 1;
            return cached.clone();
        }
        let text = self.build(node);
        cell.get_or_init(|| text).clone()
    }

    fn build(&mut self, node: &Node) -> Result<Arc<str>> {
        let mut out = String::new();
        match node.kind().glyph() {
            Some(glyph) => out.push(glyph),
            None => {
                out.push_str(node.name());
                out.push('(');
                write_arguments(&mut out, node.args(), node.kwargs())?;
                out.push(')');
            }
        }
        match node.children() {
            [] => out.push(';'),
            [only] => out.push_str(&self.emit(only)?),
            children => {
                out.push('{');
                for child in children {
                    out.push_str(&self.emit(child)?);
                }
                out.push('}');
            }
        }
        self.stats.emitted += 1;
        Ok(out.into())
    }
}
