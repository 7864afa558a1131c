// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Label lookup and tree walks

use super::{Node, Value};
use crate::error::{Error, Result};
use tracing::debug;

impl Node {
    /// First node in the subtree (this node included) carrying `label`.
    ///
    /// The walk uses an explicit stack and visits later children first, so
    /// among several matches the one reached through the last child wins.
    pub fn find_by_label(&self, label: &str) -> Result<Node> {
        let mut stack = vec![self.clone()];
        let mut visited = 0usize;
        while let Some(node) = stack.pop() {
            visited += 1;
            if node.label_name() == Some(label) {
                debug!(label, visited, kind = %node.kind(), "label found");
                return Ok(node);
            }
            stack.extend(node.children().iter().cloned());
        }
        debug!(label, visited, "label not found");
        Err(Error::LabelNotFound {
            label: label.to_owned(),
        })
    }

    /// Post-order walk that visits deeper subtrees before shallower ones.
    /// Each node appears after all of its descendants; the root is last.
    pub fn traverse_deepest_first(&self) -> Vec<Node> {
        let mut out = Vec::new();
        // (node, children already pushed)
        let mut stack = vec![(self.clone(), false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                out.push(node);
                continue;
            }
            let mut children: Vec<Node> = node.children().to_vec();
            // stable: equal depths keep their written order
            children.sort_by_key(|child| std::cmp::Reverse(child.depth()));
            stack.push((node, true));
            stack.extend(children.into_iter().rev().map(|child| (child, false)));
        }
        out
    }

    /// Named argument of this node, or of the node it wraps.
    ///
    /// Descends through single-child wrappers (transforms, colors, labels)
    /// and stops at the first node that has `key` or branches.
    pub fn lookup_arg(&self, key: &str) -> Option<&Value> {
        let mut node = self;
        loop {
            if let Some(value) = node.kwarg(key) {
                return Some(value);
            }
            match node.children() {
                [only] => node = only,
                _ => return None,
            }
        }
    }
}
