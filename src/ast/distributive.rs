// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Boolean composition and flattening of associative operators

use super::node::Role;
use super::{Kwargs, Node, NodeKind};
use std::borrow::Borrow;
use std::ops::{Add, Sub};
use tracing::trace;

/// Whether a `parent` node may splice in the children of a `child` kind.
///
/// A hull of hulls (or of unions) is the hull of all their children, so
/// hull absorbs both; union and intersection only absorb themselves.
fn absorbs(parent: &NodeKind, child: &NodeKind) -> bool {
    match parent {
        NodeKind::Hull => matches!(child, NodeKind::Union | NodeKind::Hull),
        _ => parent == child,
    }
}

/// Single pass over a work stack. Children of an absorbable child that
/// still carries its default label are spliced in; labelled nodes stay
/// addressable and are kept whole. Kept nodes are not re-flattened.
pub(crate) fn flatten(kind: &NodeKind, children: Vec<Node>) -> Vec<Node> {
    let mut stack: Vec<Node> = children.into_iter().rev().collect();
    let mut flat = Vec::with_capacity(stack.len());
    while let Some(child) = stack.pop() {
        if absorbs(kind, child.kind()) && child.has_default_label() {
            trace!(parent = %kind, child = %child.kind(), "flattening nested operator");
            stack.extend(child.children().iter().rev().cloned());
        } else {
            flat.push(child);
        }
    }
    flat
}

fn distributive(kind: NodeKind, children: Vec<Node>, replay: bool) -> Node {
    let children = flatten(&kind, children);
    Node::with_role(
        kind,
        children,
        Vec::new(),
        Kwargs::new(),
        Role::Distributive { replay },
    )
}

/// Union of an original and its transformed copy
pub(crate) fn clone_union(original: Node, moved: Node) -> Node {
    distributive(NodeKind::Union, vec![original, moved], true)
}

fn collect<I>(first: Option<&Node>, rest: I) -> Vec<Node>
where
    I: IntoIterator,
    I::Item: Borrow<Node>,
{
    first
        .cloned()
        .into_iter()
        .chain(rest.into_iter().map(|n| n.borrow().clone()))
        .collect()
}

/// Union of any number of nodes
pub fn union<I>(nodes: I) -> Node
where
    I: IntoIterator,
    I::Item: Borrow<Node>,
{
    distributive(NodeKind::Union, collect(None, nodes), false)
}

pub fn intersection<I>(nodes: I) -> Node
where
    I: IntoIterator,
    I::Item: Borrow<Node>,
{
    distributive(NodeKind::Intersection, collect(None, nodes), false)
}

pub fn hull<I>(nodes: I) -> Node
where
    I: IntoIterator,
    I::Item: Borrow<Node>,
{
    distributive(NodeKind::Hull, collect(None, nodes), false)
}

/// `first` minus `second`
pub fn difference(first: &Node, second: &Node) -> Node {
    Node::operation(
        NodeKind::Difference,
        vec![first.clone(), second.clone()],
        Vec::new(),
        Kwargs::new(),
    )
}

impl Node {
    pub fn union<I>(&self, others: I) -> Node
    where
        I: IntoIterator,
        I::Item: Borrow<Node>,
    {
        distributive(NodeKind::Union, collect(Some(self), others), false)
    }

    pub fn intersection<I>(&self, others: I) -> Node
    where
        I: IntoIterator,
        I::Item: Borrow<Node>,
    {
        distributive(NodeKind::Intersection, collect(Some(self), others), false)
    }

    pub fn hull<I>(&self, others: I) -> Node
    where
        I: IntoIterator,
        I::Item: Borrow<Node>,
    {
        distributive(NodeKind::Hull, collect(Some(self), others), false)
    }

    pub fn difference(&self, other: &Node) -> Node {
        difference(self, other)
    }
}

impl Add for &Node {
    type Output = Node;

    fn add(self, rhs: &Node) -> Node {
        self.union([rhs])
    }
}

impl Add for Node {
    type Output = Node;

    fn add(self, rhs: Node) -> Node {
        self.union([rhs])
    }
}

impl Sub for &Node {
    type Output = Node;

    fn sub(self, rhs: &Node) -> Node {
        self.difference(rhs)
    }
}

impl Sub for Node {
    type Output = Node;

    fn sub(self, rhs: Node) -> Node {
        self.difference(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{cube, sphere};

    #[test]
    fn test_union_flattens_in_order() {
        let (a, b, c) = (cube(1, 1, 1), cube(2, 2, 2), cube(3, 3, 3));
        let nested = a.union([b.union([&c])]);
        assert_eq!(nested.children(), &[a, b, c]);
    }

    #[test]
    fn test_labelled_union_stays_nested() {
        let (a, b, c) = (cube(1, 1, 1), cube(2, 2, 2), cube(3, 3, 3));
        let named = b.union([&c]).label("pair");
        let nested = a.union([&named]);
        assert_eq!(nested.children().len(), 2);
        assert_eq!(nested.children()[1].label_name(), Some("pair"));
    }

    #[test]
    fn test_hull_absorbs_union_but_not_reverse() {
        let (a, b) = (sphere(1), sphere(2));
        let h = hull([union([&a, &b])]);
        assert_eq!(h.children(), &[a.clone(), b.clone()]);

        let u = union([hull([&a, &b])]);
        assert_eq!(u.children().len(), 1);
        assert_eq!(u.children()[0].kind(), &NodeKind::Hull);
    }

    #[test]
    fn test_intersection_ignores_union_children() {
        let (a, b) = (sphere(1), sphere(2));
        let i = a.intersection([union([&a, &b])]);
        assert_eq!(i.children().len(), 2);
        assert_eq!(i.children()[1].kind(), &NodeKind::Union);
    }

    #[test]
    fn test_flattening_is_single_pass() {
        // children of a kept (labelled) node are not touched
        let inner = union([sphere(1), sphere(2)]);
        let kept = union([inner.clone(), sphere(3).label("x")]).label("kept");
        let top = union([&kept]);
        assert_eq!(top.children(), &[kept]);
    }

    #[test]
    fn test_operators() {
        let (a, b) = (cube(1, 1, 1), sphere(1));
        let joined = &a + &b;
        assert_eq!(joined.kind(), &NodeKind::Union);
        let cut = &a - &b;
        assert_eq!(cut.kind(), &NodeKind::Difference);
        assert_eq!(cut.children(), &[a, b]);
    }
}
