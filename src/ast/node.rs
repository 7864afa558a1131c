// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! AST Node definitions

use super::Value;
use crate::error::Result;
use crate::geometry::{providers, BoundingBox, Geometry, Vector};
use crate::io::Serializer;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Named arguments, kept in lexicographic key order
pub type Kwargs = BTreeMap<String, Value>;

/// Collect `(key, value)` pairs into [`Kwargs`]
pub fn kwargs<I, K, V>(pairs: I) -> Kwargs
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Types of AST nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Primitives
    Cube,
    Cylinder,
    Sphere,
    Polyhedron,
    Import,
    Circle,
    Square,
    Polygon,
    Text,

    // Transformations
    Translate,
    Rotate,
    Scale,
    Mirror,

    // Boolean operations
    Union,
    Difference,
    Intersection,
    Hull,

    // Dimension changes
    LinearExtrude,
    RotateExtrude,
    Offset,
    Projection,

    // Wrappers
    Color,
    Render,
    If,

    // Modifier glyphs
    Debug,
    Root,
    Disable,
    Background,

    /// Any engine module not modelled above
    Raw(String),
}

impl NodeKind {
    /// Module name as written in the script
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Cube => "cube",
            NodeKind::Cylinder => "cylinder",
            NodeKind::Sphere => "sphere",
            NodeKind::Polyhedron => "polyhedron",
            NodeKind::Import => "import",
            NodeKind::Circle => "circle",
            NodeKind::Square => "square",
            NodeKind::Polygon => "polygon",
            NodeKind::Text => "text",
            NodeKind::Translate => "translate",
            NodeKind::Rotate => "rotate",
            NodeKind::Scale => "scale",
            NodeKind::Mirror => "mirror",
            NodeKind::Union => "union",
            NodeKind::Difference => "difference",
            NodeKind::Intersection => "intersection",
            NodeKind::Hull => "hull",
            NodeKind::LinearExtrude => "linear_extrude",
            NodeKind::RotateExtrude => "rotate_extrude",
            NodeKind::Offset => "offset",
            NodeKind::Projection => "projection",
            NodeKind::Color => "color",
            NodeKind::Render => "render",
            NodeKind::If => "if",
            NodeKind::Debug => "#",
            NodeKind::Root => "!",
            NodeKind::Disable => "*",
            NodeKind::Background => "%",
            NodeKind::Raw(name) => name,
        }
    }

    /// Map a module name back to its kind; unknown names become [`NodeKind::Raw`]
    pub fn from_name(name: &str) -> Self {
        match name {
            "cube" => NodeKind::Cube,
            "cylinder" => NodeKind::Cylinder,
            "sphere" => NodeKind::Sphere,
            "polyhedron" => NodeKind::Polyhedron,
            "import" => NodeKind::Import,
            "circle" => NodeKind::Circle,
            "square" => NodeKind::Square,
            "polygon" => NodeKind::Polygon,
            "text" => NodeKind::Text,
            "translate" => NodeKind::Translate,
            "rotate" => NodeKind::Rotate,
            "scale" => NodeKind::Scale,
            "mirror" => NodeKind::Mirror,
            "union" => NodeKind::Union,
            "difference" => NodeKind::Difference,
            "intersection" => NodeKind::Intersection,
            "hull" => NodeKind::Hull,
            "linear_extrude" => NodeKind::LinearExtrude,
            "rotate_extrude" => NodeKind::RotateExtrude,
            "offset" => NodeKind::Offset,
            "projection" => NodeKind::Projection,
            "color" => NodeKind::Color,
            "render" => NodeKind::Render,
            "if" => NodeKind::If,
            "#" => NodeKind::Debug,
            "!" => NodeKind::Root,
            "*" => NodeKind::Disable,
            "%" => NodeKind::Background,
            other => NodeKind::Raw(other.to_owned()),
        }
    }

    /// Prefix glyph for the four modifier kinds
    pub fn glyph(&self) -> Option<char> {
        match self {
            NodeKind::Debug => Some('#'),
            NodeKind::Root => Some('!'),
            NodeKind::Disable => Some('*'),
            NodeKind::Background => Some('%'),
            _ => None,
        }
    }

    pub fn is_extrusion(&self) -> bool {
        matches!(self, NodeKind::LinearExtrude | NodeKind::RotateExtrude)
    }

    /// Leaf kinds that only exist in the XY plane
    pub fn is_planar_primitive(&self) -> bool {
        matches!(
            self,
            NodeKind::Circle | NodeKind::Square | NodeKind::Polygon | NodeKind::Text
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Composition rules a node was built under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Plain,
    /// Single-child spatial transform; replayed by `same_moves`
    Transformation,
    /// Flattening associative operator. `replay` marks the union produced by
    /// a clone transform, which `same_moves` walks through.
    Distributive { replay: bool },
}

#[derive(Default)]
struct Lazy {
    script: OnceLock<Result<Arc<str>>>,
    identity: OnceLock<Result<String>>,
    geometry: OnceLock<Result<Geometry>>,
    depth: OnceLock<usize>,
    is_2d: OnceLock<bool>,
}

struct NodeData {
    kind: NodeKind,
    children: Vec<Node>,
    args: Vec<Value>,
    kwargs: Kwargs,
    label: Option<String>,
    role: Role,
    lazy: Lazy,
}

impl Drop for NodeData {
    // unlink uniquely owned descendants one at a time
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(node) = stack.pop() {
            if let Some(mut data) = Arc::into_inner(node.data) {
                stack.append(&mut data.children);
            }
        }
    }
}

/// Immutable tree element: a primitive or an operation over child nodes.
///
/// Cloning a `Node` shares the underlying subtree. Nothing is mutated after
/// construction; every builder method returns a new node.
///
/// Building, dropping, [`Node::depth`] and label lookups handle trees of any
/// depth. Geometry, `is_2d`, equality and serialization recurse once per
/// level, so trees nested more than a few thousand levels deep can exhaust
/// a default thread stack there.
#[derive(Clone)]
pub struct Node {
    data: Arc<NodeData>,
}

impl Node {
    pub(crate) fn assemble(
        kind: NodeKind,
        children: Vec<Node>,
        args: Vec<Value>,
        kwargs: Kwargs,
        label: Option<String>,
        role: Role,
    ) -> Self {
        Self {
            data: Arc::new(NodeData {
                kind,
                children,
                args,
                kwargs,
                label,
                role,
                lazy: Lazy::default(),
            }),
        }
    }

    /// Default label: the module name, except for modifier glyphs
    fn default_label(kind: &NodeKind) -> Option<String> {
        match kind.glyph() {
            Some(_) => None,
            None => Some(kind.name().to_owned()),
        }
    }

    pub(crate) fn with_role(
        kind: NodeKind,
        children: Vec<Node>,
        args: Vec<Value>,
        kwargs: Kwargs,
        role: Role,
    ) -> Self {
        let label = Self::default_label(&kind);
        Self::assemble(kind, children, args, kwargs, label, role)
    }

    /// Build a node of any kind with no special composition rules.
    pub fn operation(kind: NodeKind, children: Vec<Node>, args: Vec<Value>, kwargs: Kwargs) -> Self {
        Self::with_role(kind, children, args, kwargs, Role::Plain)
    }

    /// Escape hatch for engine modules without a typed constructor.
    pub fn raw(name: &str, children: Vec<Node>, args: Vec<Value>, kwargs: Kwargs) -> Self {
        Self::operation(NodeKind::from_name(name), children, args, kwargs)
    }

    /// Same node with new children
    pub(crate) fn with_children(&self, children: Vec<Node>) -> Self {
        Self::assemble(
            self.data.kind.clone(),
            children,
            self.data.args.clone(),
            self.data.kwargs.clone(),
            self.data.label.clone(),
            self.data.role,
        )
    }

    pub fn kind(&self) -> &NodeKind {
        &self.data.kind
    }

    pub fn name(&self) -> &str {
        self.data.kind.name()
    }

    pub fn children(&self) -> &[Node] {
        &self.data.children
    }

    pub fn args(&self) -> &[Value] {
        &self.data.args
    }

    pub fn kwargs(&self) -> &Kwargs {
        &self.data.kwargs
    }

    /// Named argument of this node
    pub fn kwarg(&self, key: &str) -> Option<&Value> {
        self.data.kwargs.get(key)
    }

    pub fn label_name(&self) -> Option<&str> {
        self.data.label.as_deref()
    }

    /// True while the label is still the module name
    pub fn has_default_label(&self) -> bool {
        match &self.data.label {
            Some(label) => label == self.name(),
            None => true,
        }
    }

    pub(crate) fn role(&self) -> Role {
        self.data.role
    }

    pub fn is_transformation(&self) -> bool {
        self.data.role == Role::Transformation
    }

    pub fn is_distributive(&self) -> bool {
        matches!(self.data.role, Role::Distributive { .. })
    }

    /// Whether both handles point at the same shared node
    pub fn ptr_eq(a: &Node, b: &Node) -> bool {
        Arc::ptr_eq(&a.data, &b.data)
    }

    /// Structurally identical node carrying a new label
    pub fn label(&self, label: impl Into<String>) -> Node {
        Self::assemble(
            self.data.kind.clone(),
            self.data.children.clone(),
            self.data.args.clone(),
            self.data.kwargs.clone(),
            Some(label.into()),
            self.data.role,
        )
    }

    pub fn module_name(&self, label: impl Into<String>) -> Node {
        self.label(label)
    }

    /// 0 for leaves, otherwise one more than the deepest child
    pub fn depth(&self) -> usize {
        if let Some(depth) = self.data.lazy.depth.get() {
            return *depth;
        }
        // post-order with an explicit stack; children settle before parents
        let mut stack = vec![(self.clone(), false)];
        while let Some((node, expanded)) = stack.pop() {
            let cell = &node.data.lazy.depth;
            if cell.get().is_some() {
                continue;
            }
            if expanded {
                let depth = node
                    .children()
                    .iter()
                    .map(|child| child.data.lazy.depth.get().copied().unwrap_or(0) + 1)
                    .max()
                    .unwrap_or(0);
                let _ = cell.set(depth);
            } else {
                let pending: Vec<Node> = node
                    .children()
                    .iter()
                    .filter(|child| child.data.lazy.depth.get().is_none())
                    .cloned()
                    .collect();
                stack.push((node, true));
                stack.extend(pending.into_iter().map(|child| (child, false)));
            }
        }
        self.data.lazy.depth.get().copied().unwrap_or(0)
    }

    /// Whether the node describes planar geometry.
    ///
    /// Extrusions are never planar and projections always are; any other
    /// composite is planar when all of its children are.
    pub fn is_2d(&self) -> bool {
        *self.data.lazy.is_2d.get_or_init(|| match self.kind() {
            kind if kind.is_extrusion() => false,
            NodeKind::Projection => true,
            kind if self.children().is_empty() => kind.is_planar_primitive(),
            _ => self.children().iter().all(Node::is_2d),
        })
    }

    fn geometry(&self) -> Result<Geometry> {
        self.data
            .lazy
            .geometry
            .get_or_init(|| providers::geometry(self))
            .clone()
    }

    /// Approximate extent, see [`providers`] for the per-kind rules
    pub fn bounding_box(&self) -> Result<BoundingBox> {
        Ok(self.geometry()?.bounding_box)
    }

    /// Approximate centroid used for placement
    pub fn center_of_mass(&self) -> Result<Vector> {
        Ok(self.geometry()?.center_of_mass)
    }

    pub fn size(&self) -> Result<Vector> {
        Ok(self.bounding_box()?.size())
    }

    pub(crate) fn script_cell(&self) -> &OnceLock<Result<Arc<str>>> {
        &self.data.lazy.script
    }

    /// Script text for this subtree, without preamble
    pub fn to_script(&self) -> Result<String> {
        Serializer::new().serialize(self).map(|text| text.to_string())
    }

    /// SHA-256 of the serialized text. Equal text gives equal identity
    /// regardless of how the trees were built.
    pub fn identity(&self) -> Result<&str> {
        let identity = self.data.lazy.identity.get_or_init(|| {
            let text = Serializer::new().serialize(self)?;
            let mut hasher = Sha256::new();
            hasher.update(text.as_bytes());
            Ok(format!("{:x}", hasher.finalize()))
        });
        match identity {
            Ok(id) => Ok(id.as_str()),
            Err(err) => Err(err.clone()),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Node::ptr_eq(self, other)
            || (self.data.kind == other.data.kind
                && self.data.label == other.data.label
                && self.data.args == other.data.args
                && self.data.kwargs == other.data.kwargs
                && self.data.children == other.data.children)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.data.kind)
            .field("label", &self.data.label)
            .field("args", &self.data.args)
            .field("kwargs", &self.data.kwargs)
            .field("children", &self.data.children)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: NodeKind) -> Node {
        Node::operation(kind, Vec::new(), Vec::new(), Kwargs::new())
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in [
            NodeKind::Cube,
            NodeKind::LinearExtrude,
            NodeKind::Debug,
            NodeKind::Background,
            NodeKind::Raw("minkowski".into()),
        ] {
            assert_eq!(NodeKind::from_name(kind.name()), kind);
        }
    }

    #[test]
    fn test_default_label() {
        assert_eq!(leaf(NodeKind::Sphere).label_name(), Some("sphere"));
        assert_eq!(leaf(NodeKind::Root).label_name(), None);

        let named = leaf(NodeKind::Sphere).label("ball");
        assert_eq!(named.label_name(), Some("ball"));
        assert!(!named.has_default_label());
    }

    #[test]
    fn test_depth() {
        let a = leaf(NodeKind::Cube);
        assert_eq!(a.depth(), 0);

        let wrapped = Node::operation(NodeKind::Render, vec![a.clone()], vec![], Kwargs::new());
        let top = Node::operation(NodeKind::Union, vec![wrapped, a], vec![], Kwargs::new());
        assert_eq!(top.depth(), 2);
    }

    #[test]
    fn test_is_2d() {
        let circle = leaf(NodeKind::Circle);
        let cube = leaf(NodeKind::Cube);
        let mixed = Node::operation(
            NodeKind::Union,
            vec![circle.clone(), cube.clone()],
            vec![],
            Kwargs::new(),
        );
        let flat = Node::operation(NodeKind::Union, vec![circle.clone()], vec![], Kwargs::new());
        let extruded =
            Node::operation(NodeKind::LinearExtrude, vec![circle], vec![], Kwargs::new());
        let projected = Node::operation(NodeKind::Projection, vec![cube], vec![], Kwargs::new());

        assert!(flat.is_2d());
        assert!(!mixed.is_2d());
        assert!(!extruded.is_2d());
        assert!(projected.is_2d());
        assert!(!leaf(NodeKind::Union).is_2d());
    }

    #[test]
    fn test_structural_equality() {
        let a = Node::raw("sphere", vec![], vec![], kwargs([("r", 2)]));
        let b = Node::raw("sphere", vec![], vec![], kwargs([("r", 2)]));
        assert_eq!(a, b);
        assert!(!Node::ptr_eq(&a, &b));
        assert_ne!(a, b.label("other"));
    }
}
