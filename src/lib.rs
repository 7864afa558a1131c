// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! scadtree
//!
//! Immutable CSG trees with a transformation algebra, lazy spatial
//! analytics and deterministic OpenSCAD-compatible script output.

pub mod ast;
pub mod error;
pub mod geometry;
pub mod io;
pub mod utils;

pub use ast::{
    circle, cube, cylinder, difference, hull, import, intersection, kwargs, polygon,
    polygon_with_paths, polyhedron, sphere, square, text, text_with, union, CylinderBuilder, Delta,
    Kwargs, Node, NodeKind, Transform, TransformOp, Value, CENTER,
};
pub use error::{Error, Result};
pub use geometry::{BoundingBox, Cylinder, Geometry, Vector};
pub use io::{ScriptOptions, Serializer, SerializerStats};

/// Script text for a tree, without preamble
pub fn to_script(node: &Node) -> Result<String> {
    node.to_script()
}

/// Preamble from `options`, the tree's script and a trailing newline
pub fn render_script(node: &Node, options: &ScriptOptions) -> Result<String> {
    options.render(node)
}
