// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Abstract Syntax Tree module
//!
//! Immutable CSG trees built from primitives, transformations and boolean
//! operators, ready to be written out as an OpenSCAD-compatible script.

mod builders;
mod distributive;
mod label;
mod node;
pub(crate) mod transform;
mod value;

pub use builders::{
    circle, cube, cylinder, import, polygon, polygon_with_paths, polyhedron, sphere, square, text,
    text_with, CylinderBuilder,
};
pub use distributive::{difference, hull, intersection, union};
pub use node::{kwargs, Kwargs, Node, NodeKind};
pub use transform::{Delta, Transform, TransformOp, CENTER};
pub use value::Value;
