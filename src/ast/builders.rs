// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Typed constructors for primitives and wrapping operations

use super::{kwargs, Kwargs, Node, NodeKind, Value};
use crate::geometry::Vector;

fn leaf(kind: NodeKind, args: Vec<Value>, kwargs: Kwargs) -> Node {
    Node::operation(kind, Vec::new(), args, kwargs)
}

/// Fall back to `fallback` for a zero extent
fn or_default(value: f64, fallback: f64) -> f64 {
    if value == 0.0 {
        fallback
    } else {
        value
    }
}

/// Box from the origin to `(x, y, z)`; a zero `y` or `z` takes the value of `x`
pub fn cube(x: impl Into<f64>, y: impl Into<f64>, z: impl Into<f64>) -> Node {
    let x = x.into();
    let size = Vector::new(x, or_default(y.into(), x), or_default(z.into(), x));
    leaf(NodeKind::Cube, vec![size.into()], Kwargs::new())
}

/// Start a cylinder or cone
pub fn cylinder() -> CylinderBuilder {
    CylinderBuilder::default()
}

/// Cylinder/cone parameters. Only the parameters that were set are
/// written out; `h` is always present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderBuilder {
    h: f64,
    r: Option<f64>,
    d: Option<f64>,
    r1: Option<f64>,
    r2: Option<f64>,
    d1: Option<f64>,
    d2: Option<f64>,
    fn_: Option<u32>,
    center: bool,
}

impl Default for CylinderBuilder {
    fn default() -> Self {
        Self {
            h: 1.0,
            r: None,
            d: None,
            r1: None,
            r2: None,
            d1: None,
            d2: None,
            fn_: None,
            center: false,
        }
    }
}

impl CylinderBuilder {
    pub fn h(mut self, h: impl Into<f64>) -> Self {
        self.h = h.into();
        self
    }

    pub fn r(mut self, r: impl Into<f64>) -> Self {
        self.r = Some(r.into());
        self
    }

    pub fn d(mut self, d: impl Into<f64>) -> Self {
        self.d = Some(d.into());
        self
    }

    /// Bottom radius
    pub fn r1(mut self, r1: impl Into<f64>) -> Self {
        self.r1 = Some(r1.into());
        self
    }

    /// Top radius
    pub fn r2(mut self, r2: impl Into<f64>) -> Self {
        self.r2 = Some(r2.into());
        self
    }

    pub fn d1(mut self, d1: impl Into<f64>) -> Self {
        self.d1 = Some(d1.into());
        self
    }

    pub fn d2(mut self, d2: impl Into<f64>) -> Self {
        self.d2 = Some(d2.into());
        self
    }

    /// Fixed facet count
    pub fn facets(mut self, fn_: u32) -> Self {
        self.fn_ = Some(fn_);
        self
    }

    pub fn center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    pub fn build(self) -> Node {
        let mut named = kwargs([("h", self.h)]);
        let optional = [
            ("r", self.r),
            ("d", self.d),
            ("r1", self.r1),
            ("r2", self.r2),
            ("d1", self.d1),
            ("d2", self.d2),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                named.insert(key.to_owned(), value.into());
            }
        }
        if let Some(fn_) = self.fn_ {
            named.insert("fn".to_owned(), fn_.into());
        }
        if self.center {
            named.insert("center".to_owned(), true.into());
        }
        leaf(NodeKind::Cylinder, Vec::new(), named)
    }
}

impl From<CylinderBuilder> for Node {
    fn from(builder: CylinderBuilder) -> Self {
        builder.build()
    }
}

pub fn sphere(r: impl Into<f64>) -> Node {
    leaf(NodeKind::Sphere, Vec::new(), kwargs([("r", r.into())]))
}

pub fn circle(r: impl Into<f64>) -> Node {
    leaf(NodeKind::Circle, Vec::new(), kwargs([("r", r.into())]))
}

/// Rectangle from the origin; a zero `y` takes the value of `x`
pub fn square(x: impl Into<f64>, y: impl Into<f64>) -> Node {
    let x = x.into();
    let size = vec![x, or_default(y.into(), x)];
    leaf(NodeKind::Square, vec![size.into()], Kwargs::new())
}

pub fn polygon(points: impl Into<Value>) -> Node {
    leaf(NodeKind::Polygon, vec![points.into()], Kwargs::new())
}

pub fn polygon_with_paths(points: impl Into<Value>, paths: impl Into<Value>) -> Node {
    leaf(
        NodeKind::Polygon,
        vec![points.into()],
        kwargs([("paths", paths.into())]),
    )
}

pub fn polyhedron(points: impl Into<Value>, faces: impl Into<Value>) -> Node {
    leaf(
        NodeKind::Polyhedron,
        vec![points.into()],
        kwargs([("faces", faces.into())]),
    )
}

/// Mesh loaded by the engine from `file`
pub fn import(file: &str) -> Node {
    leaf(
        NodeKind::Import,
        vec![file.into()],
        kwargs([("convexity", 10)]),
    )
}

/// Text with size 10, left/baseline aligned
pub fn text(txt: &str) -> Node {
    text_with(txt, Kwargs::new())
}

/// Text with extra named arguments overriding the defaults
pub fn text_with(txt: &str, extra: Kwargs) -> Node {
    let mut named = kwargs([
        ("size", Value::from(10)),
        ("halign", Value::from("left")),
        ("valign", Value::from("baseline")),
    ]);
    named.extend(extra);
    leaf(NodeKind::Text, vec![txt.into()], named)
}

impl Node {
    fn wrap_plain(&self, kind: NodeKind, args: Vec<Value>, kwargs: Kwargs) -> Node {
        Node::operation(kind, vec![self.clone()], args, kwargs)
    }

    /// Round offset of a 2D outline
    pub fn offset(&self, r: impl Into<f64>) -> Node {
        self.offset_with(kwargs([("r", r.into())]))
    }

    /// Sharp-cornered offset of a 2D outline
    pub fn offset_delta(&self, delta: impl Into<f64>) -> Node {
        self.offset_with(kwargs([("delta", delta.into())]))
    }

    pub fn offset_with(&self, kwargs: Kwargs) -> Node {
        self.wrap_plain(NodeKind::Offset, Vec::new(), kwargs)
    }

    pub fn projection(&self) -> Node {
        self.projection_with(Kwargs::new())
    }

    pub fn projection_with(&self, kwargs: Kwargs) -> Node {
        self.wrap_plain(NodeKind::Projection, Vec::new(), kwargs)
    }

    /// Color by name (`"red"`) or RGB(A) list
    pub fn color(&self, color: impl Into<Value>) -> Node {
        self.wrap_plain(NodeKind::Color, vec![color.into()], Kwargs::new())
    }

    pub fn render(&self) -> Node {
        self.wrap_plain(NodeKind::Render, Vec::new(), Kwargs::new())
    }

    /// Only shown in preview mode
    pub fn preview(&self) -> Node {
        self.wrap_plain(
            NodeKind::If,
            vec![Value::Ident("$preview".to_owned())],
            Kwargs::new(),
        )
    }

    pub fn debug(&self) -> Node {
        self.wrap_plain(NodeKind::Debug, Vec::new(), Kwargs::new())
    }

    pub fn root(&self) -> Node {
        self.wrap_plain(NodeKind::Root, Vec::new(), Kwargs::new())
    }

    pub fn disable(&self) -> Node {
        self.wrap_plain(NodeKind::Disable, Vec::new(), Kwargs::new())
    }

    pub fn background(&self) -> Node {
        self.wrap_plain(NodeKind::Background, Vec::new(), Kwargs::new())
    }
}
