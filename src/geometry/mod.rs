// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - value types and per-kind spatial rules

mod bbox;
pub mod providers;
mod vector;

pub use bbox::BoundingBox;
pub use providers::{Cylinder, Geometry};
pub use vector::Vector;
