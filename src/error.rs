// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types

use thiserror::Error;

/// Errors raised while building, measuring or serializing a tree.
///
/// Lazily computed attributes cache their outcome, so the error is `Clone`
/// and every access after a failure reports the same value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A primitive whose parameters cannot be resolved (e.g. a cylinder
    /// with neither radius nor diameter on one face).
    #[error("invalid `{kind}` parameters: {message}")]
    Configuration { kind: String, message: String },

    /// An argument that has no representation in the script format.
    #[error("cannot serialize value {value} of type {type_name}")]
    Serialization { value: String, type_name: &'static str },

    #[error("no node labelled `{label}`")]
    LabelNotFound { label: String },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
