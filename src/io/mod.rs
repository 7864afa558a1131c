// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - script formatting, serialization and output options

mod format;
mod script;
mod serializer;

pub use format::{format_key, format_number, write_arguments, write_value};
pub use script::ScriptOptions;
pub use serializer::{Serializer, SerializerStats};
