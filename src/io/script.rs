// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Script output options and configuration

use super::format::format_number;
use crate::ast::Node;
use crate::error::Error;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILE: &str = "scadtree.toml";

/// Global tessellation settings written ahead of the tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptOptions {
    /// Minimum fragment angle, `$fa`
    pub fa: Option<f64>,
    /// Minimum fragment size, `$fs`
    pub fs: Option<f64>,
    /// Fixed fragment count, `$fn`
    #[serde(rename = "fn")]
    pub fn_: Option<u32>,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            fa: Some(3.0),
            fs: Some(0.5),
            fn_: None,
        }
    }
}

/// Parse an override, keeping the current value when it does not parse
fn env_override<T: std::str::FromStr>(name: &str, current: Option<T>) -> Option<T> {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(variable = name, value = %raw, "ignoring unparsable override");
                current
            }
        },
        Err(_) => current,
    }
}

impl ScriptOptions {
    /// No preamble at all
    pub fn none() -> Self {
        Self {
            fa: None,
            fs: None,
            fn_: None,
        }
    }

    /// Load options from a TOML file. Malformed contents surface as
    /// [`Error::Config`] under the file context.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let options: ScriptOptions = toml::from_str(&content)
            .map_err(|err| Error::Config(err.to_string()))
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(options)
    }

    /// `scadtree.toml` from the working directory (or defaults), then the
    /// `SCADTREE_FA`, `SCADTREE_FS` and `SCADTREE_FN` environment overrides
    pub fn load() -> Result<Self> {
        let mut options = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        options.fa = env_override("SCADTREE_FA", options.fa);
        options.fs = env_override("SCADTREE_FS", options.fs);
        options.fn_ = env_override("SCADTREE_FN", options.fn_);

        Ok(options)
    }

    /// Save options to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|err| Error::Config(err.to_string()))
            .context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// `$name=value;` lines for the options that are set
    pub fn preamble(&self) -> String {
        let mut out = String::new();
        if let Some(fa) = self.fa {
            out.push_str(&format!("$fa={};\n", format_number(fa)));
        }
        if let Some(fs) = self.fs {
            out.push_str(&format!("$fs={};\n", format_number(fs)));
        }
        if let Some(fn_) = self.fn_ {
            out.push_str(&format!("$fn={fn_};\n"));
        }
        out
    }

    /// Preamble, the tree's script and a trailing newline
    pub fn render(&self, node: &Node) -> crate::error::Result<String> {
        let script = node.to_script()?;
        Ok(format!("{}{}\n", self.preamble(), script))
    }

    /// Write the rendered script to `out`
    pub fn write(&self, node: &Node, mut out: impl Write) -> Result<()> {
        let text = self.render(node)?;
        out.write_all(text.as_bytes())
            .context("Failed to write script")?;
        Ok(())
    }
}
