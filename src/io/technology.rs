use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::params::{BufferParams, WireParams};

/// The `technology.json` envelope: unit wire parameters plus a single buffer
/// cell's input capacitance, drive resistance, and intrinsic delay.
///
/// Field names and nesting mirror the source tool's technology file exactly
/// (`technology.unit_wire_resistance`/`unit_wire_capacitance`,
/// `module[0].input[0].{C,R,intrinsic_delay}`) so existing technology files
/// need no reshaping.
#[derive(Debug, Clone, Deserialize)]
pub struct TechFile {
    pub technology: TechnologySection,
    pub module: Vec<Module>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TechnologySection {
    pub unit_wire_resistance: f64,
    pub unit_wire_capacitance: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Module {
    pub input: Vec<BufferInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BufferInput {
    #[serde(rename = "C")]
    pub c: f64,
    #[serde(rename = "R")]
    pub r: f64,
    pub intrinsic_delay: f64,
}

impl TechFile {
    pub fn wire_params(&self) -> WireParams {
        WireParams {
            r_per_unit: self.technology.unit_wire_resistance,
            c_per_unit: self.technology.unit_wire_capacitance,
        }
    }

    /// Returns `Err` if the module/input arrays the source file is expected
    /// to carry a single buffer cell in are empty.
    pub fn buffer_params(&self, path: &str) -> Result<BufferParams> {
        let module = self.module.first().ok_or_else(|| {
            Error::invalid_input(path, "technology file has no entries under \"module\"")
        })?;
        let input = module.input.first().ok_or_else(|| {
            Error::invalid_input(path, "module[0] has no entries under \"input\"")
        })?;
        Ok(BufferParams {
            c_in: input.c,
            r_drive: input.r,
            intrinsic_delay: input.intrinsic_delay,
        })
    }
}

/// Reads and parses a technology file, returning wire and buffer parameters
/// ready for [`crate::engine::solve`].
pub fn load_technology_file(path: impl AsRef<Path>) -> Result<(WireParams, BufferParams)> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|e| Error::io(path_str.clone(), e))?;
    let tech: TechFile =
        serde_json::from_str(&raw).map_err(|e| Error::json(path_str.clone(), e))?;
    let buffer = tech.buffer_params(&path_str)?;
    Ok((tech.wire_params(), buffer))
}
