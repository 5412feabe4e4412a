//! Calculation inputs from command-line flags and YAML parameter files
//!
//! A parameter file may carry the design, the mode, the parameter values and
//! solver settings. Anything given on the command line overrides the file.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr, eyre};
use powerup_core::{Mode, Param, ParameterSet, Rounding, SolverConfig};
use serde::Deserialize;

/// Arguments shared by `calc` and `sweep`
#[derive(clap::Args, Debug, Default)]
pub struct CalcArgs {
    /// Design identifier, e.g. CRA2_2r (may come from the parameter file)
    pub design: Option<String>,

    /// What to solve for: mdes, mrss or power
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Parameter value as key=value (repeatable), e.g. -p rho2=0.15
    #[arg(short = 'p', long = "set", value_parser = parse_assignment)]
    pub params: Vec<(Param, f64)>,

    /// YAML parameter file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Sample-size rounding: up or nearest
    #[arg(long, value_parser = parse_rounding)]
    pub rounding: Option<Rounding>,

    /// Sample-size solver convergence tolerance
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Sample-size solver iteration cap
    #[arg(long)]
    pub max_iterations: Option<usize>,
}

/// Fully resolved calculation request
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub design: String,
    pub mode: Mode,
    pub params: ParameterSet,
    pub solver: SolverConfig,
}

/// Contents of a YAML parameter file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParameterFile {
    pub design: Option<String>,
    pub mode: Option<Mode>,
    pub params: ParameterSet,
    pub solver: Option<SolverConfig>,
}

impl ParameterFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read parameter file {}", path.display()))?;
        Self::from_yaml(&content)
            .map_err(|e| eyre!("invalid parameter file {}: {e}", path.display()))
    }
}

impl CalcArgs {
    /// Combine the parameter file (if any) with command-line values
    pub fn resolve(&self) -> Result<Request> {
        let file = match &self.file {
            Some(path) => ParameterFile::load(path)?,
            None => ParameterFile::default(),
        };
        self.merge(file)
    }

    fn merge(&self, file: ParameterFile) -> Result<Request> {
        let design = self
            .design
            .clone()
            .or(file.design)
            .ok_or_else(|| eyre!("no design given; pass DESIGN or set `design` in the parameter file"))?;
        let mode = self
            .mode
            .or(file.mode)
            .ok_or_else(|| eyre!("no mode given; pass --mode or set `mode` in the parameter file"))?;

        let mut params = file.params;
        params.merge(&self.params.iter().copied().collect());

        let mut solver = file.solver.unwrap_or_default();
        if let Some(rounding) = self.rounding {
            solver.rounding = rounding;
        }
        if let Some(tolerance) = self.tolerance {
            solver.tolerance = tolerance;
        }
        if let Some(max_iterations) = self.max_iterations {
            solver.max_iterations = max_iterations;
        }

        Ok(Request {
            design,
            mode,
            params,
            solver,
        })
    }
}

/// Parse a `key=value` parameter assignment
pub fn parse_assignment(s: &str) -> Result<(Param, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    let param = key.parse::<Param>().map_err(|e| e.to_string())?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad value for '{}': {e}", param.key()))?;
    Ok((param, value))
}

fn parse_rounding(s: &str) -> Result<Rounding, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "up" => Ok(Rounding::Up),
        "nearest" => Ok(Rounding::Nearest),
        other => Err(format!("unknown rounding '{other}' (expected up or nearest)")),
    }
}
