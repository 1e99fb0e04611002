//! Configuration settings for the automaton simulator

use crate::automaton::{Dimensions2, Dimensions3};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub grid2d: Dimensions2,
    pub grid3d: Dimensions3,
    pub terminal: TerminalConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// RNG seed; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Probability that a cell starts alive
    pub fill_density: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalConfig {
    pub frame_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub broadcast_interval_ms: u64,
    pub pattern: Option<PatternConfig>,
}

/// Stamp template applied to each fresh 3D grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    pub file: PathBuf,
    #[serde(default = "default_stamp_offset")]
    pub offset: [usize; 3],
}

fn default_stamp_offset() -> [usize; 3] {
    [2, 2, 2]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                seed: None,
                fill_density: 0.5,
            },
            grid2d: Dimensions2::new(40, 20),
            grid3d: Dimensions3::new(20, 20, 20),
            terminal: TerminalConfig { frame_delay_ms: 200 },
            server: ServerConfig {
                bind_address: "127.0.0.1:8080".to_string(),
                broadcast_interval_ms: 250,
                pattern: None,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid2d.width == 0 || self.grid2d.height == 0 {
            anyhow::bail!("2D grid dimensions must be positive");
        }

        if self.grid3d.width == 0 || self.grid3d.height == 0 || self.grid3d.depth == 0 {
            anyhow::bail!("3D grid dimensions must be positive");
        }

        if !(0.0..=1.0).contains(&self.simulation.fill_density) {
            anyhow::bail!(
                "Fill density must be between 0 and 1, got {}",
                self.simulation.fill_density
            );
        }

        if self.terminal.frame_delay_ms == 0 {
            anyhow::bail!("Terminal frame delay must be positive");
        }

        if self.server.broadcast_interval_ms == 0 {
            anyhow::bail!("Server broadcast interval must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.grid2d.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.grid2d.height = height;
        }
        if let Some(seed) = cli_overrides.seed {
            self.simulation.seed = Some(seed);
        }
        if let Some(delay) = cli_overrides.frame_delay_ms {
            self.terminal.frame_delay_ms = delay;
        }
        if let Some(ref bind) = cli_overrides.bind_address {
            self.server.bind_address = bind.clone();
        }
        if let Some(interval) = cli_overrides.broadcast_interval_ms {
            self.server.broadcast_interval_ms = interval;
        }
        if let Some(ref file) = cli_overrides.pattern_file {
            self.server.pattern = Some(PatternConfig {
                file: file.clone(),
                offset: self
                    .server
                    .pattern
                    .as_ref()
                    .map_or_else(default_stamp_offset, |p| p.offset),
            });
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub seed: Option<u64>,
    pub frame_delay_ms: Option<u64>,
    pub bind_address: Option<String>,
    pub broadcast_interval_ms: Option<u64>,
    pub pattern_file: Option<PathBuf>,
}
