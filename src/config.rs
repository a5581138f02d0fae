use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-capture switches. Built from the CLI on top of [`SystemConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOptions {
    pub border: bool,
    pub sprites: bool,
    pub bypass: bool,
    pub upscale: u32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            border: true,
            sprites: true,
            bypass: true,
            upscale: 1,
        }
    }
}

/// Where the ROM bypass puts its routine, scratch copy and marker in target
/// RAM. Every range is saved before use and written back afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BypassLayout {
    /// Routine load address. The cassette buffer is free on most programs.
    pub inject_address: u16,
    /// 8 KiB, page aligned, outside both ROM windows.
    pub scratch_address: u16,
    /// Two consecutive zero-page bytes used as the copy pointer.
    pub zero_page_pointer: u8,
    /// The KERNAL's RAM NMI vector.
    pub nmi_vector: u16,
    /// Byte the routine sets to `sentinel` when it has finished.
    pub marker_address: u16,
    pub sentinel: u8,
}

impl Default for BypassLayout {
    fn default() -> Self {
        Self {
            inject_address: 0x033C,
            scratch_address: 0x6000,
            zero_page_pointer: 0xFB,
            nmi_vector: 0x0318,
            marker_address: 0x02A7,
            sentinel: 0xA5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BypassSettings {
    pub layout: BypassLayout,
    /// How long the machine runs after the NMI is armed.
    pub wait_ms: u64,
}

impl Default for BypassSettings {
    fn default() -> Self {
        Self {
            layout: BypassLayout::default(),
            wait_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Used when no host is given on the command line.
    pub default_host: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_true")]
    pub border: bool,
    #[serde(default = "default_true")]
    pub sprites: bool,
    #[serde(default = "default_upscale")]
    pub upscale: u32,
    #[serde(default)]
    pub bypass: BypassSettings,
}

fn default_true() -> bool {
    true
}

fn default_upscale() -> u32 {
    1
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            default_host: None,
            password: None,
            border: true,
            sprites: true,
            upscale: 1,
            bypass: BypassSettings::default(),
        }
    }
}

impl SystemConfig {
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "vicsnap").map(|dirs| dirs.config_dir().join("config.json"))
    }

    pub fn load() -> Self {
        if let Some(config_path) = Self::path()
            && config_path.exists()
            && let Ok(data) = std::fs::read_to_string(&config_path)
        {
            match serde_json::from_str(&data) {
                Ok(config) => return config,
                Err(e) => log::warn!("Ignoring {}: {}", config_path.display(), e),
            }
        }
        Self::default()
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(config_path) = Self::path() {
            if let Some(config_dir) = config_path.parent() {
                std::fs::create_dir_all(config_dir)?;
            }
            let data = serde_json::to_string_pretty(self)?;
            std::fs::write(config_path, data)?;
        }
        Ok(())
    }

    /// Capture options as configured, before CLI overrides.
    pub fn capture_options(&self) -> CaptureOptions {
        CaptureOptions {
            border: self.border,
            sprites: self.sprites,
            bypass: true,
            upscale: self.upscale.max(1),
        }
    }
}
