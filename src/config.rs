use directories::{BaseDirs, ProjectDirs};
use inquire::{Confirm, Text};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::Result;

const DEFAULT_OUTPUT_ROOT: &str = "~/Documents/MiniMart";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppSettings {
    pub output_root: String,
    pub typst_bin: String,
    pub open_after_render: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            output_root: DEFAULT_OUTPUT_ROOT.to_string(),
            typst_bin: "typst".to_string(),
            open_after_render: true,
        }
    }
}

impl AppSettings {
    pub fn root(&self) -> PathBuf {
        PathBuf::from(expand_home_dir(&self.output_root))
    }

    pub fn receipts_dir(&self, year: i32) -> PathBuf {
        self.root().join("receipts").join(year.to_string())
    }

    pub fn template_override(&self) -> PathBuf {
        self.root().join("templates").join(crate::receipt::TEMPLATE_NAME)
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "minimart", "app") {
        return proj_dirs.config_dir().join("settings.toml");
    }
    PathBuf::from("settings.toml")
}

/// Settings from disk, or defaults when no settings file exists yet.
pub fn load_settings() -> Result<AppSettings> {
    let path = get_config_path();
    if !path.exists() {
        debug!(?path, "no settings file, using defaults");
        return Ok(AppSettings::default());
    }
    read_settings(&path)
}

fn read_settings(path: &Path) -> Result<AppSettings> {
    let content = fs::read_to_string(path)?;
    let settings: AppSettings = toml::from_str(&content)?;
    debug!(?path, ?settings, "settings loaded");
    Ok(settings)
}

fn save_settings(path: &Path, settings: &AppSettings) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, toml::to_string_pretty(settings)?)?;
    info!(?path, "settings saved");
    Ok(())
}

pub fn setup_config_wizard() -> Result<AppSettings> {
    println!("\n⚙️  --- Configuration Setup ---");
    let current = load_settings()?;

    println!("📂 Opening folder picker...");
    let picked_path = rfd::FileDialog::new()
        .set_title("Select Receipt Output Directory")
        .pick_folder();

    let output_root = match picked_path {
        Some(path) => path.to_string_lossy().to_string(),
        None => {
            println!("❌ No folder selected. Falling back to manual input.");
            Text::new("Enter Receipt Output Directory:")
                .with_default(&current.output_root)
                .prompt()?
        }
    };

    let open_after_render = Confirm::new("Open receipts after generating them?")
        .with_default(current.open_after_render)
        .prompt()?;

    let settings = AppSettings {
        output_root,
        open_after_render,
        ..current
    };
    save_settings(&get_config_path(), &settings)?;
    println!("✅ Settings saved.");
    Ok(settings)
}

pub fn expand_home_dir(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(base_dirs) = BaseDirs::new() {
            let home = base_dirs.home_dir().to_string_lossy();
            return path.replacen('~', &home, 1);
        }
    }
    path.to_string()
}
