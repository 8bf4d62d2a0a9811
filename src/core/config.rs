//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.huddle/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::identity::Identity;
use crate::core::state::{SessionOptions, generate_room_id};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HuddleConfig {
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub room: RoomConfig,
    #[serde(default)]
    pub transport: TransportConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IdentityConfig {
    pub display_name: Option<String>,
    pub participant_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RoomConfig {
    pub id: Option<String>,
    pub start_as_host: Option<bool>,
    pub announce_membership: Option<bool>,
    pub invite_base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TransportConfig {
    pub kind: Option<String>,
    pub seed_file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_INVITE_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TRANSPORT: &str = "seed";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub identity: Identity,
    pub room_id: String,
    pub start_as_host: bool,
    pub announce_membership: bool,
    pub invite_base_url: String,
    pub transport: String,
    pub seed_file: Option<PathBuf>,
}

impl ResolvedConfig {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            room_id: self.room_id.clone(),
            start_as_host: self.start_as_host,
            announce_membership: self.announce_membership,
        }
    }
}

/// Values supplied on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub display_name: Option<String>,
    pub room_id: Option<String>,
    pub transport: Option<String>,
    pub seed_file: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.huddle/`.
pub fn huddle_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".huddle"))
}

/// Returns the path to `~/.huddle/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    huddle_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.huddle/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HuddleConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<HuddleConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(HuddleConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(HuddleConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: HuddleConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Huddle Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [identity]
# display_name = "Dana"              # Or set HUDDLE_DISPLAY_NAME; defaults to "You"
# participant_id = "1"               # Or set HUDDLE_PARTICIPANT_ID; defaults to a random UUID

# [room]
# id = "standup"                     # Or set HUDDLE_ROOM; defaults to a random token
# start_as_host = true
# announce_membership = true         # Post "joined"/"left" lines in chat
# invite_base_url = "http://localhost:8080"

# [transport]
# kind = "seed"                      # "seed" or "offline"
# seed_file = "seed.json"            # Path relative to ~/.huddle/, or set HUDDLE_SEED_FILE
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &HuddleConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Display name: CLI → env → config → "You"
    let display_name = cli
        .display_name
        .clone()
        .or_else(|| std::env::var("HUDDLE_DISPLAY_NAME").ok())
        .or_else(|| config.identity.display_name.clone());

    // Participant id: env → config → generated
    let participant_id = std::env::var("HUDDLE_PARTICIPANT_ID")
        .ok()
        .or_else(|| config.identity.participant_id.clone());

    let identity = Identity::resolve(participant_id.as_deref(), display_name.as_deref());

    // Room: CLI → env → config → generated
    let room_id = cli
        .room_id
        .clone()
        .or_else(|| std::env::var("HUDDLE_ROOM").ok())
        .or_else(|| config.room.id.clone())
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(generate_room_id);

    // Transport: CLI → config → default
    let transport = cli
        .transport
        .clone()
        .or_else(|| config.transport.kind.clone())
        .unwrap_or_else(|| DEFAULT_TRANSPORT.to_string());

    // Seed file: CLI → env → config (relative paths resolve against ~/.huddle/)
    let seed_file = cli
        .seed_file
        .clone()
        .or_else(|| std::env::var("HUDDLE_SEED_FILE").ok())
        .or_else(|| config.transport.seed_file.clone().map(|f| resolve_in_huddle_dir(&f)))
        .map(PathBuf::from);

    ResolvedConfig {
        identity,
        room_id,
        start_as_host: config.room.start_as_host.unwrap_or(true),
        announce_membership: config.room.announce_membership.unwrap_or(true),
        invite_base_url: config
            .room
            .invite_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_INVITE_BASE_URL.to_string()),
        transport,
        seed_file,
    }
}

/// Config-file paths are relative to `~/.huddle/` unless absolute.
fn resolve_in_huddle_dir(file: &str) -> String {
    let path = Path::new(file);
    if path.is_absolute() {
        return file.to_string();
    }
    match huddle_dir() {
        Some(dir) => dir.join(path).to_string_lossy().into_owned(),
        None => file.to_string(),
    }
}
