// Settings resolution.
//
// Each value comes from the first source that has it: command-line flag or
// environment variable (clap merges those), then the persisted key file in
// the home directory, then an interactive prompt. Nothing here touches the
// network.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input, Password};
use tracing::{debug, info};

use crate::api::DEFAULT_BASE_URL;
use crate::error::ConfigError;
use crate::template::DEFAULT_TITLE;

/// File name of the persisted API key under the user's home directory.
pub const KEY_FILE_NAME: &str = ".life_design_notion_key";

/// Values that were supplied up front (flags or env). `None` means "ask".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub parent_page_id: Option<String>,
    pub base_url: Option<String>,
    pub title: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub parent_page_id: String,
    pub base_url: String,
    pub title: String,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("parent_page_id", &self.parent_page_id)
            .field("base_url", &self.base_url)
            .field("title", &self.title)
            .finish()
    }
}

/// Location of the persisted key file.
pub fn key_file_path() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(KEY_FILE_NAME)
}

/// Read a previously saved API key. A missing or blank file is `Ok(None)`.
pub fn load_api_key(path: &Path) -> Result<Option<String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(data) => Ok(non_blank(Some(data))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Persist the API key so later runs can skip the prompt. On unix the file
/// is readable by the owner only.
pub fn save_api_key(path: &Path, key: &str) -> Result<(), ConfigError> {
    let io_err = |source: std::io::Error| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        options.mode(0o600);
        // `mode` only applies when the file is created.
        if path.exists() {
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).map_err(io_err)?;
        }
    }
    let mut file = options.open(path).map_err(io_err)?;
    file.write_all(key.trim().as_bytes()).map_err(io_err)
}

/// A key must fit in an `Authorization` header: visible ASCII only.
fn check_api_key(key: String) -> Result<String, ConfigError> {
    if key.chars().all(|c| c.is_ascii_graphic()) {
        Ok(key)
    } else {
        Err(ConfigError::InvalidApiKey)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Accept a bare page id (32 hex chars, dashed or not) or a page URL and
/// return the id as 32 lowercase hex chars. Notion page URLs end in
/// `<slug>-<32 hex>`.
pub fn parse_page_id(input: &str) -> Result<String, ConfigError> {
    let trimmed = input.trim();
    let without_query = trimmed.split(['?', '#']).next().unwrap_or_default();
    let last_segment = without_query
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    // Bare id, dashed or not.
    let undashed: String = last_segment.chars().filter(|c| *c != '-').collect();
    if is_page_id(&undashed) {
        return Ok(undashed.to_ascii_lowercase());
    }
    // `<slug>-<id>`: the id must be the whole final token.
    let token = last_segment.rsplit('-').next().unwrap_or_default();
    if is_page_id(token) {
        return Ok(token.to_ascii_lowercase());
    }
    Err(ConfigError::InvalidPageId(trimmed.to_string()))
}

fn is_page_id(s: &str) -> bool {
    s.len() == 32 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Resolve settings without any interaction. Used for `--no-input` runs and
/// as the first pass of [`resolve_interactive`].
pub fn resolve(overrides: Overrides, key_file: &Path) -> Result<Settings, ConfigError> {
    let api_key = match non_blank(overrides.api_key) {
        Some(key) => key,
        None => load_api_key(key_file)?.ok_or(ConfigError::MissingApiKey)?,
    };
    let parent_page_id = non_blank(overrides.parent_page_id).ok_or(ConfigError::MissingParentPage)?;
    finish(api_key, &parent_page_id, overrides.base_url, overrides.title)
}

/// Resolve settings, prompting for whatever flags, env and the key file
/// did not provide. Offers to save a freshly typed key.
pub fn resolve_interactive(overrides: Overrides, key_file: &Path) -> Result<Settings, ConfigError> {
    let api_key = match non_blank(overrides.api_key) {
        Some(key) => key,
        None => match load_api_key(key_file)? {
            Some(key) => {
                debug!(path = ?key_file, "using saved API key");
                key
            }
            None => {
                let typed: String = Password::new()
                    .with_prompt("Notion API key (Internal Integration Secret)")
                    .allow_empty_password(true)
                    .interact()?;
                let typed = non_blank(Some(typed)).ok_or(ConfigError::MissingApiKey)?;
                if Confirm::new()
                    .with_prompt(format!("Save key to {}?", key_file.display()))
                    .default(false)
                    .interact()?
                {
                    save_api_key(key_file, &typed)?;
                    info!(path = ?key_file, "API key saved");
                }
                typed
            }
        },
    };

    let parent_page_id = match non_blank(overrides.parent_page_id) {
        Some(id) => id,
        None => {
            let typed: String = Input::new()
                .with_prompt("Parent page id or URL")
                .allow_empty(true)
                .interact_text()?;
            non_blank(Some(typed)).ok_or(ConfigError::MissingParentPage)?
        }
    };

    finish(api_key, &parent_page_id, overrides.base_url, overrides.title)
}

fn finish(
    api_key: String,
    parent_page_id: &str,
    base_url: Option<String>,
    title: Option<String>,
) -> Result<Settings, ConfigError> {
    Ok(Settings {
        api_key: check_api_key(api_key)?,
        parent_page_id: parse_page_id(parent_page_id)?,
        base_url: non_blank(base_url).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        title: non_blank(title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
    })
}
