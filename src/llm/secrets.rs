use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dialoguer::{Password, theme::ColorfulTheme};
use serde::{Deserialize, Serialize};

use crate::palette::Palette;
use crate::utils::{get_data_dir, strip_controls_and_escapes, trim_line};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const EXPECTED_KEY_PREFIX: &str = "sk-proj-";

const AUTH_FILE_NAME: &str = "auth.json";
const OPENAI_PROVIDER: &str = "openai";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Environment,
    AuthFile,
}

impl ApiKeySource {
    pub fn description(&self) -> &'static str {
        match self {
            ApiKeySource::Environment => "environment variable",
            ApiKeySource::AuthFile => "local auth file",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct AuthFile {
    #[serde(flatten)]
    providers: HashMap<String, ProviderAuth>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProviderAuth {
    key: String,
}

#[derive(Debug, Default)]
pub struct ApiKeyLookup {
    pub api_key: Option<String>,
    pub source: Option<ApiKeySource>,
}

/// Outcome of the pre-flight look at the key's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCheck {
    Missing,
    WrongPrefix,
    SurroundingWhitespace,
    LooksGood,
}

impl KeyCheck {
    pub fn inspect(api_key: Option<&str>) -> Self {
        match api_key {
            None | Some("") => KeyCheck::Missing,
            Some(key) if !key.starts_with(EXPECTED_KEY_PREFIX) => KeyCheck::WrongPrefix,
            Some(key) if key.trim() != key => KeyCheck::SurroundingWhitespace,
            Some(_) => KeyCheck::LooksGood,
        }
    }

    pub fn message(&self) -> String {
        match self {
            KeyCheck::Missing => format!(
                "No API key was found. Set {API_KEY_ENV} or run `quizgen llm --set <KEY>`."
            ),
            KeyCheck::WrongPrefix => format!(
                "An API key was found, but it doesn't start {EXPECTED_KEY_PREFIX}; please check you're using the right key."
            ),
            KeyCheck::SurroundingWhitespace => "An API key was found, but it looks like it might have space or tab characters at the start or end; please remove them.".to_string(),
            KeyCheck::LooksGood => "API key found and looks good so far!".to_string(),
        }
    }

    pub fn report(&self) {
        let color = match self {
            KeyCheck::LooksGood => Palette::SUCCESS,
            _ => Palette::WARNING,
        };
        println!("{}", Palette::paint(color, self.message()));
    }
}

#[cfg(test)]
const TEST_AUTH_PATH_ENV: &str = "QUIZGEN_TEST_AUTH_PATH";

pub fn clear_api_key() -> Result<bool> {
    clear_api_key_at(&auth_file_path()?)
}

fn clear_api_key_at(auth_path: &Path) -> Result<bool> {
    let Some(mut auth) = read_auth_file(auth_path)? else {
        return Ok(false);
    };

    if auth.providers.remove(OPENAI_PROVIDER).is_none() {
        return Ok(false);
    }

    if auth.providers.is_empty() {
        fs::remove_file(auth_path).with_context(|| {
            format!(
                "Failed to remove empty auth file at {}",
                auth_path.display()
            )
        })?;
        return Ok(true);
    }

    write_auth_file(auth_path, &auth)?;
    Ok(true)
}

pub fn prompt_for_api_key() -> Result<String> {
    println!(
        "{} (https://platform.openai.com/account/api-keys). It's stored locally for future use.",
        Palette::paint(Palette::SUCCESS, "Enter your OpenAI API key")
    );
    let raw_password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("API Key")
        .allow_empty_password(true)
        .interact()
        .context("Failed to read the API key")?;

    let password = strip_controls_and_escapes(&raw_password);
    Ok(password.trim().to_string())
}

pub fn store_api_key(api_key: &str) -> Result<()> {
    store_api_key_at(&auth_file_path()?, api_key)
}

fn store_api_key_at(auth_path: &Path, api_key: &str) -> Result<()> {
    let trimmed = trim_line(api_key).with_context(|| "Cannot store an empty API key")?;

    let mut auth = read_auth_file(auth_path)?.unwrap_or_default();

    auth.providers.insert(
        OPENAI_PROVIDER.to_string(),
        ProviderAuth {
            key: trimmed.to_string(),
        },
    );

    write_auth_file(auth_path, &auth)
}

pub fn get_api_key_from_sources() -> Result<ApiKeyLookup> {
    lookup_api_key(env::var(API_KEY_ENV).ok(), &auth_file_path()?)
}

/// Like [`get_api_key_from_sources`] but never fails: an unreadable auth file
/// is logged and treated as absent.
pub fn load_api_key() -> ApiKeyLookup {
    get_api_key_from_sources().unwrap_or_else(|err| {
        log::warn!("could not read stored API key: {err:#}");
        let api_key = env::var(API_KEY_ENV).ok().filter(|value| !value.is_empty());
        ApiKeyLookup {
            source: api_key.as_ref().map(|_| ApiKeySource::Environment),
            api_key,
        }
    })
}

// The environment value is returned untrimmed so the whitespace check can see it.
fn lookup_api_key(env_value: Option<String>, auth_path: &Path) -> Result<ApiKeyLookup> {
    // 1. Environment variable
    if let Some(value) = env_value
        && !value.is_empty()
    {
        return Ok(ApiKeyLookup {
            api_key: Some(value),
            source: Some(ApiKeySource::Environment),
        });
    }

    // 2. Auth file
    let Some(auth) = read_auth_file(auth_path)? else {
        return Ok(ApiKeyLookup::default());
    };

    let key = auth
        .providers
        .get(OPENAI_PROVIDER)
        .map(|entry| entry.key.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    Ok(match key {
        Some(api_key) => ApiKeyLookup {
            api_key: Some(api_key),
            source: Some(ApiKeySource::AuthFile),
        },
        None => ApiKeyLookup::default(),
    })
}

fn auth_file_path() -> Result<PathBuf> {
    #[cfg(test)]
    {
        if let Ok(path) = env::var(TEST_AUTH_PATH_ENV)
            && !path.trim().is_empty()
        {
            return Ok(PathBuf::from(path));
        }
    }

    let data_dir = get_data_dir()?;
    Ok(data_dir.join(AUTH_FILE_NAME))
}

fn read_auth_file(path: &Path) -> Result<Option<AuthFile>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(parse_auth_contents(&contents, path)?),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to read auth file at {}", path.display()))
        }
    }
}

fn write_auth_file(path: &Path, value: &AuthFile) -> Result<()> {
    let contents = serialize_auth(value)?;
    fs::write(path, contents)
        .with_context(|| format!("Failed to write auth file at {}", path.display()))?;
    Ok(())
}

fn parse_auth_contents(contents: &str, path: &Path) -> Result<Option<AuthFile>> {
    if contents.trim().is_empty() {
        return Ok(Some(AuthFile::default()));
    }

    let parsed: AuthFile = serde_json::from_str(contents)
        .with_context(|| format!("Failed to parse auth file at {}", path.display()))?;
    Ok(Some(parsed))
}

fn serialize_auth(value: &AuthFile) -> Result<String> {
    let contents = serde_json::to_string_pretty(value)?;
    Ok(format!("{}\n", contents))
}
