use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How a problem is mapped onto directories under the root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `{site}/{contest}/{name}/{code}` where the contest comes from `group`
    #[default]
    Name,
    /// `{site}/{contest}/{code}` where contest and code come from the problem URL
    Url,
}

impl FromStr for Layout {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Layout::Name),
            "url" => Ok(Layout::Url),
            other => bail!("Unknown layout '{}', expected 'name' or 'url'", other),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Name => write!(f, "name"),
            Layout::Url => write!(f, "url"),
        }
    }
}

/// Optional on-disk configuration. Every key can also come from the environment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub port: Option<String>,
    pub file_directory_path: Option<String>,
    pub language: Option<String>,
    pub stdin: Option<String>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub layout: Option<Layout>,
    pub preserve_code: Option<bool>,
}

impl FileConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("companion-scaffold").join("config.toml"))
    }

    pub fn read(path: &Path) -> Result<FileConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// An explicit path must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<FileConfig> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => Ok(FileConfig::default()),
        }
    }
}

/// Everything that decides where files go and what they are called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConfig {
    pub root: PathBuf,
    pub language: String,
    pub input_suffix: String,
    pub output_suffix: String,
    pub error_suffix: String,
    pub layout: Layout,
    pub preserve_code: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub naming: NamingConfig,
}

impl Config {
    /// Loads `.env`, the TOML file and the process environment, in rising precedence.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let file = FileConfig::load(explicit)?;
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Self::resolve(file, |key| std::env::var(key).ok(), &cwd)
    }

    pub fn resolve<F>(file: FileConfig, env: F, cwd: &Path) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, fallback: Option<String>| env(key).or(fallback);
        let required = |key: &str, fallback: Option<String>| -> Result<String> {
            match pick(key, fallback) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => bail!("{} is not set", key),
            }
        };

        let port = required("PORT", file.port)?;
        let raw_root = required("FILE_DIRECTORY_PATH", file.file_directory_path)?;
        let language = required("LANGUAGE", file.language)?;

        let layout = match env("LAYOUT") {
            Some(value) => value.parse()?,
            None => file.layout.unwrap_or_default(),
        };
        let preserve_code = match env("PRESERVE_CODE") {
            Some(value) => parse_flag("PRESERVE_CODE", &value)?,
            None => file.preserve_code.unwrap_or(false),
        };

        Ok(Config {
            listen_addr: listen_addr(&port)?,
            naming: NamingConfig {
                root: expand_root(&raw_root, cwd)?,
                language,
                input_suffix: pick("STDIN", file.stdin).unwrap_or_default(),
                output_suffix: pick("STDOUT", file.stdout).unwrap_or_default(),
                error_suffix: pick("STDERR", file.stderr).unwrap_or_default(),
                layout,
                preserve_code,
            },
        })
    }

    pub fn ensure_root(&self) -> Result<()> {
        let root = &self.naming.root;
        std::fs::create_dir_all(root)
            .with_context(|| format!("Failed to create output root {}", root.display()))?;
        if !root.is_dir() {
            bail!("Output root {} is not a directory", root.display());
        }
        Ok(())
    }
}

/// Loads `.env` from the working directory without clobbering existing variables.
pub fn load_dotenv() -> Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e).context("Failed to load .env"),
    }
}

/// `:8080` and `8080` listen on every interface; `host:port` is taken as given.
pub fn listen_addr(port: &str) -> Result<String> {
    let port = port.trim();
    let (host, number) = match port.rsplit_once(':') {
        Some(("", number)) => ("0.0.0.0", number),
        Some((host, number)) => (host, number),
        None => ("0.0.0.0", port),
    };
    number
        .parse::<u16>()
        .with_context(|| format!("Invalid PORT '{}'", port))?;
    Ok(format!("{host}:{number}"))
}

pub fn expand_root(raw: &str, cwd: &Path) -> Result<PathBuf> {
    let expanded = if raw == "~" || raw.starts_with("~/") {
        let home = dirs::home_dir().context("Could not find home directory")?;
        home.join(raw.trim_start_matches('~').trim_start_matches('/'))
    } else {
        PathBuf::from(raw)
    };
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(cwd.join(expanded))
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("Invalid {} '{}', expected true or false", key, other),
    }
}
