//! Configuration loading and path resolution for wick commands.
//!
//! Merges three layers - CLI arguments over `wick.config.json` over
//! built-in defaults - and resolves every path against the working
//! directory, so everything downstream of this module is absolute.

use crate::cli::{BuildArgs, ServeArgs};
use crate::env_file;
use crate::error::{CliError, ConfigError, Result};
use path_clean::PathClean;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use wick_serve::CopyPair;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "wick.config.json";

const DEFAULT_ROOT: &str = "dist";
const DEFAULT_SRC: &str = "src";
const DEFAULT_PORT: u16 = 3000;

/// On-disk shape of `wick.config.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    root: Option<PathBuf>,
    port: Option<u16>,
    src: Option<PathBuf>,
    #[serde(default)]
    copy: Vec<String>,
    build_command: Option<String>,
    env_file: Option<PathBuf>,
}

/// Fully-resolved configuration handed to the commands.
#[derive(Debug, Clone)]
pub struct WickConfig {
    /// Canonicalized working directory
    pub cwd: PathBuf,
    /// Served output root (absolute; may not exist until the build runs)
    pub root: PathBuf,
    /// Port for the dev server on 127.0.0.1
    pub port: u16,
    /// Source tree watched in watch mode (absolute)
    pub src: PathBuf,
    /// Resolved copy pairs
    pub copy: Vec<CopyPair>,
    /// Build command, run through the platform shell
    pub build_command: Option<String>,
    /// Environment entries for the build command
    pub env: Vec<(String, String)>,
}

impl WickConfig {
    /// Resolve configuration for the serve command.
    pub fn from_serve_args(args: &ServeArgs) -> Result<Self> {
        let cwd = resolve_cwd(args.cwd.as_deref())?;
        let file = load_config_file(&cwd)?;

        let root = resolve(
            &cwd,
            args.root
                .clone()
                .or(file.root)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT)),
        );
        let src = resolve(
            &cwd,
            args.src
                .clone()
                .or(file.src)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SRC)),
        );
        let port = args.port.or(file.port).unwrap_or(DEFAULT_PORT);
        let copy = resolve_copy_pairs(&cwd, &args.copy, &file.copy)?;
        let build_command = args.build_cmd.clone().or(file.build_command);
        let env = load_env(&cwd, args.env_file.as_deref().or(file.env_file.as_deref()))?;

        Ok(Self {
            cwd,
            root,
            port,
            src,
            copy,
            build_command,
            env,
        })
    }

    /// Resolve configuration for the one-shot build command.
    pub fn from_build_args(args: &BuildArgs) -> Result<Self> {
        let cwd = resolve_cwd(args.cwd.as_deref())?;
        let file = load_config_file(&cwd)?;

        let root = resolve(
            &cwd,
            file.root.unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT)),
        );
        let src = resolve(&cwd, file.src.unwrap_or_else(|| PathBuf::from(DEFAULT_SRC)));
        let copy = resolve_copy_pairs(&cwd, &args.copy, &file.copy)?;
        let build_command = args.build_cmd.clone().or(file.build_command);
        let env = load_env(&cwd, args.env_file.as_deref().or(file.env_file.as_deref()))?;

        Ok(Self {
            cwd,
            root,
            port: file.port.unwrap_or(DEFAULT_PORT),
            src,
            copy,
            build_command,
            env,
        })
    }
}

fn resolve_cwd(cwd: Option<&Path>) -> Result<PathBuf> {
    let cwd = match cwd {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };
    cwd.canonicalize()
        .map_err(|_| CliError::FileNotFound(cwd))
}

fn load_config_file(cwd: &Path) -> Result<ConfigFile> {
    let path = cwd.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = std::fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let file = serde_json::from_str(&content).map_err(ConfigError::InvalidJson)?;
    Ok(file)
}

/// Join onto the working directory and normalize, without requiring the
/// path to exist yet (the output root is often created by the first build).
fn resolve(cwd: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf().clean()
    } else {
        cwd.join(path).clean()
    }
}

fn resolve_copy_pairs(cwd: &Path, from_args: &[String], from_file: &[String]) -> Result<Vec<CopyPair>> {
    let specs = if from_args.is_empty() {
        from_file
    } else {
        from_args
    };
    specs.iter().map(|spec| parse_copy_pair(cwd, spec)).collect()
}

fn parse_copy_pair(cwd: &Path, spec: &str) -> Result<CopyPair> {
    let invalid = || ConfigError::InvalidValue {
        field: "copy".to_string(),
        value: spec.to_string(),
        hint: "Copy pairs are written FROM:TO, e.g. public:dist/public".to_string(),
    };

    let (from, to) = spec.split_once(':').ok_or_else(invalid)?;
    if from.is_empty() || to.is_empty() {
        return Err(invalid().into());
    }

    Ok(CopyPair::new(resolve(cwd, from), resolve(cwd, to)))
}

fn load_env(cwd: &Path, env_file: Option<&Path>) -> Result<Vec<(String, String)>> {
    match env_file {
        Some(path) => env_file::load(&resolve(cwd, path)),
        None => {
            let default = cwd.join(".env");
            if default.exists() {
                env_file::load(&default)
            } else {
                Ok(Vec::new())
            }
        }
    }
}
