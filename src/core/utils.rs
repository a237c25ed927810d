use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".finance_tracker";
const DATA_DIR: &str = "data";
const DATA_FILE: &str = "finances.csv";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

pub const HOME_ENV: &str = "FINANCE_TRACKER_HOME";

/// Resolves the on-disk layout of the tracker's data directory.
pub struct PathResolver;

impl PathResolver {
    /// Returns the application data directory, defaulting to `~/.finance_tracker`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn data_file_in(base: &Path) -> PathBuf {
        base.join(DATA_DIR).join(DATA_FILE)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR).join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Sibling path used to stage writes before renaming them into place.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
