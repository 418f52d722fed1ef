use dirs::home_dir;
use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Overrides the application directory when set.
pub const HOME_ENV: &str = "BUDGET_LEDGER_HOME";

const DEFAULT_DIR_NAME: &str = ".budget_ledger";
const DATA_DIR: &str = "data";
const DATA_FILE: &str = "transactions.json";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Returns the application-specific data directory, defaulting to `~/.budget_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Default record file inside `base`.
pub fn data_file_in(base: &Path) -> PathBuf {
    base.join(DATA_DIR).join(DATA_FILE)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(path)
}

/// `ledger.json` -> `ledger.json.tmp`.
pub fn tmp_path(path: &Path) -> PathBuf {
    sibling_with_suffix(path, TMP_SUFFIX)
}

/// Appends `.suffix` to the full file name.
pub fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, suffix),
        None => suffix.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Stages `data` next to `path`, syncs it, then renames it over the target so
/// readers only ever observe the old or the new content.
pub fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    drop(file);
    fs::rename(&tmp, path)
}
