//! Logical name to file path rules.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Directory under `<module-root>/<module-name>` holding configuration files.
pub const CONFIG_DIR_NAME: &str = "configuration";
/// Extension of configuration files.
pub const CONFIG_FILE_EXTENSION: &str = ".json";

// No separators, no leading dot: the file must stay inside the config directory.
static LOGICAL_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^./\\][^/\\]*$").expect("valid logical name regex")
});

/// Whether `name` can be used as a configuration file name.
pub fn is_valid_logical_name(name: &str) -> bool {
    LOGICAL_NAME_RE.is_match(name)
}

/// File name for a logical configuration name.
///
/// Names already ending in `.json` are kept verbatim.
pub fn config_file_name(logical_name: &str) -> String {
    if logical_name.ends_with(CONFIG_FILE_EXTENSION) {
        logical_name.to_string()
    } else {
        format!("{logical_name}{CONFIG_FILE_EXTENSION}")
    }
}

/// `<module-root>/<module-name>/configuration`.
pub fn config_dir(module_root: &Path, module_name: &str) -> PathBuf {
    module_root.join(module_name).join(CONFIG_DIR_NAME)
}
