use std::path::PathBuf;

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Config store shared with the World CLI, which writes it on login and
/// project selection.
pub fn world_cli_config_path() -> PathBuf {
    home_dir().join(".worldcli").join("config.json")
}

/// Hand-written TOML config, read when no World CLI config exists.
pub fn forge_config_path() -> PathBuf {
    home_dir().join(".worldforge").join("config.toml")
}

/// Default config locations, in lookup order.
pub fn default_config_paths() -> [PathBuf; 2] {
    [world_cli_config_path(), forge_config_path()]
}
