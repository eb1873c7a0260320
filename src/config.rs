use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub(crate) const CONFIG_ENV: &str = "SNOOKERSTATS_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigSortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) studio: Option<String>,
    #[serde(default)]
    pub(crate) api_url: Option<String>,
    #[serde(default)]
    pub(crate) data_dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
    #[serde(default)]
    pub(crate) currency: Option<String>,
    #[serde(default)]
    pub(crate) order: Option<ConfigSortOrder>,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
}

impl Config {
    /// First config file that parses, with the path it came from.
    /// Files that fail to parse are reported on stderr and skipped.
    pub(crate) fn load() -> (Self, Option<PathBuf>) {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        for path in Self::get_config_paths(explicit) {
            if !path.exists() {
                continue;
            }
            match Self::load_from(&path) {
                Ok(config) => return (config, Some(path)),
                Err(e) => eprintln!("Warning: Failed to parse {}: {}", path.display(), e),
            }
        }
        (Self::default(), None)
    }

    fn load_from(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        toml::from_str::<Config>(&content).map_err(|e| e.to_string())
    }

    fn get_config_paths(explicit: Option<PathBuf>) -> Vec<PathBuf> {
        if let Some(path) = explicit {
            return vec![path];
        }

        let mut paths = Vec::new();

        // ~/.config/snookerstats/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("snookerstats").join("config.toml"));
        }

        // Platform config dir (e.g. ~/Library/Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("snookerstats").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".snookerstats.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_is_the_only_candidate() {
        let paths = Config::get_config_paths(Some(PathBuf::from("/tmp/custom.toml")));
        assert_eq!(paths, vec![PathBuf::from("/tmp/custom.toml")]);
    }

    #[test]
    fn default_paths_end_with_dotfile() {
        let paths = Config::get_config_paths(None);
        if let Some(last) = paths.last() {
            assert!(last.ends_with(".snookerstats.toml"));
        }
    }

    #[test]
    fn parses_all_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
studio = "Cue Club"
api_url = "http://localhost:8080/data"
data_dir = "/srv/snooker"
timezone = "Asia/Kolkata"
locale = "de"
currency = "Rs "
order = "desc"
color = "never"
no_color = true
debug = true
"#,
        )
        .unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.studio.as_deref(), Some("Cue Club"));
        assert_eq!(config.api_url.as_deref(), Some("http://localhost:8080/data"));
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/snooker")));
        assert_eq!(config.timezone.as_deref(), Some("Asia/Kolkata"));
        assert_eq!(config.locale.as_deref(), Some("de"));
        assert_eq!(config.currency.as_deref(), Some("Rs "));
        assert_eq!(config.order, Some(ConfigSortOrder::Desc));
        assert_eq!(config.color, Some(ConfigColorMode::Never));
        assert!(config.no_color);
        assert!(config.debug);
    }

    #[test]
    fn empty_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert!(config.studio.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn bad_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "order = \"sideways\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
