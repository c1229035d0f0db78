//! INI file configuration adapter.

use configparser::ini::Ini;
use std::path::Path;

use crate::domain::error::TraderError;
use crate::ports::config_port::ConfigPort;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TraderError> {
        let mut config = Ini::new();
        config
            .load(path.as_ref())
            .map_err(|e| TraderError::ConfigParse {
                file: path.as_ref().display().to_string(),
                reason: e,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, TraderError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|e| TraderError::ConfigParse {
                file: "<inline>".into(),
                reason: e,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}
