use std::path::PathBuf;

use crate::error::{ExportError, Result};

#[derive(Clone, Debug)]
pub struct Config {
    pub database: DatabaseConfig,
    pub files_dir: PathBuf,
    pub output_dir: PathBuf,
    pub template_path: PathBuf,
    pub locale: String,
}

#[derive(Clone, Debug)]
pub enum DatabaseConfig {
    Url(String),
    Parts {
        host: String,
        port: u16,
        socket: Option<String>,
        user: String,
        password: Option<String>,
        name: String,
    },
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the process environment.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = match var("DATABASE_URL") {
            Some(url) => DatabaseConfig::Url(url),
            None => {
                let user = var("DB_USER")
                    .ok_or_else(|| ExportError::Config("DB_USER must be set".to_string()))?;
                let name = var("DB_NAME")
                    .ok_or_else(|| ExportError::Config("DB_NAME must be set".to_string()))?;
                let port = match var("DB_PORT") {
                    Some(port) => port
                        .parse()
                        .map_err(|_| ExportError::Config(format!("invalid DB_PORT: {port}")))?,
                    None => 3306,
                };

                DatabaseConfig::Parts {
                    host: var("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                    port,
                    socket: var("DB_SOCKET").filter(|s| !s.is_empty()),
                    user,
                    password: var("DB_PASSWORD"),
                    name,
                }
            }
        };

        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let files_dir = var("OJS_FILES_DIR")
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/var/www/files"));
        let template_path = base_dir.join(
            var("TEMPLATE_PATH").unwrap_or_else(|| "template.html".to_string()),
        );
        let locale = var("LOCALE")
            .filter(|l| !l.is_empty())
            .map(|l| normalize_locale(&l))
            .unwrap_or_else(|| "en".to_string());

        Ok(Self {
            database,
            files_dir,
            output_dir: base_dir,
            template_path,
            locale,
        })
    }
}

/// OJS stores locales as `en_US`; accept the `en-US` spelling too.
pub fn normalize_locale(locale: &str) -> String {
    locale.replacen('-', "_", 1)
}
