use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix for environment overrides, e.g. `DOCUFLOW_ENGINE__TIMEOUT_SECS`
pub const ENV_PREFIX: &str = "DOCUFLOW_";

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).split("__")
}

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(Figment::new().merge(Toml::file(path)).merge(env_provider()))
}

/// Load configuration from an optional file, falling back to defaults
/// plus environment overrides
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => extract(Figment::new().merge(env_provider())),
    }
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    figment
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format as DocFormat;
    use crate::config::LogFormat;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[transformer]
program = "/usr/local/bin/pandoc"

[engine]
timeout_secs = 60
parallel = true
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.transformer.program, PathBuf::from("/usr/local/bin/pandoc"));
        assert_eq!(config.engine.timeout_secs, 60);
        assert!(config.engine.parallel);
    }

    #[test]
    fn test_load_config_from_str_bad_type() {
        let toml = r#"
[engine]
timeout_secs = "soon"
"#;
        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/docuflow.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[output]
directory = "out"
format = "html"

[logging]
level = "debug"
format = "json"
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.output.directory, Some(PathBuf::from("out")));
        assert_eq!(config.output.format, Some(DocFormat::Html));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.engine.timeout_secs, 30);
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "docuflow.toml",
                r#"
[engine]
timeout_secs = 10
max_workers = 4
"#,
            )?;
            jail.set_env("DOCUFLOW_ENGINE__TIMEOUT_SECS", "90");

            let config = load_config(Path::new("docuflow.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.engine.timeout_secs, 90);
            assert_eq!(config.engine.max_workers, 4);
            Ok(())
        });
    }

    #[test]
    fn test_defaults_without_file() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("DOCUFLOW_TRANSFORMER__PROGRAM", "/opt/pandoc");

            let config = load_config_or_default(None).map_err(|e| e.to_string())?;
            assert_eq!(config.transformer.program, PathBuf::from("/opt/pandoc"));
            assert_eq!(config.engine.timeout_secs, 30);
            assert!(!config.engine.parallel);
            Ok(())
        });
    }
}
