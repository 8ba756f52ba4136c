use anyhow::Result;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

/// Log line layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl LogFormat {
    /// `None` for an unknown name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// JSON lines in production, human-readable elsewhere
    pub fn default_for(env: &Environment) -> Self {
        if env.is_prod() {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub log_format: LogFormat,

    // Wizard
    pub analysis_delay: Duration,
    pub min_recommended_photos: usize,

    // Job defaults
    pub default_location: String,
}

impl Settings {
    pub const DEFAULT_ANALYSIS_DELAY_MS: u64 = 2500;
    pub const DEFAULT_MIN_RECOMMENDED_PHOTOS: usize = 2;
    pub const DEFAULT_LOCATION: &'static str = "Paris";

    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let log_format = match env::var("LOG_FORMAT") {
            Ok(s) => LogFormat::parse(&s)
                .ok_or_else(|| anyhow::anyhow!("LOG_FORMAT must be pretty, compact or json, got '{}'", s))?,
            Err(_) => LogFormat::default_for(&env),
        };

        // Wizard
        let analysis_delay_ms = env::var("ANALYSIS_DELAY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(Self::DEFAULT_ANALYSIS_DELAY_MS);
        let min_recommended_photos = env::var("MIN_RECOMMENDED_PHOTOS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(Self::DEFAULT_MIN_RECOMMENDED_PHOTOS);

        // Job defaults
        let default_location = env::var("DEFAULT_LOCATION")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_LOCATION.to_string());

        Ok(Settings {
            env,
            log_format,
            analysis_delay: Duration::from_millis(analysis_delay_ms),
            min_recommended_photos,
            default_location,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: Environment::Dev,
            log_format: LogFormat::Pretty,
            analysis_delay: Duration::from_millis(Self::DEFAULT_ANALYSIS_DELAY_MS),
            min_recommended_photos: Self::DEFAULT_MIN_RECOMMENDED_PHOTOS,
            default_location: Self::DEFAULT_LOCATION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_str() {
        assert_eq!(Environment::from_str("production"), Environment::Prod);
        assert_eq!(Environment::from_str("PROD"), Environment::Prod);
        assert_eq!(Environment::from_str("staging"), Environment::Staging);
        assert_eq!(Environment::from_str("anything"), Environment::Dev);
        assert!(Environment::Dev.is_dev());
        assert!(Environment::Prod.is_prod());
    }

    #[test]
    fn test_log_format() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse(" compact "), Some(LogFormat::Compact));
        assert_eq!(LogFormat::parse("xml"), None);
        assert_eq!(LogFormat::default_for(&Environment::Prod), LogFormat::Json);
        assert_eq!(LogFormat::default_for(&Environment::Staging), LogFormat::Pretty);
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.analysis_delay, Duration::from_millis(2500));
        assert_eq!(settings.min_recommended_photos, 2);
        assert_eq!(settings.default_location, "Paris");
        assert_eq!(settings.log_format, LogFormat::Pretty);
    }
}
