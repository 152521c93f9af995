use log::{LevelFilter, warn};

pub const ENV_LOG_LEVEL: &str = "CLUTCH_LOG";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    /// Keep the signed-in session on disk between runs.
    pub persist_session: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { full_screen: false, log_level: None, persist_session: true }
    }
}

impl AppSettings {
    pub fn load(persist_session: bool) -> Self {
        Self {
            log_level: std::env::var(ENV_LOG_LEVEL).ok().and_then(|raw| parse_level(&raw)),
            persist_session,
            ..Self::default()
        }
    }
}

fn parse_level(raw: &str) -> Option<LevelFilter> {
    match raw.trim().parse::<LevelFilter>() {
        Ok(level) => Some(level),
        Err(_) => {
            warn!("ignoring {ENV_LOG_LEVEL}={raw:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names_case_insensitively() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("loud"), None);
    }
}
