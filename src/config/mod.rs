use std::env;

use chrono_tz::Tz;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_INPUT_TIMEZONE: &str = "Asia/Kolkata";
const DEFAULT_DISPLAY_TIMEZONE: &str = "Asia/Kolkata";
const DEFAULT_PORT: u16 = 3001;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Zone assumed for event timestamps that arrive without an offset.
    pub default_input_zone: Tz,
    /// Zone event timestamps are converted to in responses.
    pub display_zone: Tz,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/rollcall".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            default_input_zone: zone_from_env("DEFAULT_TIMEZONE", DEFAULT_INPUT_TIMEZONE),
            display_zone: zone_from_env("DISPLAY_TIMEZONE", DEFAULT_DISPLAY_TIMEZONE),
        }
    }
}

fn zone_from_env(var: &str, fallback: &str) -> Tz {
    let name = env::var(var).unwrap_or_else(|_| fallback.to_string());
    match name.parse::<Tz>() {
        Ok(zone) => zone,
        Err(_) => {
            tracing::warn!("Invalid time zone '{}' in {}, using {}", name, var, fallback);
            fallback.parse().expect("fallback zone name is valid")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_zone_names_parse() {
        assert!(DEFAULT_INPUT_TIMEZONE.parse::<Tz>().is_ok());
        assert!(DEFAULT_DISPLAY_TIMEZONE.parse::<Tz>().is_ok());
    }

    #[test]
    fn test_zone_from_env_falls_back_on_garbage() {
        std::env::set_var("ROLLCALL_TEST_TZ", "Not/AZone");
        let zone = zone_from_env("ROLLCALL_TEST_TZ", DEFAULT_INPUT_TIMEZONE);
        assert_eq!(zone, chrono_tz::Asia::Kolkata);
    }
}
