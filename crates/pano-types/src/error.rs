//! Error types for PANO.

use std::io;

/// Errors produced by the PANO toolkit.
#[derive(Debug, thiserror::Error)]
pub enum PanoError {
    #[error("config error: {0}")]
    Config(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("state error: {0}")]
    State(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, PanoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let e = PanoError::Config("grid needs rows or cols".into());
        assert_eq!(format!("{e}"), "config error: grid needs rows or cols");
    }

    #[test]
    fn layout_error_display() {
        let e = PanoError::Layout("cell size underflow".into());
        assert_eq!(format!("{e}"), "layout error: cell size underflow");
    }

    #[test]
    fn state_error_display() {
        let e = PanoError::State("unknown version 9".into());
        assert_eq!(format!("{e}"), "state error: unknown version 9");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: PanoError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let bad_toml = "this is [[[not valid toml";
        let toml_err = toml::from_str::<toml::Value>(bad_toml).unwrap_err();
        let e: PanoError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: PanoError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn error_is_debug() {
        let e = PanoError::Config("test".into());
        assert!(format!("{e:?}").contains("Config"));
    }

    #[test]
    fn result_alias_ok() {
        let r: Result<i32> = Ok(42);
        assert_eq!(r.unwrap(), 42);
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(PanoError::State("oops".into()));
        assert!(r.is_err());
    }
}
