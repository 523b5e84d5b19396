//! Base plugin trait definition.
//!
//! Extractors and OCR backends share this lifecycle: a registry calls
//! [`initialize`](Plugin::initialize) before accepting a plugin and
//! [`shutdown`](Plugin::shutdown) when removing it.

use crate::Result;

pub trait Plugin: Send + Sync {
    /// Unique, whitespace-free name used as the registry key.
    fn name(&self) -> &str;

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    fn description(&self) -> &str {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeronError;

    struct Bare;

    impl Plugin for Bare {
        fn name(&self) -> &str {
            "bare"
        }
    }

    struct Unavailable;

    impl Plugin for Unavailable {
        fn name(&self) -> &str {
            "unavailable"
        }

        fn initialize(&self) -> Result<()> {
            Err(HeronError::MissingDependency("engine not installed".to_string()))
        }
    }

    #[test]
    fn test_defaults() {
        let plugin = Bare;
        assert_eq!(plugin.version(), env!("CARGO_PKG_VERSION"));
        assert!(plugin.initialize().is_ok());
        assert!(plugin.shutdown().is_ok());
        assert_eq!(plugin.description(), "");
    }

    #[test]
    fn test_initialize_failure_is_reported() {
        assert!(matches!(Unavailable.initialize(), Err(HeronError::MissingDependency(_))));
    }
}
