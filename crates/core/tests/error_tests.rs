// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants and Display formatting
// ═══════════════════════════════════════════════════════════════════

use coinfolio_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn unauthorized() {
        assert_eq!(CoreError::Unauthorized.to_string(), "Unauthorized");
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("Symbol must be 2-40 characters".into());
        assert_eq!(
            err.to_string(),
            "Invalid input: Symbol must be 2-40 characters"
        );
    }

    #[test]
    fn validation_error_empty_message() {
        let err = CoreError::ValidationError(String::new());
        assert_eq!(err.to_string(), "Invalid input: ");
    }

    #[test]
    fn api() {
        let err = CoreError::Api {
            provider: "CoinGecko".into(),
            message: "Failed to parse spot prices".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error (CoinGecko): Failed to parse spot prices"
        );
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection reset".into());
        assert_eq!(err.to_string(), "Network error: connection reset");
    }

    #[test]
    fn repository() {
        let err = CoreError::Repository("row not found".into());
        assert_eq!(err.to_string(), "Repository error: row not found");
    }
}

// ── Trait plumbing ──────────────────────────────────────────────────

mod plumbing {
    use super::*;

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<CoreError>();
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoreError>();
    }

    #[test]
    fn debug_includes_variant() {
        let err = CoreError::Unauthorized;
        assert!(format!("{err:?}").contains("Unauthorized"));
    }
}
