//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [merchant]
            id = "mid"
            key = "mkey"

            [endpoints]
            command = "https://api.example.com"
            query = "https://query.example.com"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.merchant.id.as_deref(), Some("mid"));
        assert_eq!(config.merchant.key.as_deref(), Some("mkey"));
        assert_eq!(
            config.endpoints.command.as_deref(),
            Some("https://api.example.com")
        );
        assert_eq!(
            config.endpoints.query.as_deref(),
            Some("https://query.example.com")
        );
    }

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.merchant.id.is_none());
        assert!(config.merchant.key.is_none());
        assert!(config.endpoints.command.is_none());
        assert!(config.endpoints.query.is_none());
    }

    #[test]
    fn parse_partial_section() {
        let toml = r#"
            [merchant]
            id = "mid"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.merchant.id.as_deref(), Some("mid"));
        assert!(config.merchant.key.is_none());
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_section_is_rejected() {
        let toml = r#"
            [retry]
            max_attempts = 10
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r#"
            [merchant]
            id = "mid"
            secret = "typo"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let toml = r"
            [merchant]
            id = 42
        ";

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn invalid_syntax_is_rejected() {
        assert!(TomlConfig::parse("[merchant\nid = ").is_err());
    }
}

mod redaction {
    use super::*;

    #[test]
    fn debug_hides_merchant_key() {
        let config = TomlConfig::parse(
            r#"
            [merchant]
            id = "mid"
            key = "very-secret"
        "#,
        )
        .unwrap();

        let debug = format!("{config:?}");
        assert!(debug.contains("mid"));
        assert!(!debug.contains("very-secret"));
    }
}

mod template {
    use super::*;

    #[test]
    fn template_is_valid_toml() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert!(config.merchant.id.is_none());
        assert!(config.merchant.key.is_none());
        assert_eq!(
            config.endpoints.command.as_deref(),
            Some("https://apisandbox.cieloecommerce.cielo.com.br")
        );
        assert_eq!(
            config.endpoints.query.as_deref(),
            Some("https://apiquerysandbox.cieloecommerce.cielo.com.br")
        );
    }

    #[test]
    fn template_documents_credentials() {
        let template = default_config_template();

        assert!(template.contains("[merchant]"));
        assert!(template.contains("CIELO_MERCHANT_ID"));
        assert!(template.contains("CIELO_MERCHANT_KEY"));
    }
}
