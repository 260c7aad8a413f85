//! Configuration driving a live endpoint

#[cfg(test)]
mod tests {
    use crate::common::{ContributorFactory, ROOT, component_names};
    use health_rollup::endpoint::Blocking;
    use health_rollup::health::STATUS_OK;
    use health_rollup::{
        ApiVersion, Config, HealthEndpointWebExtension, HealthError, SecurityContext, Status,
        WebServerNamespace,
    };
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    const CONFIG: &str = r#"
health:
  show_details: when_authorized
  show_components: always
  roles: [ops]
  status:
    order: [down, degraded, up]
    http_mapping:
      degraded: 429
  group:
    readiness:
      include: [db]
      additional_path: "server:/readyz"
    liveness:
      include: [ping]
      show_details: always
"#;

    fn extension(config: &Config) -> HealthEndpointWebExtension {
        let registry = ContributorFactory::registry(vec![
            ("db", ContributorFactory::up()),
            ("ping", ContributorFactory::up()),
            (
                "cache",
                ContributorFactory::status(Status::new("DEGRADED").unwrap()),
            ),
        ]);
        config
            .health()
            .validate_group_membership::<Blocking>(&registry)
            .unwrap();
        let groups = Arc::new(config.health().build_groups().unwrap());
        HealthEndpointWebExtension::new(
            registry,
            groups,
            config.health().slow_indicator_threshold(),
        )
    }

    #[test]
    fn test_configured_status_order_and_mapping() {
        let config = Config::from_yaml_str(CONFIG).unwrap();
        let extension = extension(&config);
        let response = extension
            .health(ApiVersion::V3, None, &SecurityContext::none(), false, ROOT)
            .unwrap();
        assert_eq!(response.body().unwrap().status().code(), "DEGRADED");
        assert_eq!(response.status(), 429);
        assert_eq!(component_names(response.body().unwrap()), vec!["db", "ping", "cache"]);
    }

    #[test]
    fn test_configured_groups() {
        let config = Config::from_yaml_str(CONFIG).unwrap();
        let extension = extension(&config);
        let anonymous = SecurityContext::none();

        let readiness = extension
            .health(
                ApiVersion::V3,
                Some(WebServerNamespace::Server),
                &anonymous,
                false,
                &["readyz"],
            )
            .unwrap();
        assert_eq!(readiness.status(), STATUS_OK);
        assert_eq!(component_names(readiness.body().unwrap()), vec!["db"]);

        let db = extension
            .health(ApiVersion::V3, None, &anonymous, false, &["readiness", "db"])
            .unwrap();
        assert!(db.body().unwrap().as_health().unwrap().details().is_empty());

        let ping = extension
            .health(ApiVersion::V3, None, &anonymous, false, &["liveness", "ping"])
            .unwrap();
        assert!(!ping.body().unwrap().as_health().unwrap().details().is_empty());

        let operator = SecurityContext::authenticated("bob").with_role("ops");
        let db = extension
            .health(ApiVersion::V3, None, &operator, false, &["readiness", "db"])
            .unwrap();
        assert!(!db.body().unwrap().as_health().unwrap().details().is_empty());
    }

    #[test]
    fn test_membership_validation_rejects_unknown_members() {
        let yaml = "health:\n  group:\n    ready:\n      include: [db, queue]\n";
        let config = Config::from_yaml_str(yaml).unwrap();
        let registry = ContributorFactory::registry(vec![("db", ContributorFactory::down())]);
        let result = config
            .health()
            .validate_group_membership::<Blocking>(&registry);
        assert!(matches!(result, Err(HealthError::Validation(_))));
    }

    #[tokio::test]
    async fn test_config_file_end_to_end() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();
        let config = Config::from_file(file.path()).await.unwrap();

        let extension = extension(&config);
        let liveness = extension
            .health(ApiVersion::V3, None, &SecurityContext::none(), false, &["liveness"])
            .unwrap();
        assert_eq!(liveness.status(), STATUS_OK);
        assert_eq!(component_names(liveness.body().unwrap()), vec!["ping"]);
        assert_eq!(config.health().slow_indicator_threshold_ms, 10_000);
    }
}
