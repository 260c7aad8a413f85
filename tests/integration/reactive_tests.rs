//! Reactive contributor trees

#[cfg(test)]
mod tests {
    use crate::common::{
        ContributorFactory, GroupsFactory, ROOT, ReactiveContributorFactory, component,
        component_names, group_names,
    };
    use health_rollup::endpoint::{Blocking, Reactive};
    use health_rollup::{
        ApiVersion, ContributedHealth, Health, HealthEndpointGroups, HealthEndpointSupport,
        HealthError, ReactiveHealthContributor, Result, SecurityContext, Status,
    };
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    async fn evaluate(
        support: &HealthEndpointSupport<Reactive>,
        path: &[&str],
    ) -> Option<Result<ContributedHealth>> {
        let result = support
            .health(ApiVersion::V3, None, &SecurityContext::none(), false, path)
            .unwrap()?;
        Some(result.into_health().await)
    }

    fn support(
        contributors: Vec<(&str, ReactiveHealthContributor)>,
        groups: Arc<dyn HealthEndpointGroups>,
    ) -> HealthEndpointSupport<Reactive> {
        HealthEndpointSupport::new(ReactiveContributorFactory::registry(contributors), groups, None)
    }

    #[tokio::test]
    async fn test_reactive_aggregation() {
        let support = support(
            vec![
                ("a", ReactiveContributorFactory::up()),
                ("b", ReactiveContributorFactory::down()),
            ],
            GroupsFactory::standard(),
        );
        let health = evaluate(&support, ROOT).await.unwrap().unwrap();
        assert_eq!(health.status(), &Status::DOWN);
        assert_eq!(component_names(&health), vec!["a", "b"]);
        assert_eq!(group_names(&health), Some(vec!["alltheas".to_string()]));
    }

    #[tokio::test]
    async fn test_children_run_concurrently_and_keep_order() {
        let delay = Duration::from_millis(100);
        let support = support(
            vec![(
                "test",
                ReactiveContributorFactory::composite(vec![
                    ("first", ReactiveContributorFactory::delayed(Health::up().build(), delay)),
                    ("second", ReactiveContributorFactory::delayed(Health::up().build(), delay)),
                    ("third", ReactiveContributorFactory::down()),
                ]),
            )],
            GroupsFactory::standard(),
        );

        let start = Instant::now();
        let health = evaluate(&support, &["test"]).await.unwrap().unwrap();
        assert!(start.elapsed() < delay * 2);
        assert_eq!(component_names(&health), vec!["first", "second", "third"]);
        assert_eq!(health.status(), &Status::DOWN);
    }

    #[tokio::test]
    async fn test_resolution_happens_before_evaluation() {
        let support = support(
            vec![("a", ReactiveContributorFactory::up())],
            GroupsFactory::standard(),
        );
        assert!(evaluate(&support, &["a", "b"]).await.is_none());
        assert!(evaluate(&support, &["missing"]).await.is_none());
    }

    #[tokio::test]
    async fn test_failure_surfaces_when_awaited() {
        let failing = ReactiveHealthContributor::indicator(|| async {
            Err::<Health, _>(HealthError::contributor("timeout talking to broker"))
        });
        let support = support(
            vec![("ok", ReactiveContributorFactory::up()), ("broker", failing)],
            GroupsFactory::standard(),
        );
        let result = evaluate(&support, ROOT).await.unwrap();
        assert!(matches!(result, Err(HealthError::Contributor(message)) if message.contains("broker")));
    }

    #[tokio::test]
    async fn test_adapted_blocking_tree_matches_blocking_result() {
        let tree = || {
            ContributorFactory::composite(vec![
                ("db", ContributorFactory::down()),
                ("cache", ContributorFactory::nested("cache")),
            ])
        };
        let groups = GroupsFactory::of(
            GroupsFactory::visible(),
            vec![(
                "ready",
                GroupsFactory::members(|name| name != "test/cache/b"),
            )],
        );

        let blocking: HealthEndpointSupport<Blocking> = HealthEndpointSupport::new(
            ContributorFactory::registry(vec![("test", tree())]),
            Arc::clone(&groups),
            None,
        );
        let reactive = support(
            vec![("test", ReactiveHealthContributor::adapt(tree()))],
            groups,
        );

        let paths: [&[&str]; 3] = [ROOT, &["ready"], &["ready", "test", "cache"]];
        for path in paths {
            let expected = blocking
                .health(ApiVersion::V3, None, &SecurityContext::none(), false, path)
                .unwrap()
                .map(|result| result.into_health());
            let actual = match evaluate(&reactive, path).await {
                Some(result) => Some(result.unwrap()),
                None => None,
            };
            assert_eq!(actual, expected, "path {:?}", path);
        }

        let ready = evaluate(&reactive, &["ready", "test"]).await.unwrap().unwrap();
        assert_eq!(component_names(component(&ready, "cache")), vec!["a", "c"]);
    }
}
