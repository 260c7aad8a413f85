//! Group-scoped aggregation over blocking contributor trees

#[cfg(test)]
mod tests {
    use crate::common::{
        ContributorFactory, GroupsFactory, ROOT, component, component_names, group_names,
    };
    use health_rollup::endpoint::Blocking;
    use health_rollup::{
        ApiVersion, ContributedHealth, HealthEndpoint, HealthEndpointGroups, HealthEndpointSupport,
        HealthError, HealthResult, IncludeExcludeMemberPredicate, SecurityContext, Show,
        SimpleStatusAggregator, Status, StatusAggregator,
    };
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn support(
        registry: Vec<(&str, health_rollup::HealthContributor)>,
        groups: Arc<dyn HealthEndpointGroups>,
    ) -> HealthEndpointSupport<Blocking> {
        HealthEndpointSupport::new(ContributorFactory::registry(registry), groups, None)
    }

    fn get(
        support: &HealthEndpointSupport<Blocking>,
        path: &[&str],
    ) -> Option<HealthResult<ContributedHealth>> {
        support
            .health(ApiVersion::V3, None, &SecurityContext::none(), false, path)
            .unwrap()
    }

    // ==================== Aggregation ====================

    /// Root status is the policy applied to every reachable leaf status
    #[test]
    fn test_root_status_is_policy_over_leaf_statuses() {
        let degraded = Status::new("DEGRADED").unwrap();
        let leaves = [Status::UP, degraded.clone(), Status::UP, Status::OUT_OF_SERVICE];
        let tree = ContributorFactory::composite(vec![
            ("one", ContributorFactory::status(leaves[0].clone())),
            (
                "inner",
                ContributorFactory::composite(vec![
                    ("two", ContributorFactory::status(leaves[1].clone())),
                    ("three", ContributorFactory::status(leaves[2].clone())),
                ]),
            ),
        ]);
        let aggregator = SimpleStatusAggregator::new(["DOWN", "OUT_OF_SERVICE", "DEGRADED", "UP"]);
        let primary = GroupsFactory::visible().with_status_aggregator(Arc::new(aggregator.clone()));
        let support = support(
            vec![
                ("tree", tree),
                ("four", ContributorFactory::status(leaves[3].clone())),
            ],
            GroupsFactory::of(primary, Vec::new()),
        );

        let result = get(&support, ROOT).unwrap();
        let expected: HashSet<Status> = leaves.iter().cloned().collect();
        assert_eq!(result.health().status(), &aggregator.aggregate_status(&expected));
        assert_eq!(result.health().status(), &Status::OUT_OF_SERVICE);
        assert_eq!(component(result.health(), "tree").status(), &degraded);
    }

    /// `{"a": UP, "b": DOWN}` with DOWN ranked above UP
    #[test]
    fn test_down_outranks_up() {
        let support = support(
            vec![("a", ContributorFactory::up()), ("b", ContributorFactory::down())],
            GroupsFactory::standard(),
        );
        let result = get(&support, ROOT).unwrap();
        assert_eq!(result.health().status(), &Status::DOWN);
        assert_eq!(component(result.health(), "a").status(), &Status::UP);
        assert_eq!(component(result.health(), "b").status(), &Status::DOWN);
    }

    #[test]
    fn test_single_leaf_scenario() {
        let groups = GroupsFactory::standard();
        let support = support(vec![("test", ContributorFactory::up())], Arc::clone(&groups));

        let root = get(&support, ROOT).unwrap();
        assert!(Arc::ptr_eq(root.group(), &groups.primary()));
        assert_eq!(root.health().status(), &Status::UP);
        assert_eq!(component_names(root.health()), vec!["test"]);
        assert_eq!(group_names(root.health()), Some(vec!["alltheas".to_string()]));

        let leaf = get(&support, &["test"]).unwrap();
        let details = leaf.health().as_health().unwrap().details();
        assert_eq!(details.get("spring").unwrap(), "boot");
    }

    // ==================== Resolution ====================

    #[test]
    fn test_unresolvable_path_is_none() {
        let support = support(vec![("a", ContributorFactory::up())], GroupsFactory::standard());
        assert!(get(&support, &["a", "b"]).is_none());
        assert!(get(&support, &["missing"]).is_none());
    }

    #[test]
    fn test_fully_filtered_composite_is_none() {
        let groups = GroupsFactory::of(
            GroupsFactory::visible(),
            vec![("nothing", GroupsFactory::members(|_| false))],
        );
        let support = support(
            vec![("test", ContributorFactory::nested("test"))],
            groups,
        );
        assert!(get(&support, &["nothing"]).is_none());
        assert!(get(&support, &["nothing", "test"]).is_none());
        assert!(get(&support, ROOT).is_some());
    }

    #[test]
    fn test_nested_exclusion_through_group_path() {
        let groups = GroupsFactory::of(
            GroupsFactory::visible(),
            vec![(
                "testGroup",
                GroupsFactory::members(|name| {
                    name.starts_with("test") && name != "test/spring-1/b"
                }),
            )],
        );
        let support = support(
            vec![(
                "test",
                ContributorFactory::composite(vec![
                    ("spring-1", ContributorFactory::nested("spring-1")),
                    ("spring-2", ContributorFactory::nested("spring-2")),
                ]),
            )],
            groups,
        );

        let result = get(&support, &["testGroup", "test"]).unwrap();
        let health = result.health();
        assert_eq!(component_names(component(health, "spring-1")), vec!["a", "c"]);
        assert_eq!(component_names(component(health, "spring-2")), vec!["a", "b", "c"]);
        let a = component(component(health, "spring-1"), "a").as_health().unwrap();
        assert_eq!(a.details().get("hello").unwrap(), "spring-1-a");

        assert!(get(&support, &["testGroup", "test", "spring-1", "b"]).is_none());
    }

    // ==================== Visibility ====================

    #[test]
    fn test_components_shown_by_exact_child_names() {
        let support = support(
            vec![
                ("db", ContributorFactory::up()),
                ("cache", ContributorFactory::nested("cache")),
            ],
            GroupsFactory::standard(),
        );
        let root = get(&support, ROOT).unwrap();
        assert_eq!(component_names(root.health()), vec!["db", "cache"]);
        assert_eq!(
            component_names(component(root.health(), "cache")),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_components_hidden_from_anonymous_callers() {
        let primary = GroupsFactory::visible().with_show_components(Show::WhenAuthorized);
        let support = support(
            vec![("db", ContributorFactory::up())],
            GroupsFactory::of(primary, Vec::new()),
        );

        let anonymous = get(&support, ROOT).unwrap();
        assert_eq!(anonymous.health().status(), &Status::UP);
        assert!(component_names(anonymous.health()).is_empty());
        assert!(get(&support, &["db"]).is_none());

        let user = SecurityContext::authenticated("alice");
        let result = support
            .health(ApiVersion::V3, None, &user, false, ROOT)
            .unwrap()
            .unwrap();
        assert_eq!(component_names(result.health()), vec!["db"]);
    }

    #[test]
    fn test_details_require_role() {
        let primary = GroupsFactory::visible()
            .with_show_details(Show::WhenAuthorized)
            .with_show_components(Show::Always)
            .with_roles(["ops"]);
        let support = support(
            vec![("db", ContributorFactory::up())],
            GroupsFactory::of(primary, Vec::new()),
        );

        let user = SecurityContext::authenticated("alice");
        let result = support
            .health(ApiVersion::V3, None, &user, false, &["db"])
            .unwrap()
            .unwrap();
        assert!(result.health().as_health().unwrap().details().is_empty());

        let operator = SecurityContext::authenticated("bob").with_role("ops");
        let result = support
            .health(ApiVersion::V3, None, &operator, false, &["db"])
            .unwrap()
            .unwrap();
        assert!(!result.health().as_health().unwrap().details().is_empty());
    }

    #[test]
    fn test_group_names_only_at_primary_root() {
        let support = support(
            vec![("atest", ContributorFactory::nested("atest"))],
            GroupsFactory::standard(),
        );
        assert!(group_names(get(&support, ROOT).unwrap().health()).is_some());
        assert!(group_names(get(&support, &["alltheas"]).unwrap().health()).is_none());
        assert!(group_names(get(&support, &["atest"]).unwrap().health()).is_none());
    }

    #[test]
    fn test_include_exclude_group() {
        let members = IncludeExcludeMemberPredicate::including(["cache"]).excluding(["cache/b"]);
        let group = health_rollup::DefaultHealthEndpointGroup::new(members)
            .with_show_details(Show::Always);
        let support = support(
            vec![
                ("db", ContributorFactory::down()),
                ("cache", ContributorFactory::nested("cache")),
            ],
            GroupsFactory::of(GroupsFactory::visible(), vec![("cache", group)]),
        );
        let result = get(&support, &["cache"]).unwrap();
        assert_eq!(result.health().status(), &Status::UP);
        assert_eq!(component_names(result.health()), vec!["cache"]);
        assert_eq!(
            component_names(component(result.health(), "cache")),
            vec!["a", "c"]
        );
    }

    // ==================== Evaluation ====================

    #[test]
    fn test_only_admitted_leaves_are_evaluated() {
        let admitted = Arc::new(AtomicUsize::new(0));
        let filtered = Arc::new(AtomicUsize::new(0));
        let groups = GroupsFactory::of(
            GroupsFactory::visible(),
            vec![("first", GroupsFactory::members(|name| name == "first"))],
        );
        let support = support(
            vec![
                ("first", ContributorFactory::counting(Arc::clone(&admitted))),
                ("second", ContributorFactory::counting(Arc::clone(&filtered))),
            ],
            groups,
        );
        assert!(get(&support, &["first"]).is_some());
        assert_eq!(admitted.load(Ordering::SeqCst), 1);
        assert_eq!(filtered.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failing_leaf_fails_request() {
        let support = support(
            vec![
                ("ok", ContributorFactory::up()),
                ("broken", ContributorFactory::failing("connection refused")),
            ],
            GroupsFactory::standard(),
        );
        let result = support.health(ApiVersion::V3, None, &SecurityContext::none(), false, ROOT);
        assert!(matches!(result, Err(HealthError::Contributor(_))));
        assert!(get(&support, &["ok"]).is_some());
    }

    // ==================== HealthEndpoint ====================

    #[test]
    fn test_health_endpoint_shows_everything() {
        let primary = health_rollup::DefaultHealthEndpointGroup::new(
            IncludeExcludeMemberPredicate::all(),
        );
        let endpoint = HealthEndpoint::new(
            ContributorFactory::registry(vec![("db", ContributorFactory::up())]),
            GroupsFactory::of(primary, Vec::new()),
            None,
        );
        let health = endpoint.health().unwrap();
        assert_eq!(component_names(&health), vec!["db"]);
        let db = endpoint.health_for_path(&["db"]).unwrap().unwrap();
        assert_eq!(db.as_health().unwrap().details().get("spring").unwrap(), "boot");
        assert!(endpoint.health_for_path(&["missing"]).unwrap().is_none());
    }

    #[test]
    fn test_health_endpoint_without_contributors_is_up() {
        let endpoint = HealthEndpoint::new(
            ContributorFactory::registry(Vec::new()),
            GroupsFactory::standard(),
            None,
        );
        let health = endpoint.health().unwrap();
        assert_eq!(health.status(), &Status::UP);
        assert!(health.as_health().is_some());
    }
}
