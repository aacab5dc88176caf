use brk_catalog::builtin::{self, PUBSUB_ID, SPANNER_ID, STORAGE_ID};
use brk_catalog::{RegistryError, RegistryErrorExt, ServiceRegistry};
use brk_domain::config::{CatalogConfig, ServiceOverride};
use brk_domain::service::{ConfigValue, ServiceDefinition, ServicePlan};
use proptest::prelude::*;

#[test]
fn duplicate_id_fails_construction() {
    let err = ServiceRegistry::new([
        ServiceDefinition::new("dup", "first"),
        ServiceDefinition::new("dup", "second"),
    ])
    .unwrap_err();

    assert!(matches!(err, RegistryError::Configuration { .. }));
    assert!(err.to_string().contains("duplicate service id 'dup'"));
}

#[test]
fn duplicate_name_fails_construction() {
    let err = ServiceRegistry::new([
        ServiceDefinition::new("a", "same"),
        ServiceDefinition::new("b", "same"),
    ])
    .unwrap_err();

    assert!(matches!(err, RegistryError::Configuration { .. }));
}

#[test]
fn lookup_of_unknown_id_is_not_found() {
    let registry =
        ServiceRegistry::new([ServiceDefinition::new("svc-1", "Example Service")]).unwrap();

    let err = registry.lookup("missing").unwrap_err();
    assert!(matches!(err, RegistryError::NotFound { .. }));

    let err = registry.lookup_by_name("missing").context("docs lookup").unwrap_err();
    assert_eq!(err.to_string(), "Service not found (docs lookup): no service named 'missing'");
}

#[test]
fn lookup_by_id_and_name_agree() {
    let registry = ServiceRegistry::new([
        ServiceDefinition::new("svc-1", "Example Service"),
        ServiceDefinition::new("svc-2", "Other Service"),
    ])
    .unwrap();

    let by_id = registry.lookup("svc-2").unwrap();
    let by_name = registry.lookup_by_name("Other Service").unwrap();
    assert_eq!(by_id, by_name);
}

#[test]
fn clones_share_the_same_snapshot() {
    let registry = builtin::builtin_registry(&CatalogConfig::default()).unwrap();
    let clone = registry.clone();

    assert!(std::ptr::eq(registry.get_all_services(), clone.get_all_services()));
}

#[test]
fn disabled_services_are_dropped() {
    let mut overrides = CatalogConfig::default();
    overrides
        .services
        .insert(PUBSUB_ID.to_owned(), ServiceOverride { enabled: false, ..Default::default() });

    let registry = builtin::builtin_registry(&overrides).unwrap();
    assert!(matches!(registry.lookup(PUBSUB_ID), Err(RegistryError::NotFound { .. })));
    assert_eq!(registry.len(), builtin::builtin_services().len() - 1);
}

#[test]
fn override_config_merges_over_defaults() {
    let mut over = ServiceOverride::default();
    over.config.insert("max_nodes".to_owned(), ConfigValue::Integer(32));
    over.config.insert("labels".to_owned(), ConfigValue::from(vec!["prod"]));
    over.custom_plans.push(ServicePlan::new("custom-1", "enterprise", "Operator plan."));

    let mut overrides = CatalogConfig::default();
    overrides.services.insert(SPANNER_ID.to_owned(), over);

    let registry = builtin::builtin_registry(&overrides).unwrap();
    let spanner = registry.lookup(SPANNER_ID).unwrap();
    assert_eq!(spanner.config["max_nodes"], ConfigValue::Integer(32));
    assert_eq!(spanner.config["labels"], ConfigValue::from(vec!["prod"]));
    assert!(spanner.plans.iter().any(|p| p.name == "enterprise"));

    let storage = registry.lookup(STORAGE_ID).unwrap();
    assert_eq!(storage.config["force_delete"], ConfigValue::Bool(false));
}

#[test]
fn override_for_unknown_service_is_a_configuration_error() {
    let mut overrides = CatalogConfig::default();
    overrides.services.insert("nope".to_owned(), ServiceOverride::default());

    let err = builtin::builtin_registry(&overrides).unwrap_err();
    assert!(matches!(err, RegistryError::Configuration { .. }));
}

#[test]
fn custom_plan_reusing_an_id_is_rejected() {
    let storage = builtin::builtin_services().into_iter().find(|s| s.id == STORAGE_ID).unwrap();
    let existing = storage.plans[0].id.clone();

    let mut over = ServiceOverride::default();
    over.custom_plans.push(ServicePlan::new(existing, "copy", ""));
    let mut overrides = CatalogConfig::default();
    overrides.services.insert(STORAGE_ID.to_owned(), over);

    assert!(builtin::builtin_registry(&overrides).is_err());
}

proptest! {
    #[test]
    fn enumeration_order_ignores_input_order(
        ids in prop::collection::btree_set("[a-z0-9-]{1,12}", 0..16),
        seed in any::<u64>(),
    ) {
        let defs: Vec<ServiceDefinition> =
            ids.iter().map(|id| ServiceDefinition::new(id.clone(), format!("name-{id}"))).collect();

        let mut shuffled = defs.clone();
        let len = shuffled.len().max(1);
        #[allow(clippy::cast_possible_truncation)]
        shuffled.rotate_left((seed as usize) % len);
        shuffled.reverse();

        let forward = ServiceRegistry::new(defs).unwrap();
        let backward = ServiceRegistry::new(shuffled).unwrap();

        prop_assert_eq!(forward.get_all_services(), backward.get_all_services());
        let sorted: Vec<&str> = ids.iter().map(String::as_str).collect();
        prop_assert_eq!(forward.ids().collect::<Vec<_>>(), sorted);
    }
}
