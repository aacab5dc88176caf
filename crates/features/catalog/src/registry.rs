use crate::error::RegistryError;
use brk_domain::service::ServiceDefinition;
use fxhash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
struct RegistryInner {
    services: Vec<ServiceDefinition>,
    by_id: FxHashMap<String, usize>,
    by_name: FxHashMap<String, usize>,
}

/// Read-only catalog of service definitions.
///
/// Validated once at construction and never mutated afterwards, so clones are cheap
/// `Arc` handles that any number of request handlers can read concurrently.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    inner: Arc<RegistryInner>,
}

impl ServiceRegistry {
    /// Builds a registry from the given definitions.
    ///
    /// Definitions are stored sorted by id, so enumeration order does not depend on the
    /// order they were supplied in.
    ///
    /// # Errors
    /// Returns [`RegistryError::Configuration`] if any id or name is empty or shared by two
    /// definitions, or if a definition repeats a plan id.
    pub fn new<I>(definitions: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = ServiceDefinition>,
    {
        let mut services: Vec<ServiceDefinition> = definitions.into_iter().collect();
        services.sort_by(|a, b| a.id.cmp(&b.id));

        let mut by_id = FxHashMap::default();
        let mut by_name = FxHashMap::default();

        for (index, service) in services.iter().enumerate() {
            validate(service)?;

            if by_id.insert(service.id.clone(), index).is_some() {
                return Err(RegistryError::configuration(format!(
                    "duplicate service id '{}'",
                    service.id
                )));
            }
            if by_name.insert(service.name.clone(), index).is_some() {
                return Err(RegistryError::configuration(format!(
                    "duplicate service name '{}'",
                    service.name
                )));
            }
        }

        debug!(services = services.len(), "Service registry constructed");

        Ok(Self { inner: Arc::new(RegistryInner { services, by_id, by_name }) })
    }

    /// An empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                services: Vec::new(),
                by_id: FxHashMap::default(),
                by_name: FxHashMap::default(),
            }),
        }
    }

    /// Every registered definition, ordered by id.
    #[must_use]
    pub fn get_all_services(&self) -> &[ServiceDefinition] {
        &self.inner.services
    }

    /// Finds a definition by id.
    ///
    /// # Errors
    /// Returns [`RegistryError::NotFound`] if no definition has that id.
    pub fn lookup(&self, id: &str) -> Result<&ServiceDefinition, RegistryError> {
        self.inner
            .by_id
            .get(id)
            .map(|&index| &self.inner.services[index])
            .ok_or_else(|| RegistryError::not_found(format!("no service with id '{id}'")))
    }

    /// Finds a definition by its unique name.
    ///
    /// # Errors
    /// Returns [`RegistryError::NotFound`] if no definition has that name.
    pub fn lookup_by_name(&self, name: &str) -> Result<&ServiceDefinition, RegistryError> {
        self.inner
            .by_name
            .get(name)
            .map(|&index| &self.inner.services[index])
            .ok_or_else(|| RegistryError::not_found(format!("no service named '{name}'")))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.inner.services.iter().map(|s| s.id.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.services.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.services.is_empty()
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

fn validate(service: &ServiceDefinition) -> Result<(), RegistryError> {
    if service.id.trim().is_empty() {
        return Err(RegistryError::configuration(format!(
            "service '{}' has an empty id",
            service.name
        )));
    }
    if service.name.trim().is_empty() {
        return Err(RegistryError::configuration(format!(
            "service '{}' has an empty name",
            service.id
        )));
    }

    let mut plan_ids = FxHashSet::default();
    for plan in &service.plans {
        if !plan_ids.insert(plan.id.as_str()) {
            return Err(RegistryError::configuration(format!(
                "service '{}' declares plan id '{}' twice",
                service.id, plan.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use brk_domain::service::ServicePlan;

    fn def(id: &str, name: &str) -> ServiceDefinition {
        ServiceDefinition::new(id, name)
    }

    #[test]
    fn enumeration_is_sorted_by_id() {
        let defs = [def("c", "gamma"), def("a", "alpha"), def("b", "beta")];
        let registry = ServiceRegistry::new(defs).expect("valid registry");

        let ids: Vec<&str> = registry.ids().collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn blank_identity_is_rejected() {
        let err = ServiceRegistry::new([def(" ", "name")]).unwrap_err();
        assert!(matches!(err, RegistryError::Configuration { .. }));

        let err = ServiceRegistry::new([def("id", "")]).unwrap_err();
        assert!(matches!(err, RegistryError::Configuration { .. }));
    }

    #[test]
    fn repeated_plan_id_is_rejected() {
        let service = def("svc", "svc")
            .plan(ServicePlan::new("p", "small", ""))
            .plan(ServicePlan::new("p", "large", ""));

        let err = ServiceRegistry::new([service]).unwrap_err();
        assert!(err.to_string().contains("plan id 'p'"));
    }

    #[test]
    fn empty_registry_has_no_services() {
        let registry = ServiceRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.get_all_services().is_empty());
    }
}
