//! The built-in service catalog and operator overrides.

use crate::error::RegistryError;
use crate::registry::ServiceRegistry;
use brk_domain::config::CatalogConfig;
use brk_domain::service::{ServiceDefinition, ServicePlan, ServiceVariable, VariableKind};
use tracing::{info, warn};

pub const STORAGE_ID: &str = "b9e4332e-b42b-4680-bda5-ea1506797474";
pub const PUBSUB_ID: &str = "628629e3-79f5-4255-b981-d14c6c7856be";
pub const BIGQUERY_ID: &str = "f80c0a3e-bd4d-4809-a900-b4e33a6450f1";
pub const SPANNER_ID: &str = "51b3e27e-d323-49ce-8c5f-1211e6409e82";
pub const CLOUDSQL_MYSQL_ID: &str = "4bc59b9a-8520-409f-85da-1c7552315863";

/// Builds the registry from the built-in catalog with `overrides` applied.
///
/// # Errors
/// Returns [`RegistryError::Configuration`] if an override targets an unknown service id,
/// or if the resulting catalog violates registry invariants.
pub fn builtin_registry(overrides: &CatalogConfig) -> Result<ServiceRegistry, RegistryError> {
    let services = apply_overrides(builtin_services(), overrides)?;
    let registry = ServiceRegistry::new(services)?;
    info!(services = registry.len(), "Built-in service catalog loaded");
    Ok(registry)
}

/// Applies operator overrides: disabled services are dropped, configuration entries are
/// merged key by key, and custom plans are appended.
///
/// # Errors
/// Returns [`RegistryError::Configuration`] if an override names a service id that is not
/// part of `services`.
pub fn apply_overrides(
    services: Vec<ServiceDefinition>,
    overrides: &CatalogConfig,
) -> Result<Vec<ServiceDefinition>, RegistryError> {
    if let Some(unknown) =
        overrides.services.keys().find(|id| !services.iter().any(|s| &s.id == *id))
    {
        return Err(RegistryError::configuration(format!(
            "override references unknown service id '{unknown}'"
        )));
    }

    let mut resolved = Vec::with_capacity(services.len());
    for mut service in services {
        let Some(over) = overrides.services.get(&service.id) else {
            resolved.push(service);
            continue;
        };

        if !over.enabled {
            warn!(service = %service.name, "Service disabled by configuration");
            continue;
        }

        service.config.extend(over.config.iter().map(|(k, v)| (k.clone(), v.clone())));
        service.plans.extend(over.custom_plans.iter().cloned());
        resolved.push(service);
    }

    Ok(resolved)
}

/// The static catalog shipped with the server.
#[must_use]
pub fn builtin_services() -> Vec<ServiceDefinition> {
    vec![storage(), pubsub(), bigquery(), spanner(), cloudsql_mysql()]
}

fn storage() -> ServiceDefinition {
    ServiceDefinition::new(STORAGE_ID, "google-storage")
        .display_name("Google Cloud Storage")
        .description("Unified object storage for developers and enterprises.")
        .long_description("Buckets with regional, multi-regional and coldline storage classes.")
        .documentation_url("https://cloud.google.com/storage/docs/overview")
        .support_url("https://cloud.google.com/storage/docs/getting-support")
        .tags(["gcp", "storage"])
        .metadata("provider", "Google")
        .plan(plan("e1d11f65-da66-46ad-977c-6d56513baf43", "standard", "Standard storage class."))
        .plan(plan("a42c1182-d1a0-4d40-82c1-28220518b360", "nearline", "Nearline storage class."))
        .plan(plan("1a1f4fe6-1904-44d0-838c-4c87a9490a6b", "coldline", "Coldline storage class."))
        .provision_input(string("name", "The name of the bucket."))
        .provision_input(string("location", "The location of the bucket.").default_value("US"))
        .bind_input(string("role", "The role for the service account.").required())
        .config("storage_class_default", "STANDARD")
        .config("force_delete", false)
}

fn pubsub() -> ServiceDefinition {
    ServiceDefinition::new(PUBSUB_ID, "google-pubsub")
        .display_name("Google PubSub")
        .description("A global service for real-time and reliable messaging and streaming data.")
        .documentation_url("https://cloud.google.com/pubsub/docs/")
        .tags(["gcp", "pubsub"])
        .metadata("provider", "Google")
        .plan(plan("622f4da3-8731-492a-af29-66a9146f8333", "default", "PubSub Default plan."))
        .provision_input(string("topic_name", "Name of the topic."))
        .provision_input(
            ServiceVariable::new("ack_deadline", VariableKind::Integer, "Ack deadline in seconds.")
                .default_value(10_i64),
        )
        .bind_input(string("role", "Role for the service account.").default_value("pubsub.editor"))
        .config("ack_deadline_default", 10_i64)
}

fn bigquery() -> ServiceDefinition {
    ServiceDefinition::new(BIGQUERY_ID, "google-bigquery")
        .display_name("Google BigQuery")
        .description("A fast, economical and fully managed data warehouse.")
        .documentation_url("https://cloud.google.com/bigquery/docs/")
        .tags(["gcp", "bigquery"])
        .metadata("provider", "Google")
        .plan(plan("10ff4e72-6e84-44eb-851f-bdb38a791914", "default", "BigQuery default plan."))
        .provision_input(string("name", "The name of the dataset."))
        .provision_input(string("location", "The location of the dataset.").default_value("US"))
        .config("default_table_expiration_ms", 0_i64)
}

fn spanner() -> ServiceDefinition {
    ServiceDefinition::new(SPANNER_ID, "google-spanner")
        .display_name("Google Spanner")
        .description("A horizontally scalable, globally consistent, relational database service.")
        .documentation_url("https://cloud.google.com/spanner/")
        .tags(["gcp", "spanner"])
        .metadata("provider", "Google")
        .plan(
            plan("44828436-cfbd-47ae-b4bc-48854564347b", "sandbox", "For testing, no SLA.")
                .property("num_nodes", "1"),
        )
        .plan(
            plan("0752b1ad-a784-4dcc-96eb-64149089a1c9", "minimal-production", "Small prod.")
                .property("num_nodes", "3"),
        )
        .provision_input(string("name", "A unique instance name.").required())
        .provision_input(
            string("location", "A configuration for the instance.")
                .default_value("regional-us-central1"),
        )
        .config("max_nodes", 10_i64)
}

fn cloudsql_mysql() -> ServiceDefinition {
    ServiceDefinition::new(CLOUDSQL_MYSQL_ID, "google-cloudsql-mysql")
        .display_name("Google CloudSQL for MySQL")
        .description("Google CloudSQL for MySQL is a fully-managed MySQL database service.")
        .documentation_url("https://cloud.google.com/sql/docs/")
        .tags(["gcp", "cloudsql", "mysql"])
        .metadata("provider", "Google")
        .plan(
            plan("7d8f9ade-30c1-4f96-a1a0-6b7d5b8e2a45", "mysql-db-f1-micro", "Shared-core MySQL.")
                .property("tier", "db-f1-micro"),
        )
        .provision_input(string("instance_name", "Name of the CloudSQL instance."))
        .provision_input(string("version", "Database engine version.").default_value("MYSQL_5_7"))
        .provision_input(
            ServiceVariable::new("disk_size", VariableKind::Integer, "Disk size in GB.")
                .default_value(10_i64),
        )
        .bind_input(string("jdbc_uri_format", "JDBC URI format.").default_value("%s"))
        .config("backups_enabled", true)
        .config("authorized_networks", vec!["0.0.0.0/0"])
}

fn plan(id: &str, name: &str, description: &str) -> ServicePlan {
    ServicePlan::new(id, name, description)
}

fn string(field_name: &str, details: &str) -> ServiceVariable {
    ServiceVariable::new(field_name, VariableKind::String, details)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_a_valid_registry() {
        let registry = builtin_registry(&CatalogConfig::default()).expect("builtin registry");
        assert_eq!(registry.len(), builtin_services().len());
        let storage = registry.lookup(STORAGE_ID).map(|s| s.name.as_str()).ok();
        assert_eq!(storage, Some("google-storage"));
    }
}
