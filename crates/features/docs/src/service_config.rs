//! The effective-configuration page.
//!
//! One `<section>` per service: the name as `<h2>`, the id in `<code>`, then a `<dl>` with
//! every configuration key in sorted order. Lists render as `<ul>` and maps as nested
//! `<dl>`, so every field is visible no matter how deep it sits.

use crate::document::{RenderedDocument, Renderer};
use crate::error::{DocsError, DocsErrorExt};
use crate::html::Escaped;
use crate::template::PageTemplate;
use brk_domain::service::{ConfigValue, ServiceDefinition};
use std::collections::BTreeMap;
use std::fmt::Write;

#[derive(Debug, Clone)]
pub struct ServiceConfigRenderer {
    template: PageTemplate,
}

impl ServiceConfigRenderer {
    #[must_use]
    pub const fn new(template: PageTemplate) -> Self {
        Self { template }
    }
}

impl Renderer for ServiceConfigRenderer {
    fn render(&self, services: &[ServiceDefinition]) -> Result<RenderedDocument, DocsError> {
        let mut content = String::with_capacity(services.len() * 512 + 128);
        write_services(&mut content, services).context("rendering service configuration")?;
        Ok(RenderedDocument::html(self.template.wrap(&content)))
    }
}

fn write_services(out: &mut String, services: &[ServiceDefinition]) -> std::fmt::Result {
    writeln!(out, r#"<h1 class="mb-4">Service Configuration</h1>"#)?;
    if services.is_empty() {
        return writeln!(out, r#"<p class="text-muted">No services are registered.</p>"#);
    }

    for (index, svc) in services.iter().enumerate() {
        writeln!(out, r#"<section class="mb-4" id="config-{index}">"#)?;
        writeln!(out, "<h2>{}</h2>", Escaped(&svc.name))?;
        writeln!(out, r#"<p>ID: <code>{}</code></p>"#, Escaped(&svc.id))?;

        if svc.config.is_empty() {
            writeln!(out, r#"<p class="text-muted">No configuration.</p>"#)?;
        } else {
            write_map(out, &svc.config)?;
        }
        writeln!(out, "</section>")?;
    }
    Ok(())
}

fn write_map(out: &mut String, entries: &BTreeMap<String, ConfigValue>) -> std::fmt::Result {
    writeln!(out, r#"<dl class="row">"#)?;
    for (key, value) in entries {
        write!(out, r#"<dt class="col-sm-3"><code>{}</code></dt>"#, Escaped(key))?;
        write!(out, r#"<dd class="col-sm-9">"#)?;
        write_value(out, value)?;
        writeln!(out, "</dd>")?;
    }
    writeln!(out, "</dl>")
}

fn write_value(out: &mut String, value: &ConfigValue) -> std::fmt::Result {
    match value {
        ConfigValue::List(items) if !items.is_empty() => {
            writeln!(out, r#"<ul class="mb-0">"#)?;
            for item in items {
                write!(out, "<li>")?;
                write_value(out, item)?;
                writeln!(out, "</li>")?;
            }
            write!(out, "</ul>")
        }
        ConfigValue::Map(entries) if !entries.is_empty() => write_map(out, entries),
        scalar => write!(out, "{}", Escaped(&scalar.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brk_domain::config::DocsConfig;

    fn page(services: &[ServiceDefinition]) -> String {
        let renderer =
            ServiceConfigRenderer::new(PageTemplate::builtin(&DocsConfig::default()).unwrap());
        String::from_utf8(renderer.render(services).unwrap().body).unwrap()
    }

    #[test]
    fn name_id_and_every_key_are_listed() {
        let mut nested = BTreeMap::new();
        nested.insert("inner_key".to_owned(), ConfigValue::from("inner-value"));

        let svc = ServiceDefinition::new("svc-1", "Example Service")
            .config("max_instances", 4_i64)
            .config("regions", vec!["us-central1", "europe-west1"])
            .config("limits", nested);
        let body = page(&[svc]);

        assert_eq!(body.matches("Example Service").count(), 1);
        assert_eq!(body.matches("svc-1").count(), 1);
        let needles = [
            "max_instances",
            "4",
            "regions",
            "us-central1",
            "europe-west1",
            "limits",
            "inner_key",
            "inner-value",
        ];
        for needle in needles {
            assert!(body.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn keys_are_sorted() {
        let svc = ServiceDefinition::new("svc-1", "s").config("zeta", 1_i64).config("alpha", 2_i64);
        let body = page(&[svc]);

        let alpha = body.find("alpha").unwrap();
        let zeta = body.find("zeta").unwrap();
        assert!(alpha < zeta);
    }

    #[test]
    fn service_without_config_says_so() {
        let body = page(&[ServiceDefinition::new("svc-1", "bare")]);
        assert!(body.contains("No configuration."));
    }

    #[test]
    fn empty_collections_render_inline() {
        let svc = ServiceDefinition::new("svc-1", "s")
            .config("empty_list", ConfigValue::List(Vec::new()))
            .config("empty_map", ConfigValue::Map(BTreeMap::new()));
        let body = page(&[svc]);

        assert!(body.contains("[]"));
        assert!(body.contains("{}"));
    }
}
