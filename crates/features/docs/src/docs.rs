//! The general documentation page: every service with its descriptive metadata.

use crate::document::{RenderedDocument, Renderer};
use crate::error::{DocsError, DocsErrorExt};
use crate::html::Escaped;
use crate::template::PageTemplate;
use brk_domain::service::{ServiceDefinition, ServiceVariable};
use std::fmt::Write;

#[derive(Debug, Clone)]
pub struct DocsRenderer {
    template: PageTemplate,
}

impl DocsRenderer {
    #[must_use]
    pub const fn new(template: PageTemplate) -> Self {
        Self { template }
    }
}

impl Renderer for DocsRenderer {
    fn render(&self, services: &[ServiceDefinition]) -> Result<RenderedDocument, DocsError> {
        let mut content = String::with_capacity(services.len() * 2048 + 128);
        write_catalog(&mut content, services).context("rendering service docs")?;
        Ok(RenderedDocument::html(self.template.wrap(&content)))
    }
}

fn write_catalog(out: &mut String, services: &[ServiceDefinition]) -> std::fmt::Result {
    writeln!(out, r#"<h1 class="mb-4">Service Documentation</h1>"#)?;
    if services.is_empty() {
        return writeln!(out, r#"<p class="text-muted">No services are registered.</p>"#);
    }

    for (index, service) in services.iter().enumerate() {
        write_service(out, index, service)?;
    }
    Ok(())
}

fn write_service(out: &mut String, index: usize, svc: &ServiceDefinition) -> std::fmt::Result {
    writeln!(out, r#"<section class="mb-5" id="service-{index}">"#)?;
    writeln!(out, "<h2>{}</h2>", Escaped(&svc.name))?;

    let title = svc.title();
    if title != svc.name {
        writeln!(out, r#"<p class="lead">{}</p>"#, Escaped(title))?;
    }
    if !svc.description.is_empty() {
        writeln!(out, "<p>{}</p>", Escaped(&svc.description))?;
    }
    if !svc.long_description.is_empty() {
        writeln!(out, "<p>{}</p>", Escaped(&svc.long_description))?;
    }
    if !svc.tags.is_empty() {
        write!(out, "<p>")?;
        for tag in &svc.tags {
            write!(out, r#"<span class="badge bg-secondary me-1">{}</span>"#, Escaped(tag))?;
        }
        writeln!(out, "</p>")?;
    }

    writeln!(out, "<ul>")?;
    writeln!(out, "<li>Bindable: {}</li>", if svc.bindable { "yes" } else { "no" })?;
    for (label, url) in [
        ("Documentation", &svc.documentation_url),
        ("Support", &svc.support_url),
        ("Image", &svc.image_url),
    ] {
        if let Some(url) = url {
            writeln!(out, r#"<li>{label}: <a href="{0}">{0}</a></li>"#, Escaped(url))?;
        }
    }
    writeln!(out, "</ul>")?;

    if !svc.metadata.is_empty() {
        writeln!(out, "<h3>Metadata</h3>")?;
        writeln!(out, r#"<dl class="row">"#)?;
        for (key, value) in &svc.metadata {
            writeln!(
                out,
                r#"<dt class="col-sm-3">{}</dt><dd class="col-sm-9">{}</dd>"#,
                Escaped(key),
                Escaped(value)
            )?;
        }
        writeln!(out, "</dl>")?;
    }

    write_plans(out, svc)?;
    write_variables(out, "Provision Inputs", &svc.provision_inputs)?;
    write_variables(out, "Bind Inputs", &svc.bind_inputs)?;

    writeln!(out, "</section>")
}

fn write_plans(out: &mut String, svc: &ServiceDefinition) -> std::fmt::Result {
    writeln!(out, "<h3>Plans</h3>")?;
    if svc.plans.is_empty() {
        return writeln!(out, r#"<p class="text-muted">No plans.</p>"#);
    }

    writeln!(out, r#"<table class="table table-sm">"#)?;
    write_head(out, &["Name", "ID", "Description", "Properties"])?;
    writeln!(out, "<tbody>")?;
    for plan in &svc.plans {
        write!(
            out,
            "<tr><td>{}</td><td><code>{}</code></td><td>{}</td><td>",
            Escaped(&plan.name),
            Escaped(&plan.id),
            Escaped(&plan.description)
        )?;
        for (key, value) in &plan.properties {
            write!(out, "<code>{}: {}</code> ", Escaped(key), Escaped(value))?;
        }
        writeln!(out, "</td></tr>")?;
    }
    writeln!(out, "</tbody></table>")
}

fn write_head(out: &mut String, columns: &[&str]) -> std::fmt::Result {
    write!(out, "<thead><tr>")?;
    for column in columns {
        write!(out, "<th>{column}</th>")?;
    }
    writeln!(out, "</tr></thead>")
}

fn write_variables(out: &mut String, title: &str, vars: &[ServiceVariable]) -> std::fmt::Result {
    writeln!(out, "<h3>{title}</h3>")?;
    if vars.is_empty() {
        return writeln!(out, r#"<p class="text-muted">None.</p>"#);
    }

    writeln!(out, r#"<table class="table table-sm">"#)?;
    write_head(out, &["Field", "Type", "Details", "Required", "Default"])?;
    writeln!(out, "<tbody>")?;
    for var in vars {
        let default = var.default.as_ref().map(ToString::to_string).unwrap_or_default();
        writeln!(
            out,
            concat!(
                "<tr><td><code>{}</code></td><td>{}</td><td>{}</td>",
                "<td>{}</td><td><code>{}</code></td></tr>"
            ),
            Escaped(&var.field_name),
            var.kind.as_str(),
            Escaped(&var.details),
            if var.required { "yes" } else { "no" },
            Escaped(&default)
        )?;
    }
    writeln!(out, "</tbody></table>")
}
