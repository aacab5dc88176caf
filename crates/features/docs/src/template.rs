//! Page layout preparation.
//!
//! A layout is HTML with `{{ slot }}` markers. [`PageTemplate::compile`] resolves the
//! static slots (`title`, `stylesheet`) once and splits the layout around the single
//! `content` slot, so rendering a request only concatenates.

use crate::error::DocsError;
use crate::html::escape;
use brk_domain::config::DocsConfig;

/// Layout shared by every page.
pub const LAYOUT: &str = include_str!("../templates/layout.html");

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTemplate {
    head: String,
    tail: String,
}

impl PageTemplate {
    /// Compiles `layout` with the title and stylesheet from `config`.
    ///
    /// # Errors
    /// Returns [`DocsError::Setup`] if a marker is unterminated or names an unknown slot,
    /// if the `content` slot is missing or repeated, if the `stylesheet` slot is missing,
    /// or if the configured stylesheet is empty.
    pub fn compile(layout: &str, config: &DocsConfig) -> Result<Self, DocsError> {
        if config.stylesheet.trim().is_empty() {
            return Err(DocsError::setup("stylesheet reference must not be empty"));
        }

        // parts[0] precedes the content slot, parts[1] follows it.
        let mut parts = [String::with_capacity(layout.len()), String::new()];
        let mut current = 0;
        let mut has_stylesheet = false;
        let mut rest = layout;

        while let Some(start) = rest.find(OPEN) {
            parts[current].push_str(&rest[..start]);

            let after = &rest[start + OPEN.len()..];
            let Some(end) = after.find(CLOSE) else {
                return Err(DocsError::setup(format!("unterminated slot at byte {start}")));
            };

            match after[..end].trim() {
                "title" => parts[current].push_str(&escape(&config.title)),
                "stylesheet" => {
                    parts[current].push_str(&escape(&config.stylesheet));
                    has_stylesheet = true;
                }
                "content" if current == 0 => current = 1,
                "content" => return Err(DocsError::setup("content slot appears more than once")),
                other => return Err(DocsError::setup(format!("unknown slot '{other}'"))),
            }

            rest = &after[end + CLOSE.len()..];
        }

        if current == 0 {
            return Err(DocsError::setup("layout has no content slot"));
        }
        if !has_stylesheet {
            return Err(DocsError::setup("layout does not reference the stylesheet"));
        }
        parts[1].push_str(rest);

        let [head, tail] = parts;
        Ok(Self { head, tail })
    }

    /// Compiles the built-in layout.
    ///
    /// # Errors
    /// See [`PageTemplate::compile`].
    pub fn builtin(config: &DocsConfig) -> Result<Self, DocsError> {
        Self::compile(LAYOUT, config)
    }

    /// Wraps rendered `content` in the layout.
    #[must_use]
    pub fn wrap(&self, content: &str) -> String {
        let mut page = String::with_capacity(self.head.len() + content.len() + self.tail.len());
        page.push_str(&self.head);
        page.push_str(content);
        page.push_str(&self.tail);
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DocsConfig {
        DocsConfig {
            title: "Broker <docs>".to_owned(),
            stylesheet: "/css/bootstrap.min.css".to_owned(),
        }
    }

    #[test]
    fn builtin_layout_compiles() {
        let template = PageTemplate::builtin(&config()).expect("builtin layout");
        let page = template.wrap("<p>hello</p>");

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<html"));
        assert!(page.contains(r#"href="/css/bootstrap.min.css""#));
        assert!(page.contains("<title>Broker &lt;docs&gt;</title>"));
        assert!(page.contains("<p>hello</p>"));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn unknown_slot_is_rejected() {
        let layout = "<html>{{ stylesheet }}{{ footer }}{{ content }}";
        let err = PageTemplate::compile(layout, &config()).unwrap_err();
        assert!(err.to_string().contains("unknown slot 'footer'"));
    }

    #[test]
    fn unterminated_slot_is_rejected() {
        let err = PageTemplate::compile("<html>{{ stylesheet", &config()).unwrap_err();
        assert!(matches!(err, DocsError::Setup { .. }));
    }

    #[test]
    fn content_slot_is_required_once() {
        let missing = PageTemplate::compile("<html>{{ stylesheet }}", &config());
        assert!(missing.is_err());

        let twice =
            PageTemplate::compile("<html>{{stylesheet}}{{content}}{{content}}", &config());
        assert!(twice.is_err());
    }

    #[test]
    fn stylesheet_is_required() {
        assert!(PageTemplate::compile("<html>{{ content }}", &config()).is_err());

        let empty = DocsConfig { stylesheet: " ".to_owned(), ..config() };
        assert!(PageTemplate::builtin(&empty).is_err());
    }

    #[test]
    fn slots_after_content_land_in_the_tail() {
        let layout = "<html>{{content}}<footer>{{ title }}</footer>{{stylesheet}}";
        let template = PageTemplate::compile(layout, &config()).unwrap();
        assert_eq!(
            template.wrap("X"),
            "<html>X<footer>Broker &lt;docs&gt;</footer>/css/bootstrap.min.css"
        );
    }
}
