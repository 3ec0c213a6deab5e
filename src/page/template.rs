//! Placeholder substitution for page templates.
//!
//! Supported placeholders: `{{ current_locale }}`, `{{ locales }}`,
//! `{{ preferred_locale }}`, `{{ preferred_locale_list }}`. Unknown
//! placeholders are left untouched. The `<html>` tag gets a `lang`
//! attribute unless it already has one.

use crate::page::PageContext;

pub fn render(template: &str, ctx: &PageContext) -> String {
    let rendered = template
        .replace("{{ current_locale }}", &ctx.current_locale)
        .replace("{{ locales }}", &ctx.locales.join(", "))
        .replace("{{ preferred_locale }}", ctx.preferred.primary_label())
        .replace("{{ preferred_locale_list }}", &ctx.preferred.list_label());
    set_html_lang(rendered, &ctx.current_locale)
}

fn set_html_lang(mut html: String, lang: &str) -> String {
    let Some(start) = html.find("<html") else {
        return html;
    };
    let after = start + "<html".len();
    // Skip `<htmlfoo>`-like tags.
    if !matches!(html[after..].chars().next(), Some('>') | Some(' ') | Some('\n') | Some('\t')) {
        return html;
    }
    let end = html[after..].find('>').map_or(html.len(), |i| after + i);
    if html[after..end].contains("lang=") {
        return html;
    }
    html.insert_str(after, &format!(" lang=\"{lang}\""));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::accept_language::Preferred;

    fn ctx() -> PageContext {
        PageContext {
            current_locale: "pt".to_string(),
            locales: vec!["en".to_string(), "pt".to_string()],
            preferred: Preferred::default(),
        }
    }

    #[test]
    fn test_placeholders() {
        let out = render(
            "Current: {{ current_locale }} | All: {{ locales }} | Locale: {{ preferred_locale }} | Locale list: {{ preferred_locale_list }}",
            &ctx(),
        );
        assert_eq!(
            out,
            "Current: pt | All: en, pt | Locale: none | Locale list: empty"
        );
    }

    #[test]
    fn test_html_lang_is_set() {
        assert_eq!(
            render("<html><body>Oi</body></html>", &ctx()),
            "<html lang=\"pt\"><body>Oi</body></html>"
        );
        assert_eq!(
            render("<html class=\"x\">", &ctx()),
            "<html lang=\"pt\" class=\"x\">"
        );
    }

    #[test]
    fn test_existing_lang_is_kept() {
        let template = "<html lang=\"en\"><body></body></html>";
        assert_eq!(render(template, &ctx()), template);
    }

    #[test]
    fn test_fragment_without_html_tag() {
        assert_eq!(render("Oi essa e start", &ctx()), "Oi essa e start");
    }
}
