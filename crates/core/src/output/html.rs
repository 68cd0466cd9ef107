//! HTML renderer for breadcrumb trails

use crate::config::BreadcrumbsConfig;
use crate::escape::{esc_html, esc_url};
use crate::models::{Direction, Link};

/// Render links inside the `<nav>` container, honoring text direction
pub fn format_html(links: &[Link], config: &BreadcrumbsConfig) -> String {
    let mut output = String::from(r#"<nav class="breadcrumbs">"#);

    match config.direction() {
        Direction::Ltr => output.push_str(&render_ltr(links, config)),
        Direction::Rtl => output.push_str(&render_rtl(links, config)),
    }

    output.push_str("</nav>");
    output
}

/// Render a single crumb
pub fn format_link(link: &Link) -> String {
    let item = format!(r#"<span class="item">{}</span>"#, esc_html(&link.label));

    match link.url.as_deref().map(esc_url) {
        Some(url) if !url.is_empty() => format!(r#"<a href="{}">{}</a>"#, url, item),
        _ => item,
    }
}

fn separator(config: &BreadcrumbsConfig) -> String {
    format!(r#" <span class="sep delimiter">{}</span> "#, config.delimiter())
}

fn join_links<'a>(links: impl Iterator<Item = &'a Link>, config: &BreadcrumbsConfig) -> String {
    links
        .map(format_link)
        .collect::<Vec<_>>()
        .join(&separator(config))
}

fn render_ltr(links: &[Link], config: &BreadcrumbsConfig) -> String {
    let mut trail = String::new();

    if !config.before().is_empty() {
        trail.push_str(&format!(r#"<span class="before">{}</span> "#, esc_html(config.before())));
    }

    trail.push_str(&join_links(links.iter(), config));

    if !config.after().is_empty() {
        trail.push_str(&format!(r#" <span class="after">{}</span>"#, esc_html(config.after())));
    }

    trail
}

fn render_rtl(links: &[Link], config: &BreadcrumbsConfig) -> String {
    let mut trail = String::new();

    if !config.after().is_empty() {
        trail.push_str(&format!(r#"<span class="after">{}</span> "#, esc_html(config.after())));
    }

    trail.push_str(&join_links(links.iter().rev(), config));

    if !config.before().is_empty() {
        trail.push_str(&format!(r#" <span class="before">{}</span>"#, esc_html(config.before())));
    }

    trail
}
