//! sitemaps.org 0.9 rendering.

use std::io;

use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;

use crate::config::SiteConfig;

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Absolute URL for a page path. An empty path is the site root.
pub fn page_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Priority as written in the sitemap; whole numbers keep one decimal.
fn format_priority(priority: f32) -> String {
    let text = priority.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

pub fn render_sitemap(site: &SiteConfig, last_modified: NaiveDate) -> io::Result<String> {
    let lastmod = last_modified.format("%Y-%m-%d").to_string();
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer
        .create_element("urlset")
        .with_attribute(("xmlns", SITEMAP_NAMESPACE))
        .write_inner_content(|w| {
            for page in &site.pages {
                let loc = page_url(&site.base_url, &page.path);
                let priority = format_priority(page.priority);
                w.create_element("url").write_inner_content(|w| {
                    w.create_element("loc").write_text_content(BytesText::new(&loc))?;
                    w.create_element("lastmod").write_text_content(BytesText::new(&lastmod))?;
                    w.create_element("changefreq")
                        .write_text_content(BytesText::new(page.change_frequency.as_str()))?;
                    w.create_element("priority").write_text_content(BytesText::new(&priority))?;
                    Ok(())
                })?;
            }
            Ok(())
        })?;

    let mut xml = String::from_utf8(writer.into_inner()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    xml.push('\n');
    Ok(xml)
}
