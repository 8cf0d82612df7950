//! XML rendering of URL sets and sitemap indexes.
//!
//! Output is built pretty (tabs + newlines) through quick-xml's event
//! writer; compact output is derived by stripping the formatting
//! characters, so both modes stay byte-for-byte consistent.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use data_model_smx::meta::MetaTags;
use data_model_smx::urls::UrlEntry;

use crate::errors::Result;

/// Namespace of the sitemaps protocol, shared by url sets and indexes.
pub const SITEMAP_XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Characters a WHATWG `encodeURI` pass leaves untouched, beyond
/// alphanumerics: the URI reserved set plus `#` and the unreserved marks.
const ENCODE_URI: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// Percent-encodes a URL like `encodeURI`, then escapes the five XML
/// special characters. Of those five, only `&` and `'` survive the
/// percent-encoding pass, but all are handled for safety.
pub fn escape_url(url: &str) -> String {
    utf8_percent_encode(url, ENCODE_URI)
        .to_string()
        .replace('&', "&amp;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders a `<urlset>` document for one shard of URL entries.
///
/// `<loc>` text is expected to be already escaped (see [`escape_url`]) and
/// is written through verbatim. Meta tags render in the fixed protocol
/// order, with per-entry values winning over the global defaults.
pub fn render_urlset(entries: &[UrlEntry], defaults: &MetaTags, pretty: bool) -> Result<String> {
    let mut writer = pretty_writer();
    write_decl(&mut writer)?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_XMLNS));
    writer.write_event(Event::Start(urlset))?;

    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_loc(&mut writer, &entry.loc)?;

        if let Some(lastmod) = entry.tags.lastmod.as_ref().or(defaults.lastmod.as_ref()) {
            write_tag(&mut writer, "lastmod", lastmod)?;
        }
        if let Some(changefreq) = entry.tags.changefreq.or(defaults.changefreq) {
            write_tag(&mut writer, "changefreq", changefreq.as_str())?;
        }
        if let Some(priority) = entry.tags.priority.or(defaults.priority) {
            write_tag(&mut writer, "priority", &format_priority(priority))?;
        }

        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    finish(writer, pretty)
}

/// Renders the `<sitemapindex>` document referencing every shard file.
pub fn render_index(filenames: &[String], file_base: &str, pretty: bool) -> Result<String> {
    let mut writer = pretty_writer();
    write_decl(&mut writer)?;

    let mut index = BytesStart::new("sitemapindex");
    index.push_attribute(("xmlns", SITEMAP_XMLNS));
    writer.write_event(Event::Start(index))?;

    for filename in filenames {
        writer.write_event(Event::Start(BytesStart::new("sitemap")))?;
        write_loc(&mut writer, &escape_url(&format!("{file_base}/{filename}.xml")))?;
        writer.write_event(Event::End(BytesEnd::new("sitemap")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("sitemapindex")))?;
    finish(writer, pretty)
}

/// Whole-number priorities must keep one decimal digit; every other value
/// renders as given.
fn format_priority(priority: f64) -> String {
    if priority == 0.0 {
        "0.0".to_string()
    } else if priority == 1.0 {
        "1.0".to_string()
    } else {
        priority.to_string()
    }
}

fn pretty_writer() -> Writer<Vec<u8>> {
    Writer::new_with_indent(Vec::new(), b'\t', 1)
}

fn write_decl(writer: &mut Writer<Vec<u8>>) -> Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(())
}

fn write_loc(writer: &mut Writer<Vec<u8>>, escaped: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("loc")))?;
    writer.write_event(Event::Text(BytesText::from_escaped(escaped)))?;
    writer.write_event(Event::End(BytesEnd::new("loc")))?;
    Ok(())
}

fn write_tag(writer: &mut Writer<Vec<u8>>, tag: &str, value: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn finish(writer: Writer<Vec<u8>>, pretty: bool) -> Result<String> {
    let xml = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    if pretty {
        Ok(xml)
    } else {
        Ok(xml.chars().filter(|c| !matches!(c, '\t' | '\n')).collect())
    }
}
