//! Markup scanners for catalog pages
//!
//! Both parsers match fragments of the raw markup with regular expressions
//! instead of building a document tree. The patterns mirror the catalog's
//! markup exactly, so a fragment that is formatted differently (extra
//! attributes, line breaks inside an element) is simply not matched.
//!
//! - Index pages yield the detail links listed under `<h3>` headings.
//! - Detail pages yield the six fields of a [`BookRecord`].

use crate::record::BookRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Prefix joined to every matched detail path
const DETAIL_PREFIX: &str = "/catalogue/";

static INDEX_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<h3><a href="(.*?\.html)""#).unwrap());

static TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<h1>(.*?)</h1>").unwrap());
static UPC: Lazy<Regex> = Lazy::new(|| Regex::new(r"<th>UPC</th><td>(.*?)</td>").unwrap());
// The leading `.` swallows the currency symbol
static PRICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<p class="price_color">.(.*?)</p>"#).unwrap());
static AVAILABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<td>In stock \((.*?) available\)</td>").unwrap());
static THUMBNAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"<img\s*src="(.*?)""#).unwrap());
static DESCRIPTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"<p>(.*?)</p>").unwrap());

/// Builds the URL of index page `page`: `<base>/catalogue/page-<page>.html`
///
/// # Example
///
/// ```
/// use book_crawler::crawler::index_page_url;
/// use url::Url;
///
/// let base = Url::parse("https://books.toscrape.com").unwrap();
/// let url = index_page_url(&base, 3).unwrap();
/// assert_eq!(url.as_str(), "https://books.toscrape.com/catalogue/page-3.html");
/// ```
pub fn index_page_url(base_url: &Url, page: u32) -> Result<Url, url::ParseError> {
    Url::parse(&format!(
        "{}/catalogue/page-{}.html",
        base_url.as_str().trim_end_matches('/'),
        page
    ))
}

/// Extracts the detail page links of one index page, in document order
///
/// Each `<h3><a href="...html"` match is joined to `/catalogue/` and
/// resolved against `base_url`. The returned iterator is lazy and can only
/// be walked once. It is empty when the page lists no books.
///
/// # Example
///
/// ```
/// use book_crawler::crawler::parse_index;
/// use url::Url;
///
/// let base = Url::parse("https://x").unwrap();
/// let html = r#"<h3><a href="a.html" title="A">A</a></h3>"#;
/// let links: Vec<String> = parse_index(html, &base).map(String::from).collect();
/// assert_eq!(links, vec!["https://x/catalogue/a.html"]);
/// ```
pub fn parse_index<'a>(html: &'a str, base_url: &'a Url) -> impl Iterator<Item = Url> + 'a {
    INDEX_LINK.captures_iter(html).filter_map(move |caps| {
        let relative = format!("{}{}", DETAIL_PREFIX, &caps[1]);
        match base_url.join(&relative) {
            Ok(detail_url) => {
                tracing::info!("Found detail url {}", detail_url);
                Some(detail_url)
            }
            Err(e) => {
                tracing::debug!("Skipping unresolvable detail link {}: {}", relative, e);
                None
            }
        }
    })
}

/// Extracts the book fields from one detail page
///
/// Every field is matched on its own. A field whose pattern does not match
/// is left as `None`; matched values are trimmed.
pub fn parse_detail(html: &str) -> BookRecord {
    BookRecord {
        title: first_capture(&TITLE, html),
        upc: first_capture(&UPC, html),
        price: first_capture(&PRICE, html),
        available_quantity: first_capture(&AVAILABLE, html),
        thumbnail_path: first_capture(&THUMBNAIL, html),
        description: first_capture(&DESCRIPTION, html),
    }
}

fn first_capture(pattern: &Regex, html: &str) -> Option<String> {
    pattern
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}
