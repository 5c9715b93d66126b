//! Filesystem-safe storage keys
//!
//! Titles become file names, so characters that are reserved on common
//! filesystems are replaced before a record is written.

use crate::record::BookRecord;
use url::Url;

/// Characters replaced by `_` in a storage key
const RESERVED: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

const UNTITLED: &str = "untitled";

/// Replaces every reserved filename character with an underscore
///
/// The replacement character is not itself reserved, so the transformation
/// is idempotent.
///
/// # Example
///
/// ```
/// use book_crawler::sanitize_title;
///
/// assert_eq!(sanitize_title("A/B:C*D"), "A_B_C_D");
/// ```
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if RESERVED.contains(&c) { '_' } else { c })
        .collect()
}

/// Chooses the file name a record is stored under
///
/// The sanitized title is used when present. Untitled records fall back to
/// `untitled-<upc>`, then to the item slug of the detail URL
/// (`.../catalogue/<slug>/index.html`), then to `untitled`. A title or UPC
/// that is empty or only whitespace counts as absent.
pub fn storage_key(record: &BookRecord, detail_url: &Url) -> String {
    if let Some(title) = non_blank(&record.title) {
        return sanitize_title(title);
    }

    if let Some(upc) = non_blank(&record.upc) {
        return sanitize_title(&format!("{}-{}", UNTITLED, upc));
    }

    url_slug(detail_url)
        .map(|slug| sanitize_title(&slug))
        .unwrap_or_else(|| UNTITLED.to_string())
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Last meaningful path segment of a detail URL
fn url_slug(url: &Url) -> Option<String> {
    let segments: Vec<&str> = url
        .path_segments()?
        .filter(|s| !s.is_empty() && *s != "index.html")
        .collect();

    segments
        .last()
        .map(|s| s.trim_end_matches(".html").to_string())
        .filter(|s| !s.is_empty())
}
