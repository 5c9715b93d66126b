//! Book records and their storage keys
//!
//! A [`BookRecord`] is built once per fetched detail page. Every field is
//! independently optional: a pattern that fails to match leaves its field
//! empty without affecting the others.

mod sanitize;

pub use sanitize::{sanitize_title, storage_key};

use serde::{Deserialize, Serialize};

/// The structured fields extracted from one book detail page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    /// Text of the first `<h1>` heading
    pub title: Option<String>,

    /// Universal product code from the product information table
    pub upc: Option<String>,

    /// Price without its currency symbol
    pub price: Option<String>,

    /// Number of copies from the "In stock (N available)" cell
    pub available_quantity: Option<String>,

    /// `src` of the first image on the page, as written in the markup
    pub thumbnail_path: Option<String>,

    /// Text of the first plain `<p>` element on the page
    pub description: Option<String>,
}
