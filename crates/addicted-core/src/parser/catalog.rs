//! Show catalog parser for addic7ed.com
//!
//! Parses the site root page and extracts the title → id mapping from the
//! show quick-search control.

use std::collections::HashMap;

use scraper::{Html, Selector};

use crate::error::{AddictedError, Result};

/// Parses the site root HTML into a show title → id mapping
///
/// Every `<option>` inside the `#qsShow` quick-search control contributes
/// one entry: visible text as the title, `value` attribute as the id. An
/// option without a `value` attribute means the page layout changed and is
/// surfaced as an error rather than skipped.
///
/// # Returns
/// Mapping of show titles to opaque show ids; empty when the control has no
/// entries (valid, though suspicious for the real site).
///
/// # Errors
/// Returns `UnexpectedContent` if an option lacks its `value` attribute.
pub fn parse_show_catalog(html: &str) -> Result<HashMap<String, String>> {
    let document = Html::parse_document(html);
    let option_selector = Selector::parse("#qsShow > option")
        .map_err(|e| AddictedError::UnexpectedContent(format!("invalid selector: {e:?}")))?;

    let mut shows = HashMap::new();
    for option in document.select(&option_selector) {
        let title = option.text().collect::<String>().trim().to_string();
        let id = option.value().attr("value").ok_or_else(|| {
            AddictedError::UnexpectedContent(format!(
                "show option without value attribute: {title}"
            ))
        })?;
        shows.insert(title, id.to_string());
    }

    Ok(shows)
}
