//! Episode listing parser for addic7ed.com
//!
//! Turns an episode page into subtitle records. The page is a stack of
//! release tables under `#container95m`: a `NewsTitle` cell names the
//! release, each `language` row below it carries one subtitle with its
//! download button, and the row after a language row holds the download
//! counter.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::client::AddictedClient;
use crate::error::{AddictedError, Result};
use crate::types::Subtitle;

/// Parses an episode page into subtitle records, in document order
///
/// Two structural gates apply before extraction:
/// 1. `div#container` must exist; its absence means the episode does not
///    exist on the site at all.
/// 2. Every lookup below the listing container that fails (missing
///    attribute, missing row, malformed counter) aborts the whole call -
///    a changed page layout must surface, never produce partial results.
///
/// An episode page with the container but no release blocks yields an
/// empty, successful result.
///
/// # Errors
/// - `EpisodeNotFound` - page container marker absent
/// - `UnexpectedContent` - listing structure missing or malformed
pub fn parse_episode_subtitles(html: &str, client: &AddictedClient) -> Result<Vec<Subtitle>> {
    let document = Html::parse_document(html);

    let page_container = selector("div#container")?;
    if document.select(&page_container).next().is_none() {
        return Err(AddictedError::EpisodeNotFound);
    }

    let release_cell = selector("div#container95m td.NewsTitle")?;
    let language_cell = selector("td.language")?;
    let download_button = selector("a.buttonDownload")?;

    let version_re = regex(r"Version (.+?),")?;
    let downloads_re = regex(r"(\d+) Downloads")?;

    let mut subtitles = Vec::new();
    for news_cell in document.select(&release_cell) {
        let news_text = news_cell.text().collect::<String>();
        // No version token is a plain-text release note, not a break.
        let release = version_re
            .captures(&news_text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        let block = enclosing_table(news_cell).ok_or_else(|| {
            AddictedError::UnexpectedContent("release title outside a table block".to_string())
        })?;

        for language in block.select(&language_cell) {
            let row = parent_element(language).ok_or_else(|| {
                AddictedError::UnexpectedContent("language cell outside a row".to_string())
            })?;

            let link = row
                .select(&download_button)
                .next()
                .and_then(|a| a.value().attr("href"))
                .ok_or_else(|| {
                    AddictedError::UnexpectedContent(
                        "language row without download link".to_string(),
                    )
                })?;

            let stats_row = next_element_sibling(row).ok_or_else(|| {
                AddictedError::UnexpectedContent("language row without stats row".to_string())
            })?;
            let stats_cell = stats_row
                .children()
                .find_map(ElementRef::wrap)
                .ok_or_else(|| {
                    AddictedError::UnexpectedContent("stats row without cells".to_string())
                })?;
            let stats_text = stats_cell.text().collect::<String>();
            let downloads = downloads_re
                .captures(&stats_text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .ok_or_else(|| {
                    AddictedError::UnexpectedContent(format!(
                        "malformed download count: {}",
                        stats_text.trim()
                    ))
                })?;

            subtitles.push(Subtitle {
                language: language.text().collect::<String>().trim().to_lowercase(),
                release: release.clone(),
                downloads,
                link: link.to_string(),
                client: client.clone(),
            });
        }
    }

    Ok(subtitles)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| AddictedError::UnexpectedContent(format!("invalid selector: {e:?}")))
}

fn regex(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| AddictedError::UnexpectedContent(format!("invalid pattern: {e}")))
}

fn parent_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

fn next_element_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Climbs to the release table enclosing a `NewsTitle` cell; one table is
/// one release block.
fn enclosing_table(cell: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let mut node = cell.parent();
    while let Some(current) = node {
        if let Some(element) = ElementRef::wrap(current)
            && element.value().name() == "table"
        {
            return Some(element);
        }
        node = current.parent();
    }
    None
}
