/// Page metadata extraction from issue / pull request tab titles
use crate::contribution::PageKind;
use crate::error::MetadataExtractionError;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use url::Url;

/// Middle dot (code point 183) the host places between title segments
pub const TITLE_DELIMITER: char = '\u{b7}';

static INDEX_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("INDEX_DIGITS is a valid static regex pattern"));

/// Structured metadata for the page in the active tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub header: String,
    pub index: String,
    pub repo_name: String,
    #[serde(rename = "type")]
    pub kind: PageKind,
    pub page_title: String,
    pub page_url: String,
}

/// Parse a tab title and URL into page metadata
///
/// Algorithm:
/// 1. The URL path must be exactly `/<owner>/<repo>/(issues|pull)/<digits>`,
///    otherwise the page is not applicable (`Ok(None)`)
/// 2. Split the title on the middle dot
/// 3. The last two segments are the index segment and the repository name
/// 4. Everything before them, re-joined with the delimiter, is the header,
///    so a name like "A · B" survives intact
/// 5. The index is the first run of digits in the index segment
///
/// Examples:
/// - "Fix bug · 42 · my/repo" → header "Fix bug", index "42"
/// - "A · B · 7 · my/repo" → header "A · B", index "7"
/// - "Fix bug · Issue #42 · my/repo" → index "42"
pub fn parse_page(title: &str, url: &str) -> Result<Option<PageMetadata>, MetadataExtractionError> {
    let url = url.trim();
    let Some(kind) = issue_page_kind(url) else {
        return Ok(None);
    };

    let segments: Vec<&str> = title.split(TITLE_DELIMITER).collect();
    if segments.len() < 3 {
        return Err(MetadataExtractionError::MissingSegments(title.to_string()));
    }

    let (name_segments, trailing) = segments.split_at(segments.len() - 2);
    let raw_index = trailing[0];
    let repo_name = clean_text(trailing[1]);

    let index = INDEX_DIGITS
        .find(raw_index)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| MetadataExtractionError::NoIndexDigits(raw_index.trim().to_string()))?;

    if repo_name.is_empty() {
        return Err(MetadataExtractionError::EmptyRepoName(title.to_string()));
    }

    let delimiter = TITLE_DELIMITER.to_string();
    let header = clean_text(&name_segments.join(delimiter.as_str()));

    Ok(Some(PageMetadata {
        header,
        index,
        repo_name,
        kind,
        page_title: title.to_string(),
        page_url: url.to_string(),
    }))
}

/// Return the page kind if the URL is an issue or pull request page
pub fn issue_page_kind(url: &str) -> Option<PageKind> {
    let parsed = Url::parse(url.trim()).ok()?;
    parsed.host_str()?;

    // The pattern is anchored at the end of the URL
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return None;
    }

    let segments: Vec<&str> = parsed.path_segments()?.collect();
    match segments.as_slice() {
        [owner, repo, kind, number]
            if !owner.is_empty()
                && !repo.is_empty()
                && !number.is_empty()
                && number.chars().all(|c| c.is_ascii_digit()) =>
        {
            PageKind::from_path_segment(kind)
        }
        _ => None,
    }
}

/// Strip control characters and surrounding whitespace from extracted text
pub(crate) fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}
