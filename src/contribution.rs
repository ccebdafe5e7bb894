/// Data structures for Issue Link Copier
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Separates the parts of an id composite so ("a b", "c") and ("a", "b c") differ
const ID_FIELD_SEPARATOR: char = '\u{1f}';

/// Whether a page is an issue or a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageKind {
    #[serde(rename = "issue")]
    Issue,
    #[serde(rename = "pr")]
    PullRequest,
}

impl PageKind {
    /// Map the URL path segment (`issues` / `pull`) to a kind
    pub fn from_path_segment(segment: &str) -> Option<PageKind> {
        match segment {
            "issues" => Some(PageKind::Issue),
            "pull" => Some(PageKind::PullRequest),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PageKind::Issue => "Issue",
            PageKind::PullRequest => "Pull request",
        }
    }
}

/// Stable identity of a contribution, derived from its display text and URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContributionId(String);

impl ContributionId {
    pub fn derive(display_text: &str, page_url: &str) -> ContributionId {
        let composite = format!("{}{}{}", display_text, ID_FIELD_SEPARATOR, page_url);
        ContributionId(Uuid::new_v5(&Uuid::NAMESPACE_URL, composite.as_bytes()).to_string())
    }

    /// Wrap an id that was already stored or rendered
    pub fn from_raw(value: impl Into<String>) -> ContributionId {
        ContributionId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContributionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A capturable markdown reference to an issue or pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: ContributionId,
    pub display_text: String,
    pub page_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<PageKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
}

impl Contribution {
    pub fn new(display_text: String, page_url: String) -> Contribution {
        Contribution {
            id: ContributionId::derive(&display_text, &page_url),
            display_text,
            page_url,
            repo_name: None,
            kind: None,
            header: None,
            index: None,
        }
    }

    pub fn with_repo_name(mut self, repo_name: impl Into<String>) -> Contribution {
        self.repo_name = Some(repo_name.into());
        self
    }

    pub fn with_kind(mut self, kind: PageKind) -> Contribution {
        self.kind = Some(kind);
        self
    }

    pub fn with_page_parts(mut self, header: impl Into<String>, index: impl Into<String>) -> Contribution {
        self.header = Some(header.into());
        self.index = Some(index.into());
        self
    }

    /// The exact text placed on the clipboard: `[<displayText>](<pageUrl>)`
    pub fn markdown_link(&self) -> String {
        format!("[{}]({})", self.display_text, self.page_url)
    }
}

/// A record written by the earlier JavaScript popup, before ids existed
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyRecord {
    pub page_title: String,
    #[serde(default)]
    pub page_type: String,
    pub page_index: String,
    pub page_url: String,
}

impl LegacyRecord {
    pub fn into_contribution(self) -> Contribution {
        let display_text = format!("{} {}: {}", self.page_type, self.page_index, self.page_title)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        let kind = match self.page_type.trim().to_lowercase().as_str() {
            "pull" | "pr" => Some(PageKind::PullRequest),
            "issue" | "issues" => Some(PageKind::Issue),
            _ => None,
        };

        let index: String = self
            .page_index
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();

        let mut contribution = Contribution::new(display_text, self.page_url);
        contribution.kind = kind;
        contribution.header = Some(self.page_title.trim().to_string());
        contribution.index = (!index.is_empty()).then_some(index);
        contribution
    }
}

/// Any record shape that may be found under the history key
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StoredRecord {
    Current(Contribution),
    Legacy(LegacyRecord),
}

impl StoredRecord {
    pub fn into_contribution(self) -> Contribution {
        match self {
            StoredRecord::Current(contribution) => contribution,
            StoredRecord::Legacy(legacy) => legacy.into_contribution(),
        }
    }
}
