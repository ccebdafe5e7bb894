/// Render model derived from page metadata and the recency store
use crate::contribution::{Contribution, ContributionId, PageKind};
use crate::page_title::PageMetadata;
use crate::recency::RecencyStore;
use std::collections::HashMap;

/// Which list an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    CurrentPage,
    History,
    Visited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryIcon {
    Issue,
    PullRequest,
    Link,
}

impl EntryIcon {
    fn for_kind(kind: Option<PageKind>) -> EntryIcon {
        match kind {
            Some(PageKind::Issue) => EntryIcon::Issue,
            Some(PageKind::PullRequest) => EntryIcon::PullRequest,
            None => EntryIcon::Link,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            EntryIcon::Issue => "◉",
            EntryIcon::PullRequest => "⇄",
            EntryIcon::Link => "🔗",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryView {
    pub section: Section,
    pub contribution: Contribution,
    pub icon: EntryIcon,
    pub badge: Option<String>,
}

impl EntryView {
    fn new(section: Section, contribution: Contribution) -> EntryView {
        EntryView {
            section,
            icon: EntryIcon::for_kind(contribution.kind),
            badge: contribution.repo_name.clone(),
            contribution,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderModel {
    pub current_page: Vec<EntryView>,
    pub history: Vec<EntryView>,
    pub visited: Vec<EntryView>,
    index: HashMap<ContributionId, Contribution>,
}

impl RenderModel {
    /// Look up the contribution behind a rendered entry
    pub fn resolve(&self, id: &ContributionId) -> Option<&Contribution> {
        self.index.get(id)
    }

    /// Add the recently visited pages, leaving out the page in the active tab
    pub fn with_visited(mut self, visited: &RecencyStore, current_url: Option<&str>) -> RenderModel {
        self.visited = visited
            .to_list()
            .into_iter()
            .filter(|c| Some(c.page_url.as_str()) != current_url)
            .map(|c| EntryView::new(Section::Visited, c))
            .collect();

        for entry in &self.visited {
            self.index
                .entry(entry.contribution.id.clone())
                .or_insert_with(|| entry.contribution.clone());
        }

        self
    }
}

/// Copy candidates offered for the current page: long form then short form
pub fn current_page_candidates(metadata: &PageMetadata) -> Vec<Contribution> {
    let long_form = if metadata.header.is_empty() {
        format!("#{}", metadata.index)
    } else {
        format!("{} #{}", metadata.header, metadata.index)
    };
    let short_form = format!("#{}", metadata.index);

    let mut texts = vec![long_form];
    if !texts.contains(&short_form) {
        texts.push(short_form);
    }

    texts
        .into_iter()
        .map(|text| {
            Contribution::new(text, metadata.page_url.clone())
                .with_repo_name(metadata.repo_name.clone())
                .with_kind(metadata.kind)
                .with_page_parts(metadata.header.clone(), metadata.index.clone())
        })
        .collect()
}

/// Build the render model; a pure function of its inputs
pub fn render(metadata: Option<&PageMetadata>, store: &RecencyStore) -> RenderModel {
    let current_page: Vec<EntryView> = metadata
        .map(current_page_candidates)
        .unwrap_or_default()
        .into_iter()
        .map(|c| EntryView::new(Section::CurrentPage, c))
        .collect();

    let history: Vec<EntryView> = store
        .to_list()
        .into_iter()
        .map(|c| EntryView::new(Section::History, c))
        .collect();

    let index = current_page
        .iter()
        .chain(history.iter())
        .map(|entry| (entry.contribution.id.clone(), entry.contribution.clone()))
        .collect();

    RenderModel {
        current_page,
        history,
        visited: Vec::new(),
        index,
    }
}

/// Transient "just copied" marker
///
/// Each copy hands out a ticket; only the timeout holding the latest ticket
/// returns the marker to idle, so an older timeout never hides a newer copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyMarker {
    ticket: u64,
    copied: Option<ContributionId>,
}

impl CopyMarker {
    pub fn new() -> Self {
        Self::default()
    }

    /// idle | justCopied(_) -> justCopied(id)
    pub fn copy(&mut self, id: ContributionId) -> u64 {
        self.ticket += 1;
        self.copied = Some(id);
        self.ticket
    }

    /// justCopied(_) -> idle when a new copy starts or a copy fails
    pub fn reset(&mut self) {
        self.ticket += 1;
        self.copied = None;
    }

    /// justCopied -> idle, if the ticket is still current
    pub fn expire(&mut self, ticket: u64) -> bool {
        if ticket == self.ticket && self.copied.is_some() {
            self.copied = None;
            true
        } else {
            false
        }
    }

    pub fn just_copied(&self) -> Option<&ContributionId> {
        self.copied.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://github.com/my/repo/issues/42";

    fn create_test_metadata() -> PageMetadata {
        PageMetadata {
            header: "Fix bug".to_string(),
            index: "42".to_string(),
            repo_name: "my/repo".to_string(),
            kind: PageKind::Issue,
            page_title: "Fix bug · 42 · my/repo".to_string(),
            page_url: URL.to_string(),
        }
    }

    #[test]
    fn test_current_page_long_and_short_forms() {
        let candidates = current_page_candidates(&create_test_metadata());

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].display_text, "Fix bug #42");
        assert_eq!(candidates[1].display_text, "#42");
        assert_eq!(candidates[0].page_url, candidates[1].page_url);
        assert_ne!(candidates[0].id, candidates[1].id);
        assert_eq!(candidates[0].repo_name.as_deref(), Some("my/repo"));
        assert_eq!(candidates[1].kind, Some(PageKind::Issue));
    }

    #[test]
    fn test_short_form_markdown() {
        let candidates = current_page_candidates(&create_test_metadata());
        assert_eq!(candidates[1].markdown_link(), "[#42](https://github.com/my/repo/issues/42)");
    }

    #[test]
    fn test_empty_header_offers_single_entry() {
        let mut metadata = create_test_metadata();
        metadata.header = String::new();

        let candidates = current_page_candidates(&metadata);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].display_text, "#42");
    }

    #[test]
    fn test_render_without_metadata() {
        let mut store = RecencyStore::new();
        store.record_use(Contribution::new("#1".to_string(), "https://github.com/a/b/issues/1".to_string()));

        let model = render(None, &store);

        assert!(model.current_page.is_empty());
        assert_eq!(model.history.len(), 1);
        assert_eq!(model.history[0].icon, EntryIcon::Link);
        assert_eq!(model.history[0].badge, None);
        assert_eq!(model.history[0].section, Section::History);
    }

    #[test]
    fn test_render_history_in_store_order() {
        let mut store = RecencyStore::new();
        let first = Contribution::new("#1".to_string(), "https://github.com/a/b/pull/1".to_string())
            .with_kind(PageKind::PullRequest)
            .with_repo_name("a/b");
        let second = Contribution::new("#2".to_string(), "https://github.com/a/b/issues/2".to_string())
            .with_kind(PageKind::Issue);
        store.record_use(first.clone());
        store.record_use(second.clone());

        let model = render(Some(&create_test_metadata()), &store);

        assert_eq!(model.current_page.len(), 2);
        assert_eq!(model.history[0].contribution, second);
        assert_eq!(model.history[0].icon, EntryIcon::Issue);
        assert_eq!(model.history[1].contribution, first);
        assert_eq!(model.history[1].icon, EntryIcon::PullRequest);
        assert_eq!(model.history[1].badge.as_deref(), Some("a/b"));
    }

    #[test]
    fn test_resolve_by_id() {
        let mut store = RecencyStore::new();
        let stored = Contribution::new("#9".to_string(), "https://github.com/a/b/issues/9".to_string());
        store.record_use(stored.clone());

        let model = render(Some(&create_test_metadata()), &store);

        assert_eq!(model.resolve(&stored.id), Some(&stored));
        let short = &model.current_page[1].contribution;
        assert_eq!(model.resolve(&short.id), Some(short));
        assert_eq!(model.resolve(&ContributionId::from_raw("missing")), None);
    }

    #[test]
    fn test_render_is_pure() {
        let mut store = RecencyStore::new();
        store.record_use(Contribution::new("#1".to_string(), "https://github.com/a/b/issues/1".to_string()));
        let metadata = create_test_metadata();

        assert_eq!(render(Some(&metadata), &store), render(Some(&metadata), &store));
    }

    #[test]
    fn test_marker_copy_then_expire() {
        let mut marker = CopyMarker::new();
        let id = ContributionId::from_raw("a");

        let ticket = marker.copy(id.clone());
        assert_eq!(marker.just_copied(), Some(&id));

        assert!(marker.expire(ticket));
        assert_eq!(marker.just_copied(), None);
    }

    #[test]
    fn test_marker_superseded_by_newer_copy() {
        let mut marker = CopyMarker::new();
        let first = ContributionId::from_raw("a");
        let second = ContributionId::from_raw("b");

        let old_ticket = marker.copy(first.clone());
        let new_ticket = marker.copy(second.clone());

        assert_ne!(marker.just_copied(), Some(&first));
        assert!(!marker.expire(old_ticket));
        assert_eq!(marker.just_copied(), Some(&second));
        assert!(marker.expire(new_ticket));
        assert!(!marker.expire(new_ticket));
    }

    #[test]
    fn test_marker_same_id_copied_twice() {
        let mut marker = CopyMarker::new();
        let id = ContributionId::from_raw("a");

        let old_ticket = marker.copy(id.clone());
        marker.copy(id.clone());

        assert!(!marker.expire(old_ticket));
        assert_eq!(marker.just_copied(), Some(&id));
    }

    #[test]
    fn test_failed_copy_after_copy_leaves_marker_idle() {
        let mut marker = CopyMarker::new();
        let id = ContributionId::from_raw("a");
        let ticket = marker.copy(id.clone());

        // Second attempt on the same entry starts, then fails
        marker.reset();

        assert_eq!(marker.just_copied(), None);
        assert!(!marker.expire(ticket));

        let next = marker.copy(id.clone());
        assert_eq!(marker.just_copied(), Some(&id));
        assert!(marker.expire(next));
    }

    #[test]
    fn test_with_visited_skips_current_page() {
        let mut visited = RecencyStore::new();
        let current = current_page_candidates(&create_test_metadata()).remove(0);
        let other = Contribution::new("Older #7".to_string(), "https://github.com/my/repo/pull/7".to_string())
            .with_kind(PageKind::PullRequest);
        visited.record_use(other.clone());
        visited.record_use(current);

        let model = render(Some(&create_test_metadata()), &RecencyStore::new()).with_visited(&visited, Some(URL));

        assert_eq!(model.visited.len(), 1);
        assert_eq!(model.visited[0].contribution, other);
        assert_eq!(model.visited[0].section, Section::Visited);
        assert_eq!(model.visited[0].icon, EntryIcon::PullRequest);
        assert_eq!(model.resolve(&other.id), Some(&other));
    }

    #[test]
    fn test_with_visited_without_current_page() {
        let mut visited = RecencyStore::new();
        let page = current_page_candidates(&create_test_metadata()).remove(0);
        visited.record_use(page.clone());

        let model = render(None, &RecencyStore::new()).with_visited(&visited, None);

        assert_eq!(model.visited.len(), 1);
        assert_eq!(model.resolve(&page.id), Some(&page));
    }
}
