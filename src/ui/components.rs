/// Reusable UI components

use yew::prelude::*;
use crate::contribution::ContributionId;
use crate::view_model::EntryView;

#[derive(Properties, PartialEq)]
pub struct EntryRowProps {
    pub entry: EntryView,
    pub on_copy: Callback<ContributionId>,
    #[prop_or(false)]
    pub just_copied: bool,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(EntryRow)]
pub fn entry_row(props: &EntryRowProps) -> Html {
    let contribution = &props.entry.contribution;

    let onclick = {
        let id = contribution.id.clone();
        let on_copy = props.on_copy.clone();
        Callback::from(move |_: MouseEvent| on_copy.emit(id.clone()))
    };

    let kind_label = contribution.kind.map(|k| k.label()).unwrap_or("Link");

    let button_class = if props.just_copied {
        "copy-button copy-button-done"
    } else {
        "copy-button"
    };

    html! {
        <li class="entry-row" data-contribution-id={contribution.id.to_string()}>
            <span class="entry-icon" title={kind_label}>{props.entry.icon.glyph()}</span>
            <a class="entry-text" href={contribution.page_url.clone()} target="_blank">
                {&contribution.display_text}
            </a>
            if let Some(repo) = &props.entry.badge {
                <span class="entry-badge">{repo}</span>
            }
            <button class={button_class} onclick={onclick} disabled={props.disabled}>
                {if props.just_copied { "Copied!" } else { "Copy" }}
            </button>
        </li>
    }
}

#[derive(Properties, PartialEq)]
pub struct EntryListProps {
    pub title: String,
    pub entries: Vec<EntryView>,
    pub on_copy: Callback<ContributionId>,
    #[prop_or_default]
    pub just_copied: Option<ContributionId>,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(EntryList)]
pub fn entry_list(props: &EntryListProps) -> Html {
    html! {
        <div class="entry-section">
            <h2 class="section-title">{&props.title}</h2>
            <ul class="entry-list">
                {for props.entries.iter().map(|entry| {
                    let just_copied = props.just_copied.as_ref() == Some(&entry.contribution.id);
                    html! {
                        <EntryRow
                            key={entry.contribution.id.to_string()}
                            entry={entry.clone()}
                            on_copy={props.on_copy.clone()}
                            just_copied={just_copied}
                            disabled={props.disabled}
                        />
                    }
                })}
            </ul>
        </div>
    }
}
