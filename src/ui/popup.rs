/// Popup UI for Issue Link Copier

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use patternfly_yew::prelude::*;
use crate::contribution::ContributionId;
use crate::controller::Controller;
use crate::gateways::{delay, BrowserClipboard, BrowserStorage, BrowserTabs};
use crate::ui::components::EntryList;
use crate::view_model::{CopyMarker, RenderModel};

type BrowserController = Controller<BrowserStorage, BrowserClipboard>;

#[derive(Clone, PartialEq)]
enum PopupState {
    Loading,
    Ready,
    Copying,
    Error(String),
}

/// What the lists show; kept outside the controller so it renders while a copy runs
#[derive(Clone, PartialEq)]
struct PopupView {
    model: RenderModel,
    warning: Option<String>,
}

impl PopupView {
    fn of(controller: &BrowserController) -> PopupView {
        PopupView {
            model: controller.model().clone(),
            warning: controller.state().warning.clone(),
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| PopupState::Loading);
    let view = use_state(|| None::<PopupView>);
    let controller = use_mut_ref(|| None::<BrowserController>);
    let marker = use_mut_ref(CopyMarker::new);
    let force_update = use_force_update();

    // Read the tab and stored history on mount
    {
        let state = state.clone();
        let view = view.clone();
        let controller = controller.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let ready = Controller::activate(&BrowserTabs, BrowserStorage, BrowserClipboard).await;
                view.set(Some(PopupView::of(&ready)));
                *controller.borrow_mut() = Some(ready);
                state.set(PopupState::Ready);
            });
            || ()
        });
    }

    // Copy handler
    let on_copy = {
        let state = state.clone();
        let view = view.clone();
        let controller = controller.clone();
        let marker = marker.clone();
        let force_update = force_update.clone();

        Callback::from(move |id: ContributionId| {
            // The controller is taken for the whole copy so copies never interleave
            let Some(mut active) = controller.borrow_mut().take() else {
                log::debug!("Copy of {} ignored, another copy is running", id);
                return;
            };

            let state = state.clone();
            let view = view.clone();
            let controller = controller.clone();
            let marker = marker.clone();
            let force_update = force_update.clone();

            marker.borrow_mut().reset();
            state.set(PopupState::Copying);

            spawn_local(async move {
                let result = active.copy(&id).await;
                let marker_ms = active.state().config.copied_marker_ms;
                view.set(Some(PopupView::of(&active)));
                *controller.borrow_mut() = Some(active);

                match result {
                    Ok(report) => {
                        let ticket = marker.borrow_mut().copy(report.contribution.id);
                        state.set(PopupState::Ready);

                        delay(marker_ms).await;
                        if marker.borrow_mut().expire(ticket) {
                            force_update.force_update();
                        }
                    }
                    Err(e) => {
                        log::warn!("Copy failed: {}", e);
                        marker.borrow_mut().reset();
                        state.set(PopupState::Error(format!("Copy failed: {}", e)));
                    }
                }
            });
        })
    };

    let is_busy = matches!(*state, PopupState::Loading | PopupState::Copying);
    let just_copied = marker.borrow().just_copied().cloned();

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Issue Link Copier"}</h1>

            // Status display
            {match &*state {
                PopupState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Reading page..."}</p>
                    </div>
                },
                PopupState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                PopupState::Ready | PopupState::Copying => html! {}
            }}

            if let Some(view) = (*view).clone() {
                // Storage warning
                if let Some(warning) = view.warning.clone() {
                    <Alert r#type={AlertType::Warning} title={warning} inline={true}>
                    </Alert>
                }

                if !view.model.current_page.is_empty() {
                    <EntryList
                        title={"Copy from this page"}
                        entries={view.model.current_page.clone()}
                        on_copy={on_copy.clone()}
                        just_copied={just_copied.clone()}
                        disabled={is_busy}
                    />
                    <hr />
                }

                <EntryList
                    title={"Previously copied"}
                    entries={view.model.history.clone()}
                    on_copy={on_copy.clone()}
                    just_copied={just_copied.clone()}
                    disabled={is_busy}
                />

                if view.model.history.is_empty() {
                    <p class="message-text">{"Nothing copied yet"}</p>
                }

                if !view.model.visited.is_empty() {
                    <hr />
                    <EntryList
                        title={"Recently visited"}
                        entries={view.model.visited.clone()}
                        on_copy={on_copy.clone()}
                        just_copied={just_copied.clone()}
                        disabled={is_busy}
                    />
                }
            }

            <p class="footer-popup">
                {"Issue Link Copier v0.1.0"}
            </p>
        </div>
    }
}
