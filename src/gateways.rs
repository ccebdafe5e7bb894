/// Boundaries to the browser: active tab, extension storage, clipboard
use crate::error::{ClipboardError, HostPageError, PersistenceError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn writeClipboard(text: &str) -> Result<(), JsValue>;
}

/// Title and URL of the tab the popup was opened on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTab {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

#[async_trait(?Send)]
pub trait HostPageGateway {
    async fn active_tab(&self) -> Result<ActiveTab, HostPageError>;
}

/// Durable key-value storage
#[async_trait(?Send)]
pub trait PersistenceGateway {
    /// `Ok(None)` when nothing has been stored under the key yet
    async fn load(&self, key: &str) -> Result<Option<serde_json::Value>, PersistenceError>;

    async fn save(&self, key: &str, value: serde_json::Value) -> Result<(), PersistenceError>;
}

#[async_trait(?Send)]
pub trait ClipboardGateway {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// `chrome.tabs` backed host page access
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTabs;

#[async_trait(?Send)]
impl HostPageGateway for BrowserTabs {
    async fn active_tab(&self) -> Result<ActiveTab, HostPageError> {
        let tab_js = getActiveTab()
            .await
            .map_err(|e| HostPageError(format!("{:?}", e)))?;

        serde_wasm_bindgen::from_value(tab_js)
            .map_err(|e| HostPageError(format!("Failed to parse tab: {:?}", e)))
    }
}

/// `chrome.storage.local` backed persistence
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

#[async_trait(?Send)]
impl PersistenceGateway for BrowserStorage {
    async fn load(&self, key: &str) -> Result<Option<serde_json::Value>, PersistenceError> {
        let value_js = getStorage(key).await.map_err(|e| PersistenceError::Unavailable {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })?;

        if value_js.is_null() || value_js.is_undefined() {
            return Ok(None);
        }

        serde_wasm_bindgen::from_value(value_js)
            .map(Some)
            .map_err(|e| PersistenceError::Unavailable {
                key: key.to_string(),
                reason: format!("Failed to parse storage: {:?}", e),
            })
    }

    async fn save(&self, key: &str, value: serde_json::Value) -> Result<(), PersistenceError> {
        // Plain objects, not JS Maps, so chrome.storage can store them
        let value_js = value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| PersistenceError::Encode {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })?;

        setStorage(key, value_js)
            .await
            .map_err(|e| PersistenceError::Unavailable {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}

/// `navigator.clipboard` backed clipboard
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClipboard;

#[async_trait(?Send)]
impl ClipboardGateway for BrowserClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        writeClipboard(text)
            .await
            .map_err(|e| ClipboardError(format!("{:?}", e)))
    }
}

/// Resolve after `ms` milliseconds on the browser event loop
pub async fn delay(ms: u32) {
    let timeout = i32::try_from(ms).unwrap_or(i32::MAX);

    let timer = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))
            .and_then(|window| window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout));

        // Without a timer, resolve right away rather than never
        if let Err(e) = scheduled {
            log::warn!("Timer failed: {:?}", e);
            let _ = resolve.call0(&JsValue::NULL);
        }
    });

    if let Err(e) = wasm_bindgen_futures::JsFuture::from(timer).await {
        log::warn!("Timer failed: {:?}", e);
    }
}
