//! Browser glue: `pushState` history, hashchange wiring, and rewriting of
//! `a[data-navigo]` anchors so clicks navigate client-side.
//!
//! Everything here assumes the WASM main thread. Event closures are leaked
//! with `Closure::forget` — they live for the lifetime of the page, which
//! is exactly the lifetime of the router.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

use crate::routing::history::History;
use crate::routing::router::Router;

/// Anchors carrying this attribute are managed by the router.
const LINK_ATTR: &str = "data-navigo";

/// Set once a click listener is attached, so re-runs skip bound anchors.
const BOUND_ATTR: &str = "data-navigo-bound";

/// `History` backend over `window.history.pushState`.
///
/// `pushState` does not fire `hashchange`, so pushing an entry here never
/// triggers a second resolution by itself.
#[derive(Debug, Default)]
pub struct BrowserHistory;

impl History for BrowserHistory {
    fn push(&mut self, url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        match window.history() {
            Ok(history) => {
                if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(url)) {
                    tracing::error!("pushState failed: {:?}", err);
                }
            }
            Err(err) => tracing::error!("window.history unavailable: {:?}", err),
        }
    }

    fn current(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default()
    }
}

/// Resolve back/forward navigation through the router.
///
/// The listener goes through [`Router::on_location_change`], so a paused
/// router ignores browser-initiated changes the same way it ignores
/// `navigate`.
pub fn listen_hash_change(router: &Router) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let router = router.clone();
    let closure = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let url = BrowserHistory.current();
        router.on_location_change(&url);
    });
    if let Err(err) =
        window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())
    {
        tracing::error!("failed to attach hashchange listener: {:?}", err);
    }
    closure.forget();
}

/// Rewrite in-page anchors whose target matches a known route.
///
/// Must be re-run after every DOM replacement — previously attached
/// listeners do not cover newly inserted markup. The demo app does this
/// from its after hook, matching the original client.
pub fn update_page_links(router: &Router) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let anchors = match document.query_selector_all(&format!("a[{}]", LINK_ATTR)) {
        Ok(list) => list,
        Err(err) => {
            tracing::error!("querySelectorAll failed: {:?}", err);
            return;
        }
    };

    for i in 0..anchors.length() {
        let Some(node) = anchors.item(i) else { continue };
        let Ok(anchor) = node.dyn_into::<Element>() else {
            continue;
        };
        if anchor.has_attribute(BOUND_ATTR) {
            continue;
        }
        let Some(href) = anchor.get_attribute("href") else {
            continue;
        };
        if !router.recognizes(&href) {
            // Unknown targets keep their full-page-load behavior.
            continue;
        }

        if anchor.set_attribute(BOUND_ATTR, "true").is_err() {
            continue;
        }

        let router = router.clone();
        let target = href.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            router.navigate(&target);
        });
        if let Err(err) =
            anchor.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        {
            tracing::error!("failed to bind link {}: {:?}", href, err);
            continue;
        }
        closure.forget();
    }
}

/// Install [`update_page_links`] as the router's link rewriter, so
/// `router.update_page_links()` works without the caller importing this
/// module everywhere.
pub fn install_link_rewriter(router: &Router) {
    router.set_link_rewriter(update_page_links);
}
