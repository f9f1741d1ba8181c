//! The hash-based SPA router: route table, hooks, and navigation lifecycle.
//!
//! Per navigation the lifecycle is
//! `Idle → Resolving → before hook → handler → after hook → Idle`,
//! with a `paused` flag orthogonal to that cycle: pausing gates entry via
//! `navigate` (and browser-initiated location changes) but never a direct
//! `resolve` call. That asymmetry is what makes `replace` work — resolve
//! once, then push the history entry with dispatch suppressed.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::RouteError;
use crate::network;
use crate::routing::history::{History, MemoryHistory};
use crate::routing::pattern::{Params, RoutePattern};

/// Completion callback handed to the before hook.
///
/// Dispatch proceeds only once this is called with `true`; `false` cancels
/// the navigation. A hook that never calls it leaves the navigation
/// suspended indefinitely — that is a caller defect, not something the
/// router recovers from.
pub type Done = Box<dyn FnOnce(bool)>;

type Handler = Rc<dyn Fn(&Params)>;
type BeforeHook = Rc<dyn Fn(Done, &Params)>;
type AfterHook = Rc<dyn Fn(&Params)>;
type LinkRewriter = Rc<dyn Fn(&Router)>;

struct Route {
    pattern: RoutePattern,
    handler: Handler,
}

struct Inner {
    routes: Vec<Route>,
    not_found: Option<Handler>,
    before: Option<BeforeHook>,
    after: Option<AfterHook>,
    link_rewriter: Option<LinkRewriter>,
    history: Box<dyn History>,
    root: String,
    hash: String,
    paused: bool,
    last_resolved: Option<String>,
}

/// Cheap-clone handle to the router state.
///
/// All state lives behind `Rc<RefCell<_>>`: the browser main thread (or the
/// test thread) is the only logical thread, the same event-loop model the
/// original client runs under. There is no process-wide singleton — pass a
/// clone to whatever needs to trigger navigation.
///
/// The router never awaits asynchronous work a handler starts; the after
/// hook fires once the handler's synchronous body returns. If navigation
/// happens again before that async work settles, the stale work may still
/// complete and touch the view — a known limitation carried over from the
/// original design.
#[derive(Clone)]
pub struct Router {
    inner: Rc<RefCell<Inner>>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::default()
    }

    // ── Registration ─────────────────────────────────────────────────────

    /// Add a route. Order matters: the first registered pattern that
    /// matches wins, so a broad pattern shadows narrower ones registered
    /// after it. No uniqueness check is performed.
    pub fn register(
        &self,
        pattern: &str,
        handler: impl Fn(&Params) + 'static,
    ) -> Result<(), RouteError> {
        let pattern = RoutePattern::parse(pattern)?;
        self.inner.borrow_mut().routes.push(Route {
            pattern,
            handler: Rc::new(handler),
        });
        Ok(())
    }

    /// Set the single fallback handler for URLs matching no route.
    pub fn register_not_found(&self, handler: impl Fn(&Params) + 'static) {
        self.inner.borrow_mut().not_found = Some(Rc::new(handler));
    }

    /// Set the before hook, run on every matched navigation.
    pub fn on_before(&self, hook: impl Fn(Done, &Params) + 'static) {
        self.inner.borrow_mut().before = Some(Rc::new(hook));
    }

    /// Set the after hook, run after every dispatch (matched or not).
    pub fn on_after(&self, hook: impl Fn(&Params) + 'static) {
        self.inner.borrow_mut().after = Some(Rc::new(hook));
    }

    /// Install the link rewriter invoked by [`Router::update_page_links`].
    pub fn set_link_rewriter(&self, rewriter: impl Fn(&Router) + 'static) {
        self.inner.borrow_mut().link_rewriter = Some(Rc::new(rewriter));
    }

    // ── Navigation ───────────────────────────────────────────────────────

    /// Resolve a URL against the route table and dispatch.
    ///
    /// The URL is normalized first (web root, hash marker, and query string
    /// stripped). On a match the before hook gates the handler via its
    /// `done` callback; the after hook runs after the handler's synchronous
    /// return. With no match the not-found handler runs (no before hook),
    /// and the after hook still fires with empty params.
    ///
    /// Direct `resolve` is never suppressed by [`Router::pause`].
    pub fn resolve(&self, url: &str) {
        let path = self.normalize(url);

        let (matched, not_found, before, after) = {
            let mut inner = self.inner.borrow_mut();
            inner.last_resolved = Some(path.clone());
            let matched = inner.routes.iter().find_map(|route| {
                route
                    .pattern
                    .matches(&path)
                    .map(|params| (route.handler.clone(), route.pattern.to_string(), params))
            });
            (
                matched,
                inner.not_found.clone(),
                inner.before.clone(),
                inner.after.clone(),
            )
        };
        // Borrow dropped above: handlers are free to re-enter the router.

        match matched {
            Some((handler, pattern, params)) => {
                tracing::debug!(%path, %pattern, "dispatching route");
                dispatch(handler, params, before, after);
            }
            None => {
                tracing::debug!(%path, "no route matched, falling back");
                if let Some(not_found) = not_found {
                    not_found(&Params::new());
                }
                if let Some(after) = after {
                    after(&Params::new());
                }
            }
        }
    }

    /// Push a history entry for `url`, then resolve it unless paused.
    pub fn navigate(&self, url: &str) {
        let href = self.href_for(url);
        let paused = {
            let mut inner = self.inner.borrow_mut();
            inner.history.push(&href);
            inner.paused
        };

        if paused {
            tracing::debug!(%url, "router paused, history updated without dispatch");
            return;
        }
        self.resolve(url);
    }

    /// Resolve once, then rewrite the URL without a second resolution.
    ///
    /// Order is deliberate and mirrors the original client: the resolve
    /// happens first, then pausing suppresses the dispatch that the
    /// history push would otherwise trigger.
    pub fn replace(&self, url: &str) {
        self.resolve(url);
        self.pause(true);
        self.navigate(url);
        self.pause(false);
    }

    /// Gate handler dispatch on subsequent `navigate` calls.
    pub fn pause(&self, flag: bool) {
        self.inner.borrow_mut().paused = flag;
    }

    pub fn is_paused(&self) -> bool {
        self.inner.borrow().paused
    }

    /// Entry point for browser-initiated location changes (back/forward).
    /// Honors the pause flag like `navigate`, but pushes no history entry.
    pub fn on_location_change(&self, url: &str) {
        if self.inner.borrow().paused {
            return;
        }
        self.resolve(url);
    }

    /// Re-run the installed link rewriter over the current page.
    ///
    /// Listeners attached earlier do not cover freshly inserted markup, so
    /// the application calls this after every DOM replacement — typically
    /// from its after hook. A no-op when no rewriter is installed.
    pub fn update_page_links(&self) {
        let rewriter = self.inner.borrow().link_rewriter.clone();
        if let Some(rewriter) = rewriter {
            rewriter(self);
        }
    }

    // ── Inspection ───────────────────────────────────────────────────────

    /// The most recently resolved (normalized) path.
    pub fn last_resolved(&self) -> Option<String> {
        self.inner.borrow().last_resolved.clone()
    }

    /// Whether a URL matches any registered route pattern.
    pub fn recognizes(&self, url: &str) -> bool {
        let path = self.normalize(url);
        self.inner
            .borrow()
            .routes
            .iter()
            .any(|route| route.pattern.matches(&path).is_some())
    }

    /// The full address for a client-side path, e.g.
    /// `https://trade.oceanmark.one/#!/trade/BTC-USDT`.
    pub fn href_for(&self, url: &str) -> String {
        let inner = self.inner.borrow();
        if url.starts_with(inner.root.as_str()) {
            return url.to_string();
        }
        let path = if url.starts_with('/') {
            url.to_string()
        } else {
            format!("/{}", url)
        };
        format!("{}/{}{}", inner.root.trim_end_matches('/'), inner.hash, path)
    }

    /// Strip the web root, hash marker, and query string; collapse to a
    /// leading-slash path with no trailing slash (root stays `/`).
    fn normalize(&self, url: &str) -> String {
        let inner = self.inner.borrow();
        let mut s = url;
        if let Some(rest) = s.strip_prefix(inner.root.as_str()) {
            s = rest;
        }
        if let Some(idx) = s.find(inner.hash.as_str()) {
            s = &s[idx + inner.hash.len()..];
        }
        let s = s.split('?').next().unwrap_or("");
        let trimmed = s.trim_end_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        }
    }
}

/// Run the before hook (if any), then the handler, then the after hook.
///
/// The continuation owns clones of everything it needs, so a hook may hold
/// the `done` callback across asynchronous work and complete dispatch later.
fn dispatch(
    handler: Handler,
    params: Params,
    before: Option<BeforeHook>,
    after: Option<AfterHook>,
) {
    match before {
        Some(hook) => {
            let gated_params = params.clone();
            let done: Done = Box::new(move |proceed| {
                if !proceed {
                    tracing::debug!("navigation cancelled by before hook");
                    return;
                }
                handler(&gated_params);
                if let Some(after) = after {
                    after(&gated_params);
                }
            });
            hook(done, &params);
        }
        None => {
            handler(&params);
            if let Some(after) = after {
                after(&params);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct RouterBuilder {
    root: String,
    hash: String,
    history: Box<dyn History>,
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self {
            root: network::DEFAULT_WEB_ROOT.to_string(),
            hash: network::HASH_MARKER.to_string(),
            history: Box::new(MemoryHistory::new()),
        }
    }
}

impl RouterBuilder {
    /// The web root stripped from incoming URLs before matching.
    pub fn root(mut self, root: &str) -> Self {
        self.root = root.trim_end_matches('/').to_string();
        self
    }

    /// The hash marker preceding client-side paths (default `#!`).
    pub fn hash(mut self, hash: &str) -> Self {
        self.hash = hash.to_string();
        self
    }

    /// The history backend to push navigation entries into.
    pub fn history(mut self, history: impl History + 'static) -> Self {
        self.history = Box::new(history);
        self
    }

    pub fn build(self) -> Router {
        Router {
            inner: Rc::new(RefCell::new(Inner {
                routes: Vec::new(),
                not_found: None,
                before: None,
                after: None,
                link_rewriter: None,
                history: self.history,
                root: self.root,
                hash: self.hash,
                paused: false,
                last_resolved: None,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn test_router() -> (Router, MemoryHistory) {
        let history = MemoryHistory::new();
        let router = Router::builder()
            .root("https://trade.oceanmark.one")
            .history(history.clone())
            .build();
        (router, history)
    }

    fn record(log: &Rc<RefCell<Vec<String>>>, entry: impl Into<String>) {
        log.borrow_mut().push(entry.into());
    }

    #[test]
    fn test_literal_route_dispatches_with_empty_params() {
        let (router, _) = test_router();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        router
            .register("/accounts", move |params| {
                assert!(params.is_empty());
                record(&l, "accounts");
            })
            .unwrap();

        router.resolve("/accounts");
        assert_eq!(*log.borrow(), vec!["accounts"]);
    }

    #[test]
    fn test_named_segment_passes_captured_value() {
        let (router, _) = test_router();
        let seen = Rc::new(RefCell::new(None));

        let s = seen.clone();
        router
            .register("/trade/:market", move |params| {
                *s.borrow_mut() = params.get("market").cloned();
            })
            .unwrap();

        router.resolve("/trade/BTC-USDT");
        assert_eq!(seen.borrow().as_deref(), Some("BTC-USDT"));
    }

    #[test]
    fn test_root_and_hash_marker_are_stripped() {
        let (router, _) = test_router();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        router
            .register("/trade/:market", move |params| {
                record(&l, format!("trade:{}", params["market"]));
            })
            .unwrap();

        router.resolve("https://trade.oceanmark.one/#!/trade/ETH-BTC?utm=x");
        assert_eq!(*log.borrow(), vec!["trade:ETH-BTC"]);
    }

    #[test]
    fn test_first_match_wins_broad_shadows_narrow() {
        let (router, _) = test_router();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        router
            .register("/users/:id", move |params| {
                record(&l, format!("param:{}", params["id"]));
            })
            .unwrap();
        let l = log.clone();
        router
            .register("/users/new", move |_| {
                record(&l, "literal");
            })
            .unwrap();

        // Registration order decides; there is no specificity ranking.
        router.resolve("/users/new");
        assert_eq!(*log.borrow(), vec!["param:new"]);
    }

    #[test]
    fn test_unmatched_url_hits_not_found_only() {
        let (router, _) = test_router();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        router
            .register("/", move |_| record(&l, "home"))
            .unwrap();
        let l = log.clone();
        router.register_not_found(move |_| record(&l, "404"));

        router.resolve("/unknown/path");
        assert_eq!(*log.borrow(), vec!["404"]);
    }

    #[test]
    fn test_after_hook_runs_for_not_found() {
        let (router, _) = test_router();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        router.register_not_found(move |_| record(&l, "404"));
        let l = log.clone();
        router.on_after(move |_| record(&l, "after"));

        router.resolve("/missing");
        assert_eq!(*log.borrow(), vec!["404", "after"]);
    }

    #[test]
    fn test_before_hook_gates_dispatch() {
        let (router, _) = test_router();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        router.register("/", move |_| record(&l, "handler")).unwrap();
        let l = log.clone();
        router.on_before(move |done, _| {
            record(&l, "before");
            done(true);
        });
        let l = log.clone();
        router.on_after(move |_| record(&l, "after"));

        router.resolve("/");
        assert_eq!(*log.borrow(), vec!["before", "handler", "after"]);
    }

    #[test]
    fn test_before_hook_done_false_cancels() {
        let (router, _) = test_router();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        router.register("/", move |_| record(&l, "handler")).unwrap();
        router.on_before(|done, _| done(false));
        let l = log.clone();
        router.on_after(move |_| record(&l, "after"));

        router.resolve("/");
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_before_hook_without_done_suspends_navigation() {
        let (router, _) = test_router();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        router.register("/", move |_| record(&l, "handler")).unwrap();
        router.on_before(|_done, _| {
            // `done` dropped without being called: navigation stays suspended.
        });

        router.resolve("/");
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_before_hook_may_complete_dispatch_late() {
        let (router, _) = test_router();
        let log = Rc::new(RefCell::new(Vec::new()));
        let parked: Rc<RefCell<Option<Done>>> = Rc::new(RefCell::new(None));

        let l = log.clone();
        router.register("/", move |_| record(&l, "handler")).unwrap();
        let p = parked.clone();
        router.on_before(move |done, _| {
            *p.borrow_mut() = Some(done);
        });

        router.resolve("/");
        assert!(log.borrow().is_empty());

        // The hook held the continuation across "async" work.
        let done = parked.borrow_mut().take().unwrap();
        done(true);
        assert_eq!(*log.borrow(), vec!["handler"]);
    }

    #[test]
    fn test_navigate_pushes_history_and_resolves() {
        let (router, history) = test_router();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        router
            .register("/trade/:market", move |params| {
                record(&l, format!("trade:{}", params["market"]));
            })
            .unwrap();

        router.navigate("/trade/BTC-USDT");
        assert_eq!(*log.borrow(), vec!["trade:BTC-USDT"]);
        assert_eq!(
            history.entries(),
            vec!["https://trade.oceanmark.one/#!/trade/BTC-USDT"]
        );
    }

    #[test]
    fn test_pause_suppresses_navigate_but_not_resolve() {
        let (router, history) = test_router();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        router.register("/accounts", move |_| record(&l, "hit")).unwrap();

        router.pause(true);
        router.navigate("/accounts");
        assert!(log.borrow().is_empty());
        // History is still updated while paused.
        assert_eq!(history.entries().len(), 1);

        // Direct resolve is never gated.
        router.resolve("/accounts");
        assert_eq!(*log.borrow(), vec!["hit"]);

        router.pause(false);
        router.navigate("/accounts");
        assert_eq!(*log.borrow(), vec!["hit", "hit"]);
    }

    #[test]
    fn test_replace_resolves_once_and_unpauses() {
        let (router, history) = test_router();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        router
            .register("/trade/:market", move |params| {
                record(&l, format!("trade:{}", params["market"]));
            })
            .unwrap();

        router.replace("/trade/ETH-BTC");
        assert_eq!(*log.borrow(), vec!["trade:ETH-BTC"]);
        assert_eq!(
            history.entries(),
            vec!["https://trade.oceanmark.one/#!/trade/ETH-BTC"]
        );
        assert!(!router.is_paused());
    }

    #[test]
    fn test_on_location_change_honors_pause() {
        let (router, _) = test_router();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        router.register("/", move |_| record(&l, "home")).unwrap();

        router.pause(true);
        router.on_location_change("https://trade.oceanmark.one/#!/");
        assert!(log.borrow().is_empty());

        router.pause(false);
        router.on_location_change("https://trade.oceanmark.one/#!/");
        assert_eq!(*log.borrow(), vec!["home"]);
    }

    #[test]
    fn test_update_page_links_invokes_rewriter() {
        let (router, _) = test_router();
        let count = Rc::new(RefCell::new(0u32));

        let c = count.clone();
        router.set_link_rewriter(move |_router| {
            *c.borrow_mut() += 1;
        });

        router.update_page_links();
        router.update_page_links();
        assert_eq!(*count.borrow(), 2);

        // Without a rewriter installed this is a no-op.
        let (bare, _) = test_router();
        bare.update_page_links();
    }

    #[test]
    fn test_recognizes_known_routes() {
        let (router, _) = test_router();
        router.register("/trade/:market", |_| {}).unwrap();

        assert!(router.recognizes("/trade/BTC-USDT"));
        assert!(router.recognizes("https://trade.oceanmark.one/#!/trade/BTC-USDT"));
        assert!(!router.recognizes("/withdrawals"));
    }

    #[test]
    fn test_last_resolved_tracks_normalized_path() {
        let (router, _) = test_router();
        router.register_not_found(|_| {});

        assert_eq!(router.last_resolved(), None);
        router.resolve("https://trade.oceanmark.one/#!/orders/BTC-USDT/");
        assert_eq!(router.last_resolved().as_deref(), Some("/orders/BTC-USDT"));
    }

    #[test]
    fn test_register_surfaces_malformed_pattern() {
        let (router, _) = test_router();
        assert!(router.register("", |_| {}).is_err());
        assert!(router.register("trade", |_| {}).is_err());
        assert!(router.register("/a//b", |_| {}).is_err());
    }

    #[test]
    fn test_handler_may_reenter_router() {
        let (router, _) = test_router();
        let log = Rc::new(RefCell::new(Vec::new()));

        let inner_router = router.clone();
        let l = log.clone();
        router
            .register("/sessions/new", move |_| {
                record(&l, "signin");
                // e.g. already authenticated: bounce to the accounts view.
                inner_router.replace("/accounts");
            })
            .unwrap();
        let l = log.clone();
        router
            .register("/accounts", move |_| record(&l, "accounts"))
            .unwrap();

        router.resolve("/sessions/new");
        assert_eq!(*log.borrow(), vec!["signin", "accounts"]);
    }
}
