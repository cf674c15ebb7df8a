//! Per-object event subscription and synchronous dispatch.
//!
//! Every observable object (widget, style) owns a [`Publisher`]. Handlers
//! receive the host that owns the publisher (`&mut H`) plus the [`Signal`], so
//! they can mutate any part of the tree, including publishing further events.
//!
//! Dispatch is re-entrant: [`publish`] snapshots the matching subscriptions,
//! then takes each handler out of its slot while it runs and puts it back
//! afterwards. A handler removed during dispatch is dropped instead of being
//! restored, and a handler that is already running is skipped by nested
//! dispatches of the same event.

use std::fmt;

use slotmap::{new_key_type, SlotMap};

use super::signal::{Arg, Event, Signal, Source};

new_key_type! {
    /// Slot of a single handler inside a [`Publisher`].
    pub struct SubscriptionKey;
}

/// Boxed event handler.
pub type Handler<H> = Box<dyn FnMut(&mut H, &Signal)>;

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// Token returned by `subscribe`; pass it back to `unsubscribe`.
///
/// The token remembers which object it was issued by, so it cannot remove a
/// handler from a different publisher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    source: Source,
    event: Event,
    key: SubscriptionKey,
}

impl Subscription {
    /// The object whose publisher issued this token.
    pub fn source(&self) -> Source {
        self.source
    }

    /// The event the handler listens to.
    pub fn event(&self) -> Event {
        self.event
    }
}

// ---------------------------------------------------------------------------
// Publisher
// ---------------------------------------------------------------------------

struct Entry<H> {
    event: Event,
    name: Option<String>,
    modifiers: Vec<Arg>,
    seq: u64,
    /// `None` while the handler is executing.
    handler: Option<Handler<H>>,
}

/// Handler table of one observable object.
pub struct Publisher<H> {
    source: Source,
    entries: SlotMap<SubscriptionKey, Entry<H>>,
    next_seq: u64,
}

impl<H> Publisher<H> {
    /// Create an empty publisher for `source`.
    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: source.into(),
            entries: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    /// The object this publisher belongs to.
    pub fn source(&self) -> Source {
        self.source
    }

    /// Register `handler` for `event`.
    ///
    /// The handler only fires for signals whose argument list contains every
    /// value in `modifiers`. `name` allows later removal with
    /// [`unsubscribe_named`](Self::unsubscribe_named).
    pub fn subscribe<F>(
        &mut self,
        event: Event,
        name: Option<&str>,
        modifiers: Vec<Arg>,
        handler: F,
    ) -> Subscription
    where
        F: FnMut(&mut H, &Signal) + 'static,
    {
        let seq = self.next_seq;
        self.next_seq += 1;
        let key = self.entries.insert(Entry {
            event,
            name: name.map(str::to_owned),
            modifiers,
            seq,
            handler: Some(Box::new(handler)),
        });
        Subscription { source: self.source, event, key }
    }

    /// Register an anonymous handler.
    pub fn on<F>(&mut self, event: Event, modifiers: Vec<Arg>, handler: F) -> Subscription
    where
        F: FnMut(&mut H, &Signal) + 'static,
    {
        self.subscribe(event, None, modifiers, handler)
    }

    /// Remove the handler behind `subscription`.
    ///
    /// Returns `false` if it was already removed or was issued by another
    /// publisher.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        if subscription.source != self.source {
            return false;
        }
        match self.entries.get(subscription.key) {
            Some(entry) if entry.event == subscription.event => {
                self.entries.remove(subscription.key);
                true
            }
            _ => false,
        }
    }

    /// Remove every handler for `event` registered under `name`.
    pub fn unsubscribe_named(&mut self, event: Event, name: &str) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, e| !(e.event == event && e.name.as_deref() == Some(name)));
        before - self.entries.len()
    }

    /// Whether the subscription is still registered.
    pub fn is_subscribed(&self, subscription: Subscription) -> bool {
        subscription.source == self.source && self.entries.contains_key(subscription.key)
    }

    /// Whether anything listens to `event`.
    pub fn has_subscribers(&self, event: Event) -> bool {
        self.entries.values().any(|e| e.event == event)
    }

    /// Number of handlers listening to `event`.
    pub fn subscriber_count(&self, event: Event) -> usize {
        self.entries.values().filter(|e| e.event == event).count()
    }

    /// Remove every handler.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keys of the handlers that accept `event` with `args`, in registration
    /// order.
    pub fn matching(&self, event: Event, args: &[Arg]) -> Vec<SubscriptionKey> {
        let mut hits: Vec<(u64, SubscriptionKey)> = self
            .entries
            .iter()
            .filter(|(_, e)| e.event == event)
            .filter(|(_, e)| e.modifiers.len() <= args.len())
            .filter(|(_, e)| e.modifiers.iter().all(|m| args.contains(m)))
            .map(|(k, e)| (e.seq, k))
            .collect();
        hits.sort_unstable_by_key(|(seq, _)| *seq);
        hits.into_iter().map(|(_, k)| k).collect()
    }

    fn take_handler(&mut self, key: SubscriptionKey) -> Option<Handler<H>> {
        self.entries.get_mut(key).and_then(|e| e.handler.take())
    }

    fn restore_handler(&mut self, key: SubscriptionKey, handler: Handler<H>) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.handler = Some(handler);
                true
            }
            None => false,
        }
    }
}

impl<H> fmt::Debug for Publisher<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher")
            .field("source", &self.source)
            .field("subscriptions", &self.entries.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// An owner of publishers that handlers are invoked against.
pub trait EventHost: Sized {
    /// The publisher of `source`, if the object still exists.
    fn publisher_mut(&mut self, source: Source) -> Option<&mut Publisher<Self>>;
}

/// Deliver `signal` to every matching handler of its source, in registration
/// order. Returns the number of handlers invoked.
///
/// Publishing to an object without subscribers (or one that no longer exists)
/// is a no-op.
pub fn publish<H: EventHost>(host: &mut H, signal: &Signal) -> usize {
    let keys = match host.publisher_mut(signal.source) {
        Some(publisher) => publisher.matching(signal.event, &signal.args),
        None => return 0,
    };
    tracing::trace!(
        event = ?signal.event,
        source = ?signal.source,
        handlers = keys.len(),
        "publish"
    );

    let mut invoked = 0;
    for key in keys {
        let Some(mut handler) = host
            .publisher_mut(signal.source)
            .and_then(|p| p.take_handler(key))
        else {
            continue;
        };
        handler(host, signal);
        invoked += 1;
        let restored = host
            .publisher_mut(signal.source)
            .is_some_and(|p| p.restore_handler(key, handler));
        if !restored {
            tracing::trace!(
                event = ?signal.event,
                source = ?signal.source,
                "handler dropped during dispatch"
            );
        }
    }
    invoked
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::WidgetId;
    use slotmap::SlotMap;

    /// Minimal host with a single publisher and a call log.
    struct Host {
        id: WidgetId,
        publisher: Option<Publisher<Host>>,
        log: Vec<&'static str>,
        last: Option<Subscription>,
    }

    impl EventHost for Host {
        fn publisher_mut(&mut self, source: Source) -> Option<&mut Publisher<Self>> {
            if source == Source::Widget(self.id) {
                self.publisher.as_mut()
            } else {
                None
            }
        }
    }

    fn host() -> Host {
        let mut sm: SlotMap<WidgetId, ()> = SlotMap::with_key();
        let id = sm.insert(());
        Host {
            id,
            publisher: Some(Publisher::new(id)),
            log: Vec::new(),
            last: None,
        }
    }

    fn p(h: &mut Host) -> &mut Publisher<Host> {
        h.publisher.as_mut().unwrap()
    }

    fn fire(h: &mut Host, event: Event, args: Vec<Arg>) -> usize {
        let signal = Signal::new(event, h.id, args);
        publish(h, &signal)
    }

    // ── Subscription ─────────────────────────────────────────────────

    #[test]
    fn no_subscribers_is_noop() {
        let mut h = host();
        assert_eq!(fire(&mut h, Event::Update, vec![]), 0);
        assert!(!p(&mut h).has_subscribers(Event::Update));
    }

    #[test]
    fn handlers_fire_in_registration_order() {
        let mut h = host();
        p(&mut h).on(Event::Update, vec![], |h, _| h.log.push("first"));
        p(&mut h).on(Event::Update, vec![], |h, _| h.log.push("second"));
        p(&mut h).on(Event::Draw, vec![], |h, _| h.log.push("draw"));
        assert_eq!(fire(&mut h, Event::Update, vec![]), 2);
        assert_eq!(h.log, vec!["first", "second"]);
    }

    #[test]
    fn modifiers_filter_by_membership() {
        let mut h = host();
        p(&mut h).on(Event::Custom("test"), vec!["a".into()], |h, _| h.log.push("a"));
        p(&mut h).on(Event::Custom("test"), vec!["c".into()], |h, _| h.log.push("c"));
        fire(&mut h, Event::Custom("test"), vec!["a".into(), "b".into()]);
        assert_eq!(h.log, vec!["a"]);
    }

    #[test]
    fn more_modifiers_than_args_never_fires() {
        let mut h = host();
        p(&mut h).on(Event::Custom("x"), vec!["a".into(), "a".into()], |h, _| {
            h.log.push("hit")
        });
        fire(&mut h, Event::Custom("x"), vec!["a".into()]);
        assert!(h.log.is_empty());
    }

    #[test]
    fn handler_sees_signal() {
        let mut h = host();
        p(&mut h).on(Event::Click, vec![], |h, s| {
            if s.int(0) == Some(4) && s.int(1) == Some(9) {
                h.log.push("ok");
            }
        });
        fire(&mut h, Event::Click, vec![4.into(), 9.into()]);
        assert_eq!(h.log, vec!["ok"]);
    }

    // ── Unsubscription ───────────────────────────────────────────────

    #[test]
    fn unsubscribe_anonymous_handler() {
        let mut h = host();
        let sub = p(&mut h).on(Event::Update, vec![], |h, _| h.log.push("x"));
        assert!(p(&mut h).is_subscribed(sub));
        assert!(p(&mut h).unsubscribe(sub));
        assert!(!p(&mut h).unsubscribe(sub));
        fire(&mut h, Event::Update, vec![]);
        assert!(h.log.is_empty());
    }

    #[test]
    fn unsubscribe_rejects_foreign_token() {
        let mut a = host();
        let mut b = host();
        let sub = p(&mut a).on(Event::Update, vec![], |_, _| {});
        assert!(!p(&mut b).unsubscribe(sub));
        assert!(p(&mut a).is_subscribed(sub));
    }

    #[test]
    fn unsubscribe_named_removes_all_with_name() {
        let mut h = host();
        p(&mut h).subscribe(Event::Update, Some("tick"), vec![], |h, _| h.log.push("1"));
        p(&mut h).subscribe(Event::Update, Some("tick"), vec![], |h, _| h.log.push("2"));
        p(&mut h).subscribe(Event::Update, Some("other"), vec![], |h, _| h.log.push("3"));
        p(&mut h).subscribe(Event::Draw, Some("tick"), vec![], |h, _| h.log.push("4"));
        assert_eq!(p(&mut h).unsubscribe_named(Event::Update, "tick"), 2);
        fire(&mut h, Event::Update, vec![]);
        assert_eq!(h.log, vec!["3"]);
        assert_eq!(p(&mut h).subscriber_count(Event::Draw), 1);
    }

    // ── Re-entrancy ──────────────────────────────────────────────────

    #[test]
    fn handler_can_unsubscribe_itself() {
        let mut h = host();
        let sub = p(&mut h).on(Event::Update, vec![], |h, _| {
            h.log.push("once");
            let sub = h.last.unwrap();
            h.publisher.as_mut().unwrap().unsubscribe(sub);
        });
        h.last = Some(sub);
        fire(&mut h, Event::Update, vec![]);
        fire(&mut h, Event::Update, vec![]);
        assert_eq!(h.log, vec!["once"]);
        assert!(!p(&mut h).has_subscribers(Event::Update));
    }

    #[test]
    fn handler_can_publish_nested_event() {
        let mut h = host();
        p(&mut h).on(Event::Update, vec![], |h, _| {
            h.log.push("update");
            let signal = Signal::new(Event::Draw, h.id, vec![]);
            publish(h, &signal);
        });
        p(&mut h).on(Event::Draw, vec![], |h, _| h.log.push("draw"));
        fire(&mut h, Event::Update, vec![]);
        assert_eq!(h.log, vec!["update", "draw"]);
    }

    #[test]
    fn nested_dispatch_skips_running_handler() {
        let mut h = host();
        p(&mut h).on(Event::Update, vec![], |h, _| {
            h.log.push("outer");
            if h.log.len() < 5 {
                let signal = Signal::new(Event::Update, h.id, vec![]);
                publish(h, &signal);
            }
        });
        fire(&mut h, Event::Update, vec![]);
        assert_eq!(h.log, vec!["outer"]);
    }

    #[test]
    fn handler_removed_by_earlier_handler_does_not_fire() {
        let mut h = host();
        p(&mut h).on(Event::Update, vec![], |h, _| {
            h.log.push("first");
            let sub = h.last.unwrap();
            h.publisher.as_mut().unwrap().unsubscribe(sub);
        });
        let second = p(&mut h).on(Event::Update, vec![], |h, _| h.log.push("second"));
        h.last = Some(second);
        fire(&mut h, Event::Update, vec![]);
        assert_eq!(h.log, vec!["first"]);
    }

    #[test]
    fn vanished_publisher_drops_handler() {
        let mut h = host();
        p(&mut h).on(Event::Update, vec![], |h, _| {
            h.publisher = None;
        });
        assert_eq!(fire(&mut h, Event::Update, vec![]), 1);
        assert_eq!(fire(&mut h, Event::Update, vec![]), 0);
    }
}
