//! Event system: signal vocabulary, publishers, input identifiers.

pub mod input;
pub mod publisher;
pub mod signal;

pub use input::{Button, ButtonAction, DragPhase, Key, MouseButton};
pub use publisher::{publish, EventHost, Handler, Publisher, Subscription, SubscriptionKey};
pub use signal::{Arg, Attr, Event, Signal, Source};
