//! A recording stand-in for a UI layer.
//!
//! [`RecordingTemplate`] instantiates views that report every lifecycle step to a
//! shared [`ViewLog`], which makes [`ViewSelector`](crate::ViewSelector) behaviour
//! observable without a rendering engine.

use crate::{Payload, ResourceKind, Template, View, ViewContext};
use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One lifecycle step of a recorded view.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ViewEvent {
    /// A view was created, bound to the given payload.
    Instantiated { kind: ResourceKind, payload: String },
    /// An existing view received a newer payload.
    Rebound { kind: ResourceKind, payload: String },
    /// A view was torn down.
    Disposed { kind: ResourceKind },
}

impl ViewEvent {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ViewEvent::Instantiated { kind, .. }
            | ViewEvent::Rebound { kind, .. }
            | ViewEvent::Disposed { kind } => *kind,
        }
    }
}

/// Shared, append-only record of view events.
#[derive(Debug, Clone, Default)]
pub struct ViewLog {
    events: Arc<Mutex<Vec<ViewEvent>>>,
}

impl ViewLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ViewEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record(&self, event: ViewEvent) {
        self.lock().push(event);
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of recorded events matching `predicate`.
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&ViewEvent) -> bool,
    {
        self.lock().iter().filter(|event| predicate(event)).count()
    }

    pub fn instantiated(&self, kind: ResourceKind) -> usize {
        self.count(|event| matches!(event, ViewEvent::Instantiated { kind: k, .. } if *k == kind))
    }

    pub fn rebound(&self, kind: ResourceKind) -> usize {
        self.count(|event| matches!(event, ViewEvent::Rebound { kind: k, .. } if *k == kind))
    }

    pub fn disposed(&self, kind: ResourceKind) -> usize {
        self.count(|event| matches!(event, ViewEvent::Disposed { kind: k } if *k == kind))
    }

    /// The payload most recently bound to a view of `kind`, by instantiation or rebind.
    pub fn last_payload(&self, kind: ResourceKind) -> Option<String> {
        self.lock().iter().rev().find_map(|event| match event {
            ViewEvent::Instantiated { kind: k, payload } | ViewEvent::Rebound { kind: k, payload }
                if *k == kind =>
            {
                Some(payload.clone())
            }
            _ => None,
        })
    }
}

/// Formats the unwrapped payload of a context with `Debug`; loading renders as "".
pub fn describe<T: Debug, E: Debug>(context: &ViewContext<'_, T, E>) -> String {
    match context.implicit() {
        Payload::Data(data) => format!("{data:?}"),
        Payload::Error(error) => format!("{error:?}"),
        Payload::None => String::new(),
    }
}

/// A template whose views record their lifecycle into a [`ViewLog`].
#[derive(Debug, Clone)]
pub struct RecordingTemplate {
    kind: ResourceKind,
    log: ViewLog,
}

impl RecordingTemplate {
    pub fn new(kind: ResourceKind, log: &ViewLog) -> Self {
        RecordingTemplate {
            kind,
            log: log.clone(),
        }
    }
}

impl<T: Debug, E: Debug> Template<T, E> for RecordingTemplate {
    fn instantiate(&mut self, context: ViewContext<'_, T, E>) -> Box<dyn View<T, E>> {
        let payload = describe(&context);
        self.log.record(ViewEvent::Instantiated {
            kind: self.kind,
            payload: payload.clone(),
        });
        Box::new(RecordingView {
            kind: self.kind,
            log: self.log.clone(),
            payload,
        })
    }
}

/// A view created by [`RecordingTemplate`].
#[derive(Debug)]
pub struct RecordingView {
    kind: ResourceKind,
    log: ViewLog,
    payload: String,
}

impl RecordingView {
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl<T: Debug, E: Debug> View<T, E> for RecordingView {
    fn rebind(&mut self, context: ViewContext<'_, T, E>) {
        self.payload = describe(&context);
        self.log.record(ViewEvent::Rebound {
            kind: self.kind,
            payload: self.payload.clone(),
        });
    }

    fn dispose(self: Box<Self>) {
        self.log.record(ViewEvent::Disposed { kind: self.kind });
    }
}
