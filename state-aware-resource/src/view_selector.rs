//! Reactive selection of one rendering per resource bucket.
//!
//! The decision of what to do with an incoming resource is the pure [`transition`]
//! function. [`ViewSelector`] interprets its result against templates and views
//! supplied by the UI layer, so at most one view is alive at a time and a view is
//! never recreated while successive resources stay in the same bucket.

use crate::{Emptiness, ResourceKind, ResourceState};
use futures::StreamExt;
use futures_core::stream::Stream;
use futures_signals::signal::{Signal, SignalExt};
use std::pin::pin;
use tracing::{debug, trace};

/// What the view area has to do for an incoming resource.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Transition {
    /// Nothing was shown and nothing is requested.
    Keep,
    /// Same bucket as before: refresh the active view in place.
    Rebind(ResourceKind),
    /// Bucket changed: dispose the previous view, then show `to`.
    Switch {
        from: Option<ResourceKind>,
        to: ResourceKind,
    },
    /// The resource went away: dispose the previous view.
    Clear,
}

/// Decides the transition from the currently selected bucket to the bucket of the
/// incoming resource, where `None` means "no resource".
pub fn transition(current: Option<ResourceKind>, incoming: Option<ResourceKind>) -> Transition {
    match (current, incoming) {
        (None, None) => Transition::Keep,
        (Some(_), None) => Transition::Clear,
        (Some(current), Some(incoming)) if current == incoming => Transition::Rebind(incoming),
        (from, Some(to)) => Transition::Switch { from, to },
    }
}

/// The unwrapped payload handed to a view.
#[derive(Debug, Eq, PartialEq)]
pub enum Payload<'a, T, E> {
    Data(&'a T),
    Error(&'a E),
    None,
}

impl<T, E> Clone for Payload<'_, T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, E> Copy for Payload<'_, T, E> {}

/// Everything a view can see of the resource it renders.
#[derive(Debug)]
pub struct ViewContext<'a, T, E> {
    resource: &'a ResourceState<T, E>,
    kind: ResourceKind,
}

impl<T, E> Clone for ViewContext<'_, T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, E> Copy for ViewContext<'_, T, E> {}

impl<'a, T: Emptiness, E> ViewContext<'a, T, E> {
    pub fn new(resource: &'a ResourceState<T, E>) -> Self {
        ViewContext {
            resource,
            kind: resource.kind(),
        }
    }
}

impl<'a, T, E> ViewContext<'a, T, E> {
    /// Data for success and empty, the error for failure, nothing for loading.
    pub fn implicit(&self) -> Payload<'a, T, E> {
        match self.kind {
            ResourceKind::Success | ResourceKind::Empty => {
                self.resource.data().map_or(Payload::None, Payload::Data)
            }
            ResourceKind::Failure => self.resource.error().map_or(Payload::None, Payload::Error),
            ResourceKind::Loading => Payload::None,
        }
    }

    pub fn data(&self) -> Option<&'a T> {
        self.resource.data()
    }

    pub fn error(&self) -> Option<&'a E> {
        self.resource.error()
    }

    pub fn resource(&self) -> &'a ResourceState<T, E> {
        self.resource
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

/// A live rendering created from a [`Template`].
pub trait View<T, E> {
    /// Refreshes the view with a newer resource of the same bucket.
    fn rebind(&mut self, context: ViewContext<'_, T, E>);

    /// Tears the view down. Dropping it is the default.
    fn dispose(self: Box<Self>) {}
}

/// An instantiable rendering registered for one bucket.
pub trait Template<T, E> {
    fn instantiate(&mut self, context: ViewContext<'_, T, E>) -> Box<dyn View<T, E>>;
}

impl<T, E, F> Template<T, E> for F
where
    F: FnMut(ViewContext<'_, T, E>) -> Box<dyn View<T, E>>,
{
    fn instantiate(&mut self, context: ViewContext<'_, T, E>) -> Box<dyn View<T, E>> {
        self(context)
    }
}

struct Templates<T, E> {
    loading: Option<Box<dyn Template<T, E>>>,
    success: Option<Box<dyn Template<T, E>>>,
    failure: Option<Box<dyn Template<T, E>>>,
    empty: Option<Box<dyn Template<T, E>>>,
}

impl<T, E> Templates<T, E> {
    fn slot(&mut self, kind: ResourceKind) -> &mut Option<Box<dyn Template<T, E>>> {
        match kind {
            ResourceKind::Loading => &mut self.loading,
            ResourceKind::Success => &mut self.success,
            ResourceKind::Failure => &mut self.failure,
            ResourceKind::Empty => &mut self.empty,
        }
    }
}

/// Keeps exactly one view, or none, in sync with the latest resource.
pub struct ViewSelector<T, E> {
    templates: Templates<T, E>,
    resource: Option<ResourceState<T, E>>,
    selected: Option<ResourceKind>,
    active: Option<(ResourceKind, Box<dyn View<T, E>>)>,
}

impl<T, E> Default for ViewSelector<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> ViewSelector<T, E> {
    /// A selector without templates. Every bucket renders an empty area.
    pub fn new() -> Self {
        ViewSelector {
            templates: Templates {
                loading: None,
                success: None,
                failure: None,
                empty: None,
            },
            resource: None,
            selected: None,
            active: None,
        }
    }

    /// A selector whose primary template fills the success slot.
    pub fn with_primary(template: impl Template<T, E> + 'static) -> Self {
        Self::new().with_template(ResourceKind::Success, template)
    }

    pub fn with_template(mut self, kind: ResourceKind, template: impl Template<T, E> + 'static) -> Self {
        *self.templates.slot(kind) = Some(Box::new(template));
        self
    }

    /// The bucket of the latest resource, whether or not a view renders it.
    pub fn selected_kind(&self) -> Option<ResourceKind> {
        self.selected
    }

    /// The bucket of the view currently alive.
    pub fn active_kind(&self) -> Option<ResourceKind> {
        self.active.as_ref().map(|(kind, _)| *kind)
    }

    pub fn has_view(&self) -> bool {
        self.active.is_some()
    }

    pub fn resource(&self) -> Option<&ResourceState<T, E>> {
        self.resource.as_ref()
    }

    fn dispose_active(&mut self) {
        if let Some((kind, view)) = self.active.take() {
            trace!("disposing {kind} view");
            view.dispose();
        }
    }

    fn activate(&mut self, kind: ResourceKind) {
        let Self {
            templates,
            resource,
            active,
            ..
        } = self;
        let (Some(template), Some(resource)) = (templates.slot(kind).as_mut(), resource.as_ref()) else {
            trace!("no {kind} template registered, leaving the view area empty");
            return;
        };
        let context = ViewContext { resource, kind };
        *active = Some((kind, template.instantiate(context)));
    }
}

impl<T: Emptiness, E> ViewSelector<T, E> {
    /// Registers or removes the template for `kind`.
    ///
    /// When `kind` is the selected bucket, the current view is disposed and the new
    /// template, if any, is instantiated right away.
    pub fn set_template(&mut self, kind: ResourceKind, template: Option<Box<dyn Template<T, E>>>) {
        *self.templates.slot(kind) = template;
        if self.selected == Some(kind) {
            self.dispose_active();
            self.activate(kind);
        }
    }

    /// Feeds the latest resource, or `None` when there is no resource at all, and
    /// returns the transition that was applied.
    pub fn update(&mut self, resource: Option<ResourceState<T, E>>) -> Transition {
        let incoming = resource.as_ref().map(ResourceState::kind);
        let step = transition(self.selected, incoming);
        self.resource = resource;
        self.selected = incoming;

        match step {
            Transition::Keep => {}
            Transition::Rebind(kind) => {
                if let (Some((_, view)), Some(resource)) = (self.active.as_mut(), self.resource.as_ref()) {
                    trace!("rebinding {kind} view");
                    view.rebind(ViewContext { resource, kind });
                }
            }
            Transition::Switch { from, to } => {
                debug!("switching view from {from:?} to {to}");
                self.dispose_active();
                self.activate(to);
            }
            Transition::Clear => {
                debug!("resource cleared, emptying the view area");
                self.dispose_active();
            }
        }
        step
    }

    /// Disposes the active view and forgets the resource.
    pub fn clear(&mut self) -> Transition {
        self.update(None)
    }

    /// Applies every item of `stream` in arrival order until it ends.
    ///
    /// Items may be resource states or `Option`s of them.
    pub async fn drive<S, I>(&mut self, stream: S)
    where
        S: Stream<Item = I>,
        I: Into<Option<ResourceState<T, E>>>,
    {
        let mut stream = pin!(stream);
        while let Some(item) = stream.next().await {
            self.update(item.into());
        }
    }

    /// Follows a signal of the latest resource until the signal ends.
    pub async fn drive_signal<S>(&mut self, signal: S)
    where
        S: Signal<Item = Option<ResourceState<T, E>>>,
    {
        self.drive(signal.to_stream()).await
    }
}

impl<T, E> Drop for ViewSelector<T, E> {
    fn drop(&mut self) {
        self.dispose_active();
    }
}
