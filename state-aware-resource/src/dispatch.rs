use crate::{Emptiness, ResourceKind, ResourceState};
use tracing::trace;

/// A callback bound to exactly one classification bucket.
pub enum Handler<'a, T, E> {
    Success(Box<dyn FnMut(&T) + 'a>),
    Failure(Box<dyn FnMut(&E) + 'a>),
    Empty(Box<dyn FnMut() + 'a>),
    Loading(Box<dyn FnMut() + 'a>),
}

impl<'a, T, E> Handler<'a, T, E> {
    pub fn success(callback: impl FnMut(&T) + 'a) -> Self {
        Handler::Success(Box::new(callback))
    }

    pub fn failure(callback: impl FnMut(&E) + 'a) -> Self {
        Handler::Failure(Box::new(callback))
    }

    pub fn empty(callback: impl FnMut() + 'a) -> Self {
        Handler::Empty(Box::new(callback))
    }

    pub fn loading(callback: impl FnMut() + 'a) -> Self {
        Handler::Loading(Box::new(callback))
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Handler::Success(_) => ResourceKind::Success,
            Handler::Failure(_) => ResourceKind::Failure,
            Handler::Empty(_) => ResourceKind::Empty,
            Handler::Loading(_) => ResourceKind::Loading,
        }
    }
}

/// A partial set of handlers, one optional slot per bucket.
///
/// A set always starts from one [`Handler`], so it can never be empty. Buckets
/// left without a handler are silently ignored on dispatch.
///
/// ```
/// use state_aware_resource::{to_resource, Handler, Handlers};
///
/// let mut seen = None;
/// to_resource::<_, String>("v".to_string()).on(
///     &mut Handlers::new(Handler::success(|data: &String| seen = Some(data.clone())))
///         .with(Handler::failure(|_| unreachable!())),
/// );
/// assert_eq!(seen.as_deref(), Some("v"));
/// ```
pub struct Handlers<'a, T, E> {
    success: Option<Box<dyn FnMut(&T) + 'a>>,
    failure: Option<Box<dyn FnMut(&E) + 'a>>,
    empty: Option<Box<dyn FnMut() + 'a>>,
    loading: Option<Box<dyn FnMut() + 'a>>,
}

impl<'a, T, E> Handlers<'a, T, E> {
    pub fn new(first: Handler<'a, T, E>) -> Self {
        let handlers = Handlers {
            success: None,
            failure: None,
            empty: None,
            loading: None,
        };
        handlers.with(first)
    }

    /// Adds a handler, replacing any previous one for the same bucket.
    pub fn with(mut self, handler: Handler<'a, T, E>) -> Self {
        match handler {
            Handler::Success(callback) => self.success = Some(callback),
            Handler::Failure(callback) => self.failure = Some(callback),
            Handler::Empty(callback) => self.empty = Some(callback),
            Handler::Loading(callback) => self.loading = Some(callback),
        }
        self
    }

    pub fn handles(&self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Success => self.success.is_some(),
            ResourceKind::Failure => self.failure.is_some(),
            ResourceKind::Empty => self.empty.is_some(),
            ResourceKind::Loading => self.loading.is_some(),
        }
    }

    /// Invokes the handler matching the resource's bucket and returns that bucket,
    /// or `None` when the set has no handler for it.
    pub fn dispatch(&mut self, resource: &ResourceState<T, E>) -> Option<ResourceKind>
    where
        T: Emptiness,
    {
        let kind = resource.kind();
        let fired = match kind {
            ResourceKind::Success => match (self.success.as_mut(), resource.data()) {
                (Some(callback), Some(data)) => {
                    callback(data);
                    true
                }
                _ => false,
            },
            ResourceKind::Failure => match (self.failure.as_mut(), resource.error()) {
                (Some(callback), Some(error)) => {
                    callback(error);
                    true
                }
                _ => false,
            },
            ResourceKind::Empty => self.empty.as_mut().map(|callback| callback()).is_some(),
            ResourceKind::Loading => self.loading.as_mut().map(|callback| callback()).is_some(),
        };
        if fired {
            Some(kind)
        } else {
            trace!("no handler registered for {kind} resource");
            None
        }
    }
}

impl<'a, T, E> From<Handler<'a, T, E>> for Handlers<'a, T, E> {
    fn from(handler: Handler<'a, T, E>) -> Self {
        Handlers::new(handler)
    }
}

impl<T: Emptiness, E> ResourceState<T, E> {
    /// Runs at most one handler: the one registered for this resource's bucket.
    pub fn on(&self, handlers: &mut Handlers<'_, T, E>) {
        handlers.dispatch(self);
    }
}

/// Turns a handler set into a callback over resources, handy for `for_each` or
/// `inspect` on a stream of resource states.
pub fn on_resource<'a, T, E>(
    handlers: impl Into<Handlers<'a, T, E>>,
) -> impl FnMut(&ResourceState<T, E>) + 'a
where
    T: Emptiness + 'a,
    E: 'a,
{
    let mut handlers = handlers.into();
    move |resource| resource.on(&mut handlers)
}
