use crate::{ConstructionError, Emptiness};
use std::fmt::{Display, Formatter};

/// The classification bucket of a [`ResourceState`].
///
/// Exactly one bucket applies to any resource.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ResourceKind {
    Loading,
    Success,
    Failure,
    Empty,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Loading,
        ResourceKind::Success,
        ResourceKind::Failure,
        ResourceKind::Empty,
    ];

    /// Success, failure and empty end the sequence of one operation.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ResourceKind::Loading)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Loading => "loading",
            ResourceKind::Success => "success",
            ResourceKind::Failure => "failure",
            ResourceKind::Empty => "empty",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The classified outcome of an asynchronous operation.
///
/// A resource is either still loading, or settled with some data, with an error,
/// or with nothing. The fields are fixed at construction, so the classification
/// derived from them can never go stale.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawResourceState<T, E>")
)]
pub struct ResourceState<T, E> {
    data: Option<T>,
    error: Option<E>,
    loading: bool,
}

impl<T, E> ResourceState<T, E> {
    /// The pending resource every operation starts with.
    pub const LOADING: Self = ResourceState {
        data: None,
        error: None,
        loading: true,
    };

    /// Builds a resource from its raw fields.
    ///
    /// Fails when `loading` is set together with data or an error.
    pub fn new(data: Option<T>, error: Option<E>, loading: bool) -> Result<Self, ConstructionError> {
        if loading {
            if data.is_some() {
                return Err(ConstructionError::LoadingWithData);
            }
            if error.is_some() {
                return Err(ConstructionError::LoadingWithError);
            }
        }
        Ok(ResourceState {
            data,
            error,
            loading,
        })
    }

    pub fn loading() -> Self {
        Self::LOADING
    }

    /// A settled resource without data. Always classified as empty.
    pub fn empty() -> Self {
        ResourceState {
            data: None,
            error: None,
            loading: false,
        }
    }

    pub fn success(data: T) -> Self {
        ResourceState {
            data: Some(data),
            error: None,
            loading: false,
        }
    }

    pub fn failure(error: E) -> Self {
        ResourceState {
            data: None,
            error: Some(error),
            loading: false,
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_failure(&self) -> bool {
        !self.loading && self.error.is_some()
    }

    /// Settled resources end the sequence of one operation.
    pub fn is_terminal(&self) -> bool {
        !self.loading
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn into_error(self) -> Option<E> {
        self.error
    }

    /// Splits the resource into `(data, error, loading)`.
    pub fn into_parts(self) -> (Option<T>, Option<E>, bool) {
        (self.data, self.error, self.loading)
    }

    pub fn as_ref(&self) -> ResourceState<&T, &E> {
        ResourceState {
            data: self.data.as_ref(),
            error: self.error.as_ref(),
            loading: self.loading,
        }
    }
}

impl<T: Emptiness, E> ResourceState<T, E> {
    pub fn is_empty(&self) -> bool {
        !self.loading && self.error.is_none() && self.data.is_empty_payload()
    }

    pub fn is_success(&self) -> bool {
        !self.loading && self.error.is_none() && !self.data.is_empty_payload()
    }

    /// The single bucket this resource belongs to.
    pub fn kind(&self) -> ResourceKind {
        if self.is_failure() {
            ResourceKind::Failure
        } else if self.is_empty() {
            ResourceKind::Empty
        } else if self.is_success() {
            ResourceKind::Success
        } else {
            ResourceKind::Loading
        }
    }
}

impl<T, E> Default for ResourceState<T, E> {
    fn default() -> Self {
        Self::LOADING
    }
}

impl<T, E> From<Result<T, E>> for ResourceState<T, E> {
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(data) => to_resource(data),
            Err(error) => to_failure(error),
        }
    }
}

/// Wraps a settled value. The result is a success or an empty resource depending
/// on [`Emptiness`].
pub fn to_resource<T, E>(data: T) -> ResourceState<T, E> {
    ResourceState::success(data)
}

/// Wraps a failure cause. The result is always a failure resource.
pub fn to_failure<T, E>(error: E) -> ResourceState<T, E> {
    ResourceState::failure(error)
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawResourceState<T, E> {
    data: Option<T>,
    error: Option<E>,
    #[serde(default)]
    loading: bool,
}

#[cfg(feature = "serde")]
impl<T, E> TryFrom<RawResourceState<T, E>> for ResourceState<T, E> {
    type Error = ConstructionError;

    fn try_from(raw: RawResourceState<T, E>) -> Result<Self, Self::Error> {
        ResourceState::new(raw.data, raw.error, raw.loading)
    }
}
