use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Decides whether a successful payload should be classified as *empty*.
///
/// Only text and finite ordered sequences can be empty, and only when they have
/// no elements. Every other value is non-empty, including numeric zero and maps
/// with no entries. Absent data is handled by [`ResourceState`](crate::ResourceState)
/// itself and is always empty.
///
/// Types of your own opt in with an empty impl, which keeps the default:
///
/// ```
/// use state_aware_resource::{to_resource, Emptiness};
///
/// struct Profile {
///     name: String,
/// }
///
/// impl Emptiness for Profile {}
///
/// let profile = to_resource::<_, ()>(Profile { name: String::new() });
/// assert!(profile.is_success());
/// ```
pub trait Emptiness {
    /// Returns true when the payload counts as empty. Defaults to `false`.
    fn is_empty_payload(&self) -> bool {
        false
    }
}

macro_rules! never_empty {
    ($($ty:ty),* $(,)?) => {
        $(impl Emptiness for $ty {})*
    };
}

never_empty!(
    (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
);

impl Emptiness for str {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for String {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for Cow<'_, str> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for [T] {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl<T, const N: usize> Emptiness for [T; N] {
    fn is_empty_payload(&self) -> bool {
        N == 0
    }
}

impl<T> Emptiness for Vec<T> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for VecDeque<T> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for LinkedList<T> {
    fn is_empty_payload(&self) -> bool {
        self.is_empty()
    }
}

// Keyed collections behave like objects: never empty, even without entries.
impl<K, V, S> Emptiness for HashMap<K, V, S> {}
impl<K, V> Emptiness for BTreeMap<K, V> {}
impl<T, S> Emptiness for HashSet<T, S> {}
impl<T> Emptiness for BTreeSet<T> {}

impl<T: Emptiness> Emptiness for Option<T> {
    fn is_empty_payload(&self) -> bool {
        match self {
            None => true,
            Some(value) => value.is_empty_payload(),
        }
    }
}

impl<T: Emptiness + ?Sized> Emptiness for &T {
    fn is_empty_payload(&self) -> bool {
        (**self).is_empty_payload()
    }
}

impl<T: Emptiness + ?Sized> Emptiness for Box<T> {
    fn is_empty_payload(&self) -> bool {
        (**self).is_empty_payload()
    }
}

impl<T: Emptiness + ?Sized> Emptiness for Rc<T> {
    fn is_empty_payload(&self) -> bool {
        (**self).is_empty_payload()
    }
}

impl<T: Emptiness + ?Sized> Emptiness for Arc<T> {
    fn is_empty_payload(&self) -> bool {
        (**self).is_empty_payload()
    }
}

#[cfg(feature = "serde")]
impl Emptiness for serde_json::Value {
    fn is_empty_payload(&self) -> bool {
        use serde_json::Value;
        match self {
            Value::Null => true,
            Value::String(text) => text.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Bool(_) | Value::Number(_) | Value::Object(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_sequences() {
        assert!("".is_empty_payload());
        assert!(String::new().is_empty_payload());
        assert!(!"x".is_empty_payload());
        assert!(Vec::<i32>::new().is_empty_payload());
        assert!(!vec![1].is_empty_payload());
        assert!([0u8; 0].is_empty_payload());
        assert!(!VecDeque::from([1, 2]).is_empty_payload());
    }

    #[test]
    fn test_values_that_are_never_empty() {
        assert!(!0i32.is_empty_payload());
        assert!(!0.0f64.is_empty_payload());
        assert!(!false.is_empty_payload());
        assert!(!HashMap::<String, i32>::new().is_empty_payload());
        assert!(!BTreeSet::<i32>::new().is_empty_payload());
    }

    #[test]
    fn test_wrappers_forward() {
        assert!(None::<i32>.is_empty_payload());
        assert!(Some(String::new()).is_empty_payload());
        assert!(!Some(3).is_empty_payload());
        assert!(Arc::new(Vec::<u8>::new()).is_empty_payload());
        assert!(!Box::new("x".to_string()).is_empty_payload());
    }
}
