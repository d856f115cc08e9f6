/// Builds a [`Handlers`](crate::Handlers) set from `bucket: callback` pairs.
///
/// The grammar requires at least one pair, so an empty set does not compile.
///
/// ```
/// use state_aware_resource::{handlers, to_failure};
///
/// let mut message = String::new();
/// to_failure::<Vec<u8>, _>("boom").on(&mut handlers! {
///     loading: || {},
///     failure: |error: &&str| message = error.to_string(),
/// });
/// assert_eq!(message, "boom");
/// ```
#[macro_export]
macro_rules! handlers {
    // One handler per bucket keyword
    (@handler success $callback:expr) => {
        $crate::Handler::success($callback)
    };
    (@handler failure $callback:expr) => {
        $crate::Handler::failure($callback)
    };
    (@handler empty $callback:expr) => {
        $crate::Handler::empty($callback)
    };
    (@handler loading $callback:expr) => {
        $crate::Handler::loading($callback)
    };

    // Entry point: the first pair seeds the set, the rest are chained
    ($kind:ident : $callback:expr $(, $rest_kind:ident : $rest_callback:expr)* $(,)?) => {
        $crate::Handlers::new($crate::handlers!(@handler $kind $callback))
            $(.with($crate::handlers!(@handler $rest_kind $rest_callback)))*
    };
}
