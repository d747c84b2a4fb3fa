//! Macros for declarative configuration construction.

/// Build a [`Configuration`](crate::core::Configuration) from a nested
/// declaration.
///
/// State and event names may be identifiers (used verbatim) or string
/// literals, for names that are not valid identifiers. The result is not
/// validated; pass it to [`Fsm::new`](crate::engine::Fsm::new) or call
/// `validate()`.
///
/// # Example
///
/// ```
/// use fsm_engine::fsm_config;
///
/// let config = fsm_config! {
///     initial: normal,
///     states: {
///         normal => { study => busy },
///         busy => { get_tired => sleeping, get_hungry => hungry },
///         hungry => { eat => normal },
///         sleeping => { get_hungry => hungry, "get-up" => normal },
///     }
/// };
///
/// assert_eq!(config.initial, "normal");
/// assert_eq!(config.states.len(), 4);
/// ```
#[macro_export]
macro_rules! fsm_config {
    (@name $name:ident) => {
        stringify!($name)
    };
    (@name $name:literal) => {
        $name
    };
    (
        initial: $initial:tt,
        states: {
            $(
                $state:tt => {
                    $($event:tt => $target:tt),* $(,)?
                }
            ),* $(,)?
        } $(,)?
    ) => {{
        #[allow(unused_mut)]
        let mut states = $crate::core::StateTable::new();
        $(
            states.insert(
                $crate::fsm_config!(@name $state),
                $crate::core::StateDefinition::new()
                    $(.on($crate::fsm_config!(@name $event), $crate::fsm_config!(@name $target)))*,
            );
        )*
        $crate::core::Configuration::new($crate::fsm_config!(@name $initial), states)
    }};
}
