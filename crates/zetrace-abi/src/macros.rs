//! Helper macros for traced entry point generation.
//!
//! Provides `traced_fns!`, which generates one traced wrapper per entry point
//! plus an `install_traced` function filling the matching dispatch table
//! slots.

/// Generate traced wrappers with the real entry points' parameter lists.
///
/// # Usage
///
/// ```ignore
/// traced_fns! {
///     /// `zeFenceReset` through the tracing layer.
///     fn ze_fence_reset_tracing => fence_reset, FenceResetParams(h_fence: FenceHandle);
/// }
/// ```
///
/// Each wrapper is a `pub unsafe extern "C" fn` that looks up the real
/// implementation in the installed driver table (a missing slot yields
/// `ZeResult::ErrorUninitialized`) and hands the call to the global tracing
/// layer.
macro_rules! traced_fns {
    ($(
        $(#[$meta:meta])*
        fn $name:ident => $field:ident, $params:ident ( $($arg:ident : $ty:ty),* $(,)? );
    )*) => {
        $(
            $(#[$meta])*
            #[doc = concat!("Traced; see [`", stringify!($params), "`].")]
            ///
            /// # Safety
            ///
            /// Pointer arguments, as rewritten by any enabled prolog, must be
            /// valid for the real implementation.
            pub unsafe extern "C" fn $name( $($arg : $ty),* ) -> ZeResult {
                let Some(real) = crate::ddi::real_fn::<$params>() else {
                    return ZeResult::ErrorUninitialized;
                };
                // SAFETY: forwarded from the caller.
                unsafe {
                    crate::layer_state::tracing_layer().dispatch($params { $($arg),* }, real)
                }
            }
        )*

        /// Point every slot covered by this module at its traced wrapper.
        pub(crate) fn install_traced(table: &mut DdiTable) {
            $( table.$field = Some($name); )*
        }
    };
}

pub(crate) use traced_fns;
