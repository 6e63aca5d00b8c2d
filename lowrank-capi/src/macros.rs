//! Common macros for opaque handle types

/// Generate the lifecycle functions of an opaque handle: release, clone, is_assigned
///
/// # Requirements
/// - The type must implement `Clone`
/// - The type name must follow the pattern `lra_*`
///
/// # Generated functions
/// - `lra_<TYPE>_release()` - Drops the object
/// - `lra_<TYPE>_clone()` - Creates a shallow copy (Arc-based, cheap)
/// - `lra_<TYPE>_is_assigned()` - Checks if pointer is non-null
///
/// # Example
/// ```ignore
/// // In types.rs
/// #[derive(Clone)]
/// pub struct lra_svd { inner: Arc<Decomposition> }
///
/// // In svd.rs
/// impl_opaque_type_common!(svd);
/// ```
#[macro_export]
macro_rules! impl_opaque_type_common {
    ($type_name:ident) => {
        paste::paste! {
            /// Release the object by dropping it
            ///
            /// # Safety
            /// The pointer must come from this library and must not be used after this call.
            #[unsafe(no_mangle)]
            pub extern "C" fn [<lra_ $type_name _release>](obj: *mut [<lra_ $type_name>]) {
                if obj.is_null() {
                    return;
                }
                let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| unsafe {
                    drop(Box::from_raw(obj));
                }));
            }

            /// Clone the object (shares the underlying data)
            ///
            /// # Returns
            /// A new handle that must be freed with `lra_<type>_release()`,
            /// or null if the input is null or a panic occurs.
            #[unsafe(no_mangle)]
            pub extern "C" fn [<lra_ $type_name _clone>](
                src: *const [<lra_ $type_name>]
            ) -> *mut [<lra_ $type_name>] {
                if src.is_null() {
                    return std::ptr::null_mut();
                }

                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| unsafe {
                    let cloned = (*src).clone();
                    Box::into_raw(Box::new(cloned))
                }));

                result.unwrap_or(std::ptr::null_mut())
            }

            /// Check whether the handle is assigned
            ///
            /// # Returns
            /// 1 if the handle is non-null, 0 otherwise
            #[unsafe(no_mangle)]
            pub extern "C" fn [<lra_ $type_name _is_assigned>](
                obj: *const [<lra_ $type_name>]
            ) -> libc::c_int {
                if obj.is_null() { 0 } else { 1 }
            }
        }
    };
}
