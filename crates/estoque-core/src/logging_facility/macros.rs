//! Operation logging macros
//!
//! A store operation emits `log_op_start!` once, then exactly one of
//! `log_op_end!` or `log_op_error!`. Extra `key = value` fields (table,
//! product_id, rows) follow the required ones.

/// Log the start of an operation
///
/// ```
/// # use estoque_core::log_op_start;
/// log_op_start!("product_get", table = "products", product_id = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_START,
            $($($field)*)?
        )
    };
}

/// Log the successful end of an operation with its duration
///
/// ```
/// # use estoque_core::log_op_end;
/// log_op_end!("product_list", duration_ms = 3, rows = 12u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        )
    };
}

/// Log a failed operation
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError);
/// the event carries its kind, stable code and rendered message.
///
/// ```
/// # use estoque_core::{log_op_error, errors::EstoqueError};
/// let err = EstoqueError::ProductNotFound { id: 42 };
/// log_op_error!("product_get", err, duration_ms = 1, table = "products");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            error = %ex_err,
            $($($field)*)?
        )
    }};
}
