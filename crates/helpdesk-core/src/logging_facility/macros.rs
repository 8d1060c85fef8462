//! Canonical logging macros
//!
//! Callers need `helpdesk-core-types` and `tracing` in their own
//! dependencies, since the expansion names both directly.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use helpdesk_core::log_op_start;
/// log_op_start!("ticket_create");
/// log_op_start!("ticket_delete", ticket_id = 7);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = helpdesk_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = helpdesk_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use helpdesk_core::log_op_end;
/// log_op_end!("ticket_create", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = helpdesk_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = helpdesk_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into `HdError` and records its kind and
/// stable code.
///
/// # Example
///
/// ```
/// # use helpdesk_core::{log_op_error, errors::HelpdeskError};
/// let err = HelpdeskError::EmptyField { field: "title" };
/// log_op_error!("ticket_update", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let hd_err: $crate::errors::HdError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = helpdesk_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?hd_err.kind(),
            err.code = hd_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let hd_err: $crate::errors::HdError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = helpdesk_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?hd_err.kind(),
            err.code = hd_err.code(),
            $($field)*
        );
    }};
}
