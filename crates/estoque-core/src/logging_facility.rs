//! Structured operation logging
//!
//! The binary calls [`init`] once with the format picked by `--log`; without
//! it no subscriber is installed and events are dropped. Store operations
//! report through the `log_op_*` macros using the names in [`schema`], and
//! tests record them with [`init_test_capture`].

pub mod init;
pub mod macros;
pub mod schema;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
