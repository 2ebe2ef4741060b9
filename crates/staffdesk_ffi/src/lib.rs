//! Flutter-facing FFI surface for the StaffDesk client core.

pub mod api;
