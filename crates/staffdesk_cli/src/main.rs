//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `staffdesk_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe to validate core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("staffdesk_core ping={}", staffdesk_core::ping());
    println!("staffdesk_core version={}", staffdesk_core::core_version());
}
