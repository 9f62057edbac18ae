// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! devinfo — Native platform bridge abstractions.
//!
//! Defines the traits the device info provider reads through and picks the
//! implementation for the target operating system: JNI calls into ART on
//! Android, a self-contained stub everywhere else.

pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

/// Retrieves the bridge implementation for the target operating system.
pub fn platform_bridge() -> Box<dyn traits::PlatformBridge> {
    #[cfg(target_os = "android")]
    {
        // Android: `jni-rs` against the JVM/ART hosting the web view.
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // DESKTOP/CI: host-derived values so non-native builds still answer.
        Box::new(stub::StubBridge::new())
    }
}
