// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the native collaborators the
// device info provider reads from.

use devinfo_core::error::Result;

/// Unified bridge that groups every native capability the provider needs.
pub trait PlatformBridge: DeviceProperties + CapabilityHost {
    /// Human-readable platform name (e.g. "Android", "Desktop (stub)").
    fn platform_name(&self) -> &str;
}

/// Read-only device and build metadata.
pub trait DeviceProperties {
    /// Stable per-install identifier (`Settings.Secure.ANDROID_ID`).
    fn device_id(&self) -> Result<String>;

    /// `Build.VERSION.RELEASE`.
    fn os_version(&self) -> Result<String>;

    /// `Build.MODEL`.
    fn model(&self) -> Result<String>;

    /// `Build.MANUFACTURER`.
    fn manufacturer(&self) -> Result<String>;

    /// `Build.PRODUCT`.
    fn product(&self) -> Result<String>;

    /// `Build.FINGERPRINT`.
    fn fingerprint(&self) -> Result<String>;

    /// `Build.VERSION.SDK_INT`.
    fn sdk_int(&self) -> Result<u32>;

    /// `Build.SERIAL`, the build-time field. Reports "unknown" from API 28.
    fn legacy_serial(&self) -> Result<String>;

    /// `Build.getSerial()`. Requires the serial permission on API 28+.
    fn serial(&self) -> Result<String>;

    /// ID of the default time zone, e.g. "Europe/London".
    fn time_zone_id(&self) -> Result<String>;
}

/// Runtime permission primitives owned by the host.
pub trait CapabilityHost {
    /// Whether `permission` is currently granted.
    fn has_permission(&self, permission: &str) -> Result<bool>;

    /// Show the permission prompt for `permissions`.
    ///
    /// Returns as soon as the prompt is dispatched. The host later delivers
    /// one grant result per permission, in order, to the provider's
    /// resolution handler together with `request_code`.
    fn request_permissions(&self, request_code: i32, permissions: &[&str]) -> Result<()>;
}

impl<T: DeviceProperties + ?Sized> DeviceProperties for Box<T> {
    fn device_id(&self) -> Result<String> {
        (**self).device_id()
    }

    fn os_version(&self) -> Result<String> {
        (**self).os_version()
    }

    fn model(&self) -> Result<String> {
        (**self).model()
    }

    fn manufacturer(&self) -> Result<String> {
        (**self).manufacturer()
    }

    fn product(&self) -> Result<String> {
        (**self).product()
    }

    fn fingerprint(&self) -> Result<String> {
        (**self).fingerprint()
    }

    fn sdk_int(&self) -> Result<u32> {
        (**self).sdk_int()
    }

    fn legacy_serial(&self) -> Result<String> {
        (**self).legacy_serial()
    }

    fn serial(&self) -> Result<String> {
        (**self).serial()
    }

    fn time_zone_id(&self) -> Result<String> {
        (**self).time_zone_id()
    }
}

impl<T: CapabilityHost + ?Sized> CapabilityHost for Box<T> {
    fn has_permission(&self, permission: &str) -> Result<bool> {
        (**self).has_permission(permission)
    }

    fn request_permissions(&self, request_code: i32, permissions: &[&str]) -> Result<()> {
        (**self).request_permissions(request_code, permissions)
    }
}

impl<T: PlatformBridge + ?Sized> PlatformBridge for Box<T> {
    fn platform_name(&self) -> &str {
        (**self).platform_name()
    }
}
