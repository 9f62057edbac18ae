// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the device info provider.

use serde::{Deserialize, Serialize};

/// Manufacturer string reported by Amazon Fire devices.
pub const AMAZON_MANUFACTURER: &str = "Amazon";

/// Placeholder reported in place of the serial when the read is not authorised.
pub const NO_PERMISSION: &str = "no_permission";

/// Operating system family reported to the web view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "Android")]
    Android,
    /// Fire OS, Amazon's Android fork.
    #[serde(rename = "amazon-fireos")]
    AmazonFireOs,
}

impl Platform {
    /// Classify by manufacturer. Only an exact, case-sensitive match on
    /// [`AMAZON_MANUFACTURER`] selects Fire OS.
    pub fn from_manufacturer(manufacturer: &str) -> Self {
        if manufacturer == AMAZON_MANUFACTURER {
            Self::AmazonFireOs
        } else {
            Self::Android
        }
    }

    /// Wire name of the platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::AmazonFireOs => "amazon-fireos",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hardware serial number, or the marker that the read was not authorised.
///
/// On the wire both forms are plain strings; the denied form is
/// [`NO_PERMISSION`]. The encoding is ambiguous for a device whose real
/// serial is literally "no_permission": it reads back as `NoPermission`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Serial {
    Value(String),
    NoPermission,
}

impl Serial {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Value(serial) => serial,
            Self::NoPermission => NO_PERMISSION,
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl From<String> for Serial {
    fn from(raw: String) -> Self {
        if raw == NO_PERMISSION {
            Self::NoPermission
        } else {
            Self::Value(raw)
        }
    }
}

impl From<Serial> for String {
    fn from(serial: Serial) -> Self {
        match serial {
            Serial::Value(value) => value,
            Serial::NoPermission => NO_PERMISSION.to_string(),
        }
    }
}

/// Snapshot of device attributes handed to the web view.
///
/// Built fresh for every request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Stable per-install identifier (`Settings.Secure.ANDROID_ID`).
    pub uuid: String,
    /// OS release string, e.g. "14".
    #[serde(rename = "version")]
    pub os_version: String,
    pub platform: Platform,
    pub model: String,
    pub manufacturer: String,
    /// Best-effort emulator detection, see [`is_virtual_device`].
    #[serde(rename = "isVirtual")]
    pub is_virtual: bool,
    pub serial: Serial,
    /// API level as a decimal string, e.g. "34".
    pub sdk_version: String,
}

/// Emulator heuristic: the build fingerprint mentions "generic" or the
/// product name mentions "sdk". Custom emulator images can slip through
/// and some physical devices can match.
pub fn is_virtual_device(fingerprint: &str, product: &str) -> bool {
    fingerprint.contains("generic") || product.contains("sdk")
}

/// Actions the provider answers, resolved once from the bridge's action name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GetDeviceInfo,
    GetPermission,
}

impl Action {
    /// Resolve a wire action name. Unknown names return `None` so the host
    /// can offer the request to another plugin.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "getDeviceInfo" => Some(Self::GetDeviceInfo),
            "getPermission" => Some(Self::GetPermission),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::GetDeviceInfo => "getDeviceInfo",
            Self::GetPermission => "getPermission",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the host's grant results, in request order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionGrant {
    Granted,
    Denied,
}

impl PermissionGrant {
    /// Map `PackageManager.PERMISSION_GRANTED` (0) and anything else.
    pub fn from_android(code: i32) -> Self {
        if code == 0 { Self::Granted } else { Self::Denied }
    }
}

/// Outcome delivered to a waiting caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginResult {
    /// Bare success signal (permission confirmed or not required).
    Ok,
    /// Success carrying a device record.
    Device(DeviceRecord),
    /// The platform bridge failed while reading device state.
    Error(String),
}

impl PluginResult {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Error(_))
    }

    /// JSON form posted back to the web view.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Self::Ok => Ok(serde_json::json!({ "status": "OK" })),
            Self::Device(record) => serde_json::to_value(record),
            Self::Error(message) => Ok(serde_json::json!({
                "status": "ERROR",
                "message": message,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(serial: Serial) -> DeviceRecord {
        DeviceRecord {
            uuid: "9774d56d682e549c".into(),
            os_version: "14".into(),
            platform: Platform::Android,
            model: "Pixel 8".into(),
            manufacturer: "Google".into(),
            is_virtual: false,
            serial,
            sdk_version: "34".into(),
        }
    }

    #[test]
    fn platform_requires_exact_manufacturer() {
        assert_eq!(Platform::from_manufacturer("Amazon"), Platform::AmazonFireOs);
        assert_eq!(Platform::from_manufacturer("amazon"), Platform::Android);
        assert_eq!(Platform::from_manufacturer("Amazon.com"), Platform::Android);
        assert_eq!(Platform::from_manufacturer(" Amazon"), Platform::Android);
        assert_eq!(Platform::from_manufacturer("samsung"), Platform::Android);
    }

    #[test]
    fn virtual_heuristic() {
        assert!(is_virtual_device("google/sdk_gphone64/generic:14", "anything"));
        assert!(is_virtual_device("generic", ""));
        assert!(is_virtual_device("google/oriole/oriole:14", "sdk_gphone64_x86_64"));
        assert!(!is_virtual_device("google/oriole/oriole:14", "oriole"));
        // case-sensitive substring match
        assert!(!is_virtual_device("GENERIC", "SDK"));
    }

    #[test]
    fn record_uses_wire_keys() {
        let json = serde_json::to_value(record(Serial::Value("HT7A1B2C3".into()))).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "isVirtual",
                "manufacturer",
                "model",
                "platform",
                "sdk_version",
                "serial",
                "uuid",
                "version"
            ]
        );
        assert_eq!(obj["platform"], "Android");
        assert_eq!(obj["serial"], "HT7A1B2C3");
        assert_eq!(obj["sdk_version"], "34");
        assert_eq!(obj["isVirtual"], false);
    }

    #[test]
    fn denied_serial_serializes_as_sentinel() {
        let json = serde_json::to_value(record(Serial::NoPermission)).unwrap();
        assert_eq!(json["serial"], "no_permission");

        let back: DeviceRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.serial, Serial::NoPermission);
        assert!(!back.serial.is_authorized());
    }

    #[test]
    fn literal_sentinel_serial_reads_back_as_denied() {
        let json = serde_json::to_value(record(Serial::Value(NO_PERMISSION.into()))).unwrap();
        let back: DeviceRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.serial, Serial::NoPermission);
    }

    #[test]
    fn fire_os_wire_name() {
        let json = serde_json::to_value(Platform::AmazonFireOs).unwrap();
        assert_eq!(json, "amazon-fireos");
        assert_eq!(Platform::AmazonFireOs.to_string(), "amazon-fireos");
    }

    #[test]
    fn action_names() {
        assert_eq!(Action::from_name("getDeviceInfo"), Some(Action::GetDeviceInfo));
        assert_eq!(Action::from_name("getPermission"), Some(Action::GetPermission));
        assert_eq!(Action::from_name("fooBar"), None);
        assert_eq!(Action::from_name("getdeviceinfo"), None);
        assert_eq!(Action::GetPermission.to_string(), "getPermission");
    }

    #[test]
    fn android_grant_codes() {
        assert_eq!(PermissionGrant::from_android(0), PermissionGrant::Granted);
        assert_eq!(PermissionGrant::from_android(-1), PermissionGrant::Denied);
    }

    #[test]
    fn result_json() {
        assert_eq!(PluginResult::Ok.to_json().unwrap()["status"], "OK");

        let err = PluginResult::Error("boom".into());
        assert!(!err.is_success());
        assert_eq!(err.to_json().unwrap()["message"], "boom");

        let device = PluginResult::Device(record(Serial::NoPermission));
        assert!(device.is_success());
        assert_eq!(device.to_json().unwrap()["serial"], "no_permission");
    }
}
