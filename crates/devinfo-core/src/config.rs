// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Provider configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DevinfoError, Result};

/// Last Android API level (8.1, `O_MR1`) on which `Build.SERIAL` is readable
/// without `READ_PHONE_STATE`. From API 28 the field reports "unknown" and
/// `Build.getSerial()` must be used instead.
pub const LAST_SDK_WITHOUT_SERIAL_GATE: u32 = 27;

/// Runtime permission guarding `Build.getSerial()`.
pub const READ_PHONE_STATE: &str = "android.permission.READ_PHONE_STATE";

/// Settings for the device info provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Serial reads need a runtime grant when the API level is strictly
    /// greater than this value.
    pub last_sdk_without_serial_gate: u32,
    /// Capability requested and checked before reading the live serial.
    pub serial_permission: String,
    /// Request code handed to the host's permission prompt.
    pub permission_request_code: i32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            last_sdk_without_serial_gate: LAST_SDK_WITHOUT_SERIAL_GATE,
            serial_permission: READ_PHONE_STATE.to_string(),
            permission_request_code: 0,
        }
    }
}

impl ProviderConfig {
    /// Parse overrides from JSON. Absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load overrides from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Whether a device at `sdk_int` must hold the serial permission.
    pub fn serial_gate_required(&self, sdk_int: u32) -> bool {
        sdk_int > self.last_sdk_without_serial_gate
    }

    fn validate(&self) -> Result<()> {
        if self.serial_permission.trim().is_empty() {
            return Err(DevinfoError::Config(
                "serial_permission must name a permission".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gate_is_api_27() {
        let config = ProviderConfig::default();
        assert!(!config.serial_gate_required(26));
        assert!(!config.serial_gate_required(27));
        assert!(config.serial_gate_required(28));
        assert!(config.serial_gate_required(34));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ProviderConfig::from_json_str(r#"{"permission_request_code": 7}"#).unwrap();
        assert_eq!(config.permission_request_code, 7);
        assert_eq!(config.serial_permission, READ_PHONE_STATE);
        assert_eq!(config.last_sdk_without_serial_gate, 27);
    }

    #[test]
    fn empty_permission_is_rejected() {
        let err = ProviderConfig::from_json_str(r#"{"serial_permission": "  "}"#).unwrap_err();
        assert!(matches!(err, DevinfoError::Config(_)));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = ProviderConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, DevinfoError::Serialization(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devinfo.json");
        std::fs::write(&path, r#"{"last_sdk_without_serial_gate": 30}"#).unwrap();

        let config = ProviderConfig::from_file(&path).unwrap();
        assert!(!config.serial_gate_required(30));
        assert!(config.serial_gate_required(31));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProviderConfig::from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, DevinfoError::Io(_)));
    }
}
