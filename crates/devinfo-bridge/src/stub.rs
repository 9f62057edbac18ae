// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where Android APIs are unavailable.
//
// Build metadata is derived from the host; the device id is a random UUID
// persisted under the data directory so it survives restarts. API level 0
// keeps the serial permission gate closed, and permission primitives return
// `PlatformUnavailable`.

use std::path::{Path, PathBuf};

use devinfo_core::error::{DevinfoError, Result};

use crate::traits::*;

/// File under the data directory holding the install id.
const INSTALL_ID_FILE: &str = "install-id";

/// Host-backed bridge returned on non-Android platforms.
pub struct StubBridge {
    data_dir: PathBuf,
}

impl StubBridge {
    /// Stub rooted at the conventional per-user data directory.
    pub fn new() -> Self {
        Self::with_data_dir(default_data_dir())
    }

    /// Stub storing its install id under `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl Default for StubBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl DeviceProperties for StubBridge {
    fn device_id(&self) -> Result<String> {
        let path = self.data_dir.join(INSTALL_ID_FILE);
        match std::fs::read_to_string(&path) {
            Ok(existing) if !existing.trim().is_empty() => return Ok(existing.trim().to_string()),
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let id = uuid::Uuid::new_v4().simple().to_string();
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::write(&path, &id)?;
        tracing::info!(path = %path.display(), "stub: generated install id");
        Ok(id)
    }

    fn os_version(&self) -> Result<String> {
        Ok(std::env::consts::OS.to_string())
    }

    fn model(&self) -> Result<String> {
        Ok(std::env::consts::ARCH.to_string())
    }

    fn manufacturer(&self) -> Result<String> {
        Ok("unknown".to_string())
    }

    fn product(&self) -> Result<String> {
        Ok("desktop".to_string())
    }

    fn fingerprint(&self) -> Result<String> {
        Ok(format!(
            "{}/{}/{}",
            std::env::consts::FAMILY,
            std::env::consts::OS,
            std::env::consts::ARCH
        ))
    }

    fn sdk_int(&self) -> Result<u32> {
        Ok(0)
    }

    fn legacy_serial(&self) -> Result<String> {
        Ok("unknown".to_string())
    }

    fn serial(&self) -> Result<String> {
        tracing::warn!("DeviceProperties::serial called on stub bridge");
        Err(DevinfoError::PlatformUnavailable)
    }

    fn time_zone_id(&self) -> Result<String> {
        Ok(std::env::var("TZ")
            .ok()
            .filter(|tz| !tz.is_empty())
            .unwrap_or_else(|| "UTC".to_string()))
    }
}

impl CapabilityHost for StubBridge {
    fn has_permission(&self, _permission: &str) -> Result<bool> {
        tracing::warn!("CapabilityHost::has_permission called on stub bridge");
        Err(DevinfoError::PlatformUnavailable)
    }

    fn request_permissions(&self, _request_code: i32, _permissions: &[&str]) -> Result<()> {
        tracing::warn!("CapabilityHost::request_permissions called on stub bridge");
        Err(DevinfoError::PlatformUnavailable)
    }
}

fn default_data_dir() -> PathBuf {
    // Try XDG data dir, then fallback to home
    data_dir_from(
        std::env::var("XDG_DATA_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

/// Empty variables count as unset so the id never lands in a relative path.
fn data_dir_from(xdg_data_home: Option<String>, home: Option<String>) -> PathBuf {
    let base = if let Some(xdg) = xdg_data_home.filter(|v| !v.is_empty()) {
        PathBuf::from(xdg)
    } else if let Some(home) = home.filter(|v| !v.is_empty()) {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    };
    base.join("devinfo")
}
