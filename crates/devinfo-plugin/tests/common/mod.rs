// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory device used by the provider tests.

use std::cell::{Cell, RefCell};
use std::sync::mpsc::{self, Receiver, Sender};

use devinfo_bridge::traits::*;
use devinfo_core::PluginResult;
use devinfo_core::error::{DevinfoError, Result};

pub const LEGACY_SERIAL: &str = "LEGACY0042";
pub const LIVE_SERIAL: &str = "R58M12ABCDE";

pub struct FakeDevice {
    pub sdk_int: u32,
    pub manufacturer: String,
    pub fingerprint: String,
    pub product: String,
    pub granted: Cell<bool>,
    pub fail_model: Cell<bool>,
    pub fail_check: Cell<bool>,
    pub fail_requests: Cell<bool>,
    pub requests: RefCell<Vec<(i32, Vec<String>)>>,
}

impl FakeDevice {
    pub fn new(sdk_int: u32) -> Self {
        Self {
            sdk_int,
            manufacturer: "Google".into(),
            fingerprint: "google/oriole/oriole:14/UQ1A/user/release-keys".into(),
            product: "oriole".into(),
            granted: Cell::new(false),
            fail_model: Cell::new(false),
            fail_check: Cell::new(false),
            fail_requests: Cell::new(false),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn manufactured_by(mut self, manufacturer: &str) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    pub fn with_build(mut self, fingerprint: &str, product: &str) -> Self {
        self.fingerprint = fingerprint.into();
        self.product = product.into();
        self
    }

    pub fn granted(self) -> Self {
        self.granted.set(true);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl PlatformBridge for FakeDevice {
    fn platform_name(&self) -> &str {
        "Fake"
    }
}

impl DeviceProperties for FakeDevice {
    fn device_id(&self) -> Result<String> {
        Ok("9774d56d682e549c".into())
    }

    fn os_version(&self) -> Result<String> {
        Ok(if self.sdk_int > 27 { "14".into() } else { "7.1.2".into() })
    }

    fn model(&self) -> Result<String> {
        if self.fail_model.get() {
            return Err(DevinfoError::Bridge("MODEL: java.lang.NoSuchFieldError".into()));
        }
        Ok("Test Model".into())
    }

    fn manufacturer(&self) -> Result<String> {
        Ok(self.manufacturer.clone())
    }

    fn product(&self) -> Result<String> {
        Ok(self.product.clone())
    }

    fn fingerprint(&self) -> Result<String> {
        Ok(self.fingerprint.clone())
    }

    fn sdk_int(&self) -> Result<u32> {
        Ok(self.sdk_int)
    }

    fn legacy_serial(&self) -> Result<String> {
        Ok(LEGACY_SERIAL.into())
    }

    fn serial(&self) -> Result<String> {
        if self.sdk_int > 27 && !self.granted.get() {
            return Err(DevinfoError::Bridge("Build.getSerial: SecurityException".into()));
        }
        Ok(LIVE_SERIAL.into())
    }

    fn time_zone_id(&self) -> Result<String> {
        Ok("Europe/Berlin".into())
    }
}

impl CapabilityHost for FakeDevice {
    fn has_permission(&self, _permission: &str) -> Result<bool> {
        if self.fail_check.get() {
            return Err(DevinfoError::Bridge("checkSelfPermission: activity gone".into()));
        }
        Ok(self.granted.get())
    }

    fn request_permissions(&self, request_code: i32, permissions: &[&str]) -> Result<()> {
        if self.fail_requests.get() {
            return Err(DevinfoError::Bridge("requestPermissions: activity gone".into()));
        }
        self.requests.borrow_mut().push((
            request_code,
            permissions.iter().map(|p| p.to_string()).collect(),
        ));
        Ok(())
    }
}

pub fn channel() -> (Sender<PluginResult>, Receiver<PluginResult>) {
    mpsc::channel()
}
