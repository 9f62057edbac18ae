// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Device info provider.
//
// Answers `getDeviceInfo` and `getPermission`. On API levels above the
// configured threshold the hardware serial sits behind a runtime permission:
// if it is missing, the request waits for the user's decision and is answered
// from `on_request_permission_result`. A denial replaces the serial with
// "no_permission"; it is never reported as an error.

use devinfo_bridge::traits::PlatformBridge;
use devinfo_core::error::Result;
use devinfo_core::{
    Action, DeviceRecord, PermissionGrant, Platform, PluginResult, ProviderConfig, Serial,
    is_virtual_device,
};
use tracing::{debug, error, info, instrument, warn};

use crate::responder::Responder;

/// A request parked until the permission prompt resolves.
struct PendingRequest {
    action: Action,
    responder: Box<dyn Responder>,
}

/// Serves device attributes read through a [`PlatformBridge`].
///
/// `uuid` and `permission_needed` are computed once in [`new`](Self::new)
/// and never change afterwards.
pub struct DeviceInfoProvider<B> {
    bridge: B,
    config: ProviderConfig,
    uuid: String,
    permission_needed: bool,
    /// Requests waiting on the permission prompt, in arrival order. Every
    /// waiter is answered when the prompt resolves.
    pending: Vec<PendingRequest>,
}

impl<B: PlatformBridge> DeviceInfoProvider<B> {
    /// Read the device id and decide whether serial reads are permission-gated.
    #[instrument(skip_all, fields(platform = bridge.platform_name()))]
    pub fn new(bridge: B, config: ProviderConfig) -> Result<Self> {
        let uuid = bridge.device_id()?;
        let sdk_int = bridge.sdk_int()?;
        let permission_needed = config.serial_gate_required(sdk_int);

        info!(sdk_int, permission_needed, "device info provider initialised");

        Ok(Self {
            bridge,
            config,
            uuid,
            permission_needed,
            pending: Vec::new(),
        })
    }

    /// Entry point for the host bridge.
    ///
    /// Returns `false` for an unknown action without touching `responder`,
    /// so the host can offer the request to another plugin.
    pub fn execute<R>(&mut self, action: &str, responder: R) -> bool
    where
        R: Responder + 'static,
    {
        match Action::from_name(action) {
            Some(action) => {
                self.handle(action, Box::new(responder));
                true
            }
            None => {
                debug!(action, "action not handled");
                false
            }
        }
    }

    /// Typed dispatch.
    pub fn handle(&mut self, action: Action, responder: Box<dyn Responder>) {
        debug!(%action, "handling action");
        match action {
            Action::GetDeviceInfo => self.get_device_info(responder),
            Action::GetPermission => self.get_permission(responder),
        }
    }

    /// Answer with the full record, or wait for the permission prompt.
    pub fn get_device_info(&mut self, mut responder: Box<dyn Responder>) {
        match self.serial_readable() {
            Ok(true) => {
                let result = self.device_result(true);
                responder.send(result);
            }
            Ok(false) => self.await_permission(Action::GetDeviceInfo, responder),
            Err(e) => {
                error!(error = %e, "permission check failed");
                responder.send(PluginResult::Error(e.to_string()));
            }
        }
    }

    /// Signal success once the permission is held or not required.
    pub fn get_permission(&mut self, mut responder: Box<dyn Responder>) {
        match self.serial_readable() {
            Ok(true) => responder.send(PluginResult::Ok),
            Ok(false) => self.await_permission(Action::GetPermission, responder),
            Err(e) => {
                error!(error = %e, "permission check failed");
                responder.send(PluginResult::Error(e.to_string()));
            }
        }
    }

    /// Resolution handler, called by the host after the user answered the
    /// permission prompt. `permissions` and `grants` pair up one to one, in
    /// request order.
    ///
    /// The serial is read only when the grants are non-empty, match
    /// `permissions` in length, and contain no denial. Anything else,
    /// including the empty arrays Android delivers for a cancelled prompt,
    /// yields a record with the serial replaced by "no_permission". Every
    /// waiting request receives the record. Without waiting requests this is
    /// a no-op.
    pub fn on_request_permission_result(
        &mut self,
        request_code: i32,
        permissions: &[&str],
        grants: &[PermissionGrant],
    ) {
        if self.pending.is_empty() {
            debug!(request_code, "permission result with no pending request, ignored");
            return;
        }

        if permissions.len() != grants.len() {
            warn!(
                request_code,
                permissions = permissions.len(),
                grants = grants.len(),
                "permission result length mismatch, treating as denied"
            );
        }
        let granted = !grants.is_empty()
            && permissions.len() == grants.len()
            && grants.iter().all(|g| *g == PermissionGrant::Granted);
        info!(
            request_code,
            granted,
            waiting = self.pending.len(),
            "permission prompt resolved"
        );

        let result = self.device_result(granted);
        for mut pending in self.pending.drain(..) {
            debug!(action = %pending.action, "answering pending request");
            pending.responder.send(result.clone());
        }
    }

    /// Host glue for `Activity.onRequestPermissionsResult`: forwards the raw
    /// `PackageManager` grant codes (0 granted, anything else denied).
    pub fn on_android_permission_result(
        &mut self,
        request_code: i32,
        permissions: &[&str],
        grant_codes: &[i32],
    ) {
        let grants: Vec<PermissionGrant> = grant_codes
            .iter()
            .map(|code| PermissionGrant::from_android(*code))
            .collect();
        self.on_request_permission_result(request_code, permissions, &grants);
    }

    /// Whether every permission guarding the serial is currently granted.
    pub fn has_permission(&self) -> Result<bool> {
        self.bridge.has_permission(&self.config.serial_permission)
    }

    /// Show the permission prompt under `request_code`.
    pub fn request_permissions(&self, request_code: i32) -> Result<()> {
        info!(request_code, permission = %self.config.serial_permission, "requesting permission");
        self.bridge
            .request_permissions(request_code, &[self.config.serial_permission.as_str()])
    }

    /// Assemble a record from live platform state. With `can_read_serial`
    /// false the serial is reported as "no_permission".
    pub fn make_device_record(&self, can_read_serial: bool) -> Result<DeviceRecord> {
        let serial = if can_read_serial {
            Serial::Value(self.serial_number()?)
        } else {
            Serial::NoPermission
        };

        Ok(DeviceRecord {
            uuid: self.uuid.clone(),
            os_version: self.os_version()?,
            platform: self.platform()?,
            model: self.model()?,
            manufacturer: self.manufacturer()?,
            is_virtual: self.is_virtual()?,
            serial,
            sdk_version: self.sdk_version()?,
        })
    }

    // -- Attribute accessors --

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Whether serial reads need a runtime grant on this device.
    pub fn permission_needed(&self) -> bool {
        self.permission_needed
    }

    pub fn platform(&self) -> Result<Platform> {
        Ok(Platform::from_manufacturer(&self.bridge.manufacturer()?))
    }

    pub fn is_amazon_device(&self) -> Result<bool> {
        Ok(self.platform()? == Platform::AmazonFireOs)
    }

    pub fn model(&self) -> Result<String> {
        self.bridge.model()
    }

    pub fn product_name(&self) -> Result<String> {
        self.bridge.product()
    }

    pub fn manufacturer(&self) -> Result<String> {
        self.bridge.manufacturer()
    }

    pub fn os_version(&self) -> Result<String> {
        self.bridge.os_version()
    }

    /// API level as a decimal string.
    pub fn sdk_version(&self) -> Result<String> {
        Ok(self.bridge.sdk_int()?.to_string())
    }

    pub fn is_virtual(&self) -> Result<bool> {
        Ok(is_virtual_device(
            &self.bridge.fingerprint()?,
            &self.bridge.product()?,
        ))
    }

    /// Build-time `SERIAL` where it is still public, the gated live
    /// accessor otherwise.
    pub fn serial_number(&self) -> Result<String> {
        if self.permission_needed {
            self.bridge.serial()
        } else {
            self.bridge.legacy_serial()
        }
    }

    pub fn time_zone_id(&self) -> Result<String> {
        self.bridge.time_zone_id()
    }

    // -- Host access --

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Number of requests waiting on the permission prompt.
    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    // -- Internals --

    fn serial_readable(&self) -> Result<bool> {
        if !self.permission_needed {
            return Ok(true);
        }
        self.has_permission()
    }

    fn device_result(&self, can_read_serial: bool) -> PluginResult {
        match self.make_device_record(can_read_serial) {
            Ok(record) => {
                debug!(serial_authorized = record.serial.is_authorized(), "device record built");
                PluginResult::Device(record)
            }
            Err(e) => {
                error!(error = %e, can_read_serial, "failed to read device state");
                PluginResult::Error(e.to_string())
            }
        }
    }

    /// Park `responder` until the prompt resolves. Only the first waiter
    /// triggers the prompt; later ones join it.
    fn await_permission(&mut self, action: Action, responder: Box<dyn Responder>) {
        let first = self.pending.is_empty();
        self.pending.push(PendingRequest { action, responder });

        if !first {
            debug!(%action, waiting = self.pending.len(), "joining pending permission prompt");
            return;
        }

        if let Err(e) = self.request_permissions(self.config.permission_request_code) {
            error!(error = %e, "could not show permission prompt");
            let message = e.to_string();
            for mut pending in self.pending.drain(..) {
                pending.responder.send(PluginResult::Error(message.clone()));
            }
        }
    }
}
