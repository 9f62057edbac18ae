// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Build metadata comes from static fields on
// `android.os.Build` and `android.os.Build$VERSION`; the device id comes from
// `Settings.Secure`; permissions go through the hosting `Activity`.
//
// ## Architecture notes
//
// `requestPermissions` is asynchronous on Android. This bridge only dispatches
// the prompt. The host Activity must override `onRequestPermissionsResult` and
// forward the request code, permission names and raw grant codes to
// `DeviceInfoProvider::on_android_permission_result`.

#![cfg(target_os = "android")]

use jni::objects::{JObject, JString, JValue};
use jni::sys::jsize;
use jni::{JNIEnv, JavaVM};

use devinfo_core::error::{DevinfoError, Result};

use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

const BUILD_CLASS: &str = "android/os/Build";
const BUILD_VERSION_CLASS: &str = "android/os/Build$VERSION";
const STRING_SIG: &str = "Ljava/lang/String;";

/// `Settings.Secure.ANDROID_ID`.
const ANDROID_ID: &str = "android_id";

/// `PackageManager.PERMISSION_GRANTED`.
const PERMISSION_GRANTED: i32 = 0;

/// Run `f` with a [`JNIEnv`] attached to the current thread and the hosting
/// `Activity`.
///
/// The `JavaVM*` and `Activity` pointers come from `ndk_context`, set by
/// `android_main` or `ANativeActivity_onCreate`.
fn with_activity<T>(f: impl FnOnce(&mut JNIEnv, &JObject) -> Result<T>) -> Result<T> {
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| DevinfoError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| DevinfoError::Bridge(format!("failed to attach JNI thread: {e}")))?;

    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(DevinfoError::Bridge(
            "Android context is null: native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    let activity = unsafe { JObject::from_raw(ptr.cast()) };

    f(&mut env, &activity)
}

/// Map a `jni::errors::Error` into `DevinfoError::Bridge`, clearing any
/// pending Java exception so later JNI calls on this thread still work.
fn jni_err(env: &mut JNIEnv, context: &str, e: jni::errors::Error) -> DevinfoError {
    if matches!(e, jni::errors::Error::JavaException) {
        let _ = env.exception_clear();
    }
    DevinfoError::Bridge(format!("{context}: {e}"))
}

/// Convert a `java.lang.String` reference. `null` becomes an empty string.
fn to_rust_string(env: &mut JNIEnv, obj: JObject) -> Result<String> {
    if obj.is_null() {
        return Ok(String::new());
    }
    let jstr = JString::from(obj);
    let value = match env.get_string(&jstr) {
        Ok(s) => String::from(s),
        Err(e) => return Err(jni_err(env, "get_string", e)),
    };
    Ok(value)
}

/// Read a static `String` field such as `Build.MODEL`.
fn static_string(env: &mut JNIEnv, class: &str, field: &str) -> Result<String> {
    let value = match env.get_static_field(class, field, STRING_SIG) {
        Ok(v) => v,
        Err(e) => return Err(jni_err(env, field, e)),
    };
    let obj = match value.l() {
        Ok(obj) => obj,
        Err(e) => return Err(jni_err(env, field, e)),
    };
    to_rust_string(env, obj)
}

/// Read a static `String` field of `android.os.Build`.
fn build_field(field: &'static str) -> Result<String> {
    with_activity(|env, _| static_string(env, BUILD_CLASS, field))
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the devinfo platform bridge.
///
/// The struct is zero-sized; all state lives on the Java side.
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge.
    ///
    /// This does **not** touch JNI; the first JNI call happens lazily when
    /// a trait method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// DeviceProperties — android.os.Build, Settings.Secure
// ---------------------------------------------------------------------------

impl DeviceProperties for AndroidBridge {
    /// `Settings.Secure.getString(activity.getContentResolver(), ANDROID_ID)`.
    fn device_id(&self) -> Result<String> {
        with_activity(|env, activity| {
            let resolver = match env
                .call_method(
                    activity,
                    "getContentResolver",
                    "()Landroid/content/ContentResolver;",
                    &[],
                )
                .and_then(|v| v.l())
            {
                Ok(obj) => obj,
                Err(e) => return Err(jni_err(env, "getContentResolver", e)),
            };

            let name = match env.new_string(ANDROID_ID) {
                Ok(s) => s,
                Err(e) => return Err(jni_err(env, "new_string(ANDROID_ID)", e)),
            };

            let id = match env
                .call_static_method(
                    "android/provider/Settings$Secure",
                    "getString",
                    "(Landroid/content/ContentResolver;Ljava/lang/String;)Ljava/lang/String;",
                    &[JValue::Object(&resolver), JValue::Object(&name)],
                )
                .and_then(|v| v.l())
            {
                Ok(obj) => obj,
                Err(e) => return Err(jni_err(env, "Settings.Secure.getString", e)),
            };

            to_rust_string(env, id)
        })
    }

    fn os_version(&self) -> Result<String> {
        with_activity(|env, _| static_string(env, BUILD_VERSION_CLASS, "RELEASE"))
    }

    fn model(&self) -> Result<String> {
        build_field("MODEL")
    }

    fn manufacturer(&self) -> Result<String> {
        build_field("MANUFACTURER")
    }

    fn product(&self) -> Result<String> {
        build_field("PRODUCT")
    }

    fn fingerprint(&self) -> Result<String> {
        build_field("FINGERPRINT")
    }

    fn sdk_int(&self) -> Result<u32> {
        with_activity(|env, _| {
            let level = match env
                .get_static_field(BUILD_VERSION_CLASS, "SDK_INT", "I")
                .and_then(|v| v.i())
            {
                Ok(level) => level,
                Err(e) => return Err(jni_err(env, "SDK_INT", e)),
            };
            u32::try_from(level)
                .map_err(|_| DevinfoError::Bridge(format!("negative SDK_INT: {level}")))
        })
    }

    fn legacy_serial(&self) -> Result<String> {
        build_field("SERIAL")
    }

    /// `Build.getSerial()`. Throws `SecurityException` without
    /// `READ_PHONE_STATE`, surfaced here as a bridge error.
    fn serial(&self) -> Result<String> {
        with_activity(|env, _| {
            let serial = match env
                .call_static_method(BUILD_CLASS, "getSerial", "()Ljava/lang/String;", &[])
                .and_then(|v| v.l())
            {
                Ok(obj) => obj,
                Err(e) => return Err(jni_err(env, "Build.getSerial", e)),
            };
            to_rust_string(env, serial)
        })
    }

    /// `TimeZone.getDefault().getID()`.
    fn time_zone_id(&self) -> Result<String> {
        with_activity(|env, _| {
            let tz = match env
                .call_static_method(
                    "java/util/TimeZone",
                    "getDefault",
                    "()Ljava/util/TimeZone;",
                    &[],
                )
                .and_then(|v| v.l())
            {
                Ok(obj) => obj,
                Err(e) => return Err(jni_err(env, "TimeZone.getDefault", e)),
            };

            let id = match env
                .call_method(&tz, "getID", "()Ljava/lang/String;", &[])
                .and_then(|v| v.l())
            {
                Ok(obj) => obj,
                Err(e) => return Err(jni_err(env, "TimeZone.getID", e)),
            };
            to_rust_string(env, id)
        })
    }
}

// ---------------------------------------------------------------------------
// CapabilityHost — Activity.checkSelfPermission / requestPermissions
// ---------------------------------------------------------------------------

impl CapabilityHost for AndroidBridge {
    fn has_permission(&self, permission: &str) -> Result<bool> {
        with_activity(|env, activity| {
            let name = match env.new_string(permission) {
                Ok(s) => s,
                Err(e) => return Err(jni_err(env, "new_string(permission)", e)),
            };
            let status = match env
                .call_method(
                    activity,
                    "checkSelfPermission",
                    "(Ljava/lang/String;)I",
                    &[JValue::Object(&name)],
                )
                .and_then(|v| v.i())
            {
                Ok(status) => status,
                Err(e) => return Err(jni_err(env, "checkSelfPermission", e)),
            };
            Ok(status == PERMISSION_GRANTED)
        })
    }

    /// Dispatch `activity.requestPermissions(permissions, requestCode)`.
    ///
    /// The grant results arrive later through the Activity's
    /// `onRequestPermissionsResult`.
    fn request_permissions(&self, request_code: i32, permissions: &[&str]) -> Result<()> {
        with_activity(|env, activity| {
            let len = jsize::try_from(permissions.len())
                .map_err(|_| DevinfoError::Bridge("too many permissions".into()))?;

            let array = match env.new_object_array(len, "java/lang/String", JObject::null()) {
                Ok(array) => array,
                Err(e) => return Err(jni_err(env, "new_object_array", e)),
            };

            for (index, permission) in permissions.iter().enumerate() {
                let name = match env.new_string(permission) {
                    Ok(s) => s,
                    Err(e) => return Err(jni_err(env, "new_string(permission)", e)),
                };
                // index < len, which already fit in a jsize
                if let Err(e) = env.set_object_array_element(&array, index as jsize, &name) {
                    return Err(jni_err(env, "set_object_array_element", e));
                }
            }

            if let Err(e) = env.call_method(
                activity,
                "requestPermissions",
                "([Ljava/lang/String;I)V",
                &[JValue::Object(&array), JValue::Int(request_code)],
            ) {
                return Err(jni_err(env, "requestPermissions", e));
            }

            tracing::info!(
                request_code,
                ?permissions,
                "Android: permission prompt dispatched, awaiting onRequestPermissionsResult"
            );
            Ok(())
        })
    }
}
