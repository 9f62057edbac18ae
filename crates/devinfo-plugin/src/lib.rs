// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// devinfo — Device info provider exposed to a hosted web view.
//
// The host bridge hands the provider an action name and a responder. The
// provider answers with a device record, deferring the answer while the user
// decides on the serial-number permission.

pub mod provider;
pub mod responder;

pub use provider::DeviceInfoProvider;
pub use responder::{Responder, from_fn};
