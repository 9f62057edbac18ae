// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Callback side of a request: where the provider delivers its answer.

use std::sync::mpsc::Sender;

use devinfo_core::PluginResult;

/// Receives the answer to one request.
///
/// A responder may be held across a permission prompt, so the answer can
/// arrive long after the request returned control to the host.
pub trait Responder {
    fn send(&mut self, result: PluginResult);
}

impl Responder for Sender<PluginResult> {
    fn send(&mut self, result: PluginResult) {
        if Sender::send(self, result).is_err() {
            tracing::debug!("responder channel closed, result dropped");
        }
    }
}

impl<R: Responder + ?Sized> Responder for Box<R> {
    fn send(&mut self, result: PluginResult) {
        (**self).send(result)
    }
}

/// Wrap a closure as a [`Responder`].
pub fn from_fn<F>(f: F) -> impl Responder
where
    F: FnMut(PluginResult),
{
    FnResponder(f)
}

struct FnResponder<F>(F);

impl<F: FnMut(PluginResult)> Responder for FnResponder<F> {
    fn send(&mut self, result: PluginResult) {
        (self.0)(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn channel_responder_delivers() {
        let (tx, rx) = mpsc::channel();
        let mut responder = tx;
        Responder::send(&mut responder, PluginResult::Ok);
        assert_eq!(rx.try_recv().unwrap(), PluginResult::Ok);
    }

    #[test]
    fn closed_channel_is_not_fatal() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut responder: Box<dyn Responder> = Box::new(tx);
        responder.send(PluginResult::Ok);
    }

    #[test]
    fn closure_responder() {
        let mut seen = Vec::new();
        {
            let mut responder = from_fn(|r| seen.push(r));
            responder.send(PluginResult::Error("x".into()));
        }
        assert_eq!(seen, vec![PluginResult::Error("x".into())]);
    }
}
