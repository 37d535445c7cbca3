//! Permission derived from input device availability
//!
//! Desktop hosts have no microphone consent prompt. Access counts as granted
//! when the default host exposes an input device that reports a usable
//! configuration. The probe can block on some hosts, so it runs on a worker
//! thread and the answer is delivered from there.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait};
use tracing::{debug, warn};

use crate::application::ports::{MicPermission, PermissionCallback};

type Probe = dyn Fn() -> bool + Send + Sync;

/// Grants access when a default input device is present
#[derive(Clone)]
pub struct DevicePermission {
    probe: Arc<Probe>,
}

impl DevicePermission {
    pub fn new() -> Self {
        Self::with_probe(probe_default_input)
    }

    /// Use a custom availability check
    pub fn with_probe(probe: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        Self {
            probe: Arc::new(probe),
        }
    }
}

impl Default for DevicePermission {
    fn default() -> Self {
        Self::new()
    }
}

impl MicPermission for DevicePermission {
    fn request_record_permission(&self, callback: PermissionCallback) {
        let probe = Arc::clone(&self.probe);
        // Shared so a failed spawn can still answer
        let slot = Arc::new(Mutex::new(Some(callback)));
        let worker_slot = Arc::clone(&slot);

        let spawned = std::thread::Builder::new()
            .name("mic-permission".to_string())
            .spawn(move || {
                let granted = probe();
                debug!(granted, "Microphone permission probed");
                if let Some(callback) = take(&worker_slot) {
                    callback(granted);
                }
            });

        if let Err(e) = spawned {
            warn!(error = %e, "Failed to spawn permission probe, denying");
            if let Some(callback) = take(&slot) {
                callback(false);
            }
        }
    }
}

fn take(slot: &Mutex<Option<PermissionCallback>>) -> Option<PermissionCallback> {
    slot.lock().unwrap_or_else(|e| e.into_inner()).take()
}

fn probe_default_input() -> bool {
    let host = cpal::default_host();
    match host.default_input_device() {
        Some(device) => match device.default_input_config() {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Default input device has no usable config");
                false
            }
        },
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    fn ask(permission: &DevicePermission) -> (bool, std::thread::ThreadId) {
        let (tx, rx) = mpsc::channel();
        permission.request_record_permission(Box::new(move |granted| {
            let _ = tx.send((granted, std::thread::current().id()));
        }));
        rx.recv_timeout(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn grants_when_probe_finds_device() {
        let (granted, _) = ask(&DevicePermission::with_probe(|| true));
        assert!(granted);
    }

    #[test]
    fn denies_when_probe_finds_nothing() {
        let (granted, _) = ask(&DevicePermission::with_probe(|| false));
        assert!(!granted);
    }

    #[test]
    fn answers_off_the_calling_thread() {
        let (_, thread) = ask(&DevicePermission::with_probe(|| true));
        assert_ne!(thread, std::thread::current().id());
    }
}
