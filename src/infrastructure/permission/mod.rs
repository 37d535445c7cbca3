//! Microphone permission adapters

mod always;
mod device;

pub use always::AlwaysGrantPermission;
pub use device::DevicePermission;

use crate::application::ports::{MicPermission, PermissionCallback};
use crate::domain::config::PermissionPolicy;

/// Create the permission adapter for the configured policy
pub fn create_permission(policy: PermissionPolicy) -> Box<dyn MicPermission> {
    match policy {
        PermissionPolicy::Device => Box::new(DevicePermission::new()),
        PermissionPolicy::Always => Box::new(AlwaysGrantPermission),
    }
}

impl MicPermission for Box<dyn MicPermission> {
    fn request_record_permission(&self, callback: PermissionCallback) {
        (**self).request_record_permission(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn always_policy_grants_through_box() {
        let permission = create_permission(PermissionPolicy::Always);
        let (tx, rx) = mpsc::channel();

        permission.request_record_permission(Box::new(move |granted| {
            let _ = tx.send(granted);
        }));

        assert_eq!(rx.recv_timeout(Duration::from_secs(1)), Ok(true));
    }
}
