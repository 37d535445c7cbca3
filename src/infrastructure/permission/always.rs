//! Permission adapter that never asks

use crate::application::ports::{MicPermission, PermissionCallback};

/// Grants every request, invoking the callback before returning
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysGrantPermission;

impl MicPermission for AlwaysGrantPermission {
    fn request_record_permission(&self, callback: PermissionCallback) {
        callback(true);
    }
}
