//! Microphone permission port

/// Callback receiving whether microphone access was granted.
/// Implementations may invoke it on any thread.
pub type PermissionCallback = Box<dyn FnOnce(bool) + Send + 'static>;

/// Port for requesting microphone access
pub trait MicPermission: Send + Sync {
    /// Ask for record permission. Returns immediately; the answer arrives
    /// through `callback`, exactly once.
    fn request_record_permission(&self, callback: PermissionCallback);
}
