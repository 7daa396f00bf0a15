//! Per-case library context

use crate::runtime::Runtime;

/// Opaque library context, created once per test case
///
/// A handle owns no user data, only the device binding the library needs
/// to run. Contract calls take `Option<&Handle<R>>`; passing `None` is the
/// null-handle probe and must yield
/// [`Status::InvalidHandle`](super::Status::InvalidHandle). Dropping the
/// handle at case end releases the context; handles are never shared
/// across cases.
#[derive(Debug, Clone)]
pub struct Handle<R: Runtime> {
    device: R::Device,
}

impl<R: Runtime> Handle<R> {
    /// Create a handle bound to a device
    pub fn new(device: &R::Device) -> Self {
        Self {
            device: device.clone(),
        }
    }

    /// The device this handle is bound to
    pub fn device(&self) -> &R::Device {
        &self.device
    }
}
