//! CPU client implementation

use super::device::CpuDevice;
use super::runtime::CpuRuntime;
use crate::runtime::RuntimeClient;

/// CPU client for operation dispatch
#[derive(Clone, Debug)]
pub struct CpuClient {
    device: CpuDevice,
}

impl CpuClient {
    /// Create a new CPU client
    pub fn new(device: CpuDevice) -> Self {
        Self { device }
    }
}

impl RuntimeClient<CpuRuntime> for CpuClient {
    fn device(&self) -> &CpuDevice {
        &self.device
    }

    fn synchronize(&self) {
        // CPU operations are synchronous, nothing to do
    }
}
