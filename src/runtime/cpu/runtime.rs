//! CPU runtime implementation

use super::client::CpuClient;
use super::device::CpuDevice;
use crate::runtime::Runtime;
use std::alloc::{Layout as AllocLayout, alloc_zeroed, dealloc};

/// CPU compute runtime
///
/// "Device" allocations are distinct heap blocks obtained from the system
/// allocator; copies are plain memcpy. This keeps the host/device split of
/// the pipeline observable on any platform.
#[derive(Clone, Debug, Default)]
pub struct CpuRuntime;

const ALIGN: usize = 64;

impl Runtime for CpuRuntime {
    type Device = CpuDevice;
    type Client = CpuClient;

    fn name() -> &'static str {
        "cpu"
    }

    fn allocate(size_bytes: usize, _device: &Self::Device) -> u64 {
        if size_bytes == 0 {
            return 0;
        }

        let layout =
            AllocLayout::from_size_align(size_bytes, ALIGN).expect("Invalid allocation layout");

        // Null on exhaustion maps to an allocation failure upstream
        let ptr = unsafe { alloc_zeroed(layout) };
        ptr as u64
    }

    fn deallocate(ptr: u64, size_bytes: usize, _device: &Self::Device) {
        if ptr == 0 || size_bytes == 0 {
            return;
        }

        let layout =
            AllocLayout::from_size_align(size_bytes, ALIGN).expect("Invalid allocation layout");

        unsafe {
            dealloc(ptr as *mut u8, layout);
        }
    }

    fn copy_to_device(src: &[u8], dst: u64, _device: &Self::Device) {
        if src.is_empty() || dst == 0 {
            return;
        }

        unsafe {
            std::ptr::copy_nonoverlapping(src.as_ptr(), dst as *mut u8, src.len());
        }
    }

    fn copy_from_device(src: u64, dst: &mut [u8], _device: &Self::Device) {
        if dst.is_empty() || src == 0 {
            return;
        }

        unsafe {
            std::ptr::copy_nonoverlapping(src as *const u8, dst.as_mut_ptr(), dst.len());
        }
    }

    fn default_device() -> Self::Device {
        CpuDevice::new()
    }

    fn default_client(device: &Self::Device) -> Self::Client {
        CpuClient::new(device.clone())
    }
}
