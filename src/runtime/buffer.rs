//! Typed RAII device allocations

use super::Runtime;
use crate::error::{Error, Result};

use bytemuck::Pod;
use std::marker::PhantomData;

/// A typed, owned allocation in device-addressable memory
///
/// Buffers are created by explicit allocation or upload, never by aliasing
/// host memory, and are freed on drop. All traffic between host and device
/// goes through the runtime's blocking copy primitives, so once a method
/// here returns, both sides agree on the contents.
#[derive(Debug)]
pub struct DeviceBuffer<T: Pod, R: Runtime> {
    ptr: u64,
    len: usize,
    device: R::Device,
    _marker: PhantomData<T>,
}

impl<T: Pod, R: Runtime> DeviceBuffer<T, R> {
    /// Allocate a zeroed buffer of `len` elements
    ///
    /// `what` names the buffer in the error if the device is out of
    /// memory. A zero-length buffer allocates nothing and is valid.
    pub fn alloc(len: usize, device: &R::Device, what: &'static str) -> Result<Self> {
        let size = len * std::mem::size_of::<T>();
        let ptr = R::allocate(size, device);
        if ptr == 0 && size > 0 {
            return Err(Error::AllocFailed { what, size });
        }
        Ok(Self {
            ptr,
            len,
            device: device.clone(),
            _marker: PhantomData,
        })
    }

    /// Allocate and fill from a host slice
    pub fn from_slice(data: &[T], device: &R::Device, what: &'static str) -> Result<Self> {
        let mut buf = Self::alloc(data.len(), device, what)?;
        buf.copy_from_host(data);
        Ok(buf)
    }

    /// Overwrite the buffer from a host slice of the same length
    ///
    /// # Panics
    ///
    /// Panics if `src.len() != self.len()`; buffer sizes are fixed at
    /// allocation.
    pub fn copy_from_host(&mut self, src: &[T]) {
        assert_eq!(src.len(), self.len, "copy_from_host: length mismatch");
        if self.len == 0 {
            return;
        }
        R::copy_to_device(bytemuck::cast_slice(src), self.ptr, &self.device);
    }

    /// Download the buffer into a new host vector
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = vec![T::zeroed(); self.len];
        if self.len > 0 {
            R::copy_from_device(self.ptr, bytemuck::cast_slice_mut(&mut out), &self.device);
        }
        out
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw device pointer (0 for zero-length buffers)
    #[inline]
    pub fn ptr(&self) -> u64 {
        self.ptr
    }

    /// The device this buffer lives on
    #[inline]
    pub fn device(&self) -> &R::Device {
        &self.device
    }
}

impl<T: Pod, R: Runtime> Drop for DeviceBuffer<T, R> {
    fn drop(&mut self) {
        R::deallocate(self.ptr, self.len * std::mem::size_of::<T>(), &self.device);
    }
}
