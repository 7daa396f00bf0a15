//! Runtime backends for device memory
//!
//! This module defines the `Runtime` trait the harness allocates and copies
//! through, and provides the CPU reference implementation. A real GPU
//! backend participates by implementing [`Runtime`] (memory) and
//! [`crate::blas::SparseBlas`] (operations).
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity)
//! ├── Device (identifies a specific GPU/CPU)
//! ├── Client (dispatches operations, owns stream/queue)
//! └── DeviceBuffer (typed RAII allocation)
//! ```

mod buffer;

pub mod cpu;

pub use buffer::DeviceBuffer;

/// Core trait for compute backends
///
/// `Runtime` abstracts over device memory. It uses static dispatch via
/// generics for zero-cost abstraction. Copies are blocking: when a copy
/// call returns, the data is visible on the destination side. That is the
/// synchronization point the harness relies on before comparing host
/// buffers.
pub trait Runtime: Clone + Send + Sync + 'static {
    /// Device identifier type
    type Device: Device;

    /// Client for dispatching operations
    type Client: RuntimeClient<Self>;

    /// Human-readable name of this runtime
    fn name() -> &'static str;

    /// Allocate zeroed device memory
    ///
    /// Returns a device pointer, or 0 if `size_bytes` is 0 or the
    /// allocation failed. Callers turn a 0 pointer for a non-zero request
    /// into an allocation failure; the harness treats that as fatal for
    /// the current case.
    fn allocate(size_bytes: usize, device: &Self::Device) -> u64;

    /// Deallocate device memory
    fn deallocate(ptr: u64, size_bytes: usize, device: &Self::Device);

    /// Copy data from host to device, blocking until complete
    fn copy_to_device(src: &[u8], dst: u64, device: &Self::Device);

    /// Copy data from device to host, blocking until complete
    fn copy_from_device(src: u64, dst: &mut [u8], device: &Self::Device);

    /// Get the default device
    fn default_device() -> Self::Device;

    /// Get the default client for a device
    fn default_client(device: &Self::Device) -> Self::Client;
}

/// Trait for device identification
pub trait Device: Clone + Send + Sync + std::fmt::Debug + 'static {
    /// Unique identifier for this device
    fn id(&self) -> usize;

    /// Human-readable name
    fn name(&self) -> String {
        format!("Device({})", self.id())
    }
}

/// Trait for runtime clients that handle operation dispatch
pub trait RuntimeClient<R: Runtime>: Clone + Send + Sync {
    /// Get the device this client operates on
    fn device(&self) -> &R::Device;

    /// Synchronize: wait for all pending operations to complete
    fn synchronize(&self);
}
