//! Common test utilities
#![allow(dead_code)]

use sparsecheck::formats::IndexBase;
use sparsecheck::harness::cases::MATRIX_FILES;
use sparsecheck::harness::generator;
use sparsecheck::matio;
use sparsecheck::runtime::Runtime;
use sparsecheck::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};

use std::path::Path;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Initialize tracing once for the whole test binary
///
/// Honors `RUST_LOG`; silent by default.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Create a CPU client and device for testing
pub fn create_cpu_client() -> (CpuClient, CpuDevice) {
    let device = CpuRuntime::default_device();
    let client = CpuRuntime::default_client(&device);
    (client, device)
}

/// Materialize the named corpus into `dir`
///
/// Seven deterministic square matrices, one per corpus name, written
/// through the crate's own writer. Sizes grow with the index so the
/// fixtures exercise different block paddings.
pub fn write_corpus(dir: &Path) {
    for (i, name) in MATRIX_FILES.iter().enumerate() {
        let n = 30 + 5 * i as i64;
        let m = generator::csr_random::<f64>(n, n, IndexBase::Zero, 100 + i as u64);
        matio::write_csr(&dir.join(name), &m).expect("writing corpus fixture");
    }
}
