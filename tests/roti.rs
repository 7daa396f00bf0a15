//! Rotation cases: generated cross-product, the fixed known scenario, and
//! the invalid-argument probe set.

mod common;

use common::{create_cpu_client, init_tracing};
use sparsecheck::blas::{Handle, ScalarArg, SparseBlas, Status};
use sparsecheck::dtype::{Complex64, Complex128, Element};
use sparsecheck::formats::IndexBase;
use sparsecheck::harness::cases::{self, CaseReport, assert_all_passed, run_isolated};
use sparsecheck::harness::{generator, invoker, oracle};
use sparsecheck::runtime::DeviceBuffer;
use sparsecheck::runtime::cpu::CpuRuntime;

fn run_all_roti<T: Element>() {
    init_tracing();
    let (client, device) = create_cpu_client();

    let reports: Vec<CaseReport> = cases::roti_cases()
        .iter()
        .map(|p| {
            run_isolated(format!("roti_{p}"), T::DTYPE, || {
                cases::run_roti_case::<T, CpuRuntime, _>(&client, &device, p)
            })
        })
        .collect();

    assert_all_passed(&reports);
}

#[test]
fn roti_f32() {
    run_all_roti::<f32>();
}

#[test]
fn roti_f64() {
    run_all_roti::<f64>();
}

#[test]
fn roti_complex64() {
    run_all_roti::<Complex64>();
}

#[test]
fn roti_complex128() {
    run_all_roti::<Complex128>();
}

/// The fixed scenario: nnz = 100, N = 100, c = 3.7, s = 1.2, base 0.
/// Host-mode, device-mode, and oracle outputs must match the directly
/// written-out update formula bit for bit.
#[test]
fn roti_known_rotation_scenario() {
    init_tracing();
    let (client, device) = create_cpu_client();

    let data = generator::roti_data::<f64>(100, 100, IndexBase::Zero);
    let out = invoker::run_roti_dual(&client, &device, &data, 3.7, 1.2, IndexBase::Zero).unwrap();

    // Write the expectation out longhand, independent of the oracle
    let mut x_expect = data.x_val.clone();
    let mut y_expect = data.y.clone();
    for i in 0..100 {
        let idx = data.x_ind[i] as usize;
        let x = x_expect[i];
        let y = y_expect[idx];
        x_expect[i] = 3.7 * x + 1.2 * y;
        y_expect[idx] = 3.7 * y - 1.2 * x;
    }

    assert_eq!(out.x_host, x_expect);
    assert_eq!(out.x_device, x_expect);
    assert_eq!(out.y_host, y_expect);
    assert_eq!(out.y_device, y_expect);

    let mut x_gold = data.x_val.clone();
    let mut y_gold = data.y.clone();
    oracle::roti(&mut x_gold, &data.x_ind, &mut y_gold, 3.7, 1.2, IndexBase::Zero);
    assert_eq!(x_gold, x_expect);
    assert_eq!(y_gold, y_expect);
}

/// Host-scalar and device-scalar paths must agree with each other on
/// every run, independent of the oracle.
#[test]
fn roti_paths_agree_for_all_dtypes() {
    init_tracing();
    let (client, device) = create_cpu_client();

    fn check_one<T: Element>(
        client: &sparsecheck::runtime::cpu::CpuClient,
        device: &sparsecheck::runtime::cpu::CpuDevice,
    ) {
        let data = generator::roti_data::<T>(64, 256, IndexBase::One);
        let c = T::from_f64(0.25);
        let s = T::from_f64(-4.0);
        let out = invoker::run_roti_dual(client, device, &data, c, s, IndexBase::One).unwrap();
        assert_eq!(out.x_host, out.x_device);
        assert_eq!(out.y_host, out.y_device);
    }

    check_one::<f32>(&client, &device);
    check_one::<f64>(&client, &device);
    check_one::<Complex64>(&client, &device);
    check_one::<Complex128>(&client, &device);
}

/// Every nullable argument position, probed one at a time, must report
/// its precise classification.
#[test]
fn roti_bad_arg() {
    init_tracing();
    let (client, device) = create_cpu_client();
    let handle = Handle::<CpuRuntime>::new(&device);

    let nnz = 100i64;
    let safe = invoker::SAFE_SIZE;
    let mut x_val = DeviceBuffer::<f32, CpuRuntime>::alloc(safe, &device, "x_val").unwrap();
    let x_ind = DeviceBuffer::<i64, CpuRuntime>::alloc(safe, &device, "x_ind").unwrap();
    let mut y = DeviceBuffer::<f32, CpuRuntime>::alloc(safe, &device, "y").unwrap();
    let c = 3.7f32;
    let s = 1.2f32;

    let status = client.roti(
        Some(&handle),
        -1,
        Some(&mut x_val),
        Some(&x_ind),
        Some(&mut y),
        Some(ScalarArg::Host(&c)),
        Some(ScalarArg::Host(&s)),
        IndexBase::Zero,
    );
    assert_eq!(status, Status::InvalidSize, "nnz is invalid");

    if !client.capabilities().tolerates_null_args {
        let status = client.roti::<f32>(
            Some(&handle),
            nnz,
            Some(&mut x_val),
            None,
            Some(&mut y),
            Some(ScalarArg::Host(&c)),
            Some(ScalarArg::Host(&s)),
            IndexBase::Zero,
        );
        assert_eq!(status, Status::InvalidPointer, "x_ind is null");

        let status = client.roti::<f32>(
            Some(&handle),
            nnz,
            None,
            Some(&x_ind),
            Some(&mut y),
            Some(ScalarArg::Host(&c)),
            Some(ScalarArg::Host(&s)),
            IndexBase::Zero,
        );
        assert_eq!(status, Status::InvalidPointer, "x_val is null");

        let status = client.roti::<f32>(
            Some(&handle),
            nnz,
            Some(&mut x_val),
            Some(&x_ind),
            None,
            Some(ScalarArg::Host(&c)),
            Some(ScalarArg::Host(&s)),
            IndexBase::Zero,
        );
        assert_eq!(status, Status::InvalidPointer, "y is null");

        let status = client.roti::<f32>(
            Some(&handle),
            nnz,
            Some(&mut x_val),
            Some(&x_ind),
            Some(&mut y),
            None,
            Some(ScalarArg::Host(&s)),
            IndexBase::Zero,
        );
        assert_eq!(status, Status::InvalidPointer, "c is null");

        let status = client.roti::<f32>(
            Some(&handle),
            nnz,
            Some(&mut x_val),
            Some(&x_ind),
            Some(&mut y),
            Some(ScalarArg::Host(&c)),
            None,
            IndexBase::Zero,
        );
        assert_eq!(status, Status::InvalidPointer, "s is null");

        let status = client.roti::<f32>(
            None,
            nnz,
            Some(&mut x_val),
            Some(&x_ind),
            Some(&mut y),
            Some(ScalarArg::Host(&c)),
            Some(ScalarArg::Host(&s)),
            IndexBase::Zero,
        );
        assert_eq!(status, Status::InvalidHandle, "handle is null");
    }
}

/// Regenerating with identical parameters must reproduce byte-identical
/// inputs, so gold/host/device all consume one generation.
#[test]
fn roti_generation_is_deterministic() {
    let a = generator::roti_data::<Complex128>(200, 800, IndexBase::One);
    let b = generator::roti_data::<Complex128>(200, 800, IndexBase::One);
    assert_eq!(a.x_ind, b.x_ind);
    assert_eq!(a.x_val, b.x_val);
    assert_eq!(a.y, b.y);
}
