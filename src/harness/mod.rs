//! The generic numerical-kernel verification harness
//!
//! One case flows through the pipeline as:
//!
//! ```text
//! generator (or matio)  →  host matrix / vectors
//!        │ upload
//! invoker ── host-scalar path  ──┐
//!        └── device-scalar path ─┤ download
//!                                ▼
//! oracle ───────────────► compare (per output buffer, per path)
//! ```
//!
//! Each component is usable on its own; [`cases`] wires them together,
//! enumerates the parameter cross-products, and aggregates isolated
//! per-case reports.

pub mod cases;
pub mod compare;
pub mod generator;
pub mod invoker;
pub mod oracle;
