//! Layer resolution and compositing.
//!
//! Pixels are premultiplied RGBA8 end-to-end; straight alpha only appears at PNG encode time.

/// Source-over blending on premultiplied pixels.
pub mod composite;
/// Batch-token aware drawing onto the composite surface.
pub mod compositor;
/// Rasterization of decoded variants to square layers.
pub mod rasterize;
/// Fan-out/fan-in resolution of selection snapshots.
pub mod resolve;
/// Composite surface and PNG encoding.
pub mod surface;
