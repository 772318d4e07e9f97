/// A single acquired swapchain image plus the encoder recording into it.
///
/// Short-lived: hand it back to [`super::Gpu::submit`] within the same frame.
/// Holding the surface texture blocks acquisition of the next image.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
