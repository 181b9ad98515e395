//! Per-column depth buffer shared by the wall caster and the sprite pass.
//!
//! The wall pass must finish writing every column before sprites read it.
//! Both passes borrow the buffer mutably in turn; call order is the only
//! synchronization.

#[derive(Clone, Debug)]
pub struct DepthBuffer {
    depths: Vec<f32>,
}

impl DepthBuffer {
    /// Sentinel for "no surface in this column".
    pub const FAR: f32 = f32::INFINITY;

    pub fn new(columns: usize) -> Self {
        Self { depths: vec![Self::FAR; columns] }
    }

    #[inline]
    pub fn reset(&mut self) {
        self.depths.fill(Self::FAR);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Depth at `column`; out-of-range columns read as [`Self::FAR`].
    #[inline]
    pub fn get(&self, column: usize) -> f32 {
        self.depths.get(column).copied().unwrap_or(Self::FAR)
    }

    #[inline]
    pub fn set(&mut self, column: usize, depth: f32) {
        if let Some(d) = self.depths.get_mut(column) {
            *d = depth;
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.depths
    }
}
