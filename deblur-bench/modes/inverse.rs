use deblur::{types::DEFAULT_EPS, Kernel, RealGrid};

use super::Restorer;

#[derive(Debug)]
pub struct Inverse {
    eps: f32,
}

impl Default for Inverse {
    fn default() -> Self {
        Self { eps: DEFAULT_EPS }
    }
}

impl Restorer for Inverse {
    fn restore(&mut self, degraded: &RealGrid, kernel: &Kernel) -> deblur::Result<RealGrid> {
        deblur::inverse_filter(degraded, kernel, self.eps)
    }
}
