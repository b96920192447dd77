use deblur::{Kernel, RealGrid};

use super::Restorer;

// assumes the snr the benchmark degraded with
#[derive(Debug)]
pub struct Wiener {
    snr: f32,
}

impl Wiener {
    pub fn new(snr: f32) -> Self {
        Self { snr }
    }
}

impl Restorer for Wiener {
    fn restore(&mut self, degraded: &RealGrid, kernel: &Kernel) -> deblur::Result<RealGrid> {
        deblur::wiener_filter(degraded, kernel, self.snr)
    }
}
