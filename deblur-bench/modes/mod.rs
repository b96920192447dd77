pub mod inverse;
pub mod wiener;

use deblur::{Kernel, RealGrid};
use strum_macros::{Display, EnumIter};

#[derive(Debug, Display, EnumIter, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[strum(serialize_all = "lowercase")]
pub enum FilterMode {
    Degraded,
    Inverse,
    Wiener,
}

impl FilterMode {
    pub fn get_impl(&self, snr: f32) -> Box<dyn Restorer> {
        match self {
            FilterMode::Degraded => Box::new(Passthrough),
            FilterMode::Inverse => Box::new(inverse::Inverse::default()),
            FilterMode::Wiener => Box::new(wiener::Wiener::new(snr)),
        }
    }
}

pub trait Restorer {
    fn restore(&mut self, degraded: &RealGrid, kernel: &Kernel) -> deblur::Result<RealGrid>;
}

// baseline: the degraded image as is
#[derive(Debug)]
pub struct Passthrough;

impl Restorer for Passthrough {
    fn restore(&mut self, degraded: &RealGrid, _kernel: &Kernel) -> deblur::Result<RealGrid> {
        Ok(degraded.clone())
    }
}
