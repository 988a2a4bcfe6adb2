//! Single complex measurement at one frequency

use num_complex::Complex64;

use crate::math::conversions::{complex_2_db, complex_2_degree, complex_2_magnitude};

/// One network-parameter value at an absolute frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datapoint {
    /// Frequency in Hz
    pub freq: f64,
    /// Real part
    pub re: f64,
    /// Imaginary part
    pub im: f64,
}

impl Datapoint {
    pub fn new(freq: f64, re: f64, im: f64) -> Self {
        Self { freq, re, im }
    }

    pub fn from_complex(freq: f64, z: Complex64) -> Self {
        Self::new(freq, z.re, z.im)
    }

    /// Value as a complex number
    #[inline]
    pub fn z(&self) -> Complex64 {
        Complex64::new(self.re, self.im)
    }

    /// 20*log10(|z|)
    pub fn gain_db(&self) -> f64 {
        complex_2_db(self.z())
    }

    /// Phase in degrees
    pub fn phase_deg(&self) -> f64 {
        complex_2_degree(self.z())
    }

    /// Voltage standing wave ratio, treating the value as a reflection coefficient.
    ///
    /// Returns `f64::INFINITY` for |Γ| >= 1.
    pub fn vswr(&self) -> f64 {
        let mag = complex_2_magnitude(self.z());
        if mag >= 1.0 {
            return f64::INFINITY;
        }
        (1.0 + mag) / (1.0 - mag)
    }

    /// Impedance seen through a reflection coefficient against `ref_impedance` ohms
    pub fn impedance(&self, ref_impedance: f64) -> Complex64 {
        let gamma = self.z();
        let one = Complex64::new(1.0, 0.0);
        ref_impedance * (one + gamma) / (one - gamma)
    }
}
