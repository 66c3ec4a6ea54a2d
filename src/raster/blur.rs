use image::RgbaImage;

use crate::foundation::error::{CardError, CardResult};
use crate::raster::composite::Rgba8;

/// Q16 fixed-point one.
const ONE: u32 = 1 << 16;

/// Separable gaussian taps in Q16 fixed point.
///
/// Taps are cut from the cumulative weight curve, so they always sum to exactly [`ONE`] and flat
/// regions stay flat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Kernel {
    taps: Vec<u32>,
}

impl Kernel {
    pub(crate) fn gaussian(radius: u32, sigma: f32) -> CardResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(CardError::render("blur sigma must be > 0"));
        }
        let r = i64::from(radius);
        let denom = 2.0 * f64::from(sigma).powi(2);
        let weights: Vec<f64> = (-r..=r)
            .map(|i| (-((i * i) as f64) / denom).exp())
            .collect();
        let total: f64 = weights.iter().sum();

        let mut taps = Vec::with_capacity(weights.len());
        let mut cumulative = 0.0;
        let mut cut = 0u32;
        for w in &weights {
            cumulative += w / total;
            let next = (cumulative * f64::from(ONE)).round().clamp(0.0, f64::from(ONE)) as u32;
            taps.push(next.saturating_sub(cut));
            cut = next.max(cut);
        }
        if let Some(last) = taps.last_mut() {
            *last += ONE - cut;
        }
        Ok(Self { taps })
    }

    pub(crate) fn taps(&self) -> &[u32] {
        &self.taps
    }

    /// Blur premultiplied `pixels` in place, rows first and then columns. Edge pixels repeat.
    pub(crate) fn apply(&self, pixels: &mut RgbaImage) {
        let (w, h) = pixels.dimensions();
        if self.taps.len() <= 1 || w == 0 || h == 0 {
            return;
        }
        let mut line: Vec<Rgba8> = Vec::with_capacity(w.max(h) as usize);
        for y in 0..h {
            line.clear();
            line.extend((0..w).map(|x| pixels.get_pixel(x, y).0));
            for x in 0..w {
                pixels.get_pixel_mut(x, y).0 = self.sample(&line, x as usize);
            }
        }
        for x in 0..w {
            line.clear();
            line.extend((0..h).map(|y| pixels.get_pixel(x, y).0));
            for y in 0..h {
                pixels.get_pixel_mut(x, y).0 = self.sample(&line, y as usize);
            }
        }
    }

    fn sample(&self, line: &[Rgba8], at: usize) -> Rgba8 {
        let last = line.len() - 1;
        let radius = self.taps.len() / 2;
        let mut acc = [0u32; 4];
        for (k, &tap) in self.taps.iter().enumerate() {
            let px = line[(at + k).saturating_sub(radius).min(last)];
            for (sum, &c) in acc.iter_mut().zip(&px) {
                *sum += tap * u32::from(c);
            }
        }
        acc.map(|sum| ((sum + ONE / 2) >> 16).min(255) as u8)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blur.rs"]
mod tests;
