//! Scale Builder
//! Domain to range mappings for position, size and color encodings.

use crate::data::{DataProcessor, Field, Item};
use crate::error::PipelineError;
use serde::{Deserialize, Serialize};

/// How domain values are spaced along the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleLaw {
    Linear,
    /// Radius grows with the square root so that area grows linearly.
    Sqrt,
}

impl ScaleLaw {
    fn transform(&self, v: f64) -> f64 {
        match self {
            ScaleLaw::Linear => v,
            // Sign-preserving so negative domains stay monotonic.
            ScaleLaw::Sqrt => v.signum() * v.abs().sqrt(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    domain: (f64, f64),
    range: (f64, f64),
    law: ScaleLaw,
}

impl Scale {
    pub fn new(domain: (f64, f64), range: (f64, f64), law: ScaleLaw) -> Self {
        Self { domain, range, law }
    }

    pub fn linear(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self::new(domain, range, ScaleLaw::Linear)
    }

    pub fn sqrt(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self::new(domain, range, ScaleLaw::Sqrt)
    }

    /// Fit the domain to the extent of `field` over `items`.
    ///
    /// Fails with `EmptyDataset` when no item has a finite value for the
    /// field, instead of producing a NaN domain.
    pub fn fit(
        items: &[Item],
        field: Field,
        range: (f64, f64),
        law: ScaleLaw,
    ) -> Result<Self, PipelineError> {
        let domain = DataProcessor::extent(items, field).ok_or(PipelineError::EmptyDataset {
            total: items.len(),
        })?;
        Ok(Self::new(domain, range, law))
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn law(&self) -> ScaleLaw {
        self.law
    }

    pub fn is_degenerate(&self) -> bool {
        self.law.transform(self.domain.0) == self.law.transform(self.domain.1)
    }

    /// Position of `v` inside the domain, 0 at the domain start and 1 at its
    /// end. A degenerate domain maps everything to 0.5.
    pub fn normalize(&self, v: f64) -> f64 {
        let d0 = self.law.transform(self.domain.0);
        let d1 = self.law.transform(self.domain.1);
        if d0 == d1 {
            return 0.5;
        }
        (self.law.transform(v) - d0) / (d1 - d0)
    }

    pub fn map(&self, v: f64) -> f64 {
        let (r0, r1) = self.range;
        r0 + self.normalize(v) * (r1 - r0)
    }

    /// Round tick values covering the domain, roughly `target` of them.
    pub fn ticks(&self, target: usize) -> Vec<f64> {
        let (min, max) = (
            self.domain.0.min(self.domain.1),
            self.domain.0.max(self.domain.1),
        );
        if min == max || target == 0 {
            return vec![min];
        }

        let step = nice_step(max - min, target);
        // Steps below the float spacing of the domain cannot separate ticks.
        if !(step.is_finite() && step > 0.0) || min + step == min {
            return vec![min, max];
        }

        let first = (min / step).ceil();
        let last = (max / step + 1e-9).floor();
        if last < first || last - first > MAX_TICKS as f64 {
            return vec![min, max];
        }
        (0..=(last - first) as usize)
            .map(|k| (first + k as f64) * step)
            .collect()
    }
}

/// Upper bound on ticks per axis.
pub const MAX_TICKS: usize = 50;

/// Step of 1, 2 or 5 times a power of ten close to `range / target_steps`.
pub fn nice_step(range: f64, target_steps: usize) -> f64 {
    let raw_step = range / target_steps.max(1) as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;

    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}
