use geo::math::Vec3;
use geo::time::Time;

/// Interpolated-sample positioning.
///
/// A track holds `(time, position)` samples in non-decreasing time order.
/// Queries clamp to the first/last sample outside the sampled range and
/// linearly interpolate between neighbors inside it. This is what animates
/// a vehicle along its recorded flight path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathTrack {
    samples: Vec<(Time, Vec3)>,
}

impl PathTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample. Out-of-order times are clamped onto the previous
    /// sample's time so the track stays monotonic.
    pub fn push(&mut self, time: Time, position: Vec3) {
        let time = match self.samples.last() {
            Some((last, _)) if time.0 < last.0 => *last,
            _ => time,
        };
        self.samples.push((time, position));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn span(&self) -> Option<(Time, Time)> {
        let first = self.samples.first()?.0;
        let last = self.samples.last()?.0;
        Some((first, last))
    }

    pub fn position_at(&self, t: Time) -> Option<Vec3> {
        let (first, last) = (self.samples.first()?, self.samples.last()?);
        if t.0 <= first.0.0 {
            return Some(first.1);
        }
        if t.0 >= last.0.0 {
            return Some(last.1);
        }

        // Find the segment containing t.
        let idx = self
            .samples
            .partition_point(|(sample_t, _)| sample_t.0 <= t.0);
        let (t0, p0) = self.samples[idx - 1];
        let (t1, p1) = self.samples[idx];
        let dt = t1.0 - t0.0;
        if dt <= 0.0 {
            return Some(p0);
        }
        Some(p0.lerp(p1, (t.0 - t0.0) / dt))
    }
}
