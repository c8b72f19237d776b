/// Averages frame rate over a fixed reporting window.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: f32,
    elapsed: f32,
    frames: u32,
}

impl FpsCounter {
    /// `window` is the reporting period in seconds.
    pub fn new(window: f32) -> Self {
        Self {
            window: window.max(f32::EPSILON),
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Records one frame of `dt` seconds.
    ///
    /// Returns the average frame rate once per reporting window.
    pub fn record(&mut self, dt: f32) -> Option<f32> {
        self.elapsed += dt;
        self.frames += 1;

        if self.elapsed < self.window {
            return None;
        }

        let fps = self.frames as f32 / self.elapsed;
        self.elapsed = 0.0;
        self.frames = 0;
        Some(fps)
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_window() {
        let mut fps = FpsCounter::new(1.0);
        for _ in 0..3 {
            assert_eq!(fps.record(0.25), None);
        }
        assert_eq!(fps.record(0.25), Some(4.0));
        assert_eq!(fps.record(0.25), None);
    }
}
