/// Fixed-rate step accumulator.
///
/// Feed it frame deltas; it reports how many whole steps elapsed. At most
/// `max_steps` are reported per call and any backlog beyond that is dropped,
/// so a long stall does not turn into a burst of catch-up work.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    acc: f32,
    max_steps: u32,
}

impl FixedStep {
    /// `rate` steps per second.
    pub fn new(rate: f32, max_steps: u32) -> Self {
        debug_assert!(rate > 0.0);
        Self {
            step: 1.0 / rate,
            acc: 0.0,
            max_steps: max_steps.max(1),
        }
    }

    /// Adds `dt` seconds and returns the number of steps to run now.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }

        self.acc += dt;
        // Tolerance so 1/60 s frames are not lost to float rounding.
        let whole = ((self.acc + self.step * 1e-3) / self.step).floor() as u32;
        let steps = whole.min(self.max_steps);

        if whole > self.max_steps {
            self.acc = 0.0;
        } else {
            self.acc = (self.acc - steps as f32 * self.step).max(0.0);
        }
        steps
    }
}
