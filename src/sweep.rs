use crate::sweep_config::SweepRange;

/// One point of a parameter sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepValue {
    /// One decimal digit. Used both in the file name and in the scene,
    /// so the two always agree.
    pub formatted: String,
}

impl SweepValue {
    pub fn new(value: f64) -> Self {
        Self {
            formatted: format!("{:.1}", value),
        }
    }
}

impl SweepRange {
    pub fn values(&self) -> Vec<SweepValue> {
        match self.steps {
            0 => vec![],
            1 => vec![SweepValue::new(self.start)],
            steps => {
                let step = (self.end - self.start) / (steps - 1) as f64;
                (0..steps)
                    .map(|i| {
                        // The last value is pinned, accumulated error would otherwise leak into it.
                        if i == steps - 1 {
                            SweepValue::new(self.end)
                        } else {
                            SweepValue::new(self.start + step * i as f64)
                        }
                    })
                    .collect()
            }
        }
    }
}
