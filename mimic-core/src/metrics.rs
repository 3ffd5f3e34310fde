use std::fmt;

pub const TRAINING_LOSS: &str = "Training Loss";

/// Scalar metrics reported by a policy update, in insertion order.
///
/// `Display` renders one `MetricName: value` line per entry, which is the
/// line shape downstream log-table consumers scrape.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    entries: Vec<(&'static str, f32)>,
}

impl Metrics {
    pub fn insert(&mut self, name: &'static str, value: f32) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    pub fn training_loss(&self) -> Option<f32> {
        self.get(TRAINING_LOSS)
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.entries {
            writeln!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}
