use log::info;

/// Depth calculates minimum, maximum, average and percentile of nil-leaf
/// depths in the [`OrderedMap`] tree.
///
/// Histogram is capped at depth 255, deeper samples are counted in the
/// 255 bucket for [`Depth::percentiles`]. min, max and mean are exact.
///
/// [`OrderedMap`]: crate::OrderedMap
#[derive(Clone, Debug)]
pub struct Depth {
    samples: usize,
    min: usize,
    max: usize,
    total: usize,
    depths: [u64; 256],
}

impl Depth {
    pub(crate) fn new() -> Depth {
        Default::default()
    }

    // depth 0 is a nil root, that is an empty tree, never sampled.
    pub(crate) fn sample(&mut self, depth: usize) {
        self.samples += 1;
        self.total += depth;
        if self.min == 0 || depth < self.min {
            self.min = depth
        }
        if depth > self.max {
            self.max = depth
        }
        self.depths[depth.min(255)] += 1;
    }

    /// Return number of nil-leaves sampled.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Return minimum depth of a nil-leaf.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Return maximum depth of a nil-leaf, also the height of the tree.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Return the average depth of nil-leaves.
    pub fn mean(&self) -> usize {
        match self.samples {
            0 => 0,
            n => self.total / n,
        }
    }

    /// Return depth as tuple of percentiles, each tuple provides
    /// (percentile, depth). Returned percentiles from 90, 91 .. 100
    pub fn percentiles(&self) -> Vec<(u8, usize)> {
        let mut percentiles: Vec<(u8, usize)> = vec![];
        if self.samples == 0 {
            return percentiles;
        }
        let (mut acc, mut prev_perc) = (0_u64, 90_u8);
        let iter = self.depths.iter().enumerate().filter(|(_, &item)| item > 0);
        for (depth, samples) in iter {
            acc += *samples;
            let perc = ((acc as f64 / self.samples as f64) * 100_f64) as u8;
            if perc >= prev_perc {
                percentiles.push((perc, depth));
                prev_perc = perc;
            }
        }
        percentiles
    }

    /// Log depth statistics in human readable format.
    pub fn pretty_print(&self, prefix: &str) {
        info!(
            "{}depth (min, avg, max): {:?}",
            prefix,
            (self.min, self.mean(), self.max)
        );
        for (perc, depth) in self.percentiles().into_iter() {
            info!("{}  {} percentile = {}", prefix, perc, depth);
        }
    }

    /// Convert depth statistics to JSON format, useful for plotting.
    pub fn json(&self) -> String {
        let ps: Vec<String> = self
            .percentiles()
            .into_iter()
            .map(|(p, d)| format!("\"{}\": {}", p, d))
            .collect();
        let strs = [
            format!("\"min\": {}", self.min),
            format!("\"mean\": {}", self.mean()),
            format!("\"max\": {}", self.max),
            format!("\"percentiles\": {{ {} }}", ps.join(", ")),
        ];
        format!("{{ {} }}", strs.join(", "))
    }
}

impl Default for Depth {
    fn default() -> Self {
        Depth {
            samples: 0,
            min: 0,
            max: 0,
            total: 0,
            depths: [0; 256],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_depth_empty() {
        let depth = Depth::new();
        assert_eq!(depth.samples(), 0);
        assert_eq!(depth.mean(), 0);
        assert!(depth.percentiles().is_empty());
    }

    #[test]
    fn test_depth_sample() {
        let mut depth = Depth::new();
        for d in [2, 2, 3, 3, 3, 4].iter() {
            depth.sample(*d);
        }
        assert_eq!(depth.samples(), 6);
        assert_eq!(depth.min(), 2);
        assert_eq!(depth.max(), 4);
        assert_eq!(depth.mean(), 2);
        assert_eq!(depth.percentiles(), vec![(100, 4)]);
        assert_eq!(
            depth.json(),
            "{ \"min\": 2, \"mean\": 2, \"max\": 4, \"percentiles\": { \"100\": 4 } }"
        );
    }

    #[test]
    fn test_depth_capped() {
        let mut depth = Depth::new();
        depth.sample(300);
        assert_eq!(depth.max(), 300);
        assert_eq!(depth.mean(), 300);
        assert_eq!(depth.percentiles(), vec![(100, 255)]);
    }
}
