//! Pairwise proximity connectors.

use lumen_core::Point;

/// Peak opacity of a connector between two coincident points.
pub const CONNECTOR_PEAK_ALPHA: f32 = 0.08;

/// A pair of entities close enough to be connected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Index of the first entity (always lower than `b`).
    pub a: usize,
    pub b: usize,
    /// Euclidean distance between the two.
    pub distance: f32,
}

impl Link {
    /// Connector opacity for a link measured against `threshold`.
    pub fn alpha(&self, threshold: f32) -> f32 {
        connector_alpha(self.distance, threshold)
    }
}

/// `0.08 * (1 - distance / threshold)`, zero at or beyond the threshold.
pub fn connector_alpha(distance: f32, threshold: f32) -> f32 {
    if threshold <= 0.0 || distance >= threshold {
        return 0.0;
    }
    CONNECTOR_PEAK_ALPHA * (1.0 - distance / threshold)
}

/// Every unordered pair `(i, j)`, `i < j`, whose squared distance is strictly
/// below `threshold²`. Pairs come out in `i`-major order.
pub fn links_within(points: &[Point], threshold: f32) -> impl Iterator<Item = Link> + '_ {
    let limit = threshold * threshold;
    points.iter().enumerate().flat_map(move |(i, &p)| {
        points[i + 1..]
            .iter()
            .enumerate()
            .filter_map(move |(offset, &q)| {
                let d2 = p.distance_squared(q);
                (d2 < limit).then(|| Link {
                    a: i,
                    b: i + 1 + offset,
                    distance: d2.sqrt(),
                })
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        let points = [Point::new(0.0, 0.0), Point::new(130.0, 0.0)];
        assert_eq!(links_within(&points, 130.0).count(), 0);

        let points = [Point::new(0.0, 0.0), Point::new(129.5, 0.0)];
        let links: Vec<_> = links_within(&points, 130.0).collect();
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].a, links[0].b), (0, 1));
    }

    #[test]
    fn test_alpha_decreases_with_distance() {
        let mut prev = connector_alpha(0.0, 130.0);
        assert!((prev - CONNECTOR_PEAK_ALPHA).abs() < f32::EPSILON);
        for d in 1..=130 {
            let alpha = connector_alpha(d as f32, 130.0);
            assert!(alpha < prev, "alpha must strictly decrease");
            prev = alpha;
        }
        assert_eq!(connector_alpha(130.0, 130.0), 0.0);
        assert_eq!(connector_alpha(500.0, 130.0), 0.0);
    }

    #[test]
    fn test_each_unordered_pair_once() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1000.0, 1000.0),
        ];
        let pairs: Vec<_> = links_within(&points, 10.0).map(|l| (l.a, l.b)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_empty_and_single_inputs() {
        assert_eq!(links_within(&[], 10.0).count(), 0);
        assert_eq!(links_within(&[Point::new(1.0, 1.0)], 10.0).count(), 0);
    }
}
