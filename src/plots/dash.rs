//! Dash pattern geometry
//!
//! Plotters only strokes continuous paths, so dashed lines are produced by
//! cutting the pixel-space polyline into the "on" pieces of the pattern.

/// Splits a polyline into the visible pieces of a repeating dash pattern.
///
/// `pattern` alternates on/off lengths (same unit as `path`), starting "on".
/// The pattern runs continuously across vertices. An empty or zero-length
/// pattern returns the path unchanged as a single piece.
pub fn dash_segments(path: &[(f64, f64)], pattern: &[f64]) -> Vec<Vec<(f64, f64)>> {
    if path.len() < 2 {
        return Vec::new();
    }

    if pattern.iter().sum::<f64>() <= 0.0 {
        return vec![path.to_vec()];
    }

    let mut pieces = Vec::new();
    let mut current = vec![path[0]];
    let mut dash = 0;
    let mut remaining = pattern[0];
    let mut on = true;

    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let length = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
        let mut travelled = 0.0;

        while length - travelled > remaining {
            travelled += remaining;
            let point = (
                a.0 + (b.0 - a.0) * travelled / length,
                a.1 + (b.1 - a.1) * travelled / length,
            );

            if on {
                current.push(point);
                pieces.push(std::mem::take(&mut current));
            } else {
                current.push(point);
            }

            on = !on;
            dash = (dash + 1) % pattern.len();
            remaining = pattern[dash];
        }

        remaining -= length - travelled;
        if on {
            current.push(b);
        }
    }

    if on && current.len() >= 2 {
        pieces.push(current);
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pattern_keeps_path_whole() {
        let path = vec![(0.0, 0.0), (3.0, 4.0), (10.0, 4.0)];
        assert_eq!(dash_segments(&path, &[]), vec![path]);
    }

    #[test]
    fn straight_line_is_cut_into_dashes() {
        let path = [(0.0, 0.0), (20.0, 0.0)];
        let pieces = dash_segments(&path, &[5.0, 5.0]);
        assert_eq!(
            pieces,
            vec![vec![(0.0, 0.0), (5.0, 0.0)], vec![(10.0, 0.0), (15.0, 0.0)]]
        );
    }

    #[test]
    fn dash_continues_around_corners() {
        let path = [(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)];
        let pieces = dash_segments(&path, &[5.0, 5.0]);
        assert_eq!(pieces, vec![vec![(0.0, 0.0), (3.0, 0.0), (3.0, 2.0)]]);
    }

    #[test]
    fn trailing_partial_dash_is_kept() {
        let path = [(0.0, 0.0), (12.0, 0.0)];
        let pieces = dash_segments(&path, &[5.0, 5.0]);
        assert_eq!(
            pieces,
            vec![vec![(0.0, 0.0), (5.0, 0.0)], vec![(10.0, 0.0), (12.0, 0.0)]]
        );
    }

    #[test]
    fn four_part_pattern_cycles() {
        let path = [(0.0, 0.0), (28.0, 0.0)];
        let pieces = dash_segments(&path, &[3.0, 5.0, 1.0, 5.0]);
        assert_eq!(
            pieces,
            vec![
                vec![(0.0, 0.0), (3.0, 0.0)],
                vec![(8.0, 0.0), (9.0, 0.0)],
                vec![(14.0, 0.0), (17.0, 0.0)],
                vec![(22.0, 0.0), (23.0, 0.0)],
            ]
        );
    }

    #[test]
    fn degenerate_paths_produce_nothing() {
        assert!(dash_segments(&[], &[1.0, 1.0]).is_empty());
        assert!(dash_segments(&[(1.0, 1.0)], &[1.0, 1.0]).is_empty());
    }
}
