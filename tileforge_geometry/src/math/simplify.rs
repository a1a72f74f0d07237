use super::{Line, Point};

/// Douglas-Peucker simplification of an open polyline.
///
/// Keeps the first and last point and every point farther than `tolerance` from the chord
/// of the span it belongs to. Lines with fewer than three points are returned unchanged.
#[must_use]
pub fn simplify_line(points: &[Point], tolerance: f64) -> Vec<Point> {
	if points.len() < 3 {
		return points.to_vec();
	}

	let mut keep = vec![false; points.len()];
	keep[0] = true;
	keep[points.len() - 1] = true;

	let mut stack = vec![(0, points.len() - 1)];
	while let Some((start, end)) = stack.pop() {
		if end <= start + 1 {
			continue;
		}
		let chord = Line::from_points(points[start], points[end]);

		let mut max_distance = 0.0;
		let mut max_index = start;
		for (index, point) in points.iter().enumerate().take(end).skip(start + 1) {
			let distance = chord.distance_from_point(*point);
			if distance > max_distance {
				max_distance = distance;
				max_index = index;
			}
		}

		if max_distance > tolerance {
			keep[max_index] = true;
			stack.push((start, max_index));
			stack.push((max_index, end));
		}
	}

	points
		.iter()
		.zip(keep)
		.filter_map(|(point, keep)| keep.then_some(*point))
		.collect()
}

/// Simplifies a closed ring (first point equals last point).
///
/// The ring is split at the vertex farthest from its start, so both halves have a proper chord.
/// Returns the simplified ring, still closed.
#[must_use]
pub fn simplify_ring(ring: &[Point], tolerance: f64) -> Vec<Point> {
	if ring.len() < 5 {
		return ring.to_vec();
	}

	let start = ring[0];
	let split = ring
		.iter()
		.enumerate()
		.max_by(|(_, a), (_, b)| {
			let da = (a.x - start.x).hypot(a.y - start.y);
			let db = (b.x - start.x).hypot(b.y - start.y);
			da.total_cmp(&db)
		})
		.map_or(ring.len() / 2, |(index, _)| index);

	let mut result = simplify_line(&ring[..=split], tolerance);
	result.pop();
	result.extend(simplify_line(&ring[split..], tolerance));
	result
}

#[cfg(test)]
mod tests {
	use super::*;

	fn points(coords: &[[f64; 2]]) -> Vec<Point> {
		coords.iter().map(|c| Point::from(*c)).collect()
	}

	#[test]
	fn short_lines_are_unchanged() {
		let line = points(&[[0.0, 0.0], [5.0, 5.0]]);
		assert_eq!(simplify_line(&line, 10.0), line);
		assert!(simplify_line(&[], 1.0).is_empty());
	}

	#[test]
	fn collinear_points_are_removed() {
		let line = points(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0]]);
		assert_eq!(simplify_line(&line, 0.5), points(&[[0.0, 0.0], [3.0, 0.0]]));
	}

	#[test]
	fn small_deviations_are_removed() {
		let line = points(&[[0.0, 0.0], [5.0, 0.4], [10.0, 0.0], [15.0, -0.3], [20.0, 0.0]]);
		assert_eq!(simplify_line(&line, 1.0), points(&[[0.0, 0.0], [20.0, 0.0]]));
	}

	#[test]
	fn significant_vertices_are_kept() {
		let line = points(&[[0.0, 0.0], [5.0, 5.1], [10.0, 10.0], [15.0, 4.9], [20.0, 0.0]]);
		assert_eq!(
			simplify_line(&line, 1.0),
			points(&[[0.0, 0.0], [10.0, 10.0], [20.0, 0.0]])
		);
	}

	#[test]
	fn zero_tolerance_keeps_bends() {
		let line = points(&[[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]]);
		assert_eq!(simplify_line(&line, 0.0), line);
	}

	#[test]
	fn ring_stays_closed() {
		let ring = points(&[
			[0.0, 0.0],
			[5.0, 0.1],
			[10.0, 0.0],
			[10.0, 10.0],
			[5.0, 10.1],
			[0.0, 10.0],
			[0.0, 0.0],
		]);
		let simplified = simplify_ring(&ring, 1.0);
		assert_eq!(
			simplified,
			points(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]])
		);
	}

	#[test]
	fn small_rings_are_unchanged() {
		let ring = points(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]);
		assert_eq!(simplify_ring(&ring, 5.0), ring);
	}
}
