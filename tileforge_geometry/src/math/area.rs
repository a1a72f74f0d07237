use super::Point;

/// Twice the signed area of a closed ring.
///
/// Positive for rings that run clockwise on screen (y pointing down), which is the
/// orientation of exterior rings in vector tiles.
#[must_use]
pub fn area_ring(ring: &[Point]) -> f64 {
	let Some(mut p2) = ring.last() else {
		return 0.0;
	};
	let mut sum = 0f64;
	for p1 in ring {
		sum += (p2.x - p1.x) * (p1.y + p2.y);
		p2 = p1;
	}
	sum
}
