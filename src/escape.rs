//! The classic escape-time iteration at the heart of every Mandelbrot
//! renderer.

use num::Complex;

/// Iterates z = z² + c from z = 0 until the orbit leaves the circle of
/// radius 2, or `max_iter` iterations have run.  Returns the squared
/// magnitude of z at the moment of escape together with the iteration
/// index; a bounded orbit returns its final squared magnitude and
/// `max_iter` itself.
///
/// The squared magnitude is handed back alongside the count because the
/// color mapping wants both: the count drives the hue, and the
/// magnitude both scales it and marks the in-set case (a returned
/// magnitude of 4 or less means the orbit never escaped).
pub fn escape_time(c: Complex<f64>, max_iter: u32) -> (f64, u32) {
    let mut z = Complex::new(0.0_f64, 0.0_f64);
    for i in 0..max_iter {
        z = z * z + c;
        let magnitude_sq = z.norm_sqr();
        if magnitude_sq > 4.0 {
            return (magnitude_sq, i);
        }
    }
    (z.norm_sqr(), max_iter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_origin_never_escapes() {
        for max_iter in &[1, 10, 1000] {
            assert_eq!(escape_time(Complex::new(0.0, 0.0), *max_iter), (0.0, *max_iter));
        }
    }

    #[test]
    fn points_outside_the_radius_escape_immediately() {
        assert_eq!(escape_time(Complex::new(3.0, 0.0), 100), (9.0, 0));
        assert_eq!(escape_time(Complex::new(0.0, 3.0), 100), (9.0, 0));
        assert_eq!(escape_time(Complex::new(3.0, 1.0), 100), (10.0, 0));
    }

    #[test]
    fn minus_one_cycles_forever() {
        // The orbit of -1 alternates -1, 0, -1, ... so an even bound
        // lands on 0 and an odd bound lands on -1.
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), 5000), (0.0, 5000));
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), 5001), (1.0, 5001));
    }

    #[test]
    fn minus_two_sits_exactly_on_the_threshold() {
        // z walks -2, 2, 2, ... so the magnitude pins at 4 and never
        // exceeds it.
        let (magnitude_sq, iterations) = escape_time(Complex::new(-2.0, 0.0), 500);
        assert_eq!(magnitude_sq, 4.0);
        assert_eq!(iterations, 500);
    }

    #[test]
    fn a_boundary_neighbor_escapes_eventually() {
        let (magnitude_sq, iterations) = escape_time(Complex::new(0.26, 0.0), 10_000);
        assert!(magnitude_sq > 4.0);
        assert!(iterations > 0 && iterations < 10_000);
    }
}
