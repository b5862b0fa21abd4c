//! Maps escape-time results to colors.  Points inside the set are
//! black; everything else gets a hue that swings with both the escape
//! iteration and the magnitude the orbit reached, which gives the
//! bands around the set their characteristic shimmer.

/// Converts one escape-time result to an 8-bit RGB triple.
///
/// A squared magnitude of 4 or less means the orbit stayed bounded, so
/// the pixel belongs to the set and is painted black.  Escaped points
/// take a hue of `iterations / 100 * magnitude_sq` at full saturation
/// and half lightness.  The scaling constant is an empirical tuning,
/// not anything physical; renders are compared against it, so it must
/// not change.
pub fn colorize(magnitude_sq: f64, iterations: u32) -> (u8, u8, u8) {
    if magnitude_sq <= 4.0 {
        return (0, 0, 0);
    }
    let hue = f64::from(iterations) / 100.0 * magnitude_sq;
    hsl_to_rgb(hue, 1.0, 0.5)
}

/// The standard HSL to RGB conversion.  All three inputs are on the
/// 0..1 scale; hue values outside it wrap around the color wheel.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let h = h - h.floor();
    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return (v, v, v);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    (
        (hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0) as u8,
        (hue_to_channel(p, q, h) * 255.0) as u8,
        (hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0) as u8,
    )
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_orbits_are_black_whatever_the_count() {
        assert_eq!(colorize(0.0, 0), (0, 0, 0));
        assert_eq!(colorize(4.0, 7), (0, 0, 0));
        assert_eq!(colorize(3.99, 1000), (0, 0, 0));
    }

    #[test]
    fn golden_escape_color() {
        // hue = 100 / 100 * 5.0 = 5.0, which wraps to 0.0: pure red.
        assert_eq!(colorize(5.0, 100), (255, 0, 0));
    }

    #[test]
    fn primary_hues_land_where_expected() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
        assert_eq!(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), (0, 255, 0));
        assert_eq!(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), (0, 0, 255));
        assert_eq!(hsl_to_rgb(0.5, 1.0, 0.5), (0, 255, 255));
    }

    #[test]
    fn hue_wraps_around_the_wheel() {
        assert_eq!(hsl_to_rgb(1.25, 1.0, 0.5), hsl_to_rgb(0.25, 1.0, 0.5));
        assert_eq!(hsl_to_rgb(7.0, 1.0, 0.5), hsl_to_rgb(0.0, 1.0, 0.5));
    }

    #[test]
    fn zero_saturation_is_gray() {
        assert_eq!(hsl_to_rgb(0.3, 0.0, 0.5), (127, 127, 127));
        assert_eq!(hsl_to_rgb(0.9, 0.0, 1.0), (255, 255, 255));
    }
}
