//! Builds a [`RenderConfig`](::config::RenderConfig) from the loose
//! string parameters an HTTP front end hands over.  Every value has a
//! documented default, and a value that is missing or fails to parse
//! falls back to that default rather than failing the request; the
//! real validation happens when the engine looks at the assembled
//! config.

use std::collections::HashMap;
use std::str::FromStr;

use config::RenderConfig;

/// Assembles a config from query-string style parameters.
///
/// Recognized keys and their defaults: `posX` (-2.0), `posY` (-1.2),
/// `height` (2.5), `width` (1024), `height_px` (1024), `maxIter`
/// (1000), `samples` (50), `numBlocks` (64), `numThreads` (16).
/// Unknown keys are ignored.
pub fn from_query(params: &HashMap<String, String>) -> RenderConfig {
    RenderConfig::new(
        get_param(params, "posX", -2.0),
        get_param(params, "posY", -1.2),
        get_param(params, "height", 2.5),
        get_param(params, "width", 1024),
        get_param(params, "height_px", 1024),
        get_param(params, "maxIter", 1000),
        get_param(params, "samples", 50),
        get_param(params, "numBlocks", 64),
        get_param(params, "numThreads", 16),
    )
}

fn get_param<T: FromStr>(params: &HashMap<String, String>, name: &str, default: T) -> T {
    match params.get(name) {
        Some(value) => T::from_str(value).unwrap_or(default),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn an_empty_query_yields_the_documented_defaults() {
        let cfg = from_query(&HashMap::new());
        assert_eq!(cfg.pos_x, -2.0);
        assert_eq!(cfg.pos_y, -1.2);
        assert_eq!(cfg.height, 2.5);
        assert_eq!(cfg.img_width, 1024);
        assert_eq!(cfg.img_height, 1024);
        assert_eq!(cfg.pixel_total, 1024 * 1024);
        assert_eq!(cfg.max_iter, 1000);
        assert_eq!(cfg.samples, 50);
        assert_eq!(cfg.num_blocks, 64);
        assert_eq!(cfg.num_threads, 16);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn provided_values_override_defaults() {
        let cfg = from_query(&query(&[
            ("posX", "-0.5"),
            ("width", "640"),
            ("height_px", "480"),
            ("samples", "8"),
        ]));
        assert_eq!(cfg.pos_x, -0.5);
        assert_eq!(cfg.img_width, 640);
        assert_eq!(cfg.img_height, 480);
        assert_eq!(cfg.samples, 8);
        assert_eq!(cfg.ratio, 640.0 / 480.0);
    }

    #[test]
    fn junk_values_fall_back_to_defaults() {
        let cfg = from_query(&query(&[
            ("posX", "not-a-number"),
            ("maxIter", "12.5"),
            ("numThreads", ""),
        ]));
        assert_eq!(cfg.pos_x, -2.0);
        assert_eq!(cfg.max_iter, 1000);
        assert_eq!(cfg.num_threads, 16);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let cfg = from_query(&query(&[("zoomFactor", "9")]));
        assert!(cfg.validate().is_ok());
    }
}
