//! Siting scenarios read from JSON.

use std::fs;
use std::path::Path;

use depot_geom::Point;
use depot_paths::SiteConfig;
use serde::{Deserialize, Serialize};

/// A grid, its blocked cells and the source points to site a depot for.
///
/// Cells are written as `[x, y]` pairs:
///
/// ```json
/// { "grid_size": 5, "blocked": [[1, 2], [2, 2]], "sources": [[0, 1], [4, 4]] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub grid_size: i32,
    #[serde(default)]
    pub blocked: Vec<[i32; 2]>,
    pub sources: Vec<[i32; 2]>,
    #[serde(default)]
    pub config: SiteConfig,
}

impl Scenario {
    /// The warehouse example: a 5×5 yard with three blocked cells and two
    /// factories in opposite corners.
    pub fn demo() -> Self {
        Self {
            grid_size: 5,
            blocked: vec![[1, 2], [2, 2], [3, 3]],
            sources: vec![[0, 1], [4, 4]],
            config: SiteConfig::default(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn blocked_points(&self) -> Vec<Point> {
        self.blocked.iter().copied().map(Point::from).collect()
    }

    pub fn source_points(&self) -> Vec<Point> {
        self.sources.iter().copied().map(Point::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_paths::Target;

    #[test]
    fn parses_minimal_json() {
        let json = r#"{"grid_size": 3, "sources": [[0, 0]]}"#;
        let s: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(s.grid_size, 3);
        assert!(s.blocked.is_empty());
        assert_eq!(s.source_points(), vec![Point::new(0, 0)]);
        assert_eq!(s.config, SiteConfig::default());
    }

    #[test]
    fn parses_depot_target() {
        let s: Scenario = serde_json::from_str(
            r#"{
                "grid_size": 5,
                "blocked": [[1, 2]],
                "sources": [[0, 1], [4, 4]],
                "config": { "target": { "depot": { "x": 2, "y": 0 } } }
            }"#,
        )
        .unwrap();
        assert_eq!(s.blocked_points(), vec![Point::new(1, 2)]);
        assert_eq!(s.config.target, Target::Depot(Point::new(2, 0)));
    }

    #[test]
    fn demo_round_trips() {
        let demo = Scenario::demo();
        let json = serde_json::to_string(&demo).unwrap();
        let back: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(back, demo);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Scenario::load(Path::new("/nonexistent/scenario.json")).is_err());
    }
}
