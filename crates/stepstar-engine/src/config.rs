use stepstar_core::{Metric, Point};

/// Board setup for a new [`Engine`](crate::Engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub width: i32,
    pub height: i32,
    pub start: Point,
    pub end: Point,
    /// Step cost and heuristic. Manhattan unless explicitly changed.
    pub metric: Metric,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 13,
            height: 13,
            start: Point::new(0, 0),
            end: Point::new(10, 0),
            metric: Metric::Manhattan,
        }
    }
}
