/*!
    Instrumentation sink for queue fill and seek reporting.

    The reader loop reports its buffer fill ratio and seek events through this
    trait. Implementations must never panic or block — instrumentation
    failures must not affect ingestion.
*/

/// Tag under which the queue fill ratio is reported.
pub const INPUT_BUFFER_TAG: &str = "input-buffer";
/// Tag emitted on every seek, including loop-mode wraparounds.
pub const SEEK_TAG: &str = "seek";

/**
    An RGB color for graph tags.
*/
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/**
    A diagnostics graph receiving instrumentation from the reader loop.
*/
pub trait Graph: Send + Sync {
    /// Register the display color for a tag.
    fn set_color(&self, tag: &str, color: Color);

    /// Report a value in `[0, 1]` for a tag, e.g. the queue fill ratio.
    fn update_value(&self, tag: &str, ratio: f64);

    /// Record a one-shot event for a tag.
    fn add_tag(&self, tag: &str);
}

/**
    A graph that discards everything. Used when no instrumentation is wired up.
*/
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopGraph;

impl Graph for NoopGraph {
    fn set_color(&self, _tag: &str, _color: Color) {}
    fn update_value(&self, _tag: &str, _ratio: f64) {}
    fn add_tag(&self, _tag: &str) {}
}
