//! Render layers.
//!
//! Sprites are drawn layer by layer, back to front; within a layer lower `y` draws first.

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderLayer {
    Ground,
    #[default]
    Object,
}
