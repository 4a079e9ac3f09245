// Layout limits: how much of each record category fits on a single page.
// Renderers and the completeness checker read the same table.

pub mod limits;

pub use limits::{LayoutLimits, SkillCheck};
