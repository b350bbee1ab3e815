mod project;
mod sample;

pub use project::{PathProjection, ProjectToPath, ProjectToSection, SectionProjection};
pub use sample::{SamplePath, SampleResult};
