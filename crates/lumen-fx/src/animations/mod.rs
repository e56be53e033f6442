//! The individual animations.

pub mod backdrop;
pub mod connectors;
pub mod energy;
pub mod nodes;
pub mod particles;
pub mod silhouette;

pub use backdrop::{AuroraBlobs, PageGradient};
pub use connectors::CardConnectors;
pub use energy::EnergyLines;
pub use nodes::NodeGraph;
pub use particles::ParticleField;
pub use silhouette::SilhouetteOverlay;
