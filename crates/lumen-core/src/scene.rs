//! User-selectable scene composition and animation speed.

use serde::{Deserialize, Serialize};

/// Which layers of the hero background are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scene {
    /// Aurora, particles, energy lines and the neural graph together.
    #[default]
    Hero,
    /// Ambient particle field only.
    Particles,
    /// Neural node graph only.
    Neural,
    /// Aurora backdrop with energy lines.
    Energy,
}

impl Scene {
    /// Cycle to the next scene.
    pub fn next(self) -> Self {
        match self {
            Scene::Hero => Scene::Particles,
            Scene::Particles => Scene::Neural,
            Scene::Neural => Scene::Energy,
            Scene::Energy => Scene::Hero,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Scene::Hero => "hero",
            Scene::Particles => "particles",
            Scene::Neural => "neural",
            Scene::Energy => "energy",
        }
    }

    pub fn shows_particles(self) -> bool {
        matches!(self, Scene::Hero | Scene::Particles)
    }

    pub fn shows_nodes(self) -> bool {
        matches!(self, Scene::Hero | Scene::Neural)
    }

    pub fn shows_energy(self) -> bool {
        matches!(self, Scene::Hero | Scene::Energy)
    }

    pub fn shows_aurora(self) -> bool {
        matches!(self, Scene::Hero | Scene::Energy)
    }

    /// The audience outlines accompany the node graph.
    pub fn shows_silhouette(self) -> bool {
        self.shows_nodes()
    }

    /// Card connectors belong to the full hero only.
    pub fn shows_connectors(self) -> bool {
        matches!(self, Scene::Hero)
    }
}

/// Global playback speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Multiplier applied to simulation time steps.
    pub fn multiplier(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 2.0,
        }
    }

    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_cycle_returns_to_start() {
        let mut scene = Scene::default();
        for _ in 0..4 {
            scene = scene.next();
        }
        assert_eq!(scene, Scene::Hero);
    }

    #[test]
    fn test_hero_shows_every_layer() {
        let hero = Scene::Hero;
        assert!(hero.shows_particles() && hero.shows_nodes());
        assert!(hero.shows_energy() && hero.shows_aurora());
        assert!(!Scene::Particles.shows_nodes());
        assert!(!Scene::Neural.shows_particles());
        assert!(hero.shows_silhouette() && hero.shows_connectors());
    }

    #[test]
    fn test_overlays_follow_their_scene() {
        assert!(Scene::Neural.shows_silhouette());
        assert!(!Scene::Neural.shows_connectors());
        for scene in [Scene::Particles, Scene::Energy] {
            assert!(!scene.shows_silhouette() && !scene.shows_connectors());
        }
    }

    #[test]
    fn test_speed_multiplier_ordering() {
        assert!(AnimationSpeed::Slow.multiplier() < AnimationSpeed::Medium.multiplier());
        assert!(AnimationSpeed::Medium.multiplier() < AnimationSpeed::Fast.multiplier());
    }
}
