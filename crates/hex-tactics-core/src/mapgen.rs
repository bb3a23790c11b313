//! Procedural terrain assignment.
//!
//! Inland tiles are classified from smooth Perlin noise sampled at the tile's
//! world position. A small uniform jitter breaks up perfectly regular bands,
//! and an independent roll scatters lone mountains across the map. Both the
//! noise and the jitter are seeded, so the same settings always produce the
//! same map.

use crate::settings::TerrainSettings;
use crate::terrain::Terrain;
use crate::types::WorldPos;
use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Anything that can pick terrain for an inland tile.
///
/// The grid calls this once per non-border tile during generation, in
/// deterministic coordinate order.
pub trait TerrainSource {
    /// Choose a terrain type for the tile centered at `position`.
    fn determine_land_type(&mut self, position: WorldPos) -> Terrain;
}

/// Noise-driven terrain classification.
pub struct TerrainGenerator {
    noise: Perlin,
    rng: StdRng,
    settings: TerrainSettings,
}

impl TerrainGenerator {
    /// Create a generator from a seed and classification settings.
    pub fn new(seed: u64, settings: TerrainSettings) -> Self {
        // Perlin takes a 32-bit seed; fold the high half in
        let noise_seed = (seed ^ (seed >> 32)) as u32;
        Self {
            noise: Perlin::new(noise_seed),
            rng: StdRng::seed_from_u64(seed),
            settings,
        }
    }

    /// Classification settings in use.
    pub fn settings(&self) -> &TerrainSettings {
        &self.settings
    }

    /// Smooth noise at `position`, mapped from [-1, 1] to [0, 1].
    pub fn sample(&self, position: WorldPos) -> f32 {
        let scale = self.settings.noise_scale;
        let raw = self
            .noise
            .get([position.x as f64 * scale, position.y as f64 * scale]);
        (((raw + 1.0) / 2.0) as f32).clamp(0.0, 1.0)
    }

    /// Sample noise and perturb it with uniform jitter, clamped to [0, 1].
    fn jittered_sample(&mut self, position: WorldPos) -> f32 {
        let jitter = self.settings.jitter;
        let offset = if jitter > 0.0 {
            self.rng.gen_range(-jitter..=jitter)
        } else {
            0.0
        };
        (self.sample(position) + offset).clamp(0.0, 1.0)
    }
}

impl TerrainSource for TerrainGenerator {
    fn determine_land_type(&mut self, position: WorldPos) -> Terrain {
        let value = self.jittered_sample(position);
        let settings = &self.settings;

        if value < settings.desert_below {
            return Terrain::Desert;
        }

        let mountain_chance = (settings.mountain_chance as f64).clamp(0.0, 1.0);
        let terrain = if value > settings.mountain_above || self.rng.gen_bool(mountain_chance) {
            Terrain::Mountain
        } else {
            Terrain::Grassland
        };

        tracing::trace!(x = position.x, y = position.y, value, %terrain, "classified tile");
        terrain
    }
}

/// Assigns the same terrain everywhere. Useful for fixtures and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformTerrain(pub Terrain);

impl TerrainSource for UniformTerrain {
    fn determine_land_type(&mut self, _position: WorldPos) -> Terrain {
        self.0
    }
}

impl<F> TerrainSource for F
where
    F: FnMut(WorldPos) -> Terrain,
{
    fn determine_land_type(&mut self, position: WorldPos) -> Terrain {
        self(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexCoord;

    fn positions() -> Vec<WorldPos> {
        HexCoord::ORIGIN
            .hexes_in_radius(6)
            .into_iter()
            .map(|c| c.to_world(200.0))
            .collect()
    }

    #[test]
    fn test_generator_determinism() {
        let mut gen1 = TerrainGenerator::new(42, TerrainSettings::default());
        let mut gen2 = TerrainGenerator::new(42, TerrainSettings::default());

        for pos in positions() {
            assert_eq!(gen1.determine_land_type(pos), gen2.determine_land_type(pos));
        }
    }

    #[test]
    fn test_never_produces_water() {
        let mut gen = TerrainGenerator::new(7, TerrainSettings::default());
        for pos in positions() {
            assert_ne!(gen.determine_land_type(pos), Terrain::Water);
        }
    }

    #[test]
    fn test_sample_is_normalized() {
        let gen = TerrainGenerator::new(3, TerrainSettings::default());
        for pos in positions() {
            let value = gen.sample(pos);
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn test_all_desert_when_threshold_is_max() {
        let settings = TerrainSettings {
            desert_below: 1.0,
            mountain_above: 1.0,
            ..TerrainSettings::default()
        };
        let mut gen = TerrainGenerator::new(11, settings);
        let deserts = positions()
            .into_iter()
            .filter(|p| gen.determine_land_type(*p) == Terrain::Desert)
            .count();
        assert!(deserts > 0);
    }

    #[test]
    fn test_certain_mountain_roll() {
        let settings = TerrainSettings {
            desert_below: 0.0,
            mountain_chance: 1.0,
            ..TerrainSettings::default()
        };
        let mut gen = TerrainGenerator::new(5, settings);
        for pos in positions() {
            assert_eq!(gen.determine_land_type(pos), Terrain::Mountain);
        }
    }

    #[test]
    fn test_without_thresholds_everything_is_grassland() {
        let settings = TerrainSettings {
            jitter: 0.0,
            desert_below: 0.0,
            mountain_above: 1.0,
            mountain_chance: 0.0,
            ..TerrainSettings::default()
        };
        let mut gen = TerrainGenerator::new(5, settings);
        for pos in positions() {
            assert_eq!(gen.determine_land_type(pos), Terrain::Grassland);
        }
    }

    #[test]
    fn test_uniform_and_closure_sources() {
        let mut uniform = UniformTerrain(Terrain::Desert);
        assert_eq!(
            uniform.determine_land_type(WorldPos::default()),
            Terrain::Desert
        );

        let mut by_side = |pos: WorldPos| {
            if pos.x < 0.0 {
                Terrain::Mountain
            } else {
                Terrain::Grassland
            }
        };
        assert_eq!(
            by_side.determine_land_type(WorldPos::new(-1.0, 0.0)),
            Terrain::Mountain
        );
        assert_eq!(
            by_side.determine_land_type(WorldPos::new(1.0, 0.0)),
            Terrain::Grassland
        );
    }
}
