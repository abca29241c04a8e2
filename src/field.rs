//! The particle field: ambient swarm plus the lazily spawned protagonist.

use glam::DVec2;
use rand::Rng;

use crate::config::ParticleConfig;
use crate::emotion::EmotionState;
use crate::particle::{Particle, Pursuit};
use crate::render::{BACKGROUND, Rgba, Surface};

/// Which motion rule the field applies this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    /// Ambient particles drift and link up.
    Drift,
    /// Ambient particles scatter outward and fade.
    Disperse,
    /// Protagonist is live; leftovers keep scattering.
    Pursue,
}

/// Connection between two ambient particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: DVec2,
    pub to: DVec2,
    pub alpha: f64,
}

pub struct ParticleField {
    bounds: DVec2,
    ambient: Vec<Particle>,
    protagonist: Option<Particle>,
}

impl ParticleField {
    pub fn new<R: Rng>(rng: &mut R, bounds: DVec2, config: &ParticleConfig) -> Self {
        let mut field = Self { bounds, ambient: Vec::new(), protagonist: None };
        field.respawn(rng, config);
        field
    }

    /// Replace the ambient swarm with `config.count` fresh particles.
    pub fn respawn<R: Rng>(&mut self, rng: &mut R, config: &ParticleConfig) {
        self.ambient = (0..config.count)
            .map(|_| Particle::ambient(rng, self.bounds, config.particle_size, config.speed))
            .collect();
    }

    pub fn bounds(&self) -> DVec2 {
        self.bounds
    }

    pub fn resize(&mut self, bounds: DVec2) {
        self.bounds = bounds;
    }

    pub fn ambient(&self) -> &[Particle] {
        &self.ambient
    }

    pub fn protagonist(&self) -> Option<&Particle> {
        self.protagonist.as_ref()
    }

    /// Advance every particle one frame. Returns a changed protagonist emotion.
    pub fn step(&mut self, motion: Motion, config: &ParticleConfig, input: Pursuit) -> Option<EmotionState> {
        let bounds = self.bounds;
        match motion {
            Motion::Drift => self.ambient.iter_mut().for_each(|p| p.drift(bounds)),
            Motion::Disperse => self.ambient.iter_mut().for_each(|p| p.disperse(bounds)),
            Motion::Pursue => {
                self.ambient.iter_mut().filter(|p| p.is_visible()).for_each(|p| p.disperse(bounds));
                let protagonist = self
                    .protagonist
                    .get_or_insert_with(|| Particle::protagonist(bounds, config.particle_size));
                return protagonist.pursue(bounds, input);
            }
        }
        None
    }

    /// Pairwise links between visible ambient particles closer than the limit.
    pub fn links(&self, config: &ParticleConfig) -> Vec<Link> {
        let limit = config.connection_distance;
        let mut links = Vec::new();
        for (i, a) in self.ambient.iter().enumerate() {
            if !a.is_visible() {
                continue;
            }
            for b in self.ambient[i + 1..].iter().filter(|b| b.is_visible()) {
                let dist = a.pos.distance(b.pos);
                if dist < limit {
                    let alpha = (1.0 - dist / limit) * config.base_opacity * a.opacity * b.opacity;
                    links.push(Link { from: a.pos, to: b.pos, alpha });
                }
            }
        }
        links
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, motion: Motion, config: &ParticleConfig, cursor: DVec2, energy: f64) {
        surface.clear(BACKGROUND, self.bounds);
        if motion != Motion::Pursue {
            for link in self.links(config) {
                surface.stroke_line(link.from, link.to, config.line_thickness, Rgba::white(link.alpha), &[]);
            }
        }
        for p in &self.ambient {
            p.draw(surface, config.base_opacity, cursor, energy);
        }
        if motion == Motion::Pursue {
            if let Some(p) = &self.protagonist {
                p.draw(surface, config.base_opacity, cursor, energy);
            }
        }
    }
}
