//! Charged particle system under gravity, drag and pairwise forces.

use super::Generator;
use crate::canvas::Canvas;
use rand::{Rng, RngCore};
use rand_distr::StandardNormal;

/// Physics knobs for one simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    pub dt: f64,
    pub gravity: f64,
    /// Strength of the pairwise charge interaction.
    pub coulomb: f64,
    /// Pairs closer than this exert no force on each other.
    pub min_distance: f64,
    pub drag: f64,
    /// Share of speed kept when bouncing off a wall.
    pub restitution: f64,
    pub spawn_chance: f64,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            dt: 0.1,
            gravity: 0.2,
            coulomb: 0.5,
            min_distance: 0.1,
            drag: 0.99,
            restitution: 0.8,
            spawn_chance: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub ax: f64,
    pub ay: f64,
    pub mass: f64,
    pub charge: f64,
    pub age: u32,
    pub lifetime: u32,
}

impl Particle {
    /// A particle at rest-ish with random mass, charge and lifetime.
    pub fn spawn<R: Rng + ?Sized>(x: f64, y: f64, rng: &mut R) -> Self {
        let sign = if rng.gen::<bool>() { 1.0 } else { -1.0 };
        Self {
            x,
            y,
            vx: rng.gen_range(-1.0..=1.0),
            vy: rng.gen_range(-1.0..=1.0),
            ax: 0.0,
            ay: 0.0,
            mass: rng.gen_range(0.5..=2.0),
            charge: sign * rng.gen::<f64>(),
            age: 0,
            lifetime: rng.gen_range(10..=30),
        }
    }

    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    pub fn is_alive(&self) -> bool {
        self.age < self.lifetime
    }

    /// Share of the lifetime still ahead, in [0, 1].
    pub fn life_remaining(&self) -> f64 {
        if self.lifetime == 0 {
            return 0.0;
        }
        self.lifetime.saturating_sub(self.age) as f64 / self.lifetime as f64
    }

    /// Keep the particle inside `[0, width) × [0, height)`, reflecting the
    /// velocity component of any axis it crossed.
    pub fn confine(&mut self, width: usize, height: usize, restitution: f64) {
        if !(self.x.is_finite() && self.y.is_finite()) {
            self.x = width as f64 / 2.0;
            self.y = height as f64 / 2.0;
            self.vx = 0.0;
            self.vy = 0.0;
        }
        confine_axis(&mut self.x, &mut self.vx, width, restitution);
        confine_axis(&mut self.y, &mut self.vy, height, restitution);
    }

    fn integrate(&mut self, params: &PhysicsParams) {
        let dt = params.dt;
        self.vx += self.ax * dt;
        self.vy += self.ay * dt;
        self.x += self.vx * dt + 0.5 * self.ax * dt * dt;
        self.y += self.vy * dt + 0.5 * self.ay * dt * dt;
        self.age += 1;
        self.vx *= params.drag;
        self.vy *= params.drag;
    }

    fn glyph(&self) -> char {
        let fresh = self.life_remaining() > 0.7;
        let speed = self.speed();
        match (speed > 1.5, speed > 0.8, fresh) {
            (true, _, true) => 'ϟ',
            (true, _, false) => '∆',
            (false, true, true) => '◎',
            (false, true, false) => '○',
            (false, false, true) => '●',
            (false, false, false) => '·',
        }
    }

    fn heading(&self) -> char {
        if self.vx.abs() > self.vy.abs() {
            if self.vx > 0.0 {
                '→'
            } else {
                '←'
            }
        } else if self.vy > 0.0 {
            '↓'
        } else {
            '↑'
        }
    }
}

fn confine_axis(pos: &mut f64, vel: &mut f64, extent: usize, restitution: f64) {
    let upper = (extent as f64 - 1.0).max(0.0);
    if *pos < 0.0 {
        *pos = 0.0;
        *vel *= -restitution;
    } else if *pos >= extent as f64 {
        *pos = upper;
        *vel *= -restitution;
    }
}

/// Live particles for one generation call.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    pub width: usize,
    pub height: usize,
    pub params: PhysicsParams,
}

impl ParticleSystem {
    pub fn new(width: usize, height: usize, params: PhysicsParams) -> Self {
        Self {
            particles: Vec::new(),
            width,
            height,
            params,
        }
    }

    /// Add a particle, pulled inside the bounds if it starts outside.
    pub fn push(&mut self, mut particle: Particle) {
        particle.confine(self.width, self.height, self.params.restitution);
        self.particles.push(particle);
    }

    /// Seed `count` particles scattered normally around (`cx`, `cy`).
    pub fn seed_cluster<R: Rng + ?Sized>(
        &mut self,
        cx: f64,
        cy: f64,
        sigma: f64,
        count: usize,
        rng: &mut R,
    ) {
        for _ in 0..count {
            let dx: f64 = rng.sample(StandardNormal);
            let dy: f64 = rng.sample(StandardNormal);
            let particle = Particle::spawn(cx + dx * sigma, cy + dy * sigma, rng);
            self.push(particle);
        }
    }

    /// Gravity plus the charge interaction from every other particle.
    pub fn accelerations(&self) -> Vec<(f64, f64)> {
        let params = &self.params;
        self.particles
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let (mut ax, mut ay) = (0.0, params.gravity);
                if p.mass <= f64::EPSILON {
                    return (ax, ay);
                }
                for (j, other) in self.particles.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    let (dx, dy) = (other.x - p.x, other.y - p.y);
                    let dist = dx.hypot(dy);
                    if dist <= params.min_distance {
                        continue;
                    }
                    // Like charges push apart, opposite charges pull together.
                    let k = -params.coulomb * p.charge * other.charge / (dist * dist * dist);
                    ax += k * dx / p.mass;
                    ay += k * dy / p.mass;
                }
                (ax, ay)
            })
            .collect()
    }

    /// One fixed time step: forces, integration, walls, deaths, births.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let accelerations = self.accelerations();
        let (width, height, params) = (self.width, self.height, self.params);

        for (p, (ax, ay)) in self.particles.iter_mut().zip(accelerations) {
            p.ax = ax;
            p.ay = ay;
            p.integrate(&params);
            p.confine(width, height, params.restitution);
        }

        self.particles.retain(Particle::is_alive);

        if width > 0 && height > 0 && rng.gen::<f64>() < params.spawn_chance {
            let x = rng.gen_range(0.0..width as f64);
            let y = rng.gen_range(0.0..height as f64);
            let particle = Particle::spawn(x, y, rng);
            self.push(particle);
        }
    }

    pub fn render(&self, canvas: &mut Canvas, draw_velocity: bool) {
        if draw_velocity {
            for p in self.particles.iter().filter(|p| p.speed() > 0.5) {
                let x = (p.x + p.vx) as i64;
                let y = (p.y + p.vy) as i64;
                canvas.plot(x, y, p.heading());
            }
        }
        for p in &self.particles {
            canvas.plot(p.x as i64, p.y as i64, p.glyph());
        }
    }
}

pub struct ParticleGenerator {
    pub clusters: usize,
    pub per_cluster: usize,
    pub cluster_sigma: f64,
    pub steps: usize,
    pub draw_velocity: bool,
    pub params: PhysicsParams,
}

impl Default for ParticleGenerator {
    fn default() -> Self {
        Self {
            clusters: 3,
            per_cluster: 10,
            cluster_sigma: 2.0,
            steps: 20,
            draw_velocity: true,
            params: PhysicsParams::default(),
        }
    }
}

impl ParticleGenerator {
    pub fn build_system<R: Rng + ?Sized>(
        &self,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> ParticleSystem {
        let mut system = ParticleSystem::new(width, height, self.params);
        let (w, h) = (width as f64, height as f64);
        for _ in 0..self.clusters {
            let cx = rng.gen_range(w * 0.2..=w * 0.8);
            let cy = rng.gen_range(h * 0.2..=h * 0.8);
            system.seed_cluster(cx, cy, self.cluster_sigma, self.per_cluster, rng);
        }
        system
    }
}

impl Generator for ParticleGenerator {
    fn name(&self) -> &'static str {
        "particle"
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        let mut system = self.build_system(width, height, rng);
        for _ in 0..self.steps {
            system.step(rng);
        }

        tracing::debug!(survivors = system.particles.len(), "particle simulation done");

        system.render(&mut canvas, self.draw_velocity);
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_in_bounds(system: &ParticleSystem) {
        for p in &system.particles {
            assert!(p.x >= 0.0 && p.x < system.width as f64, "x = {}", p.x);
            assert!(p.y >= 0.0 && p.y < system.height as f64, "y = {}", p.y);
        }
    }

    #[test]
    fn test_particles_never_leave_the_canvas() {
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let gen = ParticleGenerator::default();
            let mut system = gen.build_system(20, 10, &mut rng);
            assert_in_bounds(&system);
            for _ in 0..60 {
                system.step(&mut rng);
                assert_in_bounds(&system);
            }
        }
    }

    #[test]
    fn test_wall_reflects_and_damps_velocity() {
        let mut p = Particle {
            x: 43.0,
            y: -2.0,
            vx: 2.0,
            vy: -1.0,
            ax: 0.0,
            ay: 0.0,
            mass: 1.0,
            charge: 0.0,
            age: 0,
            lifetime: 10,
        };
        p.confine(40, 20, 0.8);
        assert_eq!((p.x, p.y), (39.0, 0.0));
        assert!((p.vx + 1.6).abs() < 1e-12);
        assert!((p.vy - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_like_charges_repel() {
        let mut rng = StdRng::seed_from_u64(0);
        let params = PhysicsParams {
            gravity: 0.0,
            ..PhysicsParams::default()
        };
        let mut system = ParticleSystem::new(40, 20, params);
        for x in [10.0, 12.0] {
            let mut p = Particle::spawn(x, 10.0, &mut rng);
            p.charge = 1.0;
            p.mass = 1.0;
            system.push(p);
        }
        let acc = system.accelerations();
        assert!(acc[0].0 < 0.0);
        assert!(acc[1].0 > 0.0);
        assert!((acc[0].0 + acc[1].0).abs() < 1e-12);
    }

    #[test]
    fn test_coincident_particles_exert_no_force() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut system = ParticleSystem::new(40, 20, PhysicsParams::default());
        system.push(Particle::spawn(5.0, 5.0, &mut rng));
        system.push(Particle::spawn(5.0, 5.0, &mut rng));
        for (ax, ay) in system.accelerations() {
            assert_eq!(ax, 0.0);
            assert_eq!(ay, 0.2);
        }
    }

    #[test]
    fn test_expired_particles_are_removed() {
        let mut rng = StdRng::seed_from_u64(0);
        let params = PhysicsParams {
            spawn_chance: 0.0,
            ..PhysicsParams::default()
        };
        let mut system = ParticleSystem::new(40, 20, params);
        let mut p = Particle::spawn(5.0, 5.0, &mut rng);
        p.lifetime = 1;
        system.push(p);
        system.step(&mut rng);
        assert!(system.particles.is_empty());

        // stepping an empty system is harmless
        system.step(&mut rng);
        assert!(system.particles.is_empty());
    }
}
