//! Spiking neural network simulation.
//!
//! A handful of neurons are scattered over the middle of the canvas and
//! wired together at random. Each neuron is a small state machine:
//!
//! - **Resting**: activation decays geometrically; the neuron fires when
//!   activation crosses the threshold, or spontaneously once enough time
//!   has passed since its last spike.
//! - **Firing**: emits one signal per outgoing connection.
//! - **Refractory**: ignores everything for a fixed window, then rests.
//!
//! Signals wait out their connection delay, then travel from source to
//! target and add their weight to the target's activation on arrival.
//! Connections refer to targets by index into the network's neuron list,
//! so the graph can hold cycles without any ownership tangle.

use super::Generator;
use crate::canvas::Canvas;
use rand::{Rng, RngCore};

const SIGNAL_STRONG: char = 'ϟ';
const SIGNAL_MEDIUM: char = '∆';
const SIGNAL_WEAK: char = '·';

const LINK_STRONG: char = '═';
const LINK_MEDIUM: char = '─';
const LINK_WEAK: char = '·';

const NEURON_FIRING: char = '◉';
const NEURON_ACTIVE: char = '○';
const NEURON_RESTING: char = '•';

/// Dynamics shared by every neuron in a network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeuronParams {
    pub threshold: f64,
    pub spontaneous_chance: f64,
    /// Steps since the last spike before spontaneous firing is possible.
    pub spontaneous_after: u32,
    pub refractory_steps: u32,
    pub decay: f64,
    /// Progress a signal makes per step once its delay has elapsed.
    pub signal_speed: f64,
}

impl Default for NeuronParams {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            spontaneous_chance: 0.1,
            spontaneous_after: 5,
            refractory_steps: 3,
            decay: 0.9,
            signal_speed: 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeuronState {
    Resting,
    Firing,
    /// Steps left before returning to rest.
    Refractory(u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Index of the target in the owning network.
    pub target: usize,
    pub weight: f64,
    pub delay: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    pub x: usize,
    pub y: usize,
    pub activation: f64,
    pub state: NeuronState,
    pub last_spike: u32,
    pub connections: Vec<Connection>,
}

impl Neuron {
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            activation: 0.0,
            state: NeuronState::Resting,
            last_spike: 0,
            connections: Vec::new(),
        }
    }

    pub fn is_firing(&self) -> bool {
        self.state == NeuronState::Firing
    }

    /// Advance one step. Returns `true` if the neuron fired.
    pub fn update<R: Rng + ?Sized>(&mut self, time: u32, params: &NeuronParams, rng: &mut R) -> bool {
        match self.state {
            NeuronState::Firing => {
                // The spike discharges the membrane; a neuron left at full
                // activation would refire the moment its window closed.
                self.activation = 0.0;
                self.state = Self::count_down(params.refractory_steps);
                false
            }
            NeuronState::Refractory(left) => {
                self.state = Self::count_down(left);
                false
            }
            NeuronState::Resting => {
                let rested = time.saturating_sub(self.last_spike) >= params.spontaneous_after;
                if self.activation > params.threshold
                    || (rested && rng.gen::<f64>() < params.spontaneous_chance)
                {
                    self.fire(time);
                    true
                } else {
                    self.activation *= params.decay;
                    false
                }
            }
        }
    }

    fn count_down(left: u32) -> NeuronState {
        match left.saturating_sub(1) {
            0 => NeuronState::Resting,
            n => NeuronState::Refractory(n),
        }
    }

    fn fire(&mut self, time: u32) {
        self.state = NeuronState::Firing;
        self.activation = 1.0;
        self.last_spike = time;
    }

    fn glyph(&self) -> char {
        if self.is_firing() {
            NEURON_FIRING
        } else if self.activation > 0.5 {
            NEURON_ACTIVE
        } else {
            NEURON_RESTING
        }
    }
}

/// A message in flight along a connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub start: (usize, usize),
    pub end: (usize, usize),
    pub target: usize,
    pub progress: f64,
    pub weight: f64,
    pub delay: u32,
    pub start_time: u32,
}

impl Signal {
    /// Grid cell the signal currently occupies.
    pub fn position(&self) -> (i64, i64) {
        let lerp = |a: usize, b: usize| a as f64 + (b as f64 - a as f64) * self.progress;
        (
            lerp(self.start.0, self.end.0) as i64,
            lerp(self.start.1, self.end.1) as i64,
        )
    }

    fn glyph(&self) -> char {
        tiered(self.weight, [SIGNAL_STRONG, SIGNAL_MEDIUM, SIGNAL_WEAK])
    }
}

fn tiered(weight: f64, [strong, medium, weak]: [char; 3]) -> char {
    if weight > 0.7 {
        strong
    } else if weight > 0.4 {
        medium
    } else {
        weak
    }
}

/// Cells on the straight line between two points, endpoints included.
pub fn bresenham(from: (i64, i64), to: (i64, i64)) -> Vec<(i64, i64)> {
    let (x1, y1) = from;
    let (x2, y2) = to;
    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx - dy;

    let mut points = Vec::with_capacity((dx.max(dy) + 1) as usize);
    let (mut x, mut y) = (x1, y1);
    loop {
        points.push((x, y));
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    points
}

/// All neurons and in-flight signals for one generation call.
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    pub neurons: Vec<Neuron>,
    pub signals: Vec<Signal>,
    pub params: NeuronParams,
    pub time: u32,
}

impl NeuralNetwork {
    pub fn new(neurons: Vec<Neuron>, params: NeuronParams) -> Self {
        Self {
            neurons,
            signals: Vec::new(),
            params,
            time: 0,
        }
    }

    /// Advance neurons then signals by one step.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.time += 1;
        let time = self.time;

        for i in 0..self.neurons.len() {
            if self.neurons[i].update(time, &self.params, rng) {
                let source = &self.neurons[i];
                for conn in &source.connections {
                    let Some(target) = self.neurons.get(conn.target) else {
                        continue;
                    };
                    self.signals.push(Signal {
                        start: (source.x, source.y),
                        end: (target.x, target.y),
                        target: conn.target,
                        progress: 0.0,
                        weight: conn.weight,
                        delay: conn.delay,
                        start_time: time,
                    });
                }
            }
        }

        let speed = self.params.signal_speed;
        let neurons = &mut self.neurons;
        self.signals.retain_mut(|signal| {
            if time - signal.start_time < signal.delay {
                return true;
            }
            signal.progress += speed;
            if signal.progress <= 1.0 {
                return true;
            }
            if let Some(target) = neurons.get_mut(signal.target) {
                target.activation += signal.weight;
            }
            false
        });
    }

    /// Draw connections, then moving signals, then the neurons on top.
    pub fn render(&self, canvas: &mut Canvas) {
        for neuron in &self.neurons {
            for conn in &neuron.connections {
                let Some(target) = self.neurons.get(conn.target) else {
                    continue;
                };
                let glyph = tiered(conn.weight, [LINK_STRONG, LINK_MEDIUM, LINK_WEAK]);
                let from = (neuron.x as i64, neuron.y as i64);
                let to = (target.x as i64, target.y as i64);
                for (x, y) in bresenham(from, to) {
                    canvas.plot(x, y, glyph);
                }
            }
        }

        for signal in &self.signals {
            if self.time - signal.start_time >= signal.delay {
                let (x, y) = signal.position();
                canvas.plot(x, y, signal.glyph());
            }
        }

        for neuron in &self.neurons {
            canvas.set(neuron.x, neuron.y, neuron.glyph());
        }
    }
}

pub struct NeuralGenerator {
    pub min_neurons: usize,
    pub max_neurons: usize,
    pub connection_chance: f64,
    pub max_delay: u32,
    pub steps: usize,
    pub params: NeuronParams,
}

impl Default for NeuralGenerator {
    fn default() -> Self {
        Self {
            min_neurons: 3,
            max_neurons: 6,
            connection_chance: 0.4,
            max_delay: 4,
            steps: 20,
            params: NeuronParams::default(),
        }
    }
}

impl NeuralGenerator {
    /// Place neurons in the middle half of the canvas and wire them up.
    pub fn build_network<R: Rng + ?Sized>(
        &self,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> NeuralNetwork {
        let count = rng.gen_range(self.min_neurons..=self.max_neurons.max(self.min_neurons));
        let mut neurons: Vec<Neuron> = (0..count)
            .map(|_| {
                let x = rng.gen_range(width / 4..=(3 * width / 4).max(width / 4));
                let y = rng.gen_range(height / 4..=(3 * height / 4).max(height / 4));
                Neuron::new(x, y)
            })
            .collect();

        for (i, neuron) in neurons.iter_mut().enumerate() {
            for target in 0..count {
                if target != i && rng.gen::<f64>() < self.connection_chance {
                    neuron.connections.push(Connection {
                        target,
                        weight: rng.gen::<f64>(),
                        delay: rng.gen_range(1..=self.max_delay.max(1)),
                    });
                }
            }
        }

        NeuralNetwork::new(neurons, self.params)
    }
}

impl Generator for NeuralGenerator {
    fn name(&self) -> &'static str {
        "neural"
    }

    fn generate(&self, width: usize, height: usize, rng: &mut dyn RngCore) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        let mut network = self.build_network(width, height, rng);

        tracing::debug!(
            neurons = network.neurons.len(),
            connections = network.neurons.iter().map(|n| n.connections.len()).sum::<usize>(),
            "neural network built"
        );

        for _ in 0..self.steps {
            network.step(rng);
            network.render(&mut canvas);
        }

        canvas
    }
}
