//! Headless host loop
//!
//! Drives the match clock, the ball and 22 animation machines (+ 2 keepers) at a
//! fixed tick with seeded synthetic input. 같은 seed + 같은 config = 같은 digest.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Result};
use kickoff_core::engine::match_clock::analytics;
use kickoff_core::{
    AnimationInput, AnimationState, AnimationStateMachine, BallPhysicsEngine, BallState,
    CelebrationAnimationController, CelebrationType, ClockEvent, ContactSurface, DribbleInput,
    FixedTimestep, GoalkeeperAnimationController, MatchClock, MatchPhase, PassInput, PlayerId,
    ShotInput, SimConfig, TimeState,
};
use nalgebra::{Vector2, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

const PLAYERS_PER_TEAM: usize = 11;
/// Pitch half extents (x = width, z = length)
const HALF_WIDTH: f32 = 34.0;
const HALF_LENGTH: f32 = 52.5;
const GOAL_HALF_WIDTH: f32 = 3.66;
const CROSSBAR_HEIGHT: f32 = 2.44;

/// Runaway guard: 4 hours of 60 Hz ticks
const MAX_TICKS: u64 = 60 * 60 * 60 * 4;

// Per-tick event rates
const INPUT_REROLL_CHANCE: f64 = 0.05;
const SHOT_CHANCE: f64 = 0.002;
const PASS_CHANCE: f64 = 0.01;
const TACKLE_CHANCE: f64 = 0.003;
/// Fraction of effective accuracy that turns into goals
const GOAL_CONVERSION: f32 = 0.25;

const CELEBRATIONS: [CelebrationType; 7] = [
    CelebrationType::FistPump,
    CelebrationType::PointToCrowd,
    CelebrationType::KneeSlide,
    CelebrationType::Airplane,
    CelebrationType::Backflip,
    CelebrationType::Dance,
    CelebrationType::TeamHuddle,
];

#[derive(Debug, Clone)]
pub struct SimOptions {
    pub seed: u64,
    /// Host frame length fed to the fixed timestep (s)
    pub frame_dt: f32,
    /// Play extra time when level at full time
    pub extra_time: bool,
    /// Go to penalties when still level
    pub penalties: bool,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self { seed: 42, frame_dt: 1.0 / 60.0, extra_time: false, penalties: false }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub seed: u64,
    pub ticks: u64,
    pub score: [u32; 2],
    pub shots: u32,
    pub passes: u32,
    pub fouls: u32,
    pub injuries: u32,
    /// Phase labels in the order they were entered
    pub phases: Vec<String>,
    pub final_state: TimeState,
    pub final_minute: f64,
    /// SHA-256 over the final clock snapshot, ball and score
    pub digest: String,
}

#[derive(Serialize)]
struct DigestPayload<'a> {
    state: &'a TimeState,
    ball: &'a BallState,
    score: [u32; 2],
}

/// Run one match to completion.
pub fn run_match(config: &SimConfig, options: &SimOptions) -> Result<MatchSummary> {
    config.validate()?;
    if !(options.frame_dt.is_finite() && options.frame_dt > 0.0) {
        bail!("frame dt must be positive, got {}", options.frame_dt);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let mut clock = MatchClock::new(config.clock.clone());

    let phases = Rc::new(RefCell::new(vec![clock.phase().label().to_string()]));
    let log = Rc::clone(&phases);
    let clock_config = config.clock.clone();
    clock.subscribe(move |event, _| {
        if let ClockEvent::PhaseChanged { from, to, state } = event {
            info!(
                from = from.label(),
                to = to.label(),
                minute = analytics::match_minute(state, &clock_config).round(),
                intensity = analytics::match_intensity(state, &clock_config),
                "phase changed"
            );
            log.borrow_mut().push(to.label().to_string());
        }
    });

    let mut stepper = FixedTimestep::new(config.clock.tick_dt());
    let mut world = World::new(BallPhysicsEngine::new(config.physics.quality));
    let mut ticks: u64 = 0;

    clock.start_timer();

    loop {
        match clock.phase() {
            MatchPhase::HalfTime => {
                clock.add_stoppage_time(world.take_stoppage_estimate());
                clock.proceed_to_second_half()?;
            }
            MatchPhase::FullTime => {
                clock.add_stoppage_time(world.take_stoppage_estimate());
                let level = world.score[0] == world.score[1];
                if level && options.extra_time && !clock.snapshot().extra_time_played {
                    clock.proceed_to_extra_time()?;
                } else if level && options.penalties {
                    clock.proceed_to_penalties()?;
                    break;
                } else {
                    break;
                }
            }
            MatchPhase::PenaltyShootout => break,
            MatchPhase::FirstHalf | MatchPhase::SecondHalf | MatchPhase::ExtraTime => {}
        }

        let due = stepper.accumulate(options.frame_dt);
        for _ in 0..due {
            let dt = stepper.step();
            clock.advance(dt);
            world.tick(&mut rng, dt);
        }
        ticks += due as u64;

        if ticks > MAX_TICKS {
            bail!("match did not finish within {MAX_TICKS} ticks");
        }
    }

    let final_state = clock.snapshot();
    let payload = DigestPayload { state: &final_state, ball: &world.ball, score: world.score };
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(&payload)?);
    let digest = format!("{:x}", hasher.finalize());

    let phases = phases.borrow().clone();
    Ok(MatchSummary {
        seed: options.seed,
        ticks,
        score: world.score,
        shots: world.shots,
        passes: world.passes,
        fouls: world.fouls,
        injuries: world.injuries,
        phases,
        final_state,
        final_minute: analytics::match_minute(&final_state, &config.clock),
        digest,
    })
}

// ===========================================
// Synthetic world
// ===========================================

struct Player {
    id: PlayerId,
    team: usize,
    position: Vector3<f32>,
    machine: AnimationStateMachine,
    input: AnimationInput,
    shot_taken: bool,
}

impl Player {
    /// Ground speed for the current clip (units/s)
    fn ground_speed(&self) -> f32 {
        match self.machine.current_state() {
            AnimationState::Walk => 1.5,
            AnimationState::Jog | AnimationState::Dribble => 4.0,
            AnimationState::Run => 6.0,
            AnimationState::Sprint => 8.0,
            _ => 0.0,
        }
    }
}

struct World {
    engine: BallPhysicsEngine,
    ball: BallState,
    players: Vec<Player>,
    keepers: [GoalkeeperAnimationController; 2],
    celebration: CelebrationAnimationController,
    carrier: usize,
    score: [u32; 2],
    shots: u32,
    passes: u32,
    fouls: u32,
    injuries: u32,
    /// Since the last stoppage estimate
    pending_fouls: u32,
    pending_injuries: u32,
}

impl World {
    fn new(engine: BallPhysicsEngine) -> Self {
        let players = (0..2 * PLAYERS_PER_TEAM)
            .map(|i| {
                let team = i / PLAYERS_PER_TEAM;
                let slot = (i % PLAYERS_PER_TEAM) as f32;
                let z = if team == 0 { -20.0 } else { 20.0 };
                Player {
                    id: PlayerId(i as u32 + 1),
                    team,
                    position: Vector3::new(slot * 6.0 - 30.0, 0.0, z),
                    machine: AnimationStateMachine::new(),
                    input: AnimationInput::default(),
                    shot_taken: false,
                }
            })
            .collect();

        Self {
            engine,
            ball: BallState::kickoff(Vector3::zeros()),
            players,
            keepers: [GoalkeeperAnimationController::new(), GoalkeeperAnimationController::new()],
            celebration: CelebrationAnimationController::new(),
            carrier: kickoff_taker(0),
            score: [0, 0],
            shots: 0,
            passes: 0,
            fouls: 0,
            injuries: 0,
            pending_fouls: 0,
            pending_injuries: 0,
        }
    }

    fn take_stoppage_estimate(&mut self) -> f64 {
        let seconds = analytics::estimate_stoppage_time(self.pending_fouls, self.pending_injuries);
        self.pending_fouls = 0;
        self.pending_injuries = 0;
        seconds
    }

    fn tick(&mut self, rng: &mut ChaCha8Rng, dt: f32) {
        let mut shooter = None;

        for (i, player) in self.players.iter_mut().enumerate() {
            let has_ball = i == self.carrier;
            if rng.gen_bool(INPUT_REROLL_CHANCE) {
                player.input = random_input(rng);
            }
            player.input.ball_near = has_ball;
            if !has_ball {
                player.input.shoot_pressed = false;
            } else if !player.input.shoot_pressed && rng.gen_bool(SHOT_CHANCE) {
                player.input.shoot_pressed = true;
            }

            let blend = player.machine.update_animation(&player.input, dt);

            let heading = Vector3::new(player.input.move_input.x, 0.0, player.input.move_input.y);
            player.position += heading * player.ground_speed() * dt;
            player.position.x = player.position.x.clamp(-HALF_WIDTH, HALF_WIDTH);
            player.position.z = player.position.z.clamp(-HALF_LENGTH, HALF_LENGTH);

            if player.machine.current_state() == AnimationState::Shoot {
                if has_ball && !player.shot_taken {
                    shooter = Some((i, blend.power));
                    player.shot_taken = true;
                    player.input.shoot_pressed = false;
                }
            } else {
                player.shot_taken = false;
            }
        }

        if let Some((i, power)) = shooter {
            self.take_shot(rng, i, power);
        } else if rng.gen_bool(PASS_CHANCE) {
            self.make_pass(rng);
        } else if rng.gen_bool(TACKLE_CHANCE) {
            self.attempt_tackle(rng);
        }

        self.ball.integrate(dt, self.engine.quality);
        self.keep_ball_in_play();
        if self.ball.is_at_rest() {
            // carrier collects a dead ball
            self.ball.position = self.players[self.carrier].position;
        }

        self.update_keepers(dt);
        self.celebration.update_celebration(dt);
    }

    fn take_shot(&mut self, rng: &mut ChaCha8Rng, shooter: usize, power: f32) {
        let (id, team, sprinting) = {
            let p = &self.players[shooter];
            (p.id, p.team, p.input.sprinting)
        };
        let goal = Vector3::new(0.0, 0.0, attack_direction(team) * HALF_LENGTH);
        let to_goal = goal - self.ball.position;

        let input = ShotInput {
            power: power.max(0.2),
            direction: to_goal + Vector3::new(rng.gen_range(-4.0..4.0), 0.0, 0.0),
            goal_direction: to_goal,
            distance_from_goal: to_goal.norm(),
            shot_stat: rng.gen_range(40.0..95.0),
            accuracy_stat: rng.gen_range(40.0..95.0),
            spin_stat: rng.gen_range(30.0..90.0),
            stamina: rng.gen_range(0.2..1.0),
            base_balance: rng.gen_range(0.6..1.0),
            is_sprinting: sprinting,
            under_pressure: rng.gen_bool(0.4),
            turn_sharpness: rng.gen_range(0.0..1.0),
            swipe_angle: rng.gen_range(-0.4..0.4),
            foot_offset: rng.gen_range(-1.0..1.0),
            contact_surface: ContactSurface::Laces,
        };
        let result = self.engine.compute_shot(&input);
        self.ball.apply_kick(id, ContactSurface::Laces, result.force, result.spin);
        self.shots += 1;

        let defending = 1 - team;
        let reaction = self.keepers[defending].react_to_shot(&self.ball.velocity);
        debug!(
            team,
            accuracy = result.effective_accuracy,
            power = result.shot_power,
            keeper = ?reaction.map(|r| r.animation),
            "shot"
        );

        if rng.gen::<f32>() < result.effective_accuracy * GOAL_CONVERSION {
            self.score[team] += 1;
            info!(team, score = ?self.score, scorer = id.0, "goal");

            self.players[shooter].machine.transition_to(AnimationState::Celebrate);
            let kind = CELEBRATIONS[rng.gen_range(0..CELEBRATIONS.len())];
            self.celebration.start_celebration(kind);

            self.ball = BallState::kickoff(Vector3::zeros());
            self.carrier = kickoff_taker(defending);
        }
    }

    fn make_pass(&mut self, rng: &mut ChaCha8Rng) {
        let passer = self.carrier;
        let team = self.players[passer].team;
        let mut receiver = team * PLAYERS_PER_TEAM + rng.gen_range(0..PLAYERS_PER_TEAM);
        if receiver == passer {
            receiver = team * PLAYERS_PER_TEAM + (receiver + 1) % PLAYERS_PER_TEAM;
        }

        let target = &self.players[receiver];
        let receiver_velocity =
            Vector3::new(target.input.move_input.x, 0.0, target.input.move_input.y)
                * target.ground_speed();
        let input = PassInput {
            power: rng.gen_range(0.3..1.0),
            passing_stat: rng.gen_range(40.0..95.0),
            balance: rng.gen_range(0.6..1.0),
            passer_position: self.players[passer].position,
            forward: Vector3::new(0.0, 0.0, attack_direction(team)),
            receiver_position: target.position,
            receiver_velocity,
            lane_density: rng.gen_range(0.0..0.6),
        };
        let result = self.engine.compute_pass(&input);

        self.ball.position = input.passer_position;
        self.ball.apply_kick(
            self.players[passer].id,
            ContactSurface::InsideFoot,
            result.pass_vector,
            Vector3::zeros(),
        );
        self.players[passer].machine.transition_to(AnimationState::Pass);
        self.passes += 1;

        let touch = self.engine.compute_dribble_control(&DribbleInput {
            dribble_stat: rng.gen_range(30.0..95.0),
            speed: self.players[receiver].ground_speed(),
            ball_speed: self.ball.speed(),
            control_stat: rng.gen_range(30.0..95.0),
            ..DribbleInput::default()
        });

        let intercepted = rng.gen::<f32>() > result.accuracy;
        self.carrier = if intercepted || touch.bad_first_touch {
            (1 - team) * PLAYERS_PER_TEAM + rng.gen_range(0..PLAYERS_PER_TEAM)
        } else {
            receiver
        };
    }

    fn attempt_tackle(&mut self, rng: &mut ChaCha8Rng) {
        let defending = 1 - self.players[self.carrier].team;
        let defender = defending * PLAYERS_PER_TEAM + rng.gen_range(0..PLAYERS_PER_TEAM);
        let clip = if rng.gen_bool(0.3) { AnimationState::SlideTackle } else { AnimationState::Tackle };
        if !self.players[defender].machine.transition_to(clip) {
            return;
        }

        if rng.gen_bool(0.5) {
            self.carrier = defender;
            return;
        }

        self.fouls += 1;
        self.pending_fouls += 1;
        if self.players[self.carrier].machine.transition_to(AnimationState::Fall)
            && rng.gen_bool(0.1)
        {
            self.injuries += 1;
            self.pending_injuries += 1;
        }
    }

    fn keep_ball_in_play(&mut self) {
        let p = self.ball.position;
        if p.x.abs() > HALF_WIDTH {
            self.ball.bounce_off(Vector3::new(-p.x.signum(), 0.0, 0.0));
            self.ball.position.x = p.x.clamp(-HALF_WIDTH, HALF_WIDTH);
        }
        if p.z.abs() > HALF_LENGTH {
            if p.x.abs() < GOAL_HALF_WIDTH && p.y < CROSSBAR_HEIGHT {
                self.ball.hit_net();
            } else {
                self.ball.bounce_off(Vector3::new(0.0, 0.0, -p.z.signum()));
            }
            self.ball.position.z = p.z.clamp(-HALF_LENGTH, HALF_LENGTH);
        }
    }

    fn update_keepers(&mut self, dt: f32) {
        let still = AnimationInput::default();
        for keeper in self.keepers.iter_mut() {
            let state = keeper.machine().current_state();
            match state {
                AnimationState::GkIdle => {}
                s if s.is_critical() || s == AnimationState::GetUp => {
                    keeper.machine_mut().update_animation(&still, dt);
                }
                // out of the keeper clip set (idle after get-up) or clip played out
                s if !s.is_goalkeeper() || keeper.machine().time_in_state() >= s.duration() => {
                    keeper.reset()
                }
                _ => {
                    keeper.machine_mut().update_animation(&still, dt);
                }
            }
        }
    }
}

/// +1 for the home side (attacks +Z), -1 for the away side
fn attack_direction(team: usize) -> f32 {
    if team == 0 {
        1.0
    } else {
        -1.0
    }
}

fn kickoff_taker(team: usize) -> usize {
    team * PLAYERS_PER_TEAM + PLAYERS_PER_TEAM - 1
}

fn random_input(rng: &mut ChaCha8Rng) -> AnimationInput {
    if rng.gen_bool(0.2) {
        return AnimationInput::default();
    }
    AnimationInput {
        move_input: Vector2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0)),
        sprinting: rng.gen_bool(0.15),
        speed: rng.gen_range(0.2..=1.0),
        ..AnimationInput::default()
    }
}
