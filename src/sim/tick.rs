//! Per-frame simulation tick
//!
//! Order within a frame: advance every entity, run the collision pass, then
//! apply player input. A fatal collision resets the game and ends the pass
//! for that frame.

use glam::Vec2;

use super::arena::WallColour;
use super::asteroid::Asteroid;
use super::camera::Look;
use super::collision::{
    detect_hits, detect_pairs, detect_ship_walls, detect_wall_contacts,
    first_body_hitting_sphere, point_hits_wall, resolve_asteroids, resolve_wall, spheres_overlap,
};
use super::ship::Thrust;
use super::state::{GameEvent, GameState};
use crate::platform::{InputSource, Viewport};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub thrust: Thrust,
    /// Barrel roll direction, -1 (left) to 1 (right)
    pub roll: f32,
    pub fire: bool,
    /// Restart the game
    pub reset: bool,
    pub look: Look,
    /// Mouse steering (yaw, pitch) while the left button is held
    pub steer: Option<Vec2>,
}

impl TickInput {
    /// Snapshot an input source for this frame
    pub fn poll(source: &impl InputSource, viewport: Viewport) -> Self {
        source.snapshot(viewport)
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_secs += dt;
    state.frame += 1;
    state.events.clear();

    update_entities(state, dt);
    handle_collisions(state);
    handle_input(state, input, dt);

    state.camera.follow(&state.ship);
}

fn update_entities(state: &mut GameState, dt: f32) {
    state.ship.update(dt);
    update_asteroids(state, dt);
    state.ship.update_bullets(dt);
    state.satellite.update(dt);
    state.explosions.update(dt);
}

fn update_asteroids(state: &mut GameState, dt: f32) {
    state.asteroid_field.update(dt, &state.arena);

    let field = &mut state.asteroid_field;
    if field.is_empty() || field.levelling_up() {
        // A cleared field restarts the clock so two waves don't land back to back
        if field.is_empty() {
            field.reset_timer();
        }
        field.increase_asteroid_count_by(1);
        let count = field.launch_asteroids_at_ship(state.ship.position, &mut state.rng);
        state.stats.waves_launched += 1;
        state.push_event(GameEvent::WaveLaunched { count });
    }
}

fn handle_collisions(state: &mut GameState) {
    if handle_ship_walls(state) {
        return;
    }
    if handle_asteroid_ship(state) {
        return;
    }
    handle_asteroid_walls(state);
    handle_asteroid_pairs(state);
    handle_bullet_walls(state);
    handle_bullet_asteroids(state);

    state.asteroid_field.cull();
    state.ship.bullets_mut().cull();
}

/// Colour walls by proximity. Returns true if the ship crashed.
fn handle_ship_walls(state: &mut GameState) -> bool {
    let contacts = detect_ship_walls(
        state.arena.walls(),
        state.ship.position,
        state.ship.warning_radius,
        state.ship.collision_radius,
    );
    for (wall, &near) in state.arena.walls_mut().iter_mut().zip(&contacts.warning) {
        wall.set_colour(if near { WallColour::Red } else { WallColour::White });
    }

    match contacts.fatal {
        Some(wall) => {
            log::info!("Ship hit wall {} at {:?}", wall, state.ship.position);
            state.reset();
            state.push_event(GameEvent::ShipHitWall { wall });
            true
        }
        None => false,
    }
}

/// Returns true if an asteroid rammed the ship
fn handle_asteroid_ship(state: &mut GameState) -> bool {
    let hit = first_body_hitting_sphere(
        state.asteroid_field.asteroids(),
        state.ship.position,
        state.ship.collision_radius,
        Asteroid::is_in_arena,
    );
    if hit.is_none() {
        return false;
    }

    let position = state.ship.position;
    log::info!("Ship destroyed at {:?}", position);
    state.reset();
    // After the reset so the explosion survives it
    state.explosions.populate(position, &mut state.rng);
    state.push_event(GameEvent::ShipDestroyed { position });
    true
}

fn handle_asteroid_walls(state: &mut GameState) {
    let walls = state.arena.walls();
    let contacts = detect_wall_contacts(state.asteroid_field.asteroids(), walls, Asteroid::is_in_arena);
    let asteroids = state.asteroid_field.asteroids_mut();
    for (i, w) in contacts {
        resolve_wall(&walls[w], &mut asteroids[i]);
    }
}

fn handle_asteroid_pairs(state: &mut GameState) {
    let pairs = detect_pairs(state.asteroid_field.asteroids(), Asteroid::is_in_arena);
    let asteroids = state.asteroid_field.asteroids_mut();
    for (i, j) in pairs {
        // i < j always
        let (head, tail) = asteroids.split_at_mut(j);
        let (a, b) = (&mut head[i], &mut tail[0]);
        // An earlier resolution this frame may already have separated them
        if spheres_overlap(a.pos, a.radius, b.pos, b.radius) {
            resolve_asteroids(a, b);
        }
    }
}

fn handle_bullet_walls(state: &mut GameState) {
    let walls = state.arena.walls();
    for bullet in state.ship.bullets_mut().bullets_mut() {
        if walls.iter().any(|wall| point_hits_wall(wall, bullet.pos)) {
            bullet.mark_for_deletion();
        }
    }
}

fn handle_bullet_asteroids(state: &mut GameState) {
    let hits = detect_hits(state.ship.bullets().bullets(), state.asteroid_field.asteroids());
    for (b, a) in hits {
        state.ship.bullets_mut().bullets_mut()[b].mark_for_deletion();

        let asteroid = &mut state.asteroid_field.asteroids_mut()[a];
        if !asteroid.decrement_health_by(1) {
            continue;
        }
        let (id, position) = (asteroid.id, asteroid.pos);
        log::debug!("Asteroid {} destroyed at {:?}", id, position);
        state.explosions.populate(position, &mut state.rng);
        state.stats.asteroids_destroyed += 1;
        state.push_event(GameEvent::AsteroidDestroyed { id, position });
    }
}

fn handle_input(state: &mut GameState, input: &TickInput, dt: f32) {
    state.ship.move_along(input.thrust, dt);

    if input.roll != 0.0 {
        state.ship.roll(input.roll, dt);
    }

    if input.fire && state.ship.shoot() {
        state.stats.bullets_fired += 1;
    }

    if input.reset {
        state.reset();
        state.push_event(GameEvent::ManualReset);
    }

    state.camera.look(input.look);

    if let Some(steer) = input.steer {
        state.ship.steer(steer, dt);
    }
}
