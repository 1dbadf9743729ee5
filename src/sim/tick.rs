//! Frame-driven simulation tick
//!
//! One external driver repeatedly calls [`tick`] with the elapsed
//! wall-time (capped to bound integration error during stalls). All
//! session mutation happens here, in a fixed order: intent handling,
//! player motion, adversary motion/AI, spawn maintenance, collision
//! detection, level-completion check. Scoring side effects fire at
//! their trigger points inside that order.

use super::collision;
use super::color::LandResult;
use super::director;
use super::entity::{LandKind, MotionEvent, Phase};
use super::grid::Direction;
use super::level;
use super::score::{AVOID_POINTS, MOVE_POINTS};
use super::state::{Cue, Mode, Session};
use crate::consts::*;

/// Input intents for a single tick. Direction is last-intent-wins: at
/// most one pending direction is honored per tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pending movement direction for the player
    pub direction: Option<Direction>,
    /// Start / continue / retry intent (key press or tap)
    pub advance: bool,
}

/// Advance the session by `dt` seconds of wall-time
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    let dt = dt.clamp(0.0, MAX_TICK_DT);
    session.cues.clear();
    session.time += dt as f64;

    match session.mode {
        Mode::Title => {
            if input.advance {
                session.start_game();
            }
        }

        Mode::Playing => playing_tick(session, input, dt),

        Mode::LevelComplete => {
            if input.advance {
                if session.completed_level >= FINAL_LEVEL {
                    // Game complete: back to the title, not level 29
                    session.reset_to_title();
                } else {
                    session.advance_level();
                }
            } else {
                overlay_tick(session, dt);
            }
        }

        Mode::GameOver => {
            if input.advance {
                session.reset_to_title();
            } else {
                overlay_tick(session, dt);
            }
        }
    }
}

/// Active gameplay: the full §-ordered update
fn playing_tick(session: &mut Session, input: &TickInput, dt: f32) {
    let now = session.time;
    let rules = level::color_rules(session.level);

    // Movement intent: accepted only while seated and outside the
    // post-land lockout; silently ignored otherwise
    if let Some(dir) = input.direction {
        if session.player.can_move(now) {
            let target = session.grid.neighbor(session.player.mover.coord, dir);

            // Points are awarded on the intent, not the landing; the
            // streak update follows so the move pays at the old rate
            session.score.moves_this_level += 1;
            session.score.add_points(MOVE_POINTS);
            let perfect = !session.adversaries.iter().any(|a| {
                !matches!(a.mover.phase, Phase::Destroying { .. })
                    && a.mover.coord.manhattan(target) <= 2
            });
            session.score.update_streak(perfect);

            session
                .player
                .mover
                .begin_jump(target, now, PLAYER_JUMP_DURATION);
        }
    }

    // Player motion
    match session
        .player
        .mover
        .integrate(&session.grid, now, dt, false)
    {
        MotionEvent::None => {}
        MotionEvent::Landed { coord, via } => {
            let result = session.board.advance(coord, &rules);
            match result {
                LandResult::ReachedTerminal => session.push_cue(Cue::LandOnTerminalColor),
                LandResult::Advanced => session.push_cue(Cue::LandOnNonTerminalColor),
                LandResult::Unchanged => {}
            }
            if via == LandKind::DropIn {
                // Drop anything buffered during the drop-in
                session.player.lockout_until = now + POST_LAND_LOCKOUT;
            }
        }
        MotionEvent::BeganFalling => session.push_cue(Cue::FallBegin),
        MotionEvent::WentOffscreen | MotionEvent::Destroyed => player_life_lost(session),
    }

    // Adversary motion and decisions
    for i in 0..session.adversaries.len() {
        match session.adversaries[i]
            .mover
            .integrate(&session.grid, now, dt, false)
        {
            MotionEvent::None => {}
            MotionEvent::Landed { coord, via } => {
                // Adversary lands reverse the player's progress, silently
                session.board.retreat(coord, &rules);
                session.adversaries[i].next_decision = now
                    + match via {
                        LandKind::Jump => MOVE_DELAY_AFTER_JUMP,
                        LandKind::DropIn => MOVE_DELAY_AFTER_DROP,
                    };
            }
            MotionEvent::BeganFalling => {}
            MotionEvent::WentOffscreen => {
                // Fell off rather than colliding: that's an avoidance
                if !session.adversaries[i].collided {
                    session.score.adversaries_avoided += 1;
                    session.score.add_points(AVOID_POINTS);
                }
                replace_adversary(session, i, now);
            }
            MotionEvent::Destroyed => replace_adversary(session, i, now),
        }

        director::decide(
            &mut session.adversaries[i],
            &mut session.rng,
            &session.grid,
            now,
        );
    }

    // Spawn maintenance
    let config = level::spawn_config(session.level);
    director::maintain_population(
        &mut session.adversaries,
        &mut session.rng,
        &session.grid,
        now,
        &config,
    );

    // Collision: at most one per tick, adversary-list order
    if let Some(hit) = collision::detect(&session.grid, now, &session.player, &session.adversaries)
    {
        session.score.update_streak(false);
        session.push_cue(Cue::CollisionSmash);
        let adversary = &mut session.adversaries[hit.adversary];
        collision::begin_destruction(&hit, &mut session.player, adversary, now);
    }

    // Level completion
    if session.board.is_complete(&rules) {
        session.completed_level = session.level;
        let breakdown = session
            .score
            .apply_level_bonus(session.level, session.lives, now);
        log::debug!(
            "level {} complete: +{} bonus",
            session.level,
            breakdown.total
        );
        session.mode = Mode::LevelComplete;
        session.push_cue(Cue::LevelComplete);
    }
}

/// Overlay modes keep in-flight animations moving but never resolve
/// their terminal effects: no life loss, no scoring, no color changes,
/// no respawn into active play
fn overlay_tick(session: &mut Session, dt: f32) {
    let now = session.time;

    match session
        .player
        .mover
        .integrate(&session.grid, now, dt, true)
    {
        MotionEvent::WentOffscreen | MotionEvent::Destroyed => {
            // Settle inert; lives and mode are untouched
            session.player.mover.phase = Phase::Seated;
        }
        _ => {}
    }

    let mut removed = Vec::new();
    for i in 0..session.adversaries.len() {
        match session.adversaries[i]
            .mover
            .integrate(&session.grid, now, dt, true)
        {
            MotionEvent::Landed { via, .. } => {
                session.adversaries[i].next_decision = now
                    + match via {
                        LandKind::Jump => MOVE_DELAY_AFTER_JUMP,
                        LandKind::DropIn => MOVE_DELAY_AFTER_DROP,
                    };
            }
            MotionEvent::WentOffscreen | MotionEvent::Destroyed => removed.push(i),
            _ => {}
        }
    }
    for i in removed.into_iter().rev() {
        session.adversaries.remove(i);
    }
}

/// Decrement lives and either queue a respawn or end the game
fn player_life_lost(session: &mut Session) {
    session.lives = session.lives.saturating_sub(1);
    if session.lives > 0 {
        session.player.mover.phase = Phase::Respawning {
            start: session.time,
        };
    } else {
        log::debug!("game over at t={:.1}", session.time);
        session.player.mover.phase = Phase::Seated;
        session.mode = Mode::GameOver;
        session.push_cue(Cue::GameOver);
    }
}

/// Swap in a fresh adversary at the same list slot, keeping population
/// and iteration order stable
fn replace_adversary(session: &mut Session, index: usize, now: f64) {
    let config = level::spawn_config(session.level);
    session.adversaries[index] =
        director::spawn_with_config(&mut session.rng, &session.grid, now, &config);
}
