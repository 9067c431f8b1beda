use crate::trig::{TrigTable, wrap_degrees};
use crate::world::Player;

pub const MOVE_STEP: f32 = 10.0;
pub const TURN_STEP: i32 = 4;
pub const CLIMB_STEP: f32 = 4.0;
pub const LOOK_STEP: i32 = 1;

/// Input state sampled once per tick. Last-known-state, nothing is queued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub move_forward: bool,
    pub move_back: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub modifier: bool,
}

/// Applies one tick of intents to the player pose.
pub fn tick(player: &mut Player, intents: &Intents, trig: &TrigTable) {
    if intents.modifier {
        // Look mode
        if intents.move_forward {
            player.z += CLIMB_STEP;
        }
        if intents.move_back {
            player.z -= CLIMB_STEP;
        }
        if intents.turn_left {
            player.look -= LOOK_STEP;
        }
        if intents.turn_right {
            player.look += LOOK_STEP;
        }
        return;
    }

    // Forward vector (sin, cos) in +Y forward convention
    let dx = trig.sin(player.angle) * MOVE_STEP;
    let dy = trig.cos(player.angle) * MOVE_STEP;

    if intents.move_forward {
        player.x += dx;
        player.y += dy;
    }
    if intents.move_back {
        player.x -= dx;
        player.y -= dy;
    }
    if intents.turn_left {
        player.angle = wrap_degrees(player.angle - TURN_STEP);
    }
    if intents.turn_right {
        player.angle = wrap_degrees(player.angle + TURN_STEP);
    }
    if intents.strafe_right {
        player.x += dy;
        player.y -= dx;
    }
    if intents.strafe_left {
        player.x -= dy;
        player.y += dx;
    }
}
