//! Idle/demo mode - steers the catcher on its own

use super::session::GameSession;
use super::state::{Direction, DropKind, Droplet, Player};
use crate::consts::PLAYER_STEP;
use crate::platform::{Clock, UiPort};
use crate::renderer::Renderer;

/// Pick a key press that moves the catcher toward the lowest clean drop,
/// or away from a pollutant about to land in it
pub fn steer(player: &Player, drops: &[Droplet]) -> Option<Direction> {
    let center = player.center_x();
    let within_reach = |d: &&Droplet| (d.pos.x - center).abs() < player.width / 2.0;

    // Dodge first: a pollutant close to the mouth of the catcher
    let threat = drops
        .iter()
        .filter(|d| d.kind == DropKind::Pollutant)
        .filter(|d| d.pos.y + d.radius > player.pos.y - player.height)
        .find(within_reach);
    if let Some(threat) = threat {
        return Some(if threat.pos.x < center {
            Direction::Right
        } else {
            Direction::Left
        });
    }

    let target = drops
        .iter()
        .filter(|d| d.kind == DropKind::Clean)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;

    let delta = target.pos.x - center;
    if delta.abs() < PLAYER_STEP / 2.0 {
        None
    } else if delta < 0.0 {
        Some(Direction::Left)
    } else {
        Some(Direction::Right)
    }
}

impl<R: Renderer, U: UiPort, C: Clock> GameSession<R, U, C> {
    /// Apply one autopilot key press (no-op outside play)
    pub fn autopilot_step(&mut self) {
        if let Some(direction) = steer(self.player(), self.drops()) {
            self.on_key(direction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn drop(kind: DropKind, x: f32, y: f32) -> Droplet {
        Droplet {
            pos: Vec2::new(x, y),
            radius: 16.0,
            kind,
        }
    }

    #[test]
    fn test_steers_toward_lowest_clean_drop() {
        let player = Player::default();
        let drops = [
            drop(DropKind::Clean, 700.0, 100.0),
            drop(DropKind::Clean, 50.0, 300.0),
        ];
        assert_eq!(steer(&player, &drops), Some(Direction::Left));
    }

    #[test]
    fn test_holds_when_lined_up() {
        let player = Player::default();
        let drops = [drop(DropKind::Clean, player.center_x() + 5.0, 200.0)];
        assert_eq!(steer(&player, &drops), None);
    }

    #[test]
    fn test_dodges_incoming_pollutant() {
        let player = Player::default();
        let drops = [
            drop(DropKind::Pollutant, player.center_x() - 10.0, player.pos.y - 20.0),
            drop(DropKind::Clean, 50.0, 100.0),
        ];
        assert_eq!(steer(&player, &drops), Some(Direction::Right));
    }
}
