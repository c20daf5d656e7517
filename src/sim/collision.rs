//! Catch and miss tests
//!
//! The catcher is an axis-aligned box and drops are circles, but the game only
//! ever asks two questions: has a drop reached the catcher's mouth, and has it
//! left the field.

use super::state::{Droplet, Player};
use crate::consts::FIELD_HEIGHT;

/// Whether the player catches the drop this tick
///
/// The drop's lower edge must be past the catcher's top edge and its center
/// strictly inside the catcher's horizontal span.
pub fn catches(player: &Player, drop: &Droplet) -> bool {
    drop.pos.y + drop.radius > player.pos.y
        && drop.pos.x > player.pos.x
        && drop.pos.x < player.pos.x + player.width
}

/// Whether the drop fell past the bottom of the field
pub fn is_missed(drop: &Droplet) -> bool {
    drop.pos.y > FIELD_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::DropKind;
    use glam::Vec2;

    fn drop_at(x: f32, y: f32) -> Droplet {
        Droplet {
            pos: Vec2::new(x, y),
            radius: 16.0,
            kind: DropKind::Clean,
        }
    }

    #[test]
    fn test_catch_requires_lower_edge_past_top() {
        let player = Player::default();
        let x = player.center_x();
        assert!(!catches(&player, &drop_at(x, player.pos.y - 16.0)));
        assert!(catches(&player, &drop_at(x, player.pos.y - 15.0)));
    }

    #[test]
    fn test_catch_span_is_exclusive() {
        let player = Player::default();
        let y = player.pos.y;
        assert!(!catches(&player, &drop_at(player.pos.x, y)));
        assert!(!catches(&player, &drop_at(player.pos.x + player.width, y)));
        assert!(catches(&player, &drop_at(player.pos.x + 0.5, y)));
    }

    #[test]
    fn test_miss_below_field() {
        assert!(!is_missed(&drop_at(100.0, FIELD_HEIGHT)));
        assert!(is_missed(&drop_at(100.0, FIELD_HEIGHT + 0.1)));
    }
}
