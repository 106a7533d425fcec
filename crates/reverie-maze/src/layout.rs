//! Fixed maze layout data.
//!
//! Consolidates the wall segments, patrol route, fragment placements, and
//! spawn points in one plain-data table. Heights are world-space y values;
//! the walkable plane is the x/z ground.

use reverie_core::types::Position;

/// Ground height of the player capsule center.
pub const PLAYER_GROUND_Y: f64 = 0.8;

/// Ground height of the enemy body center.
pub const ENEMY_GROUND_Y: f64 = 0.9;

/// An axis-aligned interior wall: footprint center and full extents.
#[derive(Debug, Clone, Copy)]
pub struct WallSegment {
    pub center_x: f64,
    pub center_z: f64,
    pub width: f64,
    pub depth: f64,
}

/// Interior walls. The outer boundary is handled by the walk bound, not
/// listed here.
pub const INNER_WALLS: [WallSegment; 7] = [
    WallSegment { center_x: 10.0, center_z: 10.0, width: 15.0, depth: 0.3 },
    WallSegment { center_x: -10.0, center_z: -10.0, width: 15.0, depth: 0.3 },
    WallSegment { center_x: 0.0, center_z: 15.0, width: 0.3, depth: 10.0 },
    WallSegment { center_x: -15.0, center_z: 5.0, width: 0.3, depth: 20.0 },
    WallSegment { center_x: 15.0, center_z: -5.0, width: 0.3, depth: 20.0 },
    WallSegment { center_x: 5.0, center_z: -15.0, width: 10.0, depth: 0.3 },
    WallSegment { center_x: -5.0, center_z: 5.0, width: 10.0, depth: 0.3 },
];

/// The enemy's cyclic patrol route: maze corners first, then the axis
/// midpoints. Order matters — it is walked in sequence, wrapping.
pub const PATROL_WAYPOINTS: [Position; 8] = [
    Position::new(-20.0, ENEMY_GROUND_Y, 20.0),
    Position::new(20.0, ENEMY_GROUND_Y, 20.0),
    Position::new(20.0, ENEMY_GROUND_Y, -20.0),
    Position::new(-20.0, ENEMY_GROUND_Y, -20.0),
    Position::new(0.0, ENEMY_GROUND_Y, 15.0),
    Position::new(15.0, ENEMY_GROUND_Y, 0.0),
    Position::new(0.0, ENEMY_GROUND_Y, -15.0),
    Position::new(-15.0, ENEMY_GROUND_Y, 0.0),
];

/// Dream fragment placements. The last two sit on raised platforms.
pub const FRAGMENT_POSITIONS: [Position; 8] = [
    Position::new(5.0, 1.0, 5.0),
    Position::new(-5.0, 1.0, -5.0),
    Position::new(12.0, 1.0, 8.0),
    Position::new(-12.0, 1.0, -8.0),
    Position::new(20.0, 1.0, 15.0),
    Position::new(-20.0, 1.0, -15.0),
    Position::new(-15.0, 3.0, 15.0),
    Position::new(18.0, 4.0, -12.0),
];

/// Exit portal center, in the far corner.
pub const PORTAL_POSITION: Position = Position::new(22.0, 1.0, 22.0);

/// Where the player starts a run.
pub const PLAYER_SPAWN: Position = Position::new(0.0, PLAYER_GROUND_Y, -20.0);

/// Candidate respawn points after a capture.
pub const RESPAWN_POINTS: [Position; 5] = [
    Position::new(0.0, PLAYER_GROUND_Y, -20.0),
    Position::new(-15.0, PLAYER_GROUND_Y, -15.0),
    Position::new(15.0, PLAYER_GROUND_Y, -15.0),
    Position::new(-10.0, PLAYER_GROUND_Y, 10.0),
    Position::new(10.0, PLAYER_GROUND_Y, 10.0),
];

/// Where the enemy starts, diagonally opposite the player.
pub const ENEMY_SPAWN: Position = Position::new(-20.0, ENEMY_GROUND_Y, 20.0);
