#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use reverie_core::constants::*;
    use reverie_core::enums::AiMode;
    use reverie_core::types::Position;
    use reverie_maze::layout::{ENEMY_SPAWN, PATROL_WAYPOINTS};

    use crate::agent::EnemyAgent;
    use crate::fsm::{evaluate, EnemyContext};

    fn make_context(mode: AiMode, distance: f64, cooldown: f64) -> EnemyContext {
        // Player straight down +x from the enemy at the given range.
        EnemyContext {
            mode,
            player_position: Position::new(distance, 0.9, 0.0),
            distance_to_player: distance,
            last_seen: None,
            patrol_target: PATROL_WAYPOINTS[0],
            attack_cooldown_secs: cooldown,
        }
    }

    // ---- Patrol ----

    #[test]
    fn test_patrol_stays_when_player_far() {
        let ctx = make_context(AiMode::Patrol, ENEMY_VIEW_DISTANCE + 2.0, 0.0);
        let decision = evaluate(&ctx);
        assert!(!decision.mode_changed);
        assert_eq!(decision.new_mode, AiMode::Patrol);
        assert_eq!(decision.move_target, Some(PATROL_WAYPOINTS[0]));
        assert!(decision.refreshed_last_seen.is_none());
    }

    #[test]
    fn test_patrol_to_hunt_on_sighting() {
        let ctx = make_context(AiMode::Patrol, ENEMY_VIEW_DISTANCE - 0.5, 0.0);
        let decision = evaluate(&ctx);
        assert!(decision.mode_changed);
        assert_eq!(decision.new_mode, AiMode::Hunt);
        assert_eq!(decision.refreshed_last_seen, Some(ctx.player_position));
        // Still finishes this tick's patrol step.
        assert_eq!(decision.move_target, Some(PATROL_WAYPOINTS[0]));
    }

    #[test]
    fn test_patrol_sighting_at_exact_view_distance() {
        let ctx = make_context(AiMode::Patrol, ENEMY_VIEW_DISTANCE, 0.0);
        let decision = evaluate(&ctx);
        assert_eq!(decision.new_mode, AiMode::Hunt);
    }

    // ---- Hunt ----

    #[test]
    fn test_hunt_to_attack_in_range() {
        let ctx = make_context(AiMode::Hunt, ENEMY_ATTACK_RANGE - 0.1, 0.0);
        let decision = evaluate(&ctx);
        assert!(decision.mode_changed);
        assert_eq!(decision.new_mode, AiMode::Attack);
        // No movement on the transition tick.
        assert!(decision.move_target.is_none());
    }

    #[test]
    fn test_hunt_refreshes_last_seen_while_visible() {
        let ctx = make_context(AiMode::Hunt, 5.0, 0.0);
        let decision = evaluate(&ctx);
        assert_eq!(decision.new_mode, AiMode::Hunt);
        assert_eq!(decision.refreshed_last_seen, Some(ctx.player_position));
        assert_eq!(decision.move_target, Some(ctx.player_position));
    }

    #[test]
    fn test_hunt_falls_back_to_last_seen_when_blind() {
        let stale = Position::new(3.0, 0.9, 3.0);
        let mut ctx = make_context(AiMode::Hunt, ENEMY_VIEW_DISTANCE + 4.0, 0.0);
        ctx.last_seen = Some(stale);
        let decision = evaluate(&ctx);
        assert!(decision.refreshed_last_seen.is_none());
        assert_eq!(decision.move_target, Some(stale));
    }

    #[test]
    fn test_hunt_without_last_seen_chases_live_position() {
        let ctx = make_context(AiMode::Hunt, ENEMY_VIEW_DISTANCE + 4.0, 0.0);
        let decision = evaluate(&ctx);
        assert_eq!(decision.move_target, Some(ctx.player_position));
    }

    // ---- Attack ----

    #[test]
    fn test_attack_reverts_to_hunt_when_player_escapes() {
        let escape = ENEMY_ATTACK_RANGE * ENEMY_ATTACK_BREAK_FACTOR + 0.1;
        let ctx = make_context(AiMode::Attack, escape, 0.0);
        let decision = evaluate(&ctx);
        assert!(decision.mode_changed);
        assert_eq!(decision.new_mode, AiMode::Hunt);
        assert!(!decision.strike);
    }

    #[test]
    fn test_attack_waits_on_cooldown() {
        let ctx = make_context(AiMode::Attack, 1.0, 0.5);
        let decision = evaluate(&ctx);
        assert!(!decision.strike);
        assert!(decision.tick_cooldown);
        assert_eq!(decision.new_mode, AiMode::Attack);
    }

    #[test]
    fn test_attack_strikes_in_range_off_cooldown() {
        let ctx = make_context(AiMode::Attack, ENEMY_ATTACK_RANGE, 0.0);
        let decision = evaluate(&ctx);
        assert!(decision.strike);
        assert!(!decision.tick_cooldown);
    }

    #[test]
    fn test_attack_holds_in_break_band() {
        // Between attack range and the break distance: no strike, no
        // transition, no cooldown ticking.
        let ctx = make_context(AiMode::Attack, 2.0, 0.0);
        let decision = evaluate(&ctx);
        assert!(!decision.strike);
        assert!(!decision.mode_changed);
        assert!(!decision.tick_cooldown);
    }

    // ---- Agent behavior ----

    /// Player far enough away to never be noticed.
    const FAR: Position = Position::new(0.0, 0.8, -200.0);

    #[test]
    fn test_agent_walks_route_in_order() {
        let mut agent = EnemyAgent::new();
        assert_eq!(agent.position(), ENEMY_SPAWN);

        // Spawn coincides with waypoint 0, so the first tick advances the
        // route. Waypoint 1 is 40 units away at 3 units/sec.
        let mut visited = Vec::new();
        for _ in 0..900 {
            agent.update(DT, &FAR, 1.0);
            let near: Vec<usize> = PATROL_WAYPOINTS
                .iter()
                .enumerate()
                .filter(|(_, w)| agent.position().distance_to(w) <= ENEMY_ARRIVE_DISTANCE)
                .map(|(i, _)| i)
                .collect();
            for idx in near {
                if visited.last() != Some(&idx) {
                    visited.push(idx);
                }
            }
        }
        // 900 ticks = 30s at 3 u/s = 90 units of travel: spawn (wp 0) to
        // wp 1 (40 u) and on toward wp 2 (40 u further).
        assert!(visited.len() >= 2, "visited {visited:?}");
        assert_eq!(&visited[..2], &[0, 1]);
        assert_eq!(agent.mode(), AiMode::Patrol);
    }

    #[test]
    fn test_agent_speed_scales_with_multiplier() {
        let mut slow = EnemyAgent::new();
        let mut fast = EnemyAgent::new();
        // Push both off the spawn waypoint first so they move the same leg.
        for _ in 0..10 {
            slow.update(DT, &FAR, 1.0);
            fast.update(DT, &FAR, 1.5);
        }
        let start = ENEMY_SPAWN;
        assert!(fast.position().distance_to(&start) > slow.position().distance_to(&start));
    }

    #[test]
    fn test_agent_rejects_out_of_bounds_move() {
        let mut agent = EnemyAgent::new();
        agent.set_position(Position::new(23.9, 0.9, 0.0));
        // Visible player beyond the boundary pulls the agent outward; the
        // bounding box stalls it short of the edge forever.
        let outside = Position::new(30.0, 0.9, 0.0);
        for _ in 0..50 {
            agent.update(DT, &outside, 1.0);
        }
        assert!(agent.position().x < MAZE_MOVE_BOUND);
        assert_eq!(agent.mode(), AiMode::Hunt);
    }

    #[test]
    fn test_agent_capture_sequence() {
        let mut agent = EnemyAgent::new();
        let player = Position::new(
            agent.position().x + 1.0,
            agent.position().y,
            agent.position().z,
        );

        // Tick 1: patrol spots the player.
        agent.update(DT, &player, 1.0);
        assert_eq!(agent.mode(), AiMode::Hunt);

        // Tick 2: in attack range.
        agent.update(DT, &player, 1.0);
        assert_eq!(agent.mode(), AiMode::Attack);

        // Tick 3: strike.
        let tick = agent.update(DT, &player, 1.0);
        assert!(tick.struck);

        // Cooldown holds further strikes.
        let tick = agent.update(DT, &player, 1.0);
        assert!(!tick.struck);
    }

    #[test]
    fn test_teleport_resets_to_patrol() {
        let mut agent = EnemyAgent::new();
        let player = Position::new(agent.position().x + 2.0, 0.9, agent.position().z);
        agent.update(DT, &player, 1.0);
        assert_eq!(agent.mode(), AiMode::Hunt);

        let mut rng = StdRng::seed_from_u64(7);
        agent.teleport_to_random_waypoint(&mut rng);
        assert_eq!(agent.mode(), AiMode::Patrol);
        assert!(PATROL_WAYPOINTS.contains(&agent.position()));
    }

    #[test]
    fn test_reset_restores_spawn_state() {
        let mut agent = EnemyAgent::new();
        let player = Position::new(agent.position().x + 1.0, 0.9, agent.position().z);
        for _ in 0..3 {
            agent.update(DT, &player, 1.0);
        }
        agent.reset();
        assert_eq!(agent.position(), ENEMY_SPAWN);
        assert_eq!(agent.mode(), AiMode::Patrol);
        assert!(agent.last_seen().is_none());
    }
}
