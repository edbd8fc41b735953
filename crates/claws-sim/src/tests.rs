//! Tests for the engine, run context, and gameplay systems.

#[cfg(test)]
mod tests {
    use hecs::Entity;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use claws_core::commands::PlayerCommand;
    use claws_core::components::{Enemy, Pickup};
    use claws_core::config::{ConfigError, Tuning};
    use claws_core::enums::*;
    use claws_core::events::GameEvent;
    use claws_core::types::Position;
    use claws_rules::difficulty;
    use claws_rules::fsm::RunInput;
    use claws_rules::offer::UpgradeOffer;

    use crate::context::RunContext;
    use crate::engine::{SimConfig, SimulationEngine};
    use crate::projectile::Projectile;
    use crate::systems::{
        combat, contact, movement, pickups, progression, projectiles, spawner, targeting,
    };
    use crate::world_setup;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    /// Tuning with loot always rolling XP, so pickup counts are exact.
    fn tuning() -> Tuning {
        Tuning {
            health_drop_chance: 0.0,
            ..Tuning::default()
        }
    }

    fn walker_at(ctx: &mut RunContext, tuning: &Tuning, x: f64, y: f64) -> Entity {
        let stats = difficulty::scale_enemy(EnemyArchetype::Walker, 1.0, tuning);
        let order = ctx.next_spawn_order();
        world_setup::spawn_enemy(
            &mut ctx.world,
            &stats,
            Position::new(x, y),
            order,
            tuning.enemy_radius,
        )
    }

    fn disc_at(ctx: &mut RunContext, target: Entity, pos: Position) -> Entity {
        let projectile = Projectile {
            target,
            speed: 400.0,
            tier: DiscTier::Putter,
        };
        world_setup::spawn_projectile(&mut ctx.world, pos, projectile)
    }

    fn position_of(ctx: &RunContext, entity: Entity) -> Position {
        *ctx.world.get::<&Position>(entity).unwrap()
    }

    fn pickup_count(ctx: &RunContext) -> usize {
        ctx.world.query::<&Pickup>().iter().count()
    }

    fn disc_count(ctx: &RunContext) -> usize {
        ctx.world.query::<&Projectile>().iter().count()
    }

    fn started_engine(seed: u64) -> SimulationEngine {
        let mut engine = SimulationEngine::new(SimConfig {
            seed,
            ..Default::default()
        })
        .unwrap();
        engine.queue_command(PlayerCommand::StartRun);
        engine.tick();
        engine
    }

    // ---- Run setup ----

    #[test]
    fn test_new_run_starts_playing_with_timers_armed() {
        let tuning = tuning();
        let ctx = RunContext::new(&tuning);
        assert_eq!(ctx.state(), RunState::Playing);
        assert_eq!(ctx.player_position(), Position::new(400.0, 300.0));
        assert_eq!(ctx.stats.level, 1);
        assert_eq!(ctx.stats.hp, 100.0);

        let fire = ctx.fire_timer.unwrap();
        assert_eq!(ctx.scheduler.interval_ms(fire), Some(800.0));
        assert!(!ctx.scheduler.is_paused(fire));
        let spawn = ctx.spawn_timer.unwrap();
        assert_eq!(ctx.scheduler.interval_ms(spawn), Some(1000.0));
        assert_eq!(ctx.events, vec![GameEvent::RunStarted]);
    }

    #[test]
    fn test_spawn_timer_rearms_with_shorter_interval() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let mut rng = rng();
        let first = ctx.spawn_timer.unwrap();

        ctx.clock.advance(5.0 * 60_000.0, RunState::Playing);
        spawner::on_spawn_timer(&mut ctx, &mut rng, &tuning);
        let second = ctx.spawn_timer.unwrap();
        assert_ne!(first, second);
        assert!(!ctx.scheduler.is_scheduled(first));
        assert_eq!(ctx.scheduler.interval_ms(second), Some(500.0));

        ctx.clock.advance(10.0 * 60_000.0, RunState::Playing);
        spawner::on_spawn_timer(&mut ctx, &mut rng, &tuning);
        let third = ctx.spawn_timer.unwrap();
        assert_eq!(ctx.scheduler.interval_ms(third), Some(250.0));
        assert_eq!(ctx.world.query::<&Enemy>().iter().count(), 2);
    }

    // ---- Targeting ----

    #[test]
    fn test_fire_targets_nearest_enemy() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let _far = walker_at(&mut ctx, &tuning, 520.0, 300.0);
        let near = walker_at(&mut ctx, &tuning, 450.0, 300.0);

        let disc = targeting::fire(&mut ctx).unwrap();
        let projectile = *ctx.world.get::<&Projectile>(disc).unwrap();
        assert_eq!(projectile.target, near);
        assert_eq!(projectile.tier, DiscTier::Putter);
        assert_eq!(position_of(&ctx, disc), ctx.player_position());
    }

    #[test]
    fn test_fire_tie_goes_to_first_spawned() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let first = walker_at(&mut ctx, &tuning, 500.0, 300.0);
        let _second = walker_at(&mut ctx, &tuning, 300.0, 300.0);

        let origin = ctx.player_position();
        assert_eq!(targeting::nearest_living_enemy(&ctx.world, &origin), Some(first));
    }

    #[test]
    fn test_fire_tie_stable_after_despawn() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let gone = walker_at(&mut ctx, &tuning, 10.0, 10.0);
        let first = walker_at(&mut ctx, &tuning, 400.0, 200.0);
        let _second = walker_at(&mut ctx, &tuning, 400.0, 400.0);
        ctx.world.despawn(gone).unwrap();

        let origin = ctx.player_position();
        assert_eq!(targeting::nearest_living_enemy(&ctx.world, &origin), Some(first));
    }

    #[test]
    fn test_fire_skips_dead_enemies() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let near = walker_at(&mut ctx, &tuning, 410.0, 300.0);
        let far = walker_at(&mut ctx, &tuning, 600.0, 300.0);
        ctx.world.get::<&mut Enemy>(near).unwrap().alive = false;

        let origin = ctx.player_position();
        assert_eq!(targeting::nearest_living_enemy(&ctx.world, &origin), Some(far));
    }

    #[test]
    fn test_fire_without_targets_is_noop() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        assert!(targeting::fire(&mut ctx).is_none());
        assert_eq!(disc_count(&ctx), 0);
    }

    // ---- Combat ----

    #[test]
    fn test_two_hits_kill_once_and_drop_one_loot() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let mut rng = rng();
        let enemy = walker_at(&mut ctx, &tuning, 500.0, 250.0);
        assert_eq!(ctx.world.get::<&Enemy>(enemy).unwrap().hp, 30.0);

        let first = combat::apply_hit(&mut ctx, &mut rng, &tuning, enemy, 15.0);
        assert_eq!(first, combat::HitResult::Damaged);
        assert!(ctx.world.get::<&Enemy>(enemy).unwrap().flashing);

        let second = combat::apply_hit(&mut ctx, &mut rng, &tuning, enemy, 15.0);
        assert_eq!(second, combat::HitResult::Killed);

        // A late hit on the corpse does nothing.
        let third = combat::apply_hit(&mut ctx, &mut rng, &tuning, enemy, 15.0);
        assert_eq!(third, combat::HitResult::Ignored);
        assert!(!combat::resolve_death(&mut ctx, &mut rng, &tuning, enemy));

        assert_eq!(ctx.kills, 1);
        assert_eq!(pickup_count(&ctx), 1);
        let loot_pos = ctx
            .world
            .query::<(&Pickup, &Position)>()
            .iter()
            .map(|(_, (_, pos))| *pos)
            .next()
            .unwrap();
        assert_eq!(loot_pos, Position::new(500.0, 250.0));

        let kills = ctx
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
            .count();
        assert_eq!(kills, 1);
    }

    #[test]
    fn test_enemy_hp_never_negative() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let mut rng = rng();
        let enemy = walker_at(&mut ctx, &tuning, 500.0, 250.0);
        combat::apply_hit(&mut ctx, &mut rng, &tuning, enemy, 500.0);
        assert_eq!(ctx.world.get::<&Enemy>(enemy).unwrap().hp, 0.0);
    }

    #[test]
    fn test_health_loot_when_chance_is_certain() {
        let tuning = Tuning {
            health_drop_chance: 1.0,
            ..Tuning::default()
        };
        let mut ctx = RunContext::new(&tuning);
        let mut rng = rng();
        let enemy = walker_at(&mut ctx, &tuning, 500.0, 250.0);
        combat::apply_hit(&mut ctx, &mut rng, &tuning, enemy, 100.0);

        let loot: Vec<Pickup> = ctx.world.query::<&Pickup>().iter().map(|(_, p)| *p).collect();
        assert_eq!(loot.len(), 1);
        assert_eq!(loot[0].kind, PickupKind::Health);
        assert_eq!(loot[0].value, tuning.health_pickup_value);
    }

    #[test]
    fn test_hit_flash_clears() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let mut rng = rng();
        let enemy = walker_at(&mut ctx, &tuning, 500.0, 250.0);
        combat::apply_hit(&mut ctx, &mut rng, &tuning, enemy, 5.0);
        combat::clear_hit_flash(&mut ctx, enemy);
        assert!(!ctx.world.get::<&Enemy>(enemy).unwrap().flashing);
    }

    #[test]
    fn test_hit_flash_clears_on_timer() {
        let mut engine = started_engine(11);
        let enemy = {
            let tuning = engine.tuning().clone();
            let mut rng = rng();
            let ctx = engine.run_mut().unwrap();
            let enemy = walker_at(ctx, &tuning, 100.0, 100.0);
            combat::apply_hit(ctx, &mut rng, &tuning, enemy, 5.0);
            enemy
        };
        let id = enemy.to_bits().get();

        let first = engine.tick();
        assert!(first.events.contains(&GameEvent::HitFlash { id }));
        assert!(first.enemies.iter().any(|e| e.id == id && e.flashing));

        let mut cleared = false;
        for _ in 0..4 {
            let snap = engine.tick();
            cleared |= snap.events.contains(&GameEvent::HitFlashCleared { id });
        }
        assert!(cleared, "no HitFlashCleared after 50 ms");
        let ctx = engine.run().unwrap();
        assert!(!ctx.world.get::<&Enemy>(enemy).unwrap().flashing);
    }

    // ---- Projectiles ----

    #[test]
    fn test_disc_with_despawned_target_is_destroyed() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let mut rng = rng();
        let enemy = walker_at(&mut ctx, &tuning, 500.0, 300.0);
        let disc = disc_at(&mut ctx, enemy, Position::new(400.0, 300.0));
        ctx.world.despawn(enemy).unwrap();

        projectiles::run(&mut ctx, &mut rng, &tuning);
        assert!(!ctx.world.contains(disc));
        assert_eq!(ctx.kills, 0);
        assert_eq!(pickup_count(&ctx), 0);
    }

    #[test]
    fn test_disc_steers_toward_target() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let mut rng = rng();
        let enemy = walker_at(&mut ctx, &tuning, 500.0, 300.0);
        let disc = disc_at(&mut ctx, enemy, Position::new(400.0, 300.0));

        projectiles::run(&mut ctx, &mut rng, &tuning);
        let vel = *ctx
            .world
            .get::<&claws_core::types::Velocity>(disc)
            .unwrap();
        assert!((vel.x - 400.0).abs() < 1e-9);
        assert!(vel.y.abs() < 1e-9);
    }

    #[test]
    fn test_two_discs_same_frame_single_death() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let mut rng = rng();
        let enemy = walker_at(&mut ctx, &tuning, 500.0, 300.0);
        ctx.world.get::<&mut Enemy>(enemy).unwrap().hp = 10.0;
        let a = disc_at(&mut ctx, enemy, Position::new(500.0, 300.0));
        let b = disc_at(&mut ctx, enemy, Position::new(501.0, 300.0));

        projectiles::run(&mut ctx, &mut rng, &tuning);
        assert!(!ctx.world.contains(a));
        assert!(!ctx.world.contains(b));
        assert!(!ctx.world.contains(enemy));
        assert_eq!(ctx.kills, 1);
        assert_eq!(pickup_count(&ctx), 1);
    }

    #[test]
    fn test_long_frame_disc_lands_on_target() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let mut rng = rng();
        let enemy = walker_at(&mut ctx, &tuning, 500.0, 300.0);
        let disc = disc_at(&mut ctx, enemy, Position::new(400.0, 300.0));

        // One full second per frame: a 400 px step would overshoot 100 px.
        projectiles::run(&mut ctx, &mut rng, &tuning);
        movement::move_projectiles(&mut ctx, 1.0);
        assert_eq!(position_of(&ctx, disc), Position::new(500.0, 300.0));

        projectiles::run(&mut ctx, &mut rng, &tuning);
        assert!(!ctx.world.contains(disc));
        assert_eq!(ctx.world.get::<&Enemy>(enemy).unwrap().hp, 20.0);
    }

    #[test]
    fn test_long_frames_still_kill() {
        let mut engine = SimulationEngine::new(SimConfig {
            seed: 8,
            frame_ms: 500.0,
            ..Default::default()
        })
        .unwrap();
        engine.queue_command(PlayerCommand::StartRun);
        engine.tick();
        {
            let tuning = engine.tuning().clone();
            let ctx = engine.run_mut().unwrap();
            walker_at(ctx, &tuning, 400.0, 100.0);
        }
        let mut hits = 0;
        for _ in 0..20 {
            let snap = engine.tick();
            hits += snap
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::HitFlash { .. }))
                .count();
            if snap.run_state != Some(RunState::Playing) {
                break;
            }
        }
        assert!(hits > 0, "discs never landed with 500 ms frames");
    }

    #[test]
    fn test_impact_uses_live_damage() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let mut rng = rng();
        let enemy = walker_at(&mut ctx, &tuning, 500.0, 300.0);
        disc_at(&mut ctx, enemy, Position::new(500.0, 300.0));
        ctx.stats.damage = 25.0;

        projectiles::run(&mut ctx, &mut rng, &tuning);
        assert_eq!(ctx.world.get::<&Enemy>(enemy).unwrap().hp, 5.0);
    }

    // ---- Contact ----

    #[test]
    fn test_contact_cooldown_gates_damage() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        assert!(contact::apply_contact_damage(&mut ctx, &tuning, 0.0));
        assert!(!contact::apply_contact_damage(&mut ctx, &tuning, 200.0));
        assert_eq!(ctx.stats.hp, 90.0);
        assert!(contact::apply_contact_damage(&mut ctx, &tuning, 300.0));
        assert_eq!(ctx.stats.hp, 80.0);
    }

    #[test]
    fn test_lethal_contact_kills_player() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        ctx.stats.hp = 10.0;
        assert!(contact::apply_contact_damage(&mut ctx, &tuning, 0.0));
        assert_eq!(ctx.stats.hp, 0.0);
        assert_eq!(ctx.state(), RunState::Dead);
        assert!(ctx.spawn_timer.is_none());
        assert!(ctx.fire_timer.is_none());
        assert!(ctx
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::PlayerDied { kills: 0 })));

        // Later overlaps are ignored once dead.
        assert!(!contact::apply_contact_damage(&mut ctx, &tuning, 1000.0));
    }

    #[test]
    fn test_contact_run_needs_overlap() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        walker_at(&mut ctx, &tuning, 400.0, 380.0);
        contact::run(&mut ctx, &tuning);
        assert_eq!(ctx.stats.hp, 100.0);

        walker_at(&mut ctx, &tuning, 400.0, 320.0);
        contact::run(&mut ctx, &tuning);
        assert_eq!(ctx.stats.hp, 90.0);
    }

    // ---- Progression ----

    #[test]
    fn test_large_xp_orb_opens_sequential_episodes() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let mut rng = rng();
        ctx.clock.advance(60_000.0, RunState::Playing);
        let pos = ctx.player_position();
        world_setup::spawn_pickup(&mut ctx.world, PickupKind::Xp, 25.0, pos, 12.0);

        pickups::run(&mut ctx, &mut rng, &tuning);
        assert_eq!(ctx.state(), RunState::SelectingUpgrade);
        assert_eq!(ctx.stats.level, 2);
        assert_eq!(ctx.stats.xp, 15.0);
        assert_eq!(ctx.stats.xp_to_level, 13.0);
        assert_eq!(ctx.offer.as_ref().unwrap().options().len(), 3);
        assert!(ctx.scheduler.is_paused(ctx.spawn_timer.unwrap()));
        assert!(ctx.scheduler.is_paused(ctx.fire_timer.unwrap()));

        assert!(progression::confirm(&mut ctx, &mut rng, &tuning));
        assert_eq!(ctx.state(), RunState::SelectingUpgrade);
        assert_eq!(ctx.stats.level, 3);
        assert_eq!(ctx.stats.xp, 2.0);

        assert!(progression::confirm(&mut ctx, &mut rng, &tuning));
        assert_eq!(ctx.state(), RunState::Playing);
        assert_eq!(ctx.stats.level, 3);
        assert!(ctx.offer.is_none());
        assert!(!ctx.scheduler.is_paused(ctx.spawn_timer.unwrap()));

        let level_ups = ctx
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .count();
        assert_eq!(level_ups, 2);
        let chosen = ctx
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::UpgradeChosen { .. }))
            .count();
        assert_eq!(chosen, 2);
    }

    #[test]
    fn test_confirm_without_episode_is_rejected() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let mut rng = rng();
        assert!(!progression::confirm(&mut ctx, &mut rng, &tuning));
        assert_eq!(ctx.state(), RunState::Playing);
    }

    fn open_fixed_episode(ctx: &mut RunContext, options: Vec<UpgradeKey>) {
        ctx.fsm.handle(RunInput::UpgradeOffered);
        ctx.pause_gameplay_timers();
        ctx.offer = Some(UpgradeOffer::new(options));
    }

    #[test]
    fn test_fire_rate_upgrade_replaces_fire_timer() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let mut rng = rng();
        let old = ctx.fire_timer.unwrap();
        open_fixed_episode(
            &mut ctx,
            vec![UpgradeKey::Damage, UpgradeKey::FireRate, UpgradeKey::MaxHp],
        );
        progression::cursor_down(&mut ctx);
        assert!(progression::confirm(&mut ctx, &mut rng, &tuning));

        let new = ctx.fire_timer.unwrap();
        assert_ne!(old, new);
        assert!(!ctx.scheduler.is_scheduled(old));
        assert_eq!(ctx.scheduler.interval_ms(new), Some(725.0));
        assert!(!ctx.scheduler.is_paused(new));
        assert_eq!(ctx.picks.get(UpgradeKey::FireRate), 1);
    }

    #[test]
    fn test_cursor_wraps_and_selects() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let mut rng = rng();
        open_fixed_episode(
            &mut ctx,
            vec![UpgradeKey::Damage, UpgradeKey::MoveSpeed, UpgradeKey::MaxHp],
        );
        progression::cursor_up(&mut ctx);
        assert!(progression::confirm(&mut ctx, &mut rng, &tuning));
        assert_eq!(ctx.stats.max_hp, 120.0);
        assert_eq!(ctx.stats.damage, 10.0);
    }

    #[test]
    fn test_muddy_fairway_slows_enemies() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let mut rng = rng();
        open_fixed_episode(&mut ctx, vec![UpgradeKey::MuddyFairway]);
        progression::confirm(&mut ctx, &mut rng, &tuning);
        assert!((ctx.enemy_tunables.speed_scale - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_level_five_evolves_disc() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let mut rng = rng();
        ctx.stats.level = 4;
        ctx.stats.disc_tier = DiscTier::Midrange;
        ctx.stats.xp = 10.0;

        assert!(progression::check_level_up(&mut ctx, &mut rng, &tuning));
        assert_eq!(ctx.stats.disc_tier, DiscTier::FairwayDriver);
        assert!(ctx.events.contains(&GameEvent::DiscEvolved {
            tier: DiscTier::FairwayDriver
        }));
    }

    #[test]
    fn test_health_pickup_heals_clamped() {
        let tuning = tuning();
        let mut ctx = RunContext::new(&tuning);
        let mut rng = rng();
        ctx.stats.hp = 95.0;
        let pos = ctx.player_position();
        world_setup::spawn_pickup(&mut ctx.world, PickupKind::Health, 10.0, pos, 12.0);
        pickups::run(&mut ctx, &mut rng, &tuning);
        assert_eq!(ctx.stats.hp, 100.0);
        assert_eq!(pickup_count(&ctx), 0);
    }

    // ---- Engine ----

    #[test]
    fn test_invalid_tuning_rejected_by_engine() {
        let negative_world = SimConfig {
            tuning: Tuning {
                world_width: -10.0,
                ..Tuning::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            SimulationEngine::new(negative_world),
            Err(ConfigError::NotPositive {
                field: "world_width",
                ..
            })
        ));

        let nan_chance = SimConfig {
            tuning: Tuning {
                sprinter_chance: f64::NAN,
                ..Tuning::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            SimulationEngine::new(nan_chance),
            Err(ConfigError::NotFinite {
                field: "sprinter_chance",
                ..
            })
        ));

        let zero_frame = SimConfig {
            frame_ms: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            SimulationEngine::new(zero_frame),
            Err(ConfigError::NotPositive {
                field: "frame_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_main_menu_snapshot() {
        let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
        let snap = engine.tick();
        assert!(snap.run_state.is_none());
        assert!(snap.player.is_none());
        assert_eq!(snap.time.tick, 0);
        assert_eq!(engine.run_state(), None);
    }

    #[test]
    fn test_start_run_and_spawn() {
        let mut engine = started_engine(1);
        assert_eq!(engine.run_state(), Some(RunState::Playing));
        let mut spawned = false;
        for _ in 0..120 {
            let snap = engine.tick();
            spawned |= snap
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::EnemySpawned { .. }));
        }
        assert!(spawned);
        let snap = engine.tick();
        assert_eq!(snap.hud.timer, "0:02");
    }

    #[test]
    fn test_determinism_same_seed() {
        let mut engine_a = started_engine(12345);
        let mut engine_b = started_engine(12345);
        for _ in 0..600 {
            let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
            let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
            assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
        }
    }

    #[test]
    fn test_pause_freezes_run() {
        let mut engine = started_engine(3);
        for _ in 0..30 {
            engine.tick();
        }
        engine.queue_command(PlayerCommand::Pause);
        let paused = engine.tick();
        assert_eq!(paused.run_state, Some(RunState::Paused));
        let elapsed = engine.run().unwrap().clock.elapsed_ms();
        let time = engine.time();
        for _ in 0..120 {
            engine.tick();
        }
        assert_eq!(engine.run().unwrap().clock.elapsed_ms(), elapsed);
        assert_eq!(engine.time(), time);

        engine.queue_command(PlayerCommand::TogglePause);
        engine.tick();
        assert_eq!(engine.run_state(), Some(RunState::Playing));
        assert!(engine.run().unwrap().clock.elapsed_ms() > elapsed);
    }

    #[test]
    fn test_death_stops_spawning() {
        let mut engine = started_engine(5);
        {
            let tuning = engine.tuning().clone();
            let ctx = engine.run_mut().unwrap();
            ctx.stats.hp = 5.0;
            walker_at(ctx, &tuning, 400.0, 300.0);
        }
        let snap = engine.tick();
        assert_eq!(snap.run_state, Some(RunState::Dead));
        assert_eq!(snap.hud.hp_fraction, 0.0);
        assert_eq!(snap.hud.health_band, HealthBand::Critical);

        let enemies = snap.enemies.len();
        let clock = engine.run().unwrap().clock.elapsed_ms();
        for _ in 0..300 {
            let snap = engine.tick();
            assert!(!snap
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::EnemySpawned { .. })));
            assert_eq!(snap.enemies.len(), enemies);
        }
        assert_eq!(engine.run().unwrap().clock.elapsed_ms(), clock);

        // Pausing a finished run is rejected.
        engine.queue_command(PlayerCommand::Pause);
        engine.tick();
        assert_eq!(engine.run_state(), Some(RunState::Dead));
    }

    #[test]
    fn test_restart_after_death_resets_run() {
        let mut engine = started_engine(9);
        {
            let tuning = engine.tuning().clone();
            let ctx = engine.run_mut().unwrap();
            ctx.stats.hp = 5.0;
            ctx.kills = 4;
            walker_at(ctx, &tuning, 400.0, 300.0);
        }
        engine.tick();
        assert_eq!(engine.run_state(), Some(RunState::Dead));

        engine.queue_command(PlayerCommand::Restart);
        let snap = engine.tick();
        assert_eq!(snap.run_state, Some(RunState::Playing));
        assert_eq!(snap.hud.kills, 0);
        assert_eq!(snap.hud.level, 1);
        assert!(snap.enemies.is_empty());
        assert_eq!(snap.time.tick, 1);
        assert!(snap.events.contains(&GameEvent::RunStarted));
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut engine = started_engine(9);
        for _ in 0..10 {
            engine.tick();
        }
        engine.queue_command(PlayerCommand::Restart);
        let snap = engine.tick();
        assert_eq!(snap.time.tick, 12);

        // The run's state machine rejects restart while paused too.
        engine.queue_commands([PlayerCommand::Pause, PlayerCommand::Restart]);
        let snap = engine.tick();
        assert_eq!(snap.run_state, Some(RunState::Paused));
        assert_eq!(snap.time.tick, 12);
    }

    #[test]
    fn test_exit_to_menu_from_pause() {
        let mut engine = started_engine(2);
        engine.queue_command(PlayerCommand::ExitToMenu);
        engine.tick();
        assert_eq!(engine.run_state(), Some(RunState::Playing));

        engine.queue_commands([PlayerCommand::Pause, PlayerCommand::ExitToMenu]);
        let snap = engine.tick();
        assert!(snap.run_state.is_none());
        assert!(engine.run().is_none());
    }

    #[test]
    fn test_movement_clamped_to_world() {
        let mut engine = started_engine(4);
        engine.queue_command(PlayerCommand::SetMovement { x: 1, y: 0 });
        for _ in 0..150 {
            engine.tick();
        }
        let player = engine.tick().player.unwrap();
        assert_eq!(player.position.x, 800.0);
        assert_eq!(player.position.y, 300.0);
    }

    #[test]
    fn test_snapshot_offer_view() {
        let mut engine = started_engine(6);
        {
            let ctx = engine.run_mut().unwrap();
            ctx.stats.xp = ctx.stats.xp_to_level;
        }
        let snap = engine.tick();
        assert_eq!(snap.run_state, Some(RunState::SelectingUpgrade));
        let offer = snap.offer.unwrap();
        assert_eq!(offer.options.len(), 3);
        assert_eq!(offer.cursor, 0);
        assert!(offer.options.iter().all(|o| !o.label.is_empty()));

        engine.queue_command(PlayerCommand::MenuDown);
        let snap = engine.tick();
        assert_eq!(snap.offer.unwrap().cursor, 1);

        engine.queue_command(PlayerCommand::Confirm);
        let snap = engine.tick();
        assert_eq!(snap.run_state, Some(RunState::Playing));
        assert!(snap.offer.is_none());
    }
}
