//! Headless demo: one creature flame-breathing at a pair of targets
//!
//! Runs the simulation without any host engine attached, logging what the
//! beam does each tick. Useful for eyeballing balance changes:
//! `RUST_LOG=info cargo run`

use glam::Vec3;

use dragonfire::{
    Aabb, BreathAffectedArea, EntityId, FlameWeapon, Power, StaticWorld, WeaponEvent,
};

const BREATH_TICKS: u32 = 20;
const MAX_TICKS: u32 = 400;

fn main() {
    env_logger::init();

    let seed = 0xD12A60;
    log::info!("Dragonfire demo starting (seed {seed})");

    let mut world = StaticWorld::new();
    world.place(
        EntityId(1),
        Aabb::from_corners(Vec3::new(6.0, -1.0, -1.0), Vec3::new(7.0, 1.0, 1.0)),
    );
    world.place(
        EntityId(2),
        Aabb::from_corners(Vec3::new(11.0, -1.0, -1.0), Vec3::new(12.0, 1.0, 1.0)),
    );

    let mut area = BreathAffectedArea::new(FlameWeapon::default(), seed);
    let origin = Vec3::new(0.0, 1.0, 0.0);
    let target = Vec3::new(12.0, 0.0, 0.0);

    let mut tick = 0u32;
    while tick < MAX_TICKS {
        if tick < BREATH_TICKS {
            if let Err(e) = area.continue_breathing(origin, target, Power::Medium) {
                log::error!("breath rejected: {e}");
                break;
            }
        }
        area.update_tick(&world);
        tick += 1;

        for event in area.weapon_mut().drain_events() {
            match event {
                WeaponEvent::BlockIgnited { pos } => log::info!("tick {tick}: ignited {pos}"),
                WeaponEvent::EntityDamaged { id, amount } => {
                    log::info!("tick {tick}: {id:?} took {amount:.2} damage")
                }
            }
        }

        log::debug!(
            "tick {tick}: {} nodes, {} hot voxels, {} exposed entities",
            area.node_count(),
            area.affected_blocks().count(),
            area.affected_entities().count(),
        );

        if !area.is_active() {
            log::info!("beam fully dissipated after {tick} ticks");
            break;
        }
    }

    if area.is_active() {
        log::warn!("beam still active after {MAX_TICKS} ticks; tuning probably off");
    }
}
