//! Gunner station demo: a tactical space grid following the own ship.

mod config;
mod fire;
mod scenario;
mod station;

use anyhow::Result;

use config::{config_path, load_catalog, GunnerConfig};
use station::Station;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = config_path();
    let config = GunnerConfig::load(&path);
    if !path.exists() {
        config.save(&path);
        log::info!("Wrote default config to {:?}", path);
    }
    let catalog = load_catalog(&config.catalog_path);
    log::info!(
        "Starting gunner station: {}x{} px at {} dpi, {} ship classes",
        config.surface_width,
        config.surface_height,
        config.dpi,
        catalog.ship_classes.len()
    );

    let frames = config.frames;
    let mut station = Station::new(config, catalog)?;
    for _ in 0..frames {
        let report = station.tick();
        match report.stats {
            Some(stats) => log::info!(
                "Frame {}: {} primitives drawn, {} culled, {} bytes of line vertices",
                report.frame,
                stats.emitted,
                stats.culled,
                report.line_bytes
            ),
            None => log::info!("Frame {}: no redraw needed", report.frame),
        }
        if let Some((side, allowed)) = report.fire {
            log::info!(
                "Target {:?} on the {:?} side, {}",
                report.selected,
                side,
                if allowed { "clear to fire" } else { "hold fire" }
            );
        }
        if let Some(motion) = report.motion {
            log::info!(
                "Ship {:?} at ({:.0}, {:.0}) km, speed {:.1} km/s, acceleration ({:.2}, {:.2})",
                motion.id,
                motion.position.x,
                motion.position.y,
                motion.speed(),
                motion.acceleration.x,
                motion.acceleration.y
            );
        }
    }

    log::info!("Gunner station finished after {} frames", station.frame());
    Ok(())
}
