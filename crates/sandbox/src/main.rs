mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;

use script::Script;
use stride::{
    CapsuleCollider, Character, CrouchSignal, HeadOffset, LocomotionConfig, PhysicsWorld,
    RapierBody,
};

#[derive(Parser)]
#[command(name = "stride-sandbox")]
#[command(about = "Headless scripted run of the locomotion core on a flat floor")]
struct Args {
    #[arg(short, long, help = "RON file with locomotion tunables")]
    config: Option<PathBuf>,

    #[arg(short = 'n', long, default_value_t = 600)]
    ticks: u32,

    #[arg(short, long, default_value_t = 60)]
    tick_rate: u32,

    #[arg(long)]
    walk_speed: Option<f32>,

    #[arg(long)]
    crouch_speed: Option<f32>,

    #[arg(long)]
    sensitivity: Option<f32>,

    #[arg(long, default_value_t = 120, help = "Tick at which crouch is pressed")]
    crouch_from: u32,

    #[arg(long, default_value_t = 300, help = "Tick at which crouch is released")]
    crouch_until: u32,

    #[arg(long, default_value_t = 0.0, help = "Horizontal look delta per tick")]
    turn_rate: f32,

    #[arg(long, default_value_t = 1.0, help = "Spawn height above the floor")]
    spawn_height: f32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let dt = 1.0 / args.tick_rate.max(1) as f32;

    let mut world = PhysicsWorld::new();
    world.add_ground(0.0, 200.0);
    let capsule = CapsuleCollider::new(2.0, 0.4);
    let body = RapierBody::new(world, Vec3::new(0.0, args.spawn_height, 0.0), capsule);

    let mut character = Character::new(config, body)
        .with_head(HeadOffset::new(Vec3::new(0.0, 1.6, 0.0)))
        .with_collider(capsule);

    character.events_mut().subscribe(CrouchSignal::Start, || log::info!("crouch start"));
    character.events_mut().subscribe(CrouchSignal::End, || log::info!("crouch end"));

    let script = Script {
        crouch_from: args.crouch_from,
        crouch_until: args.crouch_until,
        turn_rate: args.turn_rate,
    };
    character.bind_input(script.into_source());

    log::info!(
        "running {} ticks at {} Hz, walk {:.2} m/s, crouch {:.2} m/s",
        args.ticks,
        args.tick_rate,
        character.config().walk_speed,
        character.config().crouch_speed
    );

    for tick in 0..args.ticks {
        let report = character.tick(dt);

        if tick % args.tick_rate.max(1) == 0 || report.crouch_signal.is_some() {
            let feet = character.body().feet();
            log::info!(
                "tick {:>5} feet ({:>7.2}, {:>5.2}, {:>7.2}) speed {:.2} grounded {} collider {:.3} head {:.3}",
                tick,
                feet.x,
                feet.y,
                feet.z,
                report.speed,
                report.grounded,
                character.collider().map_or(0.0, |c| c.height),
                character.head().map_or(0.0, |h| h.local_y()),
            );
        }
    }

    let feet = character.body().feet();
    log::info!(
        "finished at ({:.2}, {:.2}, {:.2}), crouched {}",
        feet.x,
        feet.y,
        feet.z,
        character.is_crouched()
    );

    Ok(())
}

fn load_config(args: &Args) -> Result<LocomotionConfig> {
    let mut config = match &args.config {
        Some(path) => LocomotionConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => LocomotionConfig::default(),
    };

    if let Some(speed) = args.walk_speed {
        config.walk_speed = speed;
    }
    if let Some(speed) = args.crouch_speed {
        config.crouch_speed = speed;
    }
    if let Some(sensitivity) = args.sensitivity {
        config.sensitivity = sensitivity;
    }

    config.validate().context("invalid command line overrides")?;
    Ok(config)
}
