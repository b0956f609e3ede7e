use std::collections::HashMap;

use anyhow::Result;
use glam::Vec2;
use log::{info, warn};
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

use moonlight::engine::assets::{AssetLoader, AssetType, SpriteSheet};
use moonlight::engine::game_loop::GameLoop;
use moonlight::engine::input::{Action, InputManager};
use moonlight::engine::tiles::{parse_char_map, LoadedMap, TileId, TileType, TileTypeRegistry};
use moonlight::game::characters::{
    ActorConfig, ActorController, ActorInput, AnimationLayout, AttackConfig, LogSink,
};

/// Sprite frames are cut at this size from every sheet
const SPRITE_FRAME_PX: u32 = 32;

const STONE: TileId = 0;
const BRICK: TileId = 1;
const WATER: TileId = 2;

/// Used when `assets/maps/level.txt` is missing
const DEMO_LEVEL: &str = "\
; demo level
#..................#
#..................#
#.......====.......#
#..................#
#..P.........==....#
#.....==...........#
#..........~~~.....#
####################";

fn tile_registry() -> TileTypeRegistry {
    TileTypeRegistry::new()
        .with(TileType::new(STONE, "stone", 0).solid().blocks_light())
        .with(TileType::new(BRICK, "brick", 1).solid())
        .with(TileType::new(WATER, "water", 2).with_animation(vec![2, 3, 4]))
}

fn tile_legend() -> HashMap<char, TileId> {
    HashMap::from([('#', STONE), ('=', BRICK), ('~', WATER)])
}

fn load_level(assets: &AssetLoader) -> Result<LoadedMap> {
    let text = match assets.load_text(AssetType::Map, "level.txt") {
        Ok(text) => text,
        Err(e) => {
            warn!("{}; using the built-in demo level", e);
            DEMO_LEVEL.to_string()
        }
    };
    Ok(parse_char_map(&text, &tile_legend(), tile_registry())?)
}

fn load_sheet(assets: &AssetLoader, name: &str) -> Result<SpriteSheet> {
    let bytes = assets.load_bytes(AssetType::Texture, name)?;
    Ok(SpriteSheet::from_image_bytes(
        &bytes,
        SPRITE_FRAME_PX,
        SPRITE_FRAME_PX,
    )?)
}

fn actor_config(assets: &AssetLoader) -> ActorConfig {
    let layout = AnimationLayout::reference();
    let mut config = ActorConfig::default().with_layout(layout.clone());

    match load_sheet(assets, "player.png") {
        Ok(sheet) => {
            if sheet.frame_count() < layout.strip_len() {
                warn!(
                    "Player sheet has {} frames, layout expects {}",
                    sheet.frame_count(),
                    layout.strip_len()
                );
            }
            config = config.with_frame_size(sheet.frame_size());
        }
        Err(e) => warn!("Player sheet unavailable ({}); using 32x32 frames", e),
    }

    match load_sheet(assets, "player_attack.png") {
        Ok(sheet) => {
            info!("Attack enabled with {} frames", sheet.frame_count());
            config = config.with_attack(AttackConfig::from_frames(
                sheet.frame_count(),
                sheet.frame_size(),
            ));
        }
        Err(e) => warn!("Attack sheet unavailable ({}); combat disabled", e),
    }

    config
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Moonlight...");

    let assets = AssetLoader::new("assets");
    let level = load_level(&assets)?;
    let config = actor_config(&assets);
    let scale = config.stats.render_scale;

    let spawn = level.spawn_world_position(scale).unwrap_or_else(|| {
        warn!("Level has no spawn marker; spawning at the origin");
        Vec2::ZERO
    });
    let mut player = ActorController::new(spawn, config)?;
    let grid = level.grid;
    let kill_plane = grid.height() as f32 * grid.tile_height() * scale;

    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();
    let mut sink = LogSink;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Moonlight")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                    && event.state == ElementState::Pressed
                {
                    elwt.exit();
                    return;
                }
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                if input.player().just_pressed(Action::Pause) {
                    game_loop.toggle_pause();
                    info!(
                        "{:.1} fps, {:.1}s played",
                        game_loop.fps(),
                        game_loop.play_time()
                    );
                }

                if let Some(dt) = game_loop.begin_frame() {
                    let actor_input = ActorInput::from_player(input.player());
                    player.step(&grid, actor_input, dt, &mut sink);

                    if player.bounding_box().top() > kill_plane {
                        info!("Fell out of the level; respawning");
                        player.respawn(spawn);
                    }
                }

                input.update();
                window.request_redraw();
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
