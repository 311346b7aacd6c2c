mod config;
mod draw;
mod game;

use anyhow::Result;
use log::{error, info};
use pixels::{Pixels, SurfaceTexture};
use std::time::Instant;
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

use crate::config::Config;
use crate::draw::Renderer;
use crate::game::{Direction, Game};

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::default();
    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();

    let window = WindowBuilder::new()
        .with_title("Snake")
        .with_inner_size(LogicalSize::new(config.pixel_width(), config.pixel_height()))
        .with_resizable(false)
        .build(&event_loop)?;

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(config.pixel_width(), config.pixel_height(), surface_texture)?
    };

    let renderer = Renderer::new(&config);
    let mut game = Game::new(config);
    let mut paused = false;
    let tick = config.tick();
    let mut last_tick = Instant::now();

    info!(
        "starting on a {}x{} board at {} ms per tick",
        config.grid_width, config.grid_height, config.tick_ms
    );

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        if let Event::RedrawRequested(_) = event {
            renderer.draw(pixels.frame_mut(), &game, paused);
            if let Err(err) = pixels.render() {
                error!("surface render failed: {err}");
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        if input.update(&event) {
            // Handle quit
            if input.key_pressed(VirtualKeyCode::Escape)
                || input.close_requested()
                || input.destroyed()
            {
                *control_flow = ControlFlow::Exit;
                return;
            }

            // Restart only once the round has ended
            if input.key_pressed(VirtualKeyCode::R) && game.is_over() {
                info!("restarting after a score of {}", game.score());
                game = Game::new(config);
                paused = false;
                last_tick = Instant::now();
            }

            // Handle pause
            if input.key_pressed(VirtualKeyCode::P) {
                paused = !paused;
            }

            // Handle direction changes
            if input.key_pressed(VirtualKeyCode::Up) || input.key_pressed(VirtualKeyCode::W) {
                game.set_direction(Direction::Up);
            }
            if input.key_pressed(VirtualKeyCode::Down) || input.key_pressed(VirtualKeyCode::S) {
                game.set_direction(Direction::Down);
            }
            if input.key_pressed(VirtualKeyCode::Left) || input.key_pressed(VirtualKeyCode::A) {
                game.set_direction(Direction::Left);
            }
            if input.key_pressed(VirtualKeyCode::Right) || input.key_pressed(VirtualKeyCode::D) {
                game.set_direction(Direction::Right);
            }

            if !paused && last_tick.elapsed() >= tick {
                game.advance();
                last_tick = Instant::now();
            }

            window.request_redraw();
        }
    });
}
