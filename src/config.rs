use std::time::Duration;

/// Fixed parameters for one game session.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub grid_width: i32,
    pub grid_height: i32,
    pub cell_size: u32,
    pub tick_ms: u64,
    pub initial_length: usize,
    // The food timer advances by the increment every tick; when it reaches
    // the threshold, uneaten food is moved. 100/5000 works out to 50 ticks.
    pub food_tick_increment: u32,
    pub food_refresh_threshold: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 15,
            cell_size: 20,
            tick_ms: 100,
            initial_length: 7,
            food_tick_increment: 100,
            food_refresh_threshold: 5000,
        }
    }
}

impl Config {
    pub fn pixel_width(&self) -> u32 {
        self.grid_width as u32 * self.cell_size
    }

    pub fn pixel_height(&self) -> u32 {
        self.grid_height as u32 * self.cell_size
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
