// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::types::{Color, TableIndex};

/// Ten minutes a side.
pub const DEFAULT_SECONDS: u32 = 600;

/// Starting parameters of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub initial_seconds: u32,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            initial_seconds: DEFAULT_SECONDS,
        }
    }
}

/// A countdown per side, in whole seconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Clock {
    remaining: [u32; 2],
}

impl Clock {
    pub fn new(seconds: u32) -> Clock {
        Clock {
            remaining: [seconds; 2],
        }
    }

    pub fn with_remaining(white: u32, black: u32) -> Clock {
        Clock {
            remaining: [white, black],
        }
    }

    pub fn remaining(&self, color: Color) -> u32 {
        self.remaining[color.as_index()]
    }

    /// Takes one second off the given side's clock and returns whether that
    /// side is out of time.
    pub fn tick(&mut self, color: Color) -> bool {
        let remaining = &mut self.remaining[color.as_index()];
        *remaining = remaining.saturating_sub(1);
        *remaining == 0
    }

    pub fn is_flagged(&self, color: Color) -> bool {
        self.remaining(color) == 0
    }
}

impl Default for Clock {
    fn default() -> Clock {
        Clock::new(DEFAULT_SECONDS)
    }
}

/// Renders seconds as zero-padded `mm:ss`.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
