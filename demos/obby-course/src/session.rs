use obby_engine::GameStatus;

/// What losing a life led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeLost {
    /// Lives remain; rebuild the level and respawn.
    Retry { lives: u32 },
    GameOver,
}

/// Level, score and lives for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    /// 1-based.
    pub level: u32,
    pub score: u32,
    pub lives: u32,
    pub game_over: bool,
    starting_lives: u32,
}

impl GameSession {
    pub fn new(starting_lives: u32) -> Self {
        Self {
            level: 1,
            score: 0,
            lives: starting_lives,
            game_over: false,
            starting_lives,
        }
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Advance to the next level. Returns the bonus awarded
    /// (100 × the new level number).
    pub fn complete_level(&mut self) -> u32 {
        self.level += 1;
        let bonus = 100 * self.level;
        self.award(bonus);
        bonus
    }

    pub fn lose_life(&mut self) -> LifeLost {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.game_over = true;
            LifeLost::GameOver
        } else {
            LifeLost::Retry { lives: self.lives }
        }
    }

    /// Back to level 1 with full lives and no score.
    pub fn restart(&mut self) {
        *self = Self::new(self.starting_lives);
    }

    pub fn status(&self) -> GameStatus {
        GameStatus {
            level: self.level,
            score: self.score,
            lives: self.lives,
            game_over: self.game_over,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(3)
    }
}
