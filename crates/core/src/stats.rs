//! Move and time statistics for a game session.

/// Render elapsed milliseconds as `mm:ss`.
///
/// Minutes are the clock-face minutes field, so they wrap after an hour.
///
/// # Examples
///
/// ```
/// use puzzle15_core::stats::format_time;
///
/// assert_eq!(format_time(0), "00:00");
/// assert_eq!(format_time(83_999), "01:23");
/// assert_eq!(format_time(3_600_000 + 5_000), "00:05");
/// ```
pub fn format_time(elapsed_ms: u64) -> String {
    let total_secs = elapsed_ms / 1000;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Stopwatch advanced by the fixed-timestep loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwatch {
    elapsed_ms: u64,
    running: bool,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart from zero and begin counting
    pub fn start(&mut self) {
        self.elapsed_ms = 0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
        self.running = false;
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.running {
            self.elapsed_ms = self.elapsed_ms.saturating_add(u64::from(elapsed_ms));
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn formatted(&self) -> String {
        format_time(self.elapsed_ms)
    }
}

/// Moves and elapsed time of the current game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStats {
    moves: u32,
    stopwatch: Stopwatch,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn add_move(&mut self) {
        self.moves = self.moves.saturating_add(1);
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn stopwatch_mut(&mut self) -> &mut Stopwatch {
        &mut self.stopwatch
    }

    /// Elapsed time as `mm:ss`
    pub fn time(&self) -> String {
        self.stopwatch.formatted()
    }

    pub fn reset(&mut self) {
        self.moves = 0;
        self.stopwatch.reset();
    }
}
