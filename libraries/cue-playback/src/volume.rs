//! Session-wide volume and mute
//!
//! Volume range is 0-100 as understood by the embeddable player. The level
//! and mute flag apply to whichever surface is producing audio.

/// Volume controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Mute state (preserves volume level)
    muted: bool,

    /// Level restored when unmuting from zero
    unmute_level: u8,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume (0-100)
    /// * `muted` - Initial mute state
    /// * `unmute_level` - Level restored when unmuting at zero
    pub fn new(level: u8, muted: bool, unmute_level: u8) -> Self {
        Self {
            level: level.min(100),
            muted,
            unmute_level: unmute_level.clamp(1, 100),
        }
    }

    /// Set volume level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute audio
    ///
    /// Unmuting at level zero raises the level to the restore default, so
    /// an unmuted session is never silent.
    pub fn unmute(&mut self) {
        self.muted = false;
        if self.level == 0 {
            self.level = self.unmute_level;
        }
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.unmute();
        } else {
            self.mute();
        }
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Whether the session produces no sound
    pub fn is_silent(&self) -> bool {
        self.muted || self.level == 0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(80, false, 50)
    }
}
