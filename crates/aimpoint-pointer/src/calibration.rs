use std::collections::HashMap;

use aimpoint_algebra::Point2D;
use aimpoint_quad::bilinear::{calibrate, CalibrationParams};

use crate::PointerError;

/// One of the four calibration targets, in capture order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalibrationPrompt {
    /// Top-left target, captured first.
    TopLeft,
    /// Top-right target.
    TopRight,
    /// Bottom-right target.
    BottomRight,
    /// Bottom-left target, captured last.
    BottomLeft,
}

impl CalibrationPrompt {
    /// All prompts in capture order.
    pub const ALL: [CalibrationPrompt; 4] = [
        CalibrationPrompt::TopLeft,
        CalibrationPrompt::TopRight,
        CalibrationPrompt::BottomRight,
        CalibrationPrompt::BottomLeft,
    ];

    /// Corner index of the prompt, matching the marker winding order.
    pub fn index(self) -> usize {
        match self {
            CalibrationPrompt::TopLeft => 0,
            CalibrationPrompt::TopRight => 1,
            CalibrationPrompt::BottomRight => 2,
            CalibrationPrompt::BottomLeft => 3,
        }
    }

    /// The prompt at `index`, or `None` past the last one.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Normalized screen position where the target is shown.
    pub fn target(self, params: &CalibrationParams) -> Point2D {
        params.targets[self.index()]
    }
}

/// Calibration capture state of a single player.
///
/// Holds the raw pointer positions recorded while the player aimed at each
/// [`CalibrationPrompt`] in turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationSession {
    corners: [Point2D; 4],
    captured: usize,
}

impl CalibrationSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a complete session from four already captured points.
    pub fn from_corners(corners: [Point2D; 4]) -> Self {
        Self {
            corners,
            captured: 4,
        }
    }

    /// Number of points captured so far.
    #[inline]
    pub fn captured(&self) -> usize {
        self.captured
    }

    /// Whether all four points are captured.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.captured == 4
    }

    /// The prompt the next capture is recorded for.
    pub fn next_prompt(&self) -> Option<CalibrationPrompt> {
        CalibrationPrompt::from_index(self.captured)
    }

    /// The captured corners, once all four are present.
    pub fn corners(&self) -> Option<&[Point2D; 4]> {
        self.is_complete().then_some(&self.corners)
    }

    /// Records `raw` for the next prompt.
    ///
    /// # Returns
    ///
    /// The prompt the point was recorded for, or
    /// [`PointerError::CalibrationComplete`] if all four are already captured.
    pub fn capture(&mut self, raw: Point2D) -> Result<CalibrationPrompt, PointerError> {
        let prompt = self.next_prompt().ok_or(PointerError::CalibrationComplete)?;
        self.corners[prompt.index()] = raw;
        self.captured += 1;
        Ok(prompt)
    }

    /// Maps a raw pointer position through this calibration.
    ///
    /// # Returns
    ///
    /// The calibrated normalized position, or
    /// [`PointerError::CalibrationIncomplete`] before all four points are captured.
    pub fn refine(&self, raw: Point2D, params: &CalibrationParams) -> Result<Point2D, PointerError> {
        let corners = self.corners().ok_or(PointerError::CalibrationIncomplete {
            captured: self.captured,
        })?;
        Ok(calibrate(corners, raw, params))
    }

    /// Discards all captured points.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Outcome of a fire event during a [`CalibrationRound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    /// The player already captured the current prompt; nothing was recorded.
    Ignored,
    /// The point was recorded; other players still have to capture this prompt.
    Captured(CalibrationPrompt),
    /// The point was recorded and every player is done with the prompt.
    Advanced(CalibrationPrompt),
    /// The point was recorded and the last prompt is done.
    Finished,
}

/// Calibration of several players who aim at the same prompts together.
///
/// A prompt is shown until every registered player has fired at it. A player
/// who fires again while others are still aiming is ignored, so nobody can
/// run ahead of the prompt on screen.
#[derive(Debug, Clone, Default)]
pub struct CalibrationRound {
    sessions: HashMap<String, CalibrationSession>,
    prompt_index: usize,
}

impl CalibrationRound {
    /// Creates an empty round.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a player with an empty session. Re-registering keeps the session.
    ///
    /// New players can only join before the first prompt is done; returns
    /// [`PointerError::RoundInProgress`] after that until [`CalibrationRound::reset`].
    pub fn register(&mut self, id: impl Into<String>) -> Result<(), PointerError> {
        let id = id.into();
        if self.sessions.contains_key(&id) {
            return Ok(());
        }
        if self.prompt_index > 0 {
            return Err(PointerError::RoundInProgress {
                id,
                prompt_index: self.prompt_index,
            });
        }
        self.sessions.insert(id, CalibrationSession::new());
        Ok(())
    }

    /// Removes a player and returns their session.
    ///
    /// The round may advance if the removed player was the last one aiming.
    pub fn remove(&mut self, id: &str) -> Option<CalibrationSession> {
        let session = self.sessions.remove(id);
        if session.is_some() {
            self.advance();
        }
        session
    }

    /// The prompt currently shown, or `None` once the round is finished.
    pub fn current_prompt(&self) -> Option<CalibrationPrompt> {
        CalibrationPrompt::from_index(self.prompt_index)
    }

    /// Whether all four prompts are done.
    pub fn is_finished(&self) -> bool {
        self.prompt_index >= CalibrationPrompt::ALL.len()
    }

    /// The session of a player.
    pub fn session(&self, id: &str) -> Option<&CalibrationSession> {
        self.sessions.get(id)
    }

    /// Iterates over all players and their sessions.
    pub fn sessions(&self) -> impl Iterator<Item = (&str, &CalibrationSession)> {
        self.sessions.iter().map(|(id, s)| (id.as_str(), s))
    }

    /// Handles a fire event of player `id` aiming at raw position `raw`.
    pub fn fire(&mut self, id: &str, raw: Point2D) -> Result<RoundEvent, PointerError> {
        let finished = self.is_finished();
        let session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| PointerError::UnknownPlayer(id.to_string()))?;

        if finished || session.captured() != self.prompt_index {
            return Ok(RoundEvent::Ignored);
        }

        let prompt = session.capture(raw)?;
        log::debug!("calibration: {id} captured {prompt:?} at {raw:?}");

        if !self.advance() {
            return Ok(RoundEvent::Captured(prompt));
        }

        Ok(match self.current_prompt() {
            Some(next) => RoundEvent::Advanced(next),
            None => RoundEvent::Finished,
        })
    }

    /// Restarts every session and the prompt sequence.
    pub fn reset(&mut self) {
        self.sessions.values_mut().for_each(CalibrationSession::reset);
        self.prompt_index = 0;
    }

    /// Moves to the next prompt while every player has captured the current one.
    fn advance(&mut self) -> bool {
        let mut advanced = false;
        while !self.is_finished()
            && !self.sessions.is_empty()
            && self
                .sessions
                .values()
                .all(|s| s.captured() > self.prompt_index)
        {
            self.prompt_index += 1;
            advanced = true;
            log::debug!("calibration: round moved to {:?}", self.current_prompt());
        }
        advanced
    }
}
