/// Errors that can occur in the pointer tracking and calibration layers.
#[derive(Debug, thiserror::Error)]
pub enum PointerError {
    /// The receiving end of the sample channel was dropped.
    #[error("The pointer sample receiver has been dropped")]
    SinkClosed,

    /// The calibration does not have all four points yet.
    #[error("Calibration is incomplete: {captured} of 4 points captured")]
    CalibrationIncomplete {
        /// Number of points captured so far.
        captured: usize,
    },

    /// All four calibration points were already captured.
    #[error("Calibration already has all 4 points")]
    CalibrationComplete,

    /// The player is not part of the calibration round.
    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    /// A new player tried to join a round that already moved past the first prompt.
    #[error("Player {id} cannot join: the calibration round is at prompt {prompt_index}")]
    RoundInProgress {
        /// Identifier of the rejected player.
        id: String,
        /// Index of the prompt the round is at.
        prompt_index: usize,
    },

    /// Error reading a configuration file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Error parsing a configuration file.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
