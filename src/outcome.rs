use std::fmt;

use crate::error::Error;
use crate::models::ChannelId;

/// Result of one pipeline stage
#[derive(Debug)]
pub enum Outcome<T> {
    Complete(T),
    /// Usable data, but part of the input could not be processed
    Partial { data: T, warnings: Vec<StageWarning> },
    /// Nothing usable was produced
    Failed(Error),
}

impl<T> Outcome<T> {
    pub fn from_parts(data: T, warnings: Vec<StageWarning>) -> Self {
        if warnings.is_empty() {
            Outcome::Complete(data)
        } else {
            Outcome::Partial { data, warnings }
        }
    }

    /// Split into data plus warnings, or the error of a failed stage
    pub fn into_result(self) -> Result<(T, Vec<StageWarning>), Error> {
        match self {
            Outcome::Complete(data) => Ok((data, Vec::new())),
            Outcome::Partial { data, warnings } => Ok((data, warnings)),
            Outcome::Failed(err) => Err(err),
        }
    }

    /// Data produced by the stage; a failed stage yields `T::default()`
    pub fn into_data(self) -> T
    where
        T: Default,
    {
        self.into_result().map(|(data, _)| data).unwrap_or_default()
    }
}

/// Problem that was contained within a stage
#[derive(Debug)]
pub enum StageWarning {
    /// A detail lookup batch failed and was skipped; positions are 1-based
    BatchFailed { first: usize, last: usize, error: Error },
    /// A channel's creation date could not be parsed and the channel was skipped
    InvalidDate { channel_id: ChannelId, raw: String },
}

impl fmt::Display for StageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageWarning::BatchFailed { first, last, error } => {
                write!(f, "Channel batch {}-{} skipped: {}", first, last, error)
            }
            StageWarning::InvalidDate { channel_id, raw } => {
                write!(f, "Unparsable creation date '{}' (channel {})", raw, channel_id)
            }
        }
    }
}
