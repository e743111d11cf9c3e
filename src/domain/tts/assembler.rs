#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssemblyError {
    #[error("no audio segments to assemble")]
    EmptyInput,
    #[error("audio segment index {index} is out of range for {len} chunks")]
    OutOfRange { index: usize, len: usize },
    #[error("audio segment {0} was received twice")]
    Duplicate(usize),
    #[error("audio segment {0} is missing")]
    Missing(usize),
}

/// Concatenate per-chunk audio in the order given.
///
/// This is a raw byte join: MP3 frames from independent requests are not re-encoded,
/// so boundaries between segments are not guaranteed to be gapless.
pub fn concatenate_segments<S: AsRef<[u8]>>(segments: &[S]) -> Result<Vec<u8>, AssemblyError> {
    if segments.is_empty() {
        return Err(AssemblyError::EmptyInput);
    }

    let total_size = segments.iter().map(|segment| segment.as_ref().len()).sum();
    let mut audio = Vec::with_capacity(total_size);
    for segment in segments {
        audio.extend_from_slice(segment.as_ref());
    }

    Ok(audio)
}

/// Slots for audio segments keyed by chunk position.
///
/// Segments may arrive in any order; they are always handed out in chunk order.
#[derive(Debug)]
pub struct OrderedSegments {
    slots: Vec<Option<Vec<u8>>>,
}

impl OrderedSegments {
    pub fn with_len(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn insert(&mut self, index: usize, segment: Vec<u8>) -> Result<(), AssemblyError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(AssemblyError::OutOfRange { index, len })?;

        if slot.is_some() {
            return Err(AssemblyError::Duplicate(index));
        }

        *slot = Some(segment);
        Ok(())
    }

    pub fn into_ordered(self) -> Result<Vec<Vec<u8>>, AssemblyError> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or(AssemblyError::Missing(index)))
            .collect()
    }
}
