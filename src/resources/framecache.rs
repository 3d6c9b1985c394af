//! Lazily loaded frame cache.
//!
//! The kittens' background is a long image sequence, far too big to keep in
//! GPU memory at once. [`FrameCache`] holds one slot per frame id in a known
//! finite range, loads a frame the first time it is shown and unloads the
//! previously shown frame whenever the shown id changes.
//!
//! The cache is generic over the frame type so the eviction rule can be
//! exercised without a GPU; in the game it stores raylib `Texture2D`s, which
//! unload themselves on drop.

use log::debug;

use crate::error::AssetError;

pub struct FrameCache<T> {
    first: usize,
    frames: Vec<Option<T>>,
    current: Option<usize>,
}

impl<T> FrameCache<T> {
    /// Create an empty cache for the inclusive id range `first..=last`.
    pub fn new(first: usize, last: usize) -> Self {
        let len = last.saturating_sub(first) + 1;
        Self {
            first,
            frames: (0..len).map(|_| None).collect(),
            current: None,
        }
    }

    fn last(&self) -> usize {
        self.first + self.frames.len() - 1
    }

    fn slot(&self, id: usize) -> Result<usize, AssetError> {
        if id < self.first || id > self.last() {
            return Err(AssetError::FrameOutOfRange {
                id,
                first: self.first,
                last: self.last(),
            });
        }
        Ok(id - self.first)
    }

    /// Make `id` the shown frame, loading it through `load` if needed.
    ///
    /// When the shown id changes, the previous frame is unloaded. If loading
    /// fails the previous frame stays shown and loaded.
    pub fn show<F>(&mut self, id: usize, load: F) -> Result<&T, AssetError>
    where
        F: FnOnce(usize) -> Result<T, AssetError>,
    {
        let slot = self.slot(id)?;

        if self.frames[slot].is_none() {
            let frame = load(id)?;
            debug!("frame {} loaded", id);
            self.frames[slot] = Some(frame);
        }

        if let Some(prev) = self.current
            && prev != id
        {
            self.frames[prev - self.first] = None;
            debug!("frame {} unloaded", prev);
        }
        self.current = Some(id);

        self.frames[slot]
            .as_ref()
            .ok_or(AssetError::FrameOutOfRange {
                id,
                first: self.first,
                last: self.last(),
            })
    }

    pub fn get(&self, id: usize) -> Option<&T> {
        let slot = self.slot(id).ok()?;
        self.frames[slot].as_ref()
    }

    /// The frame currently shown, if any.
    pub fn current(&self) -> Option<&T> {
        self.current.and_then(|id| self.get(id))
    }

    pub fn current_id(&self) -> Option<usize> {
        self.current
    }

    pub fn is_loaded(&self, id: usize) -> bool {
        self.get(id).is_some()
    }

    pub fn loaded_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_some()).count()
    }

    pub fn range(&self) -> (usize, usize) {
        (self.first, self.last())
    }
}
