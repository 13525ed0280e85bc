//! Item-scan pagination cursor.
//!
//! Drives `GetItems` across pages via the continuation marker. The cursor
//! is strictly sequential: one fetch at a time, no automatic retry, and
//! terminal states are idempotent. A page that cannot advance the marker
//! terminates the scan instead of looping on it.

use std::collections::VecDeque;

use gridio_model::Item;
use gridio_model::input::GetItemsInput;
use gridio_model::output::{GetItemsOutput, ScanAnomaly};

use crate::container::Container;
use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    /// The next advance will fetch with the current marker.
    Ready,
    /// The scan completed; advances are no-ops.
    Exhausted,
    /// A fetch failed; advances fail without I/O.
    Failed,
}

/// A stateful cursor over the pages of an item scan.
///
/// Created by [`Container::items_cursor`]. Consume pages with
/// [`next_page`](ItemsCursor::next_page) or single items with
/// [`next_item`](ItemsCursor::next_item); don't interleave the two.
#[derive(Debug)]
pub struct ItemsCursor {
    container: Container,
    input: GetItemsInput,
    state: CursorState,
    buffered: VecDeque<Item>,
    anomaly: Option<ScanAnomaly>,
}

impl ItemsCursor {
    pub(crate) fn new(container: Container, input: GetItemsInput) -> Self {
        Self {
            container,
            input,
            state: CursorState::Ready,
            buffered: VecDeque::new(),
            anomaly: None,
        }
    }

    /// Fetch the next page of items.
    ///
    /// Returns `Ok(None)` once the scan is exhausted; repeated calls stay
    /// `Ok(None)` without issuing requests. The page that carries a
    /// non-advancing marker is still returned, after which the cursor is
    /// exhausted (see [`ItemsCursor::anomaly`]).
    ///
    /// # Errors
    ///
    /// A transport or decode failure poisons the cursor: the failing error
    /// is returned once, and every later call returns
    /// [`ClientError::CursorPoisoned`] without issuing a request.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Item>>, ClientError> {
        match self.state {
            CursorState::Exhausted => Ok(None),
            CursorState::Failed => Err(ClientError::CursorPoisoned),
            CursorState::Ready => {
                let response = match self.container.get_items(&self.input).await {
                    Ok(response) => response,
                    Err(error) => {
                        self.state = CursorState::Failed;
                        return Err(error);
                    }
                };

                let GetItemsOutput {
                    items,
                    next_marker,
                    last,
                    anomaly,
                } = response.into_output();

                if last {
                    self.state = CursorState::Exhausted;
                } else if anomaly.is_some() {
                    // The marker cannot advance; re-issuing it would loop
                    // forever. Deliver the partial page and stop.
                    self.state = CursorState::Exhausted;
                    self.anomaly = anomaly;
                } else {
                    self.input.marker = Some(next_marker);
                }

                Ok(Some(items))
            }
        }
    }

    /// Fetch the next single item, reading pages as needed.
    ///
    /// Returns `Ok(None)` once the scan is exhausted.
    ///
    /// # Errors
    ///
    /// Same failure behavior as [`ItemsCursor::next_page`].
    pub async fn next_item(&mut self) -> Result<Option<Item>, ClientError> {
        loop {
            if let Some(item) = self.buffered.pop_front() {
                return Ok(Some(item));
            }
            match self.next_page().await? {
                Some(items) => self.buffered.extend(items),
                None => return Ok(None),
            }
        }
    }

    /// True once the scan has completed (normally or via an anomaly).
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.state == CursorState::Exhausted
    }

    /// The marker-progress anomaly that terminated the scan, if any.
    #[must_use]
    pub fn anomaly(&self) -> Option<&ScanAnomaly> {
        self.anomaly.as_ref()
    }
}
