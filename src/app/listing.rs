//! Cursor-paginated listing state shared by the folder and image stores.
//!
//! A listing accumulates pages for one (parent, sort) pair. Every reset
//! bumps the generation; page requests carry the generation they were
//! issued under so that answers for a superseded pair can be dropped.

use crate::error::ApiError;
use crate::models::Cursor;

/// Identifies one page request: the listing generation it belongs to and
/// the cursor it was issued with (`None` = first page).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub cursor: Option<Cursor>,
}

impl PageRequest {
    /// Whether the answer appends to the list instead of replacing it
    pub fn is_continuation(&self) -> bool {
        self.cursor.is_some()
    }
}

/// Coarse state derived from the flags, mostly for display
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingPhase {
    Idle,
    Loading,
    HasMore,
    Exhausted,
    Failed,
}

#[derive(Clone, Debug)]
pub struct Paged<T> {
    items: Vec<T>,
    cursor: Option<Cursor>,
    has_more: bool,
    loading: bool,
    error: Option<ApiError>,
    generation: u64,
    /// A page (or an error) has been applied since the last reset
    fetched: bool,
}

impl<T> Default for Paged<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Paged<T> {
    pub fn new() -> Self {
        Paged {
            items: Vec::new(),
            cursor: None,
            has_more: true,
            loading: false,
            error: None,
            generation: 0,
            fetched: false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// No request in flight and the current generation has an answer
    pub fn is_settled(&self) -> bool {
        self.fetched && !self.loading
    }

    pub fn phase(&self) -> ListingPhase {
        if self.loading {
            ListingPhase::Loading
        } else if self.error.is_some() {
            ListingPhase::Failed
        } else if !self.fetched {
            ListingPhase::Idle
        } else if self.has_more {
            ListingPhase::HasMore
        } else {
            ListingPhase::Exhausted
        }
    }

    /// Drop every accumulated page and start a new generation
    pub fn reset(&mut self) {
        self.generation += 1;
        self.items.clear();
        self.cursor = None;
        self.has_more = true;
        self.loading = false;
        self.error = None;
        self.fetched = false;
    }

    /// Reset, then issue the first page of the new generation
    pub fn first_page(&mut self) -> PageRequest {
        self.reset();
        self.begin_fetch()
    }

    /// Next page, unless loading, errored or exhausted
    pub fn next_page(&mut self) -> Option<PageRequest> {
        if self.loading || self.error.is_some() || !self.has_more {
            return None;
        }
        Some(self.begin_fetch())
    }

    fn begin_fetch(&mut self) -> PageRequest {
        self.loading = true;
        self.error = None;
        PageRequest {
            generation: self.generation,
            cursor: self.cursor.clone(),
        }
    }

    pub fn is_current(&self, request: &PageRequest) -> bool {
        request.generation == self.generation
    }

    /// Apply a fetched page. Returns false (and changes nothing) when the
    /// request belongs to a superseded generation.
    pub fn apply_page(&mut self, request: &PageRequest, items: Vec<T>, last_key: Option<Cursor>) -> bool {
        if !self.is_current(request) {
            return false;
        }
        self.loading = false;
        self.fetched = true;

        if items.is_empty() {
            self.has_more = false;
            return true;
        }

        if request.is_continuation() {
            self.items.extend(items);
        } else {
            self.items = items;
        }
        self.has_more = last_key.is_some();
        self.cursor = last_key;
        true
    }

    /// Record a failed page request; the list is left untouched
    pub fn apply_error(&mut self, request: &PageRequest, error: ApiError) -> bool {
        if !self.is_current(request) {
            return false;
        }
        self.loading = false;
        self.fetched = true;
        self.error = Some(error);
        true
    }

    pub fn set_error(&mut self, error: ApiError) {
        self.error = Some(error);
    }

    pub fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Remove every item matching `pred`, returning how many were removed
    pub fn remove_where(&mut self, pred: impl Fn(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !pred(item));
        before - self.items.len()
    }

    /// Replace the first item matching `pred`
    pub fn replace_where(&mut self, pred: impl Fn(&T) -> bool, item: T) -> bool {
        match self.items.iter_mut().find(|existing| pred(existing)) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }
}
