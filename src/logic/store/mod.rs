//! The mix: an ordered, duplicate-free list of formulas with selection flags.
//!
//! Items are never edited in place. Editing a formula means decoding it,
//! changing the words, encoding again and adding the new text.

pub mod load;
pub mod save;


use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::logic::formula::{decode, Formula, FormulaError};
use crate::logic::normalize::token_order;
use crate::{debug_info, debug_warn};

/// Separator placed between selected formulas in the output text.
pub const DEFAULT_SEPARATOR: &str = "*";

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// One formula in the mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixItem {
    /// Opaque, never reused.
    #[serde(default)]
    pub id: String,
    pub text: String,
    pub selected: bool,
}

impl MixItem {
    fn new(text: String) -> Self {
        Self {
            id: new_id(),
            text,
            selected: true,
        }
    }
}

/// Result of [`MixStore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added { index: usize },
    /// The same text is already in the mix; nothing changed.
    Duplicate,
    /// The text was blank; nothing changed.
    Empty,
}

/// What [`MixStore::replace_all`] did with the output text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaceReport {
    pub added: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Descending,
    Ascending,
}

impl SortOrder {
    pub fn flip(self) -> Self {
        match self {
            SortOrder::Descending => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Descending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    IndexOutOfRange { index: usize, len: usize },
    NothingSelected,
    EmptyOutput,
    Serialization(String),
    Io(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for mix of {} item(s)", index, len)
            }
            StoreError::NothingSelected => write!(f, "no mix item is selected"),
            StoreError::EmptyOutput => write!(f, "output text is empty"),
            StoreError::Serialization(msg) => write!(f, "invalid mix listing: {}", msg),
            StoreError::Io(msg) => write!(f, "mix listing I/O failed: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Ordered formulas, unique by trimmed text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MixStore {
    items: Vec<MixItem>,
}

impl MixStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[MixItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &MixItem> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&MixItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, text: &str) -> bool {
        let text = text.trim();
        self.items.iter().any(|item| item.text == text)
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    /// Append `text` (trimmed) as a new selected item.
    pub fn add(&mut self, text: &str) -> AddOutcome {
        let text = text.trim();
        if text.is_empty() {
            return AddOutcome::Empty;
        }
        if self.contains(text) {
            debug_warn!("store", "not added, duplicate: {}", text);
            return AddOutcome::Duplicate;
        }
        self.items.push(MixItem::new(text.to_string()));
        debug_info!("store", "added #{}: {}", self.items.len() - 1, text);
        AddOutcome::Added {
            index: self.items.len() - 1,
        }
    }

    /// Move the item at `from` so that it ends up at index `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
        }
        Ok(())
    }

    /// Move one place towards the front; the first item stays put.
    pub fn move_up(&mut self, index: usize) -> Result<(), StoreError> {
        self.reorder(index, index.saturating_sub(1))
    }

    /// Move one place towards the back; the last item stays put.
    pub fn move_down(&mut self, index: usize) -> Result<(), StoreError> {
        self.check_index(index)?;
        self.reorder(index, (index + 1).min(self.items.len() - 1))
    }

    pub fn remove(&mut self, index: usize) -> Result<MixItem, StoreError> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Remove everything; returns how many items were dropped.
    pub fn clear(&mut self) -> usize {
        let n = self.items.len();
        self.items.clear();
        n
    }

    pub fn set_selected(&mut self, index: usize, selected: bool) -> Result<(), StoreError> {
        self.check_index(index)?;
        self.items[index].selected = selected;
        Ok(())
    }

    /// True when the mix is non-empty and every item is selected.
    pub fn all_selected(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|item| item.selected)
    }

    /// Deselect everything if all items are selected, otherwise select all.
    ///
    /// Returns the new flag, or `None` for an empty mix.
    pub fn toggle_all(&mut self) -> Option<bool> {
        if self.items.is_empty() {
            return None;
        }
        let next = !self.all_selected();
        for item in &mut self.items {
            item.selected = next;
        }
        Some(next)
    }

    /// Stable sort by text length in chars; equal lengths in ascending text order.
    pub fn sort_by_length(&mut self, order: SortOrder) {
        self.items.sort_by(|a, b| match order {
            SortOrder::Descending => token_order(&a.text, &b.text),
            SortOrder::Ascending => a
                .text
                .chars()
                .count()
                .cmp(&b.text.chars().count())
                .then_with(|| a.text.cmp(&b.text)),
        });
    }

    pub fn first_selected(&self) -> Option<(usize, &MixItem)> {
        self.items.iter().enumerate().find(|(_, item)| item.selected)
    }

    /// Decode an item back into form input.
    pub fn decode_item(&self, index: usize) -> Result<Formula, FormulaError> {
        self.check_index(index)?;
        Ok(decode(&self.items[index].text)?)
    }

    /// Decode the first selected item.
    pub fn decode_first_selected(&self) -> Result<Formula, FormulaError> {
        let (index, _) = self.first_selected().ok_or(StoreError::NothingSelected)?;
        self.decode_item(index)
    }

    /// Selected texts in order, joined with `separator`.
    pub fn join_selected(&self, separator: &str) -> Result<String, StoreError> {
        let selected: Vec<&str> = self
            .items
            .iter()
            .filter(|item| item.selected)
            .map(|item| item.text.as_str())
            .collect();
        if selected.is_empty() {
            return Err(StoreError::NothingSelected);
        }
        Ok(selected.join(separator))
    }

    /// [`join_selected`](Self::join_selected) with the `*` separator.
    pub fn output(&self) -> Result<String, StoreError> {
        self.join_selected(DEFAULT_SEPARATOR)
    }

    /// Rebuild the mix from output text: split on `*`, trim, keep the first of
    /// each duplicate. All new items are selected.
    ///
    /// Blank output leaves the mix untouched.
    pub fn replace_all(&mut self, output: &str) -> Result<ReplaceReport, StoreError> {
        let output = output.trim();
        if output.is_empty() {
            return Err(StoreError::EmptyOutput);
        }

        let mut fresh = MixStore::new();
        let mut report = ReplaceReport::default();
        for part in output.split(DEFAULT_SEPARATOR) {
            match fresh.add(part) {
                AddOutcome::Added { .. } => report.added += 1,
                AddOutcome::Duplicate => report.duplicates += 1,
                AddOutcome::Empty => {}
            }
        }
        if report.duplicates > 0 {
            debug_warn!("store", "{} duplicate(s) dropped from output", report.duplicates);
        }
        *self = fresh;
        Ok(report)
    }
}
