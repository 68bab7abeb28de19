//! Sub-list editors for lists embedded in a resource
//!
//! Records are identified by position only. Every operation computes a new
//! list from the current view and routes it through [`DraftEntity::set`], so
//! draft creation, generation bumps and message clearing stay in one place.

use crate::draft::DraftEntity;
use crate::error::{DraftError, Result};
use crate::resource::Resource;

/// Ordered, never-empty list field of a resource
pub trait OrderedField<T: Resource> {
    type Record: Clone;

    fn records(entity: &T) -> &[Self::Record];

    /// Wrap a full replacement list in the resource's edit type
    fn into_edit(records: Vec<Self::Record>) -> T::Edit;

    /// Structurally valid record used for inserts and as the last-remove fallback
    fn default_record() -> Self::Record;
}

/// Sorted, duplicate-free string list field of a resource
pub trait TagField<T: Resource> {
    fn tags(entity: &T) -> &[String];

    fn into_edit(tags: Vec<String>) -> T::Edit;
}

/// Positional list operations
pub struct OrderedSublistEditor;

impl OrderedSublistEditor {
    /// Insert a default record right after `index`, clamped to the end
    pub fn insert_after<R: Clone>(records: &[R], index: usize, record: R) -> Vec<R> {
        let mut next = records.to_vec();
        let at = index.saturating_add(1).min(next.len());
        next.insert(at, record);
        next
    }

    pub fn replace_at<R: Clone>(records: &[R], index: usize, record: R) -> Result<Vec<R>> {
        check_index(records.len(), index)?;
        let mut next = records.to_vec();
        next[index] = record;
        Ok(next)
    }

    /// Remove `index`; an emptied list gets `fallback` as its only record
    pub fn remove_at<R: Clone>(records: &[R], index: usize, fallback: R) -> Result<Vec<R>> {
        check_index(records.len(), index)?;
        let mut next = records.to_vec();
        next.remove(index);
        if next.is_empty() {
            next.push(fallback);
        }
        Ok(next)
    }
}

/// Set-like string list operations
pub struct TagListEditor;

impl TagListEditor {
    /// Returns `None` when `value` is empty or already present
    pub fn insert(tags: &[String], value: &str) -> Option<Vec<String>> {
        if value.is_empty() || tags.iter().any(|t| t == value) {
            return None;
        }
        let mut next = tags.to_vec();
        next.push(value.to_string());
        next.sort();
        Some(next)
    }

    /// Returns `None` when `value` is not in the list
    pub fn remove(tags: &[String], value: &str) -> Option<Vec<String>> {
        let index = tags.iter().position(|t| t == value)?;
        let mut next = tags.to_vec();
        next.remove(index);
        Some(next)
    }
}

fn check_index(len: usize, index: usize) -> Result<()> {
    if index >= len {
        return Err(DraftError::IndexOutOfRange { index, len });
    }
    Ok(())
}

impl<T: Resource> DraftEntity<T> {
    /// Insert the field's default record at `index + 1`
    pub fn insert_after<F: OrderedField<T>>(&mut self, index: usize) -> &Self {
        let records =
            OrderedSublistEditor::insert_after(F::records(self.view()), index, F::default_record());
        self.set(F::into_edit(records))
    }

    pub fn replace_at<F: OrderedField<T>>(
        &mut self,
        index: usize,
        record: F::Record,
    ) -> Result<&Self> {
        let records = OrderedSublistEditor::replace_at(F::records(self.view()), index, record)?;
        Ok(self.set(F::into_edit(records)))
    }

    pub fn remove_at<F: OrderedField<T>>(&mut self, index: usize) -> Result<&Self> {
        let records =
            OrderedSublistEditor::remove_at(F::records(self.view()), index, F::default_record())?;
        Ok(self.set(F::into_edit(records)))
    }

    /// Add a tag, keeping the list sorted. Returns whether the list changed.
    pub fn insert_tag<F: TagField<T>>(&mut self, value: &str) -> bool {
        match TagListEditor::insert(F::tags(self.view()), value) {
            Some(tags) => {
                self.set(F::into_edit(tags));
                true
            }
            None => false,
        }
    }

    /// Remove a tag by value. Returns whether the list changed.
    pub fn remove_tag<F: TagField<T>>(&mut self, value: &str) -> bool {
        match TagListEditor::remove(F::tags(self.view()), value) {
            Some(tags) => {
                self.set(F::into_edit(tags));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_after_clamps() {
        let next = OrderedSublistEditor::insert_after(&[1, 2], 7, 0);
        assert_eq!(next, vec![1, 2, 0]);

        let next = OrderedSublistEditor::insert_after(&[], 0, 0);
        assert_eq!(next, vec![0]);
    }

    #[test]
    fn test_remove_last_uses_fallback() {
        let next = OrderedSublistEditor::remove_at(&[5], 0, 0).unwrap();
        assert_eq!(next, vec![0]);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            OrderedSublistEditor::replace_at(&[1], 1, 9),
            Err(DraftError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert!(OrderedSublistEditor::remove_at::<i32>(&[], 0, 0).is_err());
    }

    #[test]
    fn test_tag_insert_rejects_empty() {
        assert!(TagListEditor::insert(&[], "").is_none());
    }

    #[test]
    fn test_tag_remove_missing() {
        let tags = vec!["a".to_string()];
        assert!(TagListEditor::remove(&tags, "b").is_none());
        assert_eq!(TagListEditor::remove(&tags, "a"), Some(vec![]));
    }
}
