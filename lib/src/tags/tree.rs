use super::path::render_path;
use crate::error::{FavedError, Result};
use crate::models::{Tag, ROOT_PARENT_ID};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

/// In-memory view of the tag forest built from one repository snapshot.
#[derive(Debug, Clone, Default)]
pub struct TagTree {
    tags: HashMap<i64, Tag>,
}

impl TagTree {
    pub fn new(tags: HashMap<i64, Tag>) -> Self {
        Self { tags }
    }

    pub fn from_tags<I: IntoIterator<Item = Tag>>(tags: I) -> Self {
        Self {
            tags: tags.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    pub fn get(&self, tag_id: i64) -> Option<&Tag> {
        self.tags.get(&tag_id)
    }

    pub fn contains(&self, tag_id: i64) -> bool {
        self.tags.contains_key(&tag_id)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Add or replace a tag, keeping the snapshot in step with the store.
    pub fn insert(&mut self, tag: Tag) {
        self.tags.insert(tag.id, tag);
    }

    /// Titles from the root down to `tag_id`.
    ///
    /// A parent id that is not in the snapshot is reported as
    /// [`FavedError::TagNotFound`] carrying the missing id. Revisiting a tag
    /// means the hierarchy loops, which is reported as [`FavedError::TagCycle`].
    pub fn ancestor_titles(&self, tag_id: i64) -> Result<Vec<&str>> {
        let mut titles = Vec::new();
        let mut visited = HashSet::new();
        let mut current = tag_id;

        loop {
            if !visited.insert(current) {
                return Err(FavedError::TagCycle { tag_id: current });
            }
            let Some(tag) = self.tags.get(&current) else {
                if current != tag_id {
                    log::warn!("Tag {} references missing parent {}", tag_id, current);
                }
                return Err(FavedError::TagNotFound(current));
            };
            titles.push(tag.title.as_str());
            if tag.is_root() {
                break;
            }
            current = tag.parent_id;
        }

        titles.reverse();
        Ok(titles)
    }

    /// Rendered full path of a tag, e.g. `Work/Projects\/2024`.
    pub fn full_path(&self, tag_id: i64) -> Result<String> {
        Ok(render_path(&self.ancestor_titles(tag_id)?))
    }

    /// Full path of every tag. Fails on the first cycle found.
    pub fn full_paths(&self) -> Result<BTreeMap<i64, String>> {
        self.tags
            .keys()
            .map(|&id| self.full_path(id).map(|path| (id, path)))
            .collect()
    }

    /// Direct children of `parent_id`: pinned first, then by title.
    pub fn children(&self, parent_id: i64) -> Vec<&Tag> {
        let mut children: Vec<&Tag> = self
            .tags
            .values()
            .filter(|t| t.parent_id == parent_id)
            .collect();
        children.sort_by(|a, b| sibling_order(a, b));
        children
    }

    pub fn roots(&self) -> Vec<&Tag> {
        self.children(ROOT_PARENT_ID)
    }

    /// Case-insensitive exact title lookup among the children of `parent_id`.
    pub fn find_by_title_under_parent(&self, title: &str, parent_id: i64) -> Option<&Tag> {
        self.tags
            .values()
            .filter(|t| t.parent_id == parent_id && t.title_matches(title))
            .min_by_key(|t| t.id)
    }

    /// Depth-first, pre-order listing of the forest as `(depth, tag)` pairs,
    /// siblings in display order. Tags not reachable from a root are omitted.
    pub fn walk(&self) -> Vec<(usize, &Tag)> {
        let mut out = Vec::with_capacity(self.tags.len());
        let mut visited = HashSet::new();
        let mut stack: Vec<(usize, &Tag)> = self.roots().into_iter().rev().map(|t| (0, t)).collect();

        while let Some((depth, tag)) = stack.pop() {
            if !visited.insert(tag.id) {
                continue;
            }
            out.push((depth, tag));
            for child in self.children(tag.id).into_iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        out
    }

    /// `tag_id` plus the ids of all tags nested below it.
    pub fn descendants(&self, tag_id: i64) -> HashSet<i64> {
        let mut found = HashSet::new();
        let mut stack = vec![tag_id];

        while let Some(id) = stack.pop() {
            if !found.insert(id) {
                continue;
            }
            stack.extend(
                self.tags
                    .values()
                    .filter(|t| t.parent_id == id)
                    .map(|t| t.id),
            );
        }
        found
    }
}

/// Sibling display order. Titles compare by Unicode lowercase, an
/// approximation of locale-aware collation; raw title and id break ties.
fn sibling_order(a: &Tag, b: &Tag) -> Ordering {
    b.pinned
        .cmp(&a.pinned)
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagColor;
    use chrono::Utc;

    fn tag(id: i64, parent_id: i64, title: &str) -> Tag {
        Tag {
            id,
            parent_id,
            title: title.to_string(),
            description: String::new(),
            color: TagColor::default(),
            pinned: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn pinned(mut t: Tag) -> Tag {
        t.pinned = true;
        t
    }

    fn sample_tree() -> TagTree {
        TagTree::from_tags(vec![
            tag(1, 0, "Work"),
            tag(2, 1, "Projects/2024"),
            tag(3, 2, "Alpha"),
            tag(4, 0, "books"),
            pinned(tag(5, 0, "Zebra")),
            tag(6, 0, "apple"),
        ])
    }

    #[test]
    fn test_full_path_escapes_slashes() {
        let tree = sample_tree();
        assert_eq!(tree.full_path(1).unwrap(), "Work");
        assert_eq!(tree.full_path(2).unwrap(), "Work/Projects\\/2024");
        assert_eq!(tree.full_path(3).unwrap(), "Work/Projects\\/2024/Alpha");
    }

    #[test]
    fn test_full_path_unknown_tag() {
        let tree = sample_tree();
        assert!(matches!(
            tree.full_path(99).unwrap_err(),
            FavedError::TagNotFound(99)
        ));
    }

    #[test]
    fn test_full_path_detects_cycle() {
        let tree = TagTree::from_tags(vec![tag(1, 3, "a"), tag(2, 1, "b"), tag(3, 2, "c")]);
        assert!(matches!(
            tree.full_path(2).unwrap_err(),
            FavedError::TagCycle { .. }
        ));
        assert!(tree.full_paths().is_err());
    }

    #[test]
    fn test_full_path_detects_self_parent() {
        let tree = TagTree::from_tags(vec![tag(7, 7, "loop")]);
        assert!(matches!(
            tree.full_path(7).unwrap_err(),
            FavedError::TagCycle { tag_id: 7 }
        ));
    }

    #[test]
    fn test_full_path_missing_parent_is_not_found() {
        let tree = TagTree::from_tags(vec![tag(1, 0, "root"), tag(2, 50, "orphan"), tag(3, 2, "leaf")]);
        assert!(matches!(
            tree.full_path(2).unwrap_err(),
            FavedError::TagNotFound(50)
        ));
        assert!(matches!(
            tree.full_path(3).unwrap_err(),
            FavedError::TagNotFound(50)
        ));
        assert_eq!(tree.full_path(1).unwrap(), "root");
        assert!(tree.full_paths().is_err());
    }

    #[test]
    fn test_children_pinned_first_then_alphabetical() {
        let tree = sample_tree();
        let titles: Vec<&str> = tree.roots().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Zebra", "apple", "books", "Work"]);
    }

    #[test]
    fn test_find_by_title_under_parent() {
        let tree = sample_tree();
        assert_eq!(tree.find_by_title_under_parent("WORK", 0).map(|t| t.id), Some(1));
        assert_eq!(
            tree.find_by_title_under_parent("projects/2024", 1).map(|t| t.id),
            Some(2)
        );
        assert!(tree.find_by_title_under_parent("Alpha", 0).is_none());
        assert!(tree.find_by_title_under_parent("Work", 1).is_none());
    }

    #[test]
    fn test_walk_is_preorder() {
        let tree = sample_tree();
        let listing: Vec<(usize, i64)> = tree.walk().iter().map(|(d, t)| (*d, t.id)).collect();
        assert_eq!(listing, vec![(0, 5), (0, 6), (0, 4), (0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_walk_skips_unreachable_cycle() {
        let mut tree = sample_tree();
        tree.insert(tag(10, 11, "x"));
        tree.insert(tag(11, 10, "y"));
        assert_eq!(tree.walk().len(), 6);
    }

    #[test]
    fn test_descendants() {
        let tree = sample_tree();
        let ids = tree.descendants(1);
        assert_eq!(ids, [1, 2, 3].into_iter().collect());
        assert_eq!(tree.descendants(4), [4].into_iter().collect());
    }

    #[test]
    fn test_full_paths_covers_every_tag() {
        let tree = sample_tree();
        let paths = tree.full_paths().unwrap();
        assert_eq!(paths.len(), tree.len());
        assert_eq!(paths[&3], "Work/Projects\\/2024/Alpha");
    }
}
