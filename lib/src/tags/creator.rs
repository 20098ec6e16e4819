use super::path::resolve_segments;
use super::tree::TagTree;
use crate::error::{FavedError, Result};
use crate::models::{NewTag, Tag, TagColor, ROOT_PARENT_ID};
use crate::repository::Repository;
use chrono::Utc;

/// Attributes applied to the terminal tag of a created chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOptions {
    pub description: String,
    pub color: Option<TagColor>,
    pub pinned: bool,
}

impl TagOptions {
    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }
}

/// Creates tag chains along a path, reusing whatever prefix already exists.
///
/// The creator reads the tag forest once when constructed and records every
/// tag it creates in that snapshot, so one import call sees its own writes
/// without re-querying the store per record.
pub struct TagCreator<'a, R: Repository + ?Sized> {
    repo: &'a R,
    tree: TagTree,
    default_color: TagColor,
}

impl<'a, R: Repository + ?Sized> TagCreator<'a, R> {
    pub fn new(repo: &'a R) -> Result<Self> {
        Ok(Self {
            repo,
            tree: TagTree::new(repo.get_tags()?),
            default_color: TagColor::default(),
        })
    }

    /// Color for tags created without an explicit one.
    pub fn with_default_color(mut self, color: TagColor) -> Self {
        self.default_color = color;
        self
    }

    pub fn tree(&self) -> &TagTree {
        &self.tree
    }

    /// Re-read the tag forest from the store.
    pub fn refresh(&mut self) -> Result<()> {
        self.tree = TagTree::new(self.repo.get_tags()?);
        Ok(())
    }

    /// Create a single tag under `tag.parent_id`. If a sibling with the same
    /// title (ignoring case) exists, its id is returned instead.
    pub fn create_tag(&mut self, tag: NewTag) -> Result<i64> {
        let title = tag.title.trim();
        if title.is_empty() {
            return Err(FavedError::Validation("Tag title cannot be empty".into()));
        }
        if tag.parent_id != ROOT_PARENT_ID && !self.tree.contains(tag.parent_id) {
            return Err(FavedError::Validation(format!(
                "Parent tag {} does not exist",
                tag.parent_id
            )));
        }
        if let Some(existing) = self.tree.find_by_title_under_parent(title, tag.parent_id) {
            return Ok(existing.id);
        }
        let tag = NewTag {
            title: title.to_string(),
            ..tag
        };
        self.insert(tag)
    }

    /// Ensure the chain `segments[0] / segments[1] / ...` exists and return
    /// the id of the last tag. `description` only applies to a newly created
    /// terminal tag.
    pub fn create_tags_from_segments<S: AsRef<str>>(
        &mut self,
        segments: &[S],
        description: &str,
    ) -> Result<i64> {
        self.create_tags_from_segments_with(segments, &TagOptions::with_description(description))
    }

    pub fn create_tags_from_segments_with<S: AsRef<str>>(
        &mut self,
        segments: &[S],
        options: &TagOptions,
    ) -> Result<i64> {
        if segments.is_empty() {
            return Err(FavedError::Validation("Tag path is empty".into()));
        }

        let last = segments.len() - 1;
        let mut parent_id = ROOT_PARENT_ID;
        // Once a segment had to be created, everything below it is new as
        // well; never descend into an unrelated branch that happens to match.
        let mut check_existing = true;

        for (index, segment) in segments.iter().enumerate() {
            let title = segment.as_ref().trim();
            if title.is_empty() {
                return Err(FavedError::Validation(
                    "Tag path contains an empty segment".into(),
                ));
            }

            if check_existing {
                if let Some(existing) = self.tree.find_by_title_under_parent(title, parent_id) {
                    parent_id = existing.id;
                    continue;
                }
            }

            let tag = if index == last {
                NewTag {
                    title: title.to_string(),
                    description: options.description.clone(),
                    parent_id,
                    color: options.color,
                    pinned: options.pinned,
                }
            } else {
                NewTag::new(title, parent_id)
            };

            parent_id = self.insert(tag)?;
            check_existing = false;
        }

        Ok(parent_id)
    }

    /// Resolve a raw path string (see [`resolve_segments`]) and create it.
    pub fn create_tag_from_path(&mut self, path: &str, options: &TagOptions) -> Result<i64> {
        let segments = resolve_segments(path);
        self.create_tags_from_segments_with(&segments, options)
    }

    fn insert(&mut self, mut tag: NewTag) -> Result<i64> {
        if tag.color.is_none() {
            tag.color = Some(self.default_color);
        }

        match self.repo.create_tag(&tag) {
            Ok(id) => {
                log::debug!(
                    "Created tag {} '{}' under parent {}",
                    id,
                    tag.title,
                    tag.parent_id
                );
                self.tree.insert(Tag {
                    id,
                    parent_id: tag.parent_id,
                    title: tag.title,
                    description: tag.description,
                    color: tag.color.unwrap_or_default(),
                    pinned: tag.pinned,
                    created_at: Utc::now(),
                    updated_at: None,
                });
                Ok(id)
            }
            Err(err) if err.is_unique_violation() => {
                // Someone else created it since our snapshot was taken
                log::debug!(
                    "Tag '{}' under parent {} already exists, reusing it",
                    tag.title,
                    tag.parent_id
                );
                self.refresh()?;
                self.tree
                    .find_by_title_under_parent(&tag.title, tag.parent_id)
                    .map(|existing| existing.id)
                    .ok_or(err)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::FavedDb;

    fn setup() -> FavedDb {
        FavedDb::init_in_memory().unwrap()
    }

    #[test]
    fn test_creates_full_chain_in_empty_store() {
        let db = setup();
        let mut creator = TagCreator::new(&db).unwrap();

        let leaf = creator
            .create_tags_from_segments(&["A", "B", "C"], "desc")
            .unwrap();

        let tags = db.get_tags().unwrap();
        assert_eq!(tags.len(), 3);

        let c = &tags[&leaf];
        assert_eq!(c.title, "C");
        assert_eq!(c.description, "desc");
        let b = &tags[&c.parent_id];
        assert_eq!(b.title, "B");
        assert_eq!(b.description, "");
        let a = &tags[&b.parent_id];
        assert_eq!(a.title, "A");
        assert_eq!(a.description, "");
        assert_eq!(a.parent_id, ROOT_PARENT_ID);
    }

    #[test]
    fn test_reuses_existing_prefix() {
        let db = setup();
        let a = db.create_tag(&NewTag::new("A", ROOT_PARENT_ID)).unwrap();
        let b = db.create_tag(&NewTag::new("B", a)).unwrap();

        let mut creator = TagCreator::new(&db).unwrap();
        let d = creator
            .create_tags_from_segments(&["A", "B", "D"], "")
            .unwrap();

        let tags = db.get_tags().unwrap();
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[&d].title, "D");
        assert_eq!(tags[&d].parent_id, b);
    }

    #[test]
    fn test_reuses_same_title_ignoring_case() {
        let db = setup();
        let mut creator = TagCreator::new(&db).unwrap();
        let first = creator.create_tags_from_segments(&["Reading"], "").unwrap();
        let second = creator.create_tags_from_segments(&["READING"], "").unwrap();

        assert_eq!(first, second);
        assert_eq!(db.get_tags().unwrap().len(), 1);
    }

    #[test]
    fn test_existing_terminal_keeps_its_description() {
        let db = setup();
        let id = db
            .create_tag(&NewTag::new("A", ROOT_PARENT_ID).with_description("original"))
            .unwrap();

        let mut creator = TagCreator::new(&db).unwrap();
        assert_eq!(creator.create_tags_from_segments(&["a"], "new").unwrap(), id);
        assert_eq!(db.get_tags().unwrap()[&id].description, "original");
    }

    #[test]
    fn test_does_not_reattach_below_fresh_parent() {
        // "X" exists at the root, but the path is New/X: X must be created
        // fresh under New rather than reusing the root-level X.
        let db = setup();
        let root_x = db.create_tag(&NewTag::new("X", ROOT_PARENT_ID)).unwrap();

        let mut creator = TagCreator::new(&db).unwrap();
        let leaf = creator.create_tags_from_segments(&["New", "X"], "").unwrap();

        assert_ne!(leaf, root_x);
        let tags = db.get_tags().unwrap();
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[&tags[&leaf].parent_id].title, "New");
    }

    #[test]
    fn test_terminal_options_and_default_color() {
        let db = setup();
        let mut creator = TagCreator::new(&db)
            .unwrap()
            .with_default_color(TagColor::Aqua);
        let options = TagOptions {
            description: "leaf".into(),
            color: Some(TagColor::Red),
            pinned: true,
        };

        let leaf = creator
            .create_tags_from_segments_with(&["Parent", "Leaf"], &options)
            .unwrap();

        let tags = db.get_tags().unwrap();
        let leaf_tag = &tags[&leaf];
        assert_eq!(leaf_tag.color, TagColor::Red);
        assert!(leaf_tag.pinned);
        let parent = &tags[&leaf_tag.parent_id];
        assert_eq!(parent.color, TagColor::Aqua);
        assert!(!parent.pinned);
    }

    #[test]
    fn test_empty_segments_rejected() {
        let db = setup();
        let mut creator = TagCreator::new(&db).unwrap();
        let empty: [&str; 0] = [];
        assert!(matches!(
            creator.create_tags_from_segments(&empty, "").unwrap_err(),
            FavedError::Validation(_)
        ));
        assert!(matches!(
            creator.create_tag_from_path(" / / ", &TagOptions::default()).unwrap_err(),
            FavedError::Validation(_)
        ));
    }

    #[test]
    fn test_create_from_path_with_escaped_slash() {
        let db = setup();
        let mut creator = TagCreator::new(&db).unwrap();
        let leaf = creator
            .create_tag_from_path("Work/Projects\\/2024", &TagOptions::default())
            .unwrap();

        assert_eq!(creator.tree().full_path(leaf).unwrap(), "Work/Projects\\/2024");
        assert_eq!(db.get_tags().unwrap()[&leaf].title, "Projects/2024");
    }

    #[test]
    fn test_recovers_from_stale_snapshot() {
        let db = setup();
        let mut creator = TagCreator::new(&db).unwrap();
        // Created behind the creator's back, as a concurrent request would
        let concurrent = db.create_tag(&NewTag::new("Shared", ROOT_PARENT_ID)).unwrap();

        let id = creator.create_tags_from_segments(&["shared"], "").unwrap();
        assert_eq!(id, concurrent);
        assert_eq!(db.get_tags().unwrap().len(), 1);
    }

    #[test]
    fn test_create_single_tag() {
        let db = setup();
        let mut creator = TagCreator::new(&db).unwrap();
        let parent = creator
            .create_tag(NewTag::new("Faved", ROOT_PARENT_ID).with_pinned(true))
            .unwrap();
        let child = creator
            .create_tag(NewTag::new("Welcome", parent).with_color(TagColor::Green))
            .unwrap();
        assert_eq!(
            creator
                .create_tag(NewTag::new("faved", ROOT_PARENT_ID))
                .unwrap(),
            parent
        );

        assert_eq!(creator.tree().full_path(child).unwrap(), "Faved/Welcome");
        assert!(matches!(
            creator.create_tag(NewTag::new("  ", ROOT_PARENT_ID)).unwrap_err(),
            FavedError::Validation(_)
        ));
        assert!(matches!(
            creator.create_tag(NewTag::new("x", 999)).unwrap_err(),
            FavedError::Validation(_)
        ));
    }
}
