//! Item and tag edits as the controllers perform them: validate the input,
//! check referenced tags against the store, then write.

use crate::error::{FavedError, Result};
use crate::models::{NewItem, NewTag, TagColor, ROOT_PARENT_ID};
use crate::repository::Repository;
use crate::tags::{TagCreator, TagTree};
use crate::utils::parse_url_input;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use url::Url;

/// Item fields as submitted by a client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInput {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub tags: Vec<i64>,
}

impl ItemInput {
    /// Check the fields and produce the row to write. A URL without a scheme
    /// is taken as `https://`.
    pub fn validate(&self) -> Result<NewItem> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FavedError::Validation("Title is required".into()));
        }

        let url = parse_url_input(&self.url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FavedError::Validation(format!(
                "URL must use http or https: {}",
                url
            )));
        }

        let image = if self.image.trim().is_empty() {
            String::new()
        } else {
            parse_url_input(&self.image)
                .map_err(|_| FavedError::Validation("Image URL is invalid".into()))?
                .to_string()
        };

        Ok(NewItem {
            title: title.to_string(),
            url: url.to_string(),
            description: self.description.clone(),
            comments: self.comments.clone(),
            image,
            created_at: None,
        })
    }

    fn tag_ids(&self) -> Vec<i64> {
        self.tags
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn ensure_tags_exist<R: Repository + ?Sized>(repo: &R, tag_ids: &[i64]) -> Result<()> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    let tags = repo.get_tags()?;
    if tag_ids.iter().any(|id| !tags.contains_key(id)) {
        return Err(FavedError::Validation("Non-existing tags provided".into()));
    }
    Ok(())
}

/// Save a new item and attach its tags. Returns the item id.
pub fn create_item<R: Repository + ?Sized>(repo: &R, input: &ItemInput) -> Result<i64> {
    let item = input.validate()?;
    let tag_ids = input.tag_ids();
    ensure_tags_exist(repo, &tag_ids)?;

    let item_id = repo.create_item(&item, None)?;
    repo.attach_item_tags(&tag_ids, item_id)?;
    log::debug!("Created item {} ({})", item_id, item.url);
    Ok(item_id)
}

/// Overwrite an item and replace its tag memberships.
pub fn update_item<R: Repository + ?Sized>(repo: &R, item_id: i64, input: &ItemInput) -> Result<()> {
    let item = input.validate()?;
    let tag_ids = input.tag_ids();
    ensure_tags_exist(repo, &tag_ids)?;

    if !repo.update_item(item_id, &item)? {
        return Err(FavedError::Write("Item update failed".into()));
    }
    if !repo.set_item_tags(&tag_ids, item_id)? {
        return Err(FavedError::Write("Item tags update failed".into()));
    }
    Ok(())
}

pub fn delete_item<R: Repository + ?Sized>(repo: &R, item_id: i64) -> Result<()> {
    if !repo.delete_item(item_id)? {
        return Err(FavedError::ItemNotFound(item_id));
    }
    Ok(())
}

/// Make a possibly relative URL (typically an image found on a page)
/// absolute against the page URL. Already-absolute input is returned as is,
/// and so is anything that cannot be resolved.
pub fn resolve_url(relative: &str, base: &str) -> String {
    if Url::parse(relative).is_ok() {
        return relative.to_string();
    }
    match Url::parse(base).and_then(|base| base.join(relative)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => relative.to_string(),
    }
}

/// Set a tag's color from a palette name.
pub fn update_tag_color<R: Repository + ?Sized>(repo: &R, tag_id: i64, color: &str) -> Result<TagColor> {
    let color: TagColor = color
        .parse()
        .map_err(|_| FavedError::Validation("Invalid input data for tag color update.".into()))?;
    if !repo.update_tag_color(tag_id, color)? {
        return Err(FavedError::TagNotFound(tag_id));
    }
    Ok(color)
}

pub fn update_tag_pinned<R: Repository + ?Sized>(repo: &R, tag_id: i64, pinned: bool) -> Result<()> {
    if !repo.update_tag_pinned(tag_id, pinned)? {
        return Err(FavedError::TagNotFound(tag_id));
    }
    Ok(())
}

/// Rename a tag. The new title must not collide with a sibling's.
pub fn update_tag_title<R: Repository + ?Sized>(repo: &R, tag_id: i64, title: &str) -> Result<()> {
    let title = title.trim();
    if title.is_empty() {
        return Err(FavedError::Validation("Tag title cannot be empty".into()));
    }

    let tree = TagTree::new(repo.get_tags()?);
    let tag = tree.get(tag_id).ok_or(FavedError::TagNotFound(tag_id))?;
    if let Some(sibling) = tree.find_by_title_under_parent(title, tag.parent_id) {
        if sibling.id != tag_id {
            return Err(FavedError::Validation(format!(
                "A tag named '{}' already exists here",
                sibling.title
            )));
        }
    }

    if !repo.update_tag_title(tag_id, title)? {
        return Err(FavedError::TagNotFound(tag_id));
    }
    Ok(())
}

/// Delete a tag together with every tag nested below it. Items keep
/// existing and only lose those memberships. Returns the number of tags
/// removed.
pub fn delete_tag<R: Repository + ?Sized>(repo: &R, tag_id: i64) -> Result<usize> {
    let tree = TagTree::new(repo.get_tags()?);
    if !tree.contains(tag_id) {
        return Err(FavedError::TagNotFound(tag_id));
    }

    let ids: Vec<i64> = tree.descendants(tag_id).into_iter().collect();
    let deleted = repo.delete_tags(&ids)?;
    log::info!("Deleted tag {} and {} nested tags", tag_id, deleted.saturating_sub(1));
    Ok(deleted)
}

const FAVED_TAG_DESCRIPTION: &str =
    "This is a tag for Faved links. Feel free to delete it after getting familiar with those resources.";

const WELCOME_TAG_DESCRIPTION: &str = "Familiarize yourself with the functionality of Faved by exploring the articles under this tag.\n\n\
ℹ️ This is a nested tag. Nested tags are perfect for grouping several projects, e.g. for Work, School, or Personal use. \n\n\
💡 To create a nested tag, simply separate words with a forward slash.";

struct WelcomeItem {
    title: &'static str,
    description: &'static str,
    url: &'static str,
    comments: &'static str,
    image: &'static str,
    nested: bool,
}

const WELCOME_ITEMS: &[WelcomeItem] = &[
    WelcomeItem {
        title: "Faved - Organize Your Bookmarks",
        description: "A self-hosted, open-source solution to store, categorize, and access your bookmarks from anywhere.",
        url: "https://faved.dev/",
        comments: "Faved main site",
        image: "https://faved.dev/static/images/bookmark-thumb.png",
        nested: false,
    },
    WelcomeItem {
        title: "Faved Demo",
        description: "Try out Faved online before installing it on your machine. Demo sites are provided for testing and are deleted after one month.",
        url: "https://demo.faved.dev/",
        comments: "",
        image: "",
        nested: false,
    },
    WelcomeItem {
        title: "Blog | Faved - Organize Your Bookmarks",
        description: "Faved updates, tutorials and product announcements",
        url: "https://faved.dev/blog",
        comments: "",
        image: "",
        nested: false,
    },
    WelcomeItem {
        title: "GitHub - denho/faved: Free open-source bookmark manager with customisable nested tags. Super fast and lightweight. All data is stored locally.",
        description: "Free open-source bookmark manager with customisable nested tags. Super fast and lightweight. All data is stored locally. - denho/faved",
        url: "https://github.com/denho/faved",
        comments: "",
        image: "https://repository-images.githubusercontent.com/995300772/35566533-7ffc-4101-a7ce-926f5d82b6ca",
        nested: false,
    },
    WelcomeItem {
        title: "Faved on Twitter / X (@FavedTool)",
        description: "Lightning fast free open source bookmark manager with accent on privacy and data ownership.",
        url: "https://x.com/FavedTool",
        comments: "",
        image: "",
        nested: false,
    },
    WelcomeItem {
        title: "Meet Faved: An Open-Source Privacy-First Bookmark Manager | Faved - Organize Your Bookmarks",
        description: "In a world where every digital service wants to control your data, I believe it’s important to have an option to keep your data secure from trackers and advertising networks. That’s why I built Faved: an open-source, self-hosted bookmark manager that gives you complete control over your saved web content and links.",
        url: "https://faved.dev/blog/meet-faved-open-source-privacy-first-bookmark-manager",
        comments: "",
        image: "",
        nested: true,
    },
    WelcomeItem {
        title: "How to Migrate Your Data from Pocket to Faved | Faved - Organize Your Bookmarks",
        description: "Pocket is shutting down on July 8, 2025. As a privacy-first alternative, Faved lets you organize and manage your bookmarks while keeping full ownership of your data. Learn how to migrate your data from Pocket to Faved in a few simple steps.",
        url: "https://faved.dev/blog/migrate-pocket-to-faved",
        comments: "",
        image: "https://faved.dev/static/images/posts/migrate-pocket-to-faved/migrate-from-pocket-to-faved-ogimage.png",
        nested: true,
    },
];

/// First-run content: a pinned "Faved" tag, a nested "Faved/Welcome" tag and
/// a handful of links to the project's own pages. Returns the number of
/// items created.
pub fn seed_welcome_content<R: Repository + ?Sized>(repo: &R) -> Result<usize> {
    let mut creator = TagCreator::new(repo)?;
    let faved_tag = creator.create_tag(
        NewTag::new("Faved", ROOT_PARENT_ID)
            .with_description(FAVED_TAG_DESCRIPTION)
            .with_color(TagColor::Gray)
            .with_pinned(true),
    )?;
    let welcome_tag = creator.create_tag(
        NewTag::new("Welcome", faved_tag)
            .with_description(WELCOME_TAG_DESCRIPTION)
            .with_color(TagColor::Green),
    )?;

    for entry in WELCOME_ITEMS {
        let item = NewItem {
            title: entry.title.to_string(),
            description: entry.description.to_string(),
            url: entry.url.to_string(),
            comments: entry.comments.to_string(),
            image: entry.image.to_string(),
            created_at: None,
        };
        let item_id = repo.create_item(&item, None)?;
        let tag_id = if entry.nested { welcome_tag } else { faved_tag };
        repo.attach_item_tags(&[tag_id], item_id)?;
    }

    log::info!("Seeded {} welcome items", WELCOME_ITEMS.len());
    Ok(WELCOME_ITEMS.len())
}
