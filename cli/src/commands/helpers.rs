use super::AppContext;
use faved::error::Result;
use faved::tags::{TagCreator, TagOptions, TagTree};
use faved::Repository;
use std::path::Path;

/// Resolve tag path strings to ids, creating whatever part of each path is
/// missing. Duplicate results are dropped.
pub fn resolve_tag_paths(ctx: &AppContext, paths: &[String]) -> Result<Vec<i64>> {
    if paths.is_empty() {
        return Ok(Vec::new());
    }

    let mut creator = TagCreator::new(ctx.db)?.with_default_color(ctx.config.default_tag_color);
    let mut ids = Vec::with_capacity(paths.len());
    for path in paths {
        let id = creator.create_tag_from_path(path, &TagOptions::default())?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

pub fn load_tree(ctx: &AppContext) -> Result<TagTree> {
    Ok(TagTree::new(ctx.db.get_tags()?))
}

/// Content type an upload of this file would be declared with.
pub fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("zip") => "application/zip",
        Some("html") | Some("htm") => "text/html",
        Some("csv") => "text/csv",
        _ => "application/octet-stream",
    }
}
