use faved::models::{Item, Tag, TagColor};
use faved::tags::TagTree;
use owo_colors::OwoColorize;

pub trait Colorize {
    fn to_colored(&self) -> String;
    fn to_plain(&self) -> String;

    fn render(&self, nc: bool) -> String {
        if nc {
            self.to_plain()
        } else {
            self.to_colored()
        }
    }
}

/// An item with its tags shown as full paths
pub struct ColorizeItem<'a> {
    pub item: &'a Item,
    pub tree: &'a TagTree,
}

impl ColorizeItem<'_> {
    fn tag_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .item
            .tags
            .iter()
            .map(|id| {
                self.tree
                    .full_path(*id)
                    .unwrap_or_else(|_| format!("#{}", id))
            })
            .collect();
        paths.sort();
        paths
    }

    fn lines(&self, colored: bool) -> String {
        let item = self.item;
        let id = item.id.to_string();
        let padding = id.len() + 3;
        let mut s = String::new();

        if colored {
            s.push_str(&format!("{}. {}\n", id.bright_blue(), item.title.bold().green()));
            s.push_str(&format!("{:>padding$} {}\n", ">".red(), item.url.yellow()));
        } else {
            s.push_str(&format!("{}. {}\n", id, item.title));
            s.push_str(&format!("{:>padding$} {}\n", ">", item.url));
        }

        // Only show description and notes if non-empty
        if !item.description.trim().is_empty() {
            let marker = if colored { "+".red().to_string() } else { "+".to_string() };
            s.push_str(&format!("{:>padding$} {}\n", marker, item.description));
        }
        if !item.comments.trim().is_empty() {
            let marker = if colored { "~".red().to_string() } else { "~".to_string() };
            s.push_str(&format!("{:>padding$} {}\n", marker, item.comments));
        }

        let tags = self.tag_paths();
        if !tags.is_empty() {
            let tags_str = tags.join(", ");
            if colored {
                s.push_str(&format!("{:>padding$} {}\n", "#".red(), tags_str.blue()));
            } else {
                s.push_str(&format!("{:>padding$} {}\n", "#", tags_str));
            }
        }
        s
    }
}

impl Colorize for ColorizeItem<'_> {
    fn to_colored(&self) -> String {
        self.lines(true)
    }

    fn to_plain(&self) -> String {
        self.lines(false)
    }
}

/// One row of the tag tree listing
pub struct ColorizeTag<'a> {
    pub depth: usize,
    pub tag: &'a Tag,
}

fn paint(text: &str, color: TagColor) -> String {
    match color {
        TagColor::Gray => text.bright_black().to_string(),
        TagColor::Green => text.green().to_string(),
        TagColor::Red => text.red().to_string(),
        TagColor::Yellow => text.yellow().to_string(),
        TagColor::Aqua => text.cyan().to_string(),
        TagColor::White => text.white().to_string(),
        TagColor::Black => text.black().to_string(),
    }
}

impl ColorizeTag<'_> {
    fn pin(&self) -> &'static str {
        if self.tag.pinned {
            " *"
        } else {
            ""
        }
    }
}

impl Colorize for ColorizeTag<'_> {
    fn to_colored(&self) -> String {
        format!(
            "{}{} {}{}",
            "  ".repeat(self.depth),
            format!("[{}]", self.tag.id).bright_blue(),
            paint(&self.tag.title, self.tag.color).bold(),
            self.pin().yellow()
        )
    }

    fn to_plain(&self) -> String {
        format!(
            "{}[{}] {}{}",
            "  ".repeat(self.depth),
            self.tag.id,
            self.tag.title,
            self.pin()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn tag(id: i64, parent_id: i64, title: &str) -> Tag {
        Tag {
            id,
            parent_id,
            title: title.to_string(),
            description: String::new(),
            color: TagColor::Green,
            pinned: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn item(id: i64, tags: &[i64], description: &str) -> Item {
        Item {
            id,
            title: "Rust Programming Language".to_string(),
            url: "https://rust-lang.org/".to_string(),
            description: description.to_string(),
            comments: String::new(),
            image: String::new(),
            tags: tags.iter().copied().collect(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn tree() -> TagTree {
        TagTree::from_tags(vec![tag(1, 0, "dev"), tag(2, 1, "rust")])
    }

    #[test]
    fn test_item_output_structure() {
        let tree = tree();
        let item = item(42, &[2], "Official Rust website");
        let plain = ColorizeItem { item: &item, tree: &tree }.to_plain();
        let lines: Vec<&str> = plain.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("42. Rust Programming Language"));
        assert!(lines[1].contains("> https://rust-lang.org/"));
        assert!(lines[2].contains("+ Official Rust website"));
        assert!(lines[3].contains("# dev/rust"));
    }

    #[test]
    fn test_item_without_tags_or_description() {
        let tree = tree();
        let item = item(1, &[], "");
        let colored = ColorizeItem { item: &item, tree: &tree }.to_colored();
        let lines: Vec<&str> = colored.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(!lines.iter().any(|line| line.trim().starts_with('#')));
    }

    #[rstest]
    #[case(0, false, "[1] dev")]
    #[case(2, true, "    [1] dev *")]
    fn test_tag_row_plain(#[case] depth: usize, #[case] pinned: bool, #[case] expected: &str) {
        let mut t = tag(1, 0, "dev");
        t.pinned = pinned;
        assert_eq!(ColorizeTag { depth, tag: &t }.render(true), expected);
    }

    #[test]
    fn test_tag_row_colored_contains_title() {
        let t = tag(7, 0, "news");
        let colored = ColorizeTag { depth: 0, tag: &t }.to_colored();
        assert!(colored.contains("news"));
        assert!(colored.contains('7'));
    }
}
