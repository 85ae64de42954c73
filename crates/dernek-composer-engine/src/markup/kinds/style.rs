use std::sync::OnceLock;

use regex::Regex;

/// Text style applied by a `[[X]]…[[/X]]` span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    Bold,
    Italic,
    Underline,
    /// Font size in points.
    Size(u16),
}

/// Style kind without its parameter; close tags only carry the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFamily {
    Bold,
    Italic,
    Underline,
    Size,
}

/// A single `[[...]]` style marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTag {
    Open(StyleKind),
    Close(StyleFamily),
}

impl StyleKind {
    pub fn family(self) -> StyleFamily {
        match self {
            StyleKind::Bold => StyleFamily::Bold,
            StyleKind::Italic => StyleFamily::Italic,
            StyleKind::Underline => StyleFamily::Underline,
            StyleKind::Size(_) => StyleFamily::Size,
        }
    }

    /// Body of the opening tag, without brackets.
    pub fn open_body(self) -> String {
        match self {
            StyleKind::Bold => "B".to_string(),
            StyleKind::Italic => "I".to_string(),
            StyleKind::Underline => "U".to_string(),
            StyleKind::Size(n) => format!("SIZE={n}"),
        }
    }

    /// Body of the closing tag, without brackets.
    pub fn close_body(self) -> &'static str {
        self.family().close_body()
    }
}

impl StyleFamily {
    pub fn close_body(self) -> &'static str {
        match self {
            StyleFamily::Bold => "/B",
            StyleFamily::Italic => "/I",
            StyleFamily::Underline => "/U",
            StyleFamily::Size => "/SIZE",
        }
    }
}

impl StyleTag {
    /// Classifies the body of a `[[...]]` region. Matching is exact and case-sensitive.
    pub fn parse(body: &str) -> Option<Self> {
        static SIZE_REGEX: OnceLock<Regex> = OnceLock::new();
        let size_regex =
            SIZE_REGEX.get_or_init(|| Regex::new(r"^SIZE=([0-9]{1,5})$").expect("Invalid SIZE regex"));

        let tag = match body {
            "B" => StyleTag::Open(StyleKind::Bold),
            "/B" => StyleTag::Close(StyleFamily::Bold),
            "I" => StyleTag::Open(StyleKind::Italic),
            "/I" => StyleTag::Close(StyleFamily::Italic),
            "U" => StyleTag::Open(StyleKind::Underline),
            "/U" => StyleTag::Close(StyleFamily::Underline),
            "/SIZE" => StyleTag::Close(StyleFamily::Size),
            _ => {
                let caps = size_regex.captures(body)?;
                let size = caps[1].parse::<u16>().ok()?;
                StyleTag::Open(StyleKind::Size(size))
            }
        };
        Some(tag)
    }
}
