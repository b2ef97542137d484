//! Typography roles and the immutable style sheet.
//!
//! A [`StyleSheet`] maps each semantic [`Role`] to a [`TextStyle`]
//! attribute record. It is built once at process start and shared
//! read-only by every request; nothing in the pipeline mutates it.

/// Semantic role of a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The page itself (padding, base font).
    Page,
    /// Top-level heading.
    Heading1,
    /// Any heading below the top level.
    Heading2,
    /// Body paragraph.
    Paragraph,
    /// Hyperlink run.
    Link,
    /// One bulleted list row.
    ListItem,
    /// The fixed-width bullet glyph column.
    Bullet,
}

/// Font family selector, restricted to the faces the render engine embeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    /// Regular weight.
    Helvetica,
    /// Bold weight.
    HelveticaBold,
}

/// RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const BLUE: Self = Self { r: 0, g: 0, b: 255 };
}

/// Layout and typography attributes for one role.
///
/// Not every attribute is meaningful for every role: `padding` applies to
/// the page, `width` to the bullet column. Unused attributes stay at
/// their base values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font face.
    pub font: FontFamily,
    /// Font size in points.
    pub size: f32,
    /// Space above the block in points.
    pub margin_top: f32,
    /// Space below the block in points.
    pub margin_bottom: f32,
    /// Text color.
    pub color: Rgb,
    /// Underline decoration.
    pub underline: bool,
    /// Fixed advance width in points (bullet column).
    pub width: Option<f32>,
    /// Page padding in points (page role).
    pub padding: f32,
}

impl TextStyle {
    /// Base record all roles start from: 12pt regular Helvetica, black,
    /// no margins, no decoration.
    const fn base() -> Self {
        Self {
            font: FontFamily::Helvetica,
            size: 12.0,
            margin_top: 0.0,
            margin_bottom: 0.0,
            color: Rgb::BLACK,
            underline: false,
            width: None,
            padding: 0.0,
        }
    }
}

/// Immutable mapping from [`Role`] to [`TextStyle`].
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub page: TextStyle,
    pub heading1: TextStyle,
    pub heading2: TextStyle,
    pub paragraph: TextStyle,
    pub link: TextStyle,
    pub list_item: TextStyle,
    pub bullet: TextStyle,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            page: TextStyle {
                padding: 50.0,
                ..TextStyle::base()
            },
            heading1: TextStyle {
                font: FontFamily::HelveticaBold,
                size: 24.0,
                margin_top: 20.0,
                margin_bottom: 10.0,
                ..TextStyle::base()
            },
            heading2: TextStyle {
                font: FontFamily::HelveticaBold,
                size: 20.0,
                margin_top: 16.0,
                margin_bottom: 8.0,
                ..TextStyle::base()
            },
            paragraph: TextStyle {
                margin_bottom: 10.0,
                ..TextStyle::base()
            },
            link: TextStyle {
                color: Rgb::BLUE,
                underline: true,
                ..TextStyle::base()
            },
            list_item: TextStyle {
                margin_bottom: 5.0,
                ..TextStyle::base()
            },
            bullet: TextStyle {
                width: Some(10.0),
                ..TextStyle::base()
            },
        }
    }
}

impl StyleSheet {
    /// Look up the attribute record for a role.
    #[must_use]
    pub fn get(&self, role: Role) -> &TextStyle {
        match role {
            Role::Page => &self.page,
            Role::Heading1 => &self.heading1,
            Role::Heading2 => &self.heading2,
            Role::Paragraph => &self.paragraph,
            Role::Link => &self.link,
            Role::ListItem => &self.list_item,
            Role::Bullet => &self.bullet,
        }
    }
}
