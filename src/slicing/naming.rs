//! Output file naming templates
//!
//! Templates are literal text with `{field}` or `{field:0N}` placeholders.
//! Supported fields are `row`, `col`, `index`, `width`, `height` and `stem`;
//! `{{` and `}}` produce literal braces.

use crate::io::configuration::DEFAULT_NAME_TEMPLATE;
use crate::io::error::{Result, SliceError, invalid_parameter};
use crate::slicing::grid::Cell;
use std::str::FromStr;

/// Value substituted for a placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// 0-based row index
    Row,
    /// 0-based column index
    Col,
    /// 0-based sequential index
    Index,
    /// Tile width in pixels
    Width,
    /// Tile height in pixels
    Height,
    /// Source file stem
    Stem,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "row" => Some(Self::Row),
            "col" => Some(Self::Col),
            "index" => Some(Self::Index),
            "width" => Some(Self::Width),
            "height" => Some(Self::Height),
            "stem" => Some(Self::Stem),
            _ => None,
        }
    }

    const fn numeric_value(self, cell: &Cell) -> Option<u32> {
        match self {
            Self::Row => Some(cell.row),
            Self::Col => Some(cell.col),
            Self::Index => Some(cell.index),
            Self::Width => Some(cell.width),
            Self::Height => Some(cell.height),
            Self::Stem => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field { field: Field, pad: usize },
}

/// Parsed file naming template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl Default for NameTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_NAME_TEMPLATE.to_string(),
            segments: vec![
                Segment::Literal("tile_".to_string()),
                Segment::Field {
                    field: Field::Row,
                    pad: 0,
                },
                Segment::Literal("_".to_string()),
                Segment::Field {
                    field: Field::Col,
                    pad: 0,
                },
            ],
        }
    }
}

impl NameTemplate {
    /// Parse and validate a naming template
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if:
    /// - A placeholder is unterminated, empty, or names an unknown field
    /// - A padding width is not a number, or is applied to `stem`
    /// - A lone `}` appears outside a placeholder
    /// - The template contains a path separator
    /// - The template references neither `index` nor both `row` and `col`,
    ///   which would give every tile the same name
    pub fn parse(template: &str) -> Result<Self> {
        let reject = |reason: &str| invalid_parameter("template", &template, &reason);

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(reject("unmatched '}'")),
                '{' => {
                    let mut placeholder = String::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        placeholder.push(inner);
                    }
                    if !closed {
                        return Err(reject("unterminated placeholder"));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Self::parse_placeholder(&placeholder).map_err(|reason| {
                        invalid_parameter("template", &template, &reason)
                    })?);
                }
                '/' | '\\' => return Err(reject("path separators are not allowed")),
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        let uses = |wanted: Field| {
            segments
                .iter()
                .any(|s| matches!(s, Segment::Field { field, .. } if *field == wanted))
        };
        if !uses(Field::Index) && !(uses(Field::Row) && uses(Field::Col)) {
            return Err(reject(
                "must contain {index} or both {row} and {col} to keep names unique",
            ));
        }

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    fn parse_placeholder(placeholder: &str) -> std::result::Result<Segment, String> {
        let (name, pad) = match placeholder.split_once(':') {
            Some((name, spec)) => {
                let digits = spec.strip_prefix('0').unwrap_or(spec);
                let pad = digits
                    .parse::<usize>()
                    .map_err(|_parse_error| format!("invalid padding '{spec}' for '{name}'"))?;
                (name, pad)
            }
            None => (placeholder, 0),
        };

        let field =
            Field::from_name(name).ok_or_else(|| format!("unknown placeholder '{{{name}}}'"))?;
        if field == Field::Stem && pad > 0 {
            return Err("padding is only supported for numeric placeholders".to_string());
        }

        Ok(Segment::Field { field, pad })
    }

    /// Original template text
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render the base name for `cell` (without extension)
    pub fn render(&self, cell: &Cell, stem: &str) -> String {
        let mut name = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => name.push_str(text),
                Segment::Field { field, pad } => match field.numeric_value(cell) {
                    Some(value) => name.push_str(&format!("{value:0pad$}")),
                    None => name.push_str(stem),
                },
            }
        }
        name
    }

    /// Render the full file name for `cell`, appending `extension`
    pub fn file_name(&self, cell: &Cell, stem: &str, extension: &str) -> String {
        format!("{}.{extension}", self.render(cell, stem))
    }
}

impl FromStr for NameTemplate {
    type Err = SliceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
