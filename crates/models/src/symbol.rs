//! Availability glyphs used in the sheets and their display colors.

use serde::Serialize;

/// Glyph shown when a status cell is blank.
pub const PLACEHOLDER: &str = "ー";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    /// `〇` seats available
    Available,
    /// `△` few seats left
    Limited,
    /// `✕` full
    Full,
    /// `ー` no data
    Placeholder,
}

/// Inline background/text color pair for a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellStyle {
    pub background: &'static str,
    pub color: &'static str,
}

impl CellStyle {
    pub fn css(&self) -> String {
        format!("background-color: {}; color: {};", self.background, self.color)
    }
}

impl Symbol {
    /// Exact glyph match; no trimming, no look-alike characters.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "〇" => Some(Self::Available),
            "△" => Some(Self::Limited),
            "✕" => Some(Self::Full),
            PLACEHOLDER => Some(Self::Placeholder),
            _ => None,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Available => "〇",
            Self::Limited => "△",
            Self::Full => "✕",
            Self::Placeholder => PLACEHOLDER,
        }
    }

    pub fn style(&self) -> CellStyle {
        match self {
            Self::Available => CellStyle { background: "#b9d08b", color: "#008000" },
            Self::Limited => CellStyle { background: "#ffd27f", color: "#cc7000" },
            Self::Full => CellStyle { background: "#f5b2b2", color: "#ff0000" },
            Self::Placeholder => CellStyle { background: "transparent", color: "inherit" },
        }
    }
}

/// Styling for a detail-table cell: the three glyphs plus the neutral dash.
pub fn detail_cell_style(value: &str) -> Option<CellStyle> {
    Symbol::parse(value).map(|s| s.style())
}

/// Styling for a condensed status cell. The dash there is only a stand-in
/// for a blank cell and stays unstyled.
pub fn status_cell_style(value: &str) -> Option<CellStyle> {
    Symbol::parse(value)
        .filter(|s| *s != Symbol::Placeholder)
        .map(|s| s.style())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_always_green() {
        let style = detail_cell_style("〇").unwrap();
        assert_eq!(style, CellStyle { background: "#b9d08b", color: "#008000" });
        assert_eq!(status_cell_style("〇"), Some(style));
    }

    #[test]
    fn unknown_values_are_unstyled() {
        assert_eq!(detail_cell_style("満席"), None);
        assert_eq!(detail_cell_style(" 〇"), None);
        assert_eq!(detail_cell_style("○"), None);
        assert_eq!(detail_cell_style(""), None);
    }

    #[test]
    fn dash_is_neutral_in_detail_and_plain_in_status() {
        assert_eq!(detail_cell_style("ー").unwrap().background, "transparent");
        assert_eq!(status_cell_style("ー"), None);
    }

    #[test]
    fn glyphs_round_trip() {
        for s in [Symbol::Available, Symbol::Limited, Symbol::Full, Symbol::Placeholder] {
            assert_eq!(Symbol::parse(s.glyph()), Some(s));
        }
    }
}
