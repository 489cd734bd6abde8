//! Categorical node palette.

use brooks_core::Color;
use plotters::style::RGBColor;

/// Twenty-entry categorical palette; colour classes wrap around past the end.
pub const PALETTE: [RGBColor; 20] = [
    RGBColor(31, 119, 180),
    RGBColor(174, 199, 232),
    RGBColor(255, 127, 14),
    RGBColor(255, 187, 120),
    RGBColor(44, 160, 44),
    RGBColor(152, 223, 138),
    RGBColor(214, 39, 40),
    RGBColor(255, 152, 150),
    RGBColor(148, 103, 189),
    RGBColor(197, 176, 213),
    RGBColor(140, 86, 75),
    RGBColor(196, 156, 148),
    RGBColor(227, 119, 194),
    RGBColor(247, 182, 210),
    RGBColor(127, 127, 127),
    RGBColor(199, 199, 199),
    RGBColor(188, 189, 34),
    RGBColor(219, 219, 141),
    RGBColor(23, 190, 207),
    RGBColor(158, 218, 229),
];

/// Fill used for nodes the colouring left unassigned.
pub const UNCOLOURED: RGBColor = RGBColor(255, 255, 255);

/// Fill colour for a node of colour class `color`.
#[must_use]
pub fn fill_for(color: Option<Color>) -> RGBColor {
    color
        .and_then(|class| PALETTE.get(class % PALETTE.len()))
        .copied()
        .unwrap_or(UNCOLOURED)
}
