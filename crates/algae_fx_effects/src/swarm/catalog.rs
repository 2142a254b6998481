//! The four microalgae a cell can be, with their look and their facts.

use algae_fx_core::{Color, Gradient};

/// Outline of a cell sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellShape {
    /// Plain disc.
    Round,
    /// Disc with a spiral filament glyph drawn inside.
    Spiral,
    /// Blob with per-corner radii (fractions of the size, clockwise from
    /// top-left).
    Irregular([f32; 4]),
}

/// Display text for a tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellInfo {
    /// Species name.
    pub name: &'static str,
    /// One-line fact.
    pub fact: &'static str,
    /// Commercial applications.
    pub applications: &'static str,
}

/// Cell species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Round green cell.
    Chlorella,
    /// Blue-green filament.
    Spirulina,
    /// Red-tinted cyst.
    Haematococcus,
    /// Irregular salt-tolerant cell.
    Dunaliella,
}

impl CellKind {
    /// Every variant, in catalog order.
    pub const ALL: [Self; 4] = [
        Self::Chlorella,
        Self::Spirulina,
        Self::Haematococcus,
        Self::Dunaliella,
    ];

    /// Tooltip content for this species.
    #[must_use]
    pub const fn info(self) -> CellInfo {
        match self {
            Self::Chlorella => CellInfo {
                name: "Chlorella",
                fact: "Contains 50-60% protein and all essential amino acids",
                applications: "Protein supplements, functional foods, animal feed",
            },
            Self::Spirulina => CellInfo {
                name: "Spirulina",
                fact: "One of the most nutrient-dense foods on the planet",
                applications: "Superfood powders, natural blue colorant, aquaculture feed",
            },
            Self::Haematococcus => CellInfo {
                name: "Haematococcus",
                fact: "Produces astaxanthin, a powerful antioxidant",
                applications: "Nutraceuticals, skincare, salmon feed pigmentation",
            },
            Self::Dunaliella => CellInfo {
                name: "Dunaliella",
                fact: "Thrives in extremely salty environments",
                applications: "Natural beta-carotene, food coloring, cosmetics",
            },
        }
    }

    /// Sprite outline.
    #[must_use]
    pub const fn shape(self) -> CellShape {
        match self {
            Self::Chlorella | Self::Haematococcus => CellShape::Round,
            Self::Spirulina => CellShape::Spiral,
            Self::Dunaliella => CellShape::Irregular([0.4, 0.3, 0.5, 0.3]),
        }
    }

    /// Body fill.
    #[must_use]
    pub fn gradient(self) -> Gradient {
        match self {
            Self::Chlorella => Gradient::new(Color::ALGAE.with_alpha(0.6), Color::AQUA.with_alpha(0.8)),
            Self::Spirulina => Gradient::new(Color::hex(0x00_79_6B, 0.6), Color::hex(0xB2_DF_DB, 0.8)),
            Self::Haematococcus => Gradient::new(Color::hex(0xB7_1C_1C, 0.4), Color::AQUA.with_alpha(0.6)),
            Self::Dunaliella => Gradient::new(Color::hex(0x38_8E_3C, 0.6), Color::hex(0xC8_E6_C9, 0.8)),
        }
    }
}
