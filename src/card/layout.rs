//! Fixed geometry and company constants for the card faces.
//!
//! All coordinates are layout units on a 340×204 canvas; rasterization
//! multiplies them by the pixel ratio.

use serde::{Deserialize, Serialize};

pub const CARD_WIDTH: f32 = 340.0;
pub const CARD_HEIGHT: f32 = 204.0;

pub const ROW_LEFT: f32 = 46.5;
pub const ROW_BASE_Y: f32 = 104.97;
pub const ROW_GAP: f32 = 12.5;
pub const ROW_FONT_SIZE: f32 = 8.0;
pub const ICON_OFFSET_X: f32 = -16.0;
pub const ICON_SIZE: f32 = 10.0;

pub const NAME_CENTER_X: f32 = 275.0;
pub const NAME_ZH_Y: f32 = 43.0;
pub const NAME_ZH_SIZE: f32 = 16.0;
pub const NAME_EN_Y: f32 = 63.0;
pub const NAME_EN_SIZE: f32 = 9.0;
pub const NAME_EN_MAX_WIDTH: f32 = 230.0;

pub const TITLE_LEFT: f32 = 155.0;
pub const TITLE_WIDTH: f32 = 165.0;
pub const TITLE_SIZE: f32 = 8.0;
pub const TITLE_ZH_Y: f32 = 80.0;
pub const TITLE_EN_Y: f32 = 90.0;
pub const TITLE_WRAP_GAP: f32 = 10.0;
/// Combined English department/title wider than this wraps onto two lines.
pub const TITLE_WRAP_THRESHOLD: f32 = 100.0;

pub const TAIPEI_PHONE: &str = "02-7709-2525";
pub const MIAOLI_PHONE: &str = "037-230388";
pub const TAIPEI_ADDRESS: &str = "台北市松山區南京東路四段161號6樓";
pub const MIAOLI_ADDRESS: &str = "苗栗縣銅鑼鄉中興路26-1號";
pub const TAX_ID: &str = "56153007";

/// Typeface family a text run is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontClass {
    Latin,
    Cjk,
}

/// Horizontal anchoring of a text run relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Center,
    /// Right-aligned inside a box that starts at `x` and spans `max_width`.
    RightInBox,
}

/// Icon asset shown before a contact row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Mobile,
    Phone,
    Map,
    Email,
    Vat,
    Line,
}

impl Icon {
    /// File stem inside the configured icon directory.
    pub fn asset_name(self) -> &'static str {
        match self {
            Icon::Mobile => "mobile",
            Icon::Phone => "phone",
            Icon::Map => "map",
            Icon::Email => "email",
            Icon::Vat => "vat",
            Icon::Line => "line",
        }
    }
}

/// Contact rows in their fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowKind {
    Mobile,
    MiaoliPhone,
    TaipeiPhone,
    Email,
    TaxId,
    MiaoliAddress,
    TaipeiAddress,
    MessagingId,
}

/// Canonical per-row presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStyle {
    pub prefix: &'static str,
    pub icon: Icon,
    pub font: FontClass,
}

impl RowKind {
    pub fn style(self) -> RowStyle {
        let (prefix, icon, font) = match self {
            RowKind::Mobile => ("手機：", Icon::Mobile, FontClass::Latin),
            RowKind::MiaoliPhone => ("苗栗：", Icon::Phone, FontClass::Latin),
            RowKind::TaipeiPhone => ("台北：", Icon::Phone, FontClass::Latin),
            RowKind::Email => ("信箱：", Icon::Email, FontClass::Latin),
            RowKind::TaxId => ("統編：", Icon::Vat, FontClass::Latin),
            RowKind::MiaoliAddress => ("苗栗：", Icon::Map, FontClass::Cjk),
            RowKind::TaipeiAddress => ("台北：", Icon::Map, FontClass::Cjk),
            RowKind::MessagingId => ("Line ID：", Icon::Line, FontClass::Latin),
        };
        RowStyle { prefix, icon, font }
    }
}

/// Company-wide values printed on every card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub taipei_phone: String,
    pub miaoli_phone: String,
    pub taipei_address: String,
    pub miaoli_address: String,
    pub tax_id: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            taipei_phone: TAIPEI_PHONE.to_string(),
            miaoli_phone: MIAOLI_PHONE.to_string(),
            taipei_address: TAIPEI_ADDRESS.to_string(),
            miaoli_address: MIAOLI_ADDRESS.to_string(),
            tax_id: TAX_ID.to_string(),
        }
    }
}

/// Y coordinate of the `index`-th surviving contact row.
pub fn row_y(index: usize) -> f32 {
    ROW_BASE_Y + index as f32 * ROW_GAP
}
