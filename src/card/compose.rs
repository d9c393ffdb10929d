use serde::Serialize;

use crate::card::employee::{EmployeeRecord, Language};
use crate::card::fields::{FieldVisibility, Overrides};
use crate::card::layout::{
    Anchor, CompanyProfile, FontClass, ICON_OFFSET_X, Icon, NAME_CENTER_X, NAME_EN_MAX_WIDTH,
    NAME_EN_SIZE, NAME_EN_Y, NAME_ZH_SIZE, NAME_ZH_Y, ROW_FONT_SIZE, ROW_LEFT, RowKind, row_y,
};
use crate::card::title::{TextLine, TextMeasure, compose_title_line};

/// One contact row ready to be painted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderableRow {
    pub kind: RowKind,
    pub label: &'static str,
    /// Label prefix followed by the value.
    pub text: String,
    pub icon: Icon,
    pub font: FontClass,
    pub x: f32,
    pub y: f32,
}

impl RenderableRow {
    pub fn icon_x(&self) -> f32 {
        self.x + ICON_OFFSET_X
    }

    pub fn size(&self) -> f32 {
        ROW_FONT_SIZE
    }
}

/// Everything drawn on the front face.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrontFace {
    pub name_zh: TextLine,
    pub name_en: TextLine,
    pub title_zh: Vec<TextLine>,
    pub title_en: Vec<TextLine>,
    pub rows: Vec<RenderableRow>,
}

impl FrontFace {
    /// All text runs except the contact rows, in paint order.
    pub fn header_lines(&self) -> impl Iterator<Item = &TextLine> {
        std::iter::once(&self.name_zh)
            .chain(std::iter::once(&self.name_en))
            .chain(self.title_zh.iter())
            .chain(self.title_en.iter())
    }
}

/// Build the contact rows in their fixed order, dropping the ones switched off.
///
/// Surviving rows are packed without gaps starting at the first row slot.
pub fn compose_rows(
    employee: &EmployeeRecord,
    fields: &FieldVisibility,
    overrides: &Overrides,
    company: &CompanyProfile,
) -> Vec<RenderableRow> {
    let miaoli_phone = if overrides.show_miaoli_extension && !employee.miaoli_extension.is_empty()
    {
        format!("{} ext.{}", company.miaoli_phone, employee.miaoli_extension)
    } else {
        company.miaoli_phone.clone()
    };

    let candidates: [(RowKind, bool, &str); 8] = [
        (
            RowKind::Mobile,
            fields.mobile && !overrides.mobile.is_empty(),
            overrides.mobile.as_str(),
        ),
        (RowKind::MiaoliPhone, fields.miaoli_phone, miaoli_phone.as_str()),
        (
            RowKind::TaipeiPhone,
            fields.taipei_phone,
            company.taipei_phone.as_str(),
        ),
        (
            RowKind::Email,
            !employee.email.is_empty(),
            employee.email.as_str(),
        ),
        (RowKind::TaxId, true, company.tax_id.as_str()),
        (
            RowKind::MiaoliAddress,
            fields.miaoli_address,
            company.miaoli_address.as_str(),
        ),
        (
            RowKind::TaipeiAddress,
            fields.taipei_address,
            company.taipei_address.as_str(),
        ),
        (
            RowKind::MessagingId,
            !overrides.messaging_id.is_empty(),
            overrides.messaging_id.as_str(),
        ),
    ];

    let rows: Vec<RenderableRow> = candidates
        .into_iter()
        .filter(|(_, included, _)| *included)
        .enumerate()
        .map(|(index, (kind, _, value))| {
            let style = kind.style();
            RenderableRow {
                kind,
                label: style.prefix,
                text: format!("{}{}", style.prefix, value),
                icon: style.icon,
                font: style.font,
                x: ROW_LEFT,
                y: row_y(index),
            }
        })
        .collect();
    log::debug!("composed {} contact rows for {}", rows.len(), employee.id);
    rows
}

/// Compose the full front face: names, both title lines and the contact rows.
pub fn compose_front<M: TextMeasure + ?Sized>(
    employee: &EmployeeRecord,
    fields: &FieldVisibility,
    overrides: &Overrides,
    company: &CompanyProfile,
    measure: &M,
) -> FrontFace {
    let title = |language: Language| {
        compose_title_line(
            employee.department(language),
            employee.title(language),
            fields.department,
            language,
            measure,
        )
    };
    FrontFace {
        name_zh: TextLine {
            text: employee.name_zh.clone(),
            x: NAME_CENTER_X,
            y: NAME_ZH_Y,
            size: NAME_ZH_SIZE,
            font: FontClass::Cjk,
            anchor: Anchor::Center,
            max_width: None,
        },
        name_en: TextLine {
            text: employee.name_en.clone(),
            x: NAME_CENTER_X,
            y: NAME_EN_Y,
            size: NAME_EN_SIZE,
            font: FontClass::Latin,
            anchor: Anchor::Center,
            max_width: Some(NAME_EN_MAX_WIDTH),
        },
        title_zh: title(Language::Chinese),
        title_en: title(Language::English),
        rows: compose_rows(employee, fields, overrides, company),
    }
}
