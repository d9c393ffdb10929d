use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};

/// Fields the user may switch on or off. Names, titles, email and tax ID are forced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalField {
    Mobile,
    MiaoliPhone,
    TaipeiPhone,
    MiaoliAddress,
    TaipeiAddress,
    Department,
}

impl OptionalField {
    /// Order in which the toggles are presented.
    pub const ALL: [OptionalField; 6] = [
        OptionalField::Mobile,
        OptionalField::MiaoliPhone,
        OptionalField::TaipeiPhone,
        OptionalField::MiaoliAddress,
        OptionalField::TaipeiAddress,
        OptionalField::Department,
    ];

    pub fn key(self) -> &'static str {
        match self {
            OptionalField::Mobile => "mobile",
            OptionalField::MiaoliPhone => "miaoli-phone",
            OptionalField::TaipeiPhone => "taipei-phone",
            OptionalField::MiaoliAddress => "miaoli-address",
            OptionalField::TaipeiAddress => "taipei-address",
            OptionalField::Department => "department",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OptionalField::Mobile => "手機",
            OptionalField::MiaoliPhone => "苗栗電話",
            OptionalField::TaipeiPhone => "台北電話",
            OptionalField::MiaoliAddress => "苗栗地址",
            OptionalField::TaipeiAddress => "台北地址",
            OptionalField::Department => "部門",
        }
    }
}

impl fmt::Display for OptionalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for OptionalField {
    type Err = anyhow::Error;

    /// Accepts the kebab-case key or the Chinese label.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        OptionalField::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(wanted) || field.label() == wanted)
            .ok_or_else(|| anyhow!("unknown field '{}'", s))
    }
}

/// Visibility flag per [`OptionalField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldVisibility {
    pub mobile: bool,
    pub miaoli_phone: bool,
    pub taipei_phone: bool,
    pub miaoli_address: bool,
    pub taipei_address: bool,
    pub department: bool,
}

impl Default for FieldVisibility {
    fn default() -> Self {
        Self {
            mobile: false,
            miaoli_phone: true,
            taipei_phone: true,
            miaoli_address: true,
            taipei_address: true,
            department: true,
        }
    }
}

impl FieldVisibility {
    /// Every optional field switched off.
    pub fn none() -> Self {
        Self {
            mobile: false,
            miaoli_phone: false,
            taipei_phone: false,
            miaoli_address: false,
            taipei_address: false,
            department: false,
        }
    }

    pub fn is_visible(&self, field: OptionalField) -> bool {
        *self.slot(field)
    }

    pub fn set(&mut self, field: OptionalField, visible: bool) {
        *self.slot_mut(field) = visible;
    }

    /// Flip one flag and return its new value.
    pub fn toggle(&mut self, field: OptionalField) -> bool {
        let slot = self.slot_mut(field);
        *slot = !*slot;
        *slot
    }

    fn slot(&self, field: OptionalField) -> &bool {
        match field {
            OptionalField::Mobile => &self.mobile,
            OptionalField::MiaoliPhone => &self.miaoli_phone,
            OptionalField::TaipeiPhone => &self.taipei_phone,
            OptionalField::MiaoliAddress => &self.miaoli_address,
            OptionalField::TaipeiAddress => &self.taipei_address,
            OptionalField::Department => &self.department,
        }
    }

    fn slot_mut(&mut self, field: OptionalField) -> &mut bool {
        match field {
            OptionalField::Mobile => &mut self.mobile,
            OptionalField::MiaoliPhone => &mut self.miaoli_phone,
            OptionalField::TaipeiPhone => &mut self.taipei_phone,
            OptionalField::MiaoliAddress => &mut self.miaoli_address,
            OptionalField::TaipeiAddress => &mut self.taipei_address,
            OptionalField::Department => &mut self.department,
        }
    }
}

/// User-supplied text that does not come from the directory.
///
/// `mobile` is expected to be formatted already; empty strings mean absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overrides {
    pub mobile: String,
    pub messaging_id: String,
    pub show_miaoli_extension: bool,
}

impl Default for Overrides {
    fn default() -> Self {
        Self {
            mobile: String::new(),
            messaging_id: String::new(),
            show_miaoli_extension: true,
        }
    }
}

/// Group mobile digits as `XXXX-XXX-XXX`.
///
/// Only the first ten digits are considered. Anything that does not yield
/// exactly ten digits is passed through untouched.
pub fn format_mobile(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(|ch| ch.is_ascii_digit())
        .take(10)
        .collect();
    if digits.len() != 10 {
        return input.to_string();
    }
    format!("{}-{}-{}", &digits[..4], &digits[4..7], &digits[7..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_hide_only_mobile() {
        let vis = FieldVisibility::default();
        for field in OptionalField::ALL {
            assert_eq!(vis.is_visible(field), field != OptionalField::Mobile);
        }
    }

    #[test]
    fn toggle_flips_single_flag() {
        let mut vis = FieldVisibility::default();
        assert!(!vis.toggle(OptionalField::TaipeiAddress));
        assert!(!vis.taipei_address);
        assert!(vis.miaoli_address);
        assert!(vis.toggle(OptionalField::TaipeiAddress));
    }

    #[test]
    fn parses_keys_and_labels() {
        assert_eq!(
            "Miaoli-Phone".parse::<OptionalField>().unwrap(),
            OptionalField::MiaoliPhone
        );
        assert_eq!("部門".parse::<OptionalField>().unwrap(), OptionalField::Department);
        assert!("fax".parse::<OptionalField>().is_err());
    }

    #[test]
    fn formats_ten_digit_mobiles() {
        assert_eq!(format_mobile("0912345678"), "0912-345-678");
        assert_eq!(format_mobile("0912 345 678"), "0912-345-678");
        assert_eq!(format_mobile("0912-345-6789"), "0912-345-678");
    }

    #[test]
    fn passes_short_mobiles_through() {
        assert_eq!(format_mobile("0912-34"), "0912-34");
        assert_eq!(format_mobile(""), "");
        assert_eq!(format_mobile("n/a"), "n/a");
    }
}
