//! Shared clap helper types for CLI commands.

use clap::{Args, ValueEnum};
use namecard::{CardSession, OptionalField, Orientation};

/// Optional card fields as accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldArg {
    Mobile,
    MiaoliPhone,
    TaipeiPhone,
    MiaoliAddress,
    TaipeiAddress,
    Department,
}

impl From<FieldArg> for OptionalField {
    fn from(value: FieldArg) -> OptionalField {
        match value {
            FieldArg::Mobile => OptionalField::Mobile,
            FieldArg::MiaoliPhone => OptionalField::MiaoliPhone,
            FieldArg::TaipeiPhone => OptionalField::TaipeiPhone,
            FieldArg::MiaoliAddress => OptionalField::MiaoliAddress,
            FieldArg::TaipeiAddress => OptionalField::TaipeiAddress,
            FieldArg::Department => OptionalField::Department,
        }
    }
}

/// Which face(s) to export.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceArg {
    Front,
    Back,
    Both,
}

impl FaceArg {
    pub fn orientations(self) -> Vec<Orientation> {
        match self {
            FaceArg::Front => vec![Orientation::Front],
            FaceArg::Back => vec![Orientation::Back],
            FaceArg::Both => vec![Orientation::Front, Orientation::Back],
        }
    }
}

/// Card content flags shared by `preview` and `render`.
#[derive(Args, Debug, Clone)]
pub struct CardArgs {
    /// Employee id or full suggestion line (e.g. `E0007`).
    pub query: String,
    /// Mobile number to print; switches the mobile field on.
    #[arg(long)]
    pub mobile: Option<String>,
    /// LINE ID to print.
    #[arg(long = "line-id")]
    pub line_id: Option<String>,
    /// Show an optional field (repeatable).
    #[arg(long = "show", value_enum)]
    pub show: Vec<FieldArg>,
    /// Hide an optional field (repeatable).
    #[arg(long = "hide", value_enum)]
    pub hide: Vec<FieldArg>,
    /// Omit the Miaoli extension after the office number.
    #[arg(long = "no-miaoli-ext")]
    pub no_miaoli_ext: bool,
}

impl CardArgs {
    /// Apply the flags to a session that already has an employee selected.
    ///
    /// Text comes first so that an explicit `--hide mobile` still wins.
    pub fn apply(&self, session: &mut CardSession) {
        if let Some(mobile) = &self.mobile {
            session.set_mobile_input(mobile.as_str());
        }
        if let Some(line_id) = &self.line_id {
            session.set_messaging_id(line_id.as_str());
        }
        for field in &self.show {
            session.set_field((*field).into(), true);
        }
        for field in &self.hide {
            session.set_field((*field).into(), false);
        }
        session.set_miaoli_extension_visible(!self.no_miaoli_ext);
    }
}
