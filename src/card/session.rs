use crate::card::compose::{FrontFace, compose_front};
use crate::card::directory::{Directory, LookupError, extract_id};
use crate::card::employee::EmployeeRecord;
use crate::card::fields::{FieldVisibility, OptionalField, Overrides, format_mobile};
use crate::card::flip::{FlipController, Orientation};
use crate::card::layout::CompanyProfile;
use crate::card::title::TextMeasure;

/// Message shown when a suggestion search matches nothing.
pub const NO_SUGGESTIONS: &str = "查無此員工，請確認編號或姓名";
/// File stem used when the selected employee has no Chinese name.
pub const DEFAULT_EXPORT_STEM: &str = "card";

/// All state behind one card preview.
///
/// The mobile text drives its visibility flag one way only: entering text
/// switches the flag on, clearing the text leaves the flag alone.
#[derive(Debug, Clone)]
pub struct CardSession {
    selected: Option<EmployeeRecord>,
    fields: FieldVisibility,
    mobile_input: String,
    messaging_id: String,
    show_miaoli_extension: bool,
    flip: FlipController,
    message: Option<String>,
}

impl Default for CardSession {
    fn default() -> Self {
        Self {
            selected: None,
            fields: FieldVisibility::default(),
            mobile_input: String::new(),
            messaging_id: String::new(),
            show_miaoli_extension: true,
            flip: FlipController::new(),
            message: None,
        }
    }
}

impl CardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&EmployeeRecord> {
        self.selected.as_ref()
    }

    pub fn fields(&self) -> &FieldVisibility {
        &self.fields
    }

    pub fn mobile_input(&self) -> &str {
        &self.mobile_input
    }

    pub fn messaging_id(&self) -> &str {
        &self.messaging_id
    }

    pub fn orientation(&self) -> Orientation {
        self.flip.orientation()
    }

    /// Last user-visible message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Exact search. A miss clears the current selection and keeps the message.
    ///
    /// Mobile and LINE ID input survive a search; only [`select`](Self::select)
    /// clears them.
    pub fn search<'d>(
        &mut self,
        directory: &'d Directory,
        query: &str,
    ) -> Result<&'d EmployeeRecord, LookupError> {
        match directory.resolve(&extract_id(query)) {
            Ok(record) => {
                self.show(record.clone());
                Ok(record)
            }
            Err(err) => {
                log::debug!("lookup of '{}' failed: {}", query.trim(), err);
                self.selected = None;
                self.message = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Suggestion listing for the search box.
    pub fn suggest<'d>(
        &mut self,
        directory: &'d Directory,
        query: &str,
        limit: usize,
    ) -> Vec<&'d EmployeeRecord> {
        let matches = directory.suggest(query, limit);
        self.message = if matches.is_empty() && !query.trim().is_empty() {
            Some(NO_SUGGESTIONS.to_string())
        } else {
            None
        };
        matches
    }

    /// Pick a suggestion: show the record and clear per-employee input.
    pub fn select(&mut self, record: EmployeeRecord) {
        self.mobile_input.clear();
        self.messaging_id.clear();
        self.show(record);
    }

    fn show(&mut self, record: EmployeeRecord) {
        log::debug!("selected {}", record.id);
        self.selected = Some(record);
        self.flip.reset();
        self.message = None;
    }

    pub fn set_mobile_input(&mut self, text: impl Into<String>) {
        self.mobile_input = text.into();
        if !self.mobile_input.trim().is_empty() {
            self.fields.mobile = true;
        }
    }

    pub fn set_messaging_id(&mut self, text: impl Into<String>) {
        self.messaging_id = text.into();
    }

    pub fn toggle_field(&mut self, field: OptionalField) -> bool {
        self.fields.toggle(field)
    }

    pub fn set_field(&mut self, field: OptionalField, visible: bool) {
        self.fields.set(field, visible);
    }

    pub fn set_miaoli_extension_visible(&mut self, visible: bool) {
        self.show_miaoli_extension = visible;
    }

    pub fn click(&mut self) -> Orientation {
        self.flip.click()
    }

    pub fn pointer_down(&mut self, pointer: u32, x: f32) {
        self.flip.pointer_down(pointer, x);
    }

    pub fn pointer_up(&mut self, pointer: u32, x: f32) -> bool {
        self.flip.pointer_up(pointer, x)
    }

    /// Overrides as fed to the composer, with the mobile number formatted.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            mobile: format_mobile(self.mobile_input.trim()),
            messaging_id: self.messaging_id.clone(),
            show_miaoli_extension: self.show_miaoli_extension,
        }
    }

    /// Compose the front face for the current selection.
    pub fn front_face<M: TextMeasure + ?Sized>(
        &self,
        company: &CompanyProfile,
        measure: &M,
    ) -> Option<FrontFace> {
        let employee = self.selected.as_ref()?;
        Some(compose_front(
            employee,
            &self.fields,
            &self.overrides(),
            company,
            measure,
        ))
    }

    /// `<Chinese name>.png`, or `card.png` when there is no name.
    pub fn export_file_name(&self) -> String {
        let stem = self
            .selected
            .as_ref()
            .map(|e| e.name_zh.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_EXPORT_STEM);
        format!("{}.png", sanitize_file_stem(stem))
    }
}

fn sanitize_file_stem(stem: &str) -> String {
    stem.chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::layout::{FontClass, RowKind};

    struct Narrow;

    impl TextMeasure for Narrow {
        fn measure(&self, text: &str, _font: FontClass, _size: f32) -> f32 {
            text.len() as f32
        }
    }

    fn directory() -> Directory {
        Directory::from_json(
            r#"[
                {"員工編號": "E0007", "員工姓名(中)": "王小明", "員工姓名(英)": "Ming Wang",
                 "職位(中)": "工程師", "職位(英)": "Engineer", "信箱": "ming@example.com"},
                {"員工編號": "E0008", "員工姓名(中)": "", "員工姓名(英)": "Anon"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn mobile_text_switches_flag_on_and_keeps_it() {
        let mut session = CardSession::new();
        assert!(!session.fields().mobile);
        session.set_mobile_input("0912345678");
        assert!(session.fields().mobile);
        session.set_mobile_input("");
        assert!(session.fields().mobile);
    }

    #[test]
    fn blank_mobile_text_does_not_switch_flag() {
        let mut session = CardSession::new();
        session.set_mobile_input("   ");
        assert!(!session.fields().mobile);
    }

    #[test]
    fn search_miss_clears_selection_and_keeps_message() {
        let dir = directory();
        let mut session = CardSession::new();
        session.search(&dir, "e0007").unwrap();
        assert!(session.selected().is_some());
        assert!(session.message().is_none());

        let err = session.search(&dir, "E9999").unwrap_err();
        assert!(matches!(err, LookupError::NotFound(_)));
        assert!(session.selected().is_none());
        assert_eq!(
            session.message(),
            Some("員工編號錯誤或尚未建檔，請確認員工編號或聯繫資安課")
        );

        assert_eq!(session.search(&dir, "").unwrap_err(), LookupError::EmptyQuery);
        assert_eq!(session.message(), Some("請輸入員工編號"));
    }

    #[test]
    fn search_accepts_full_suggestion_line() {
        let dir = directory();
        let mut session = CardSession::new();
        let found = session.search(&dir, "E0007 王小明 Ming Wang").unwrap();
        assert_eq!(found.id, "E0007");
    }

    #[test]
    fn empty_suggestions_set_message() {
        let dir = directory();
        let mut session = CardSession::new();
        assert!(session.suggest(&dir, "nobody", 20).is_empty());
        assert_eq!(session.message(), Some(NO_SUGGESTIONS));
        assert_eq!(session.suggest(&dir, "ming", 20).len(), 1);
        assert!(session.message().is_none());
    }

    #[test]
    fn picking_a_suggestion_resets_face_and_overrides() {
        let dir = directory();
        let mut session = CardSession::new();
        session.search(&dir, "E0007").unwrap();
        session.set_mobile_input("0912345678");
        session.set_messaging_id("ming.w");
        session.click();
        assert_eq!(session.orientation(), Orientation::Back);

        let next = dir.resolve("E0008").unwrap().clone();
        session.select(next);
        assert_eq!(session.selected().map(|e| e.id.as_str()), Some("E0008"));
        assert_eq!(session.orientation(), Orientation::Front);
        assert!(session.mobile_input().is_empty());
        assert!(session.messaging_id().is_empty());
        assert!(session.fields().mobile);
    }

    #[test]
    fn exact_search_keeps_typed_overrides() {
        let dir = directory();
        let mut session = CardSession::new();
        session.search(&dir, "E0007").unwrap();
        session.set_mobile_input("0912345678");
        session.set_messaging_id("ming.w");
        session.click();

        session.search(&dir, "E0008").unwrap();
        assert_eq!(session.orientation(), Orientation::Front);
        assert_eq!(session.mobile_input(), "0912345678");
        assert_eq!(session.messaging_id(), "ming.w");
        assert_eq!(session.overrides().mobile, "0912-345-678");
    }

    #[test]
    fn front_face_uses_formatted_mobile() {
        let dir = directory();
        let mut session = CardSession::new();
        assert!(session.front_face(&CompanyProfile::default(), &Narrow).is_none());
        session.search(&dir, "E0007").unwrap();
        session.set_mobile_input("0912345678");
        let face = session
            .front_face(&CompanyProfile::default(), &Narrow)
            .unwrap();
        assert_eq!(face.rows[0].kind, RowKind::Mobile);
        assert_eq!(face.rows[0].text, "手機：0912-345-678");
    }

    #[test]
    fn export_name_falls_back_to_default() {
        let dir = directory();
        let mut session = CardSession::new();
        assert_eq!(session.export_file_name(), "card.png");
        session.search(&dir, "E0007").unwrap();
        assert_eq!(session.export_file_name(), "王小明.png");
        session.search(&dir, "E0008").unwrap();
        assert_eq!(session.export_file_name(), "card.png");
    }

    #[test]
    fn drag_through_session_flips() {
        let mut session = CardSession::new();
        session.pointer_down(7, 10.0);
        assert!(session.pointer_up(7, 80.0));
        assert_eq!(session.orientation(), Orientation::Back);
    }
}
