use serde::{Deserialize, Serialize};

/// Which language variant of a bilingual field to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Chinese,
    English,
}

/// Single employee entry from the directory snapshot.
///
/// Keys follow the directory's native column names. Absent columns
/// deserialize to empty strings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct EmployeeRecord {
    #[serde(rename = "員工編號", alias = "id")]
    pub id: String,
    #[serde(rename = "員工姓名(中)", alias = "name_zh", default)]
    pub name_zh: String,
    #[serde(rename = "員工姓名(英)", alias = "name_en", default)]
    pub name_en: String,
    #[serde(rename = "部門(中)", alias = "department_zh", default)]
    pub department_zh: String,
    #[serde(rename = "部門(英)", alias = "department_en", default)]
    pub department_en: String,
    #[serde(rename = "職位(中)", alias = "title_zh", default)]
    pub title_zh: String,
    #[serde(rename = "職位(英)", alias = "title_en", default)]
    pub title_en: String,
    #[serde(rename = "信箱", alias = "email", default)]
    pub email: String,
    #[serde(rename = "手機", alias = "mobile", default)]
    pub mobile: String,
    #[serde(rename = "分機(苗栗)", alias = "miaoli_extension", default)]
    pub miaoli_extension: String,
    #[serde(rename = "分機(台北)", alias = "taipei_extension", default)]
    pub taipei_extension: String,
}

impl EmployeeRecord {
    pub fn name(&self, language: Language) -> &str {
        match language {
            Language::Chinese => &self.name_zh,
            Language::English => &self.name_en,
        }
    }

    pub fn title(&self, language: Language) -> &str {
        match language {
            Language::Chinese => &self.title_zh,
            Language::English => &self.title_en,
        }
    }

    pub fn department(&self, language: Language) -> &str {
        match language {
            Language::Chinese => &self.department_zh,
            Language::English => &self.department_en,
        }
    }

    /// One-line label used in suggestion listings and the search box.
    pub fn display_line(&self) -> String {
        format!("{} {} {}", self.id, self.name_zh, self.name_en)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_native_column_names() {
        let raw = r#"{
            "員工編號": "E0007",
            "員工姓名(中)": "王小明",
            "員工姓名(英)": "Ming Wang",
            "職位(中)": "工程師",
            "職位(英)": "Engineer",
            "分機(苗栗)": "123"
        }"#;
        let record: EmployeeRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.id, "E0007");
        assert_eq!(record.name(Language::Chinese), "王小明");
        assert_eq!(record.title(Language::English), "Engineer");
        assert_eq!(record.miaoli_extension, "123");
        assert!(record.email.is_empty());
        assert!(record.department(Language::Chinese).is_empty());
    }

    #[test]
    fn accepts_english_aliases() {
        let raw = r#"{"id": "E0100", "name_zh": "林", "email": "lin@example.com"}"#;
        let record: EmployeeRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.id, "E0100");
        assert_eq!(record.email, "lin@example.com");
        assert_eq!(record.display_line(), "E0100 林 ");
    }
}
