use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::date;

/// How a work package's displayed range is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleMode {
    /// The range rolls up from the sub-packages on every read.
    Auto,
    /// The stored range is authoritative and may constrain the sub-packages.
    Manual,
}

/// A task bar nested inside a work package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubPackage {
    pub id: Uuid,
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Optional category tag shown next to the bar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Optional color override (stored as RGBA). Without it the bar takes
    /// the palette color of its row.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_color_serde")]
    pub color: Option<Color32>,
    /// Optional list of assigned people.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
}

impl SubPackage {
    pub fn new(title: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            start,
            end,
            category: None,
            color: None,
            assignees: None,
        }
    }
}

/// A top-level schedulable item owning an ordered stack of sub-packages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkPackage {
    pub id: Uuid,
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub mode: ScheduleMode,
    #[serde(default)]
    pub sub_packages: Vec<SubPackage>,
    /// Collapsed packages hide their sub-package stack on the chart.
    #[serde(default)]
    pub collapsed: bool,
}

impl WorkPackage {
    pub fn new(title: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            start,
            end,
            mode: ScheduleMode::Auto,
            sub_packages: Vec::new(),
            collapsed: false,
        }
    }

    /// The range the chart displays for this package.
    ///
    /// Auto mode derives it from the sub-packages on every call and never
    /// writes it back; a childless auto package falls back to its stored
    /// dates. Manual mode always answers the stored dates.
    pub fn effective_range(&self) -> (NaiveDate, NaiveDate) {
        if self.mode == ScheduleMode::Manual || self.sub_packages.is_empty() {
            return (self.start, self.end);
        }
        let start = date::min_date(self.sub_packages.iter().map(|sp| sp.start));
        let end = date::max_date(self.sub_packages.iter().map(|sp| sp.end));
        (start.unwrap_or(self.start), end.unwrap_or(self.end))
    }

    pub fn sub_package(&self, id: Uuid) -> Option<&SubPackage> {
        self.sub_packages.iter().find(|sp| sp.id == id)
    }
}

/// Serde helper for an optional `Color32`.
mod opt_color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Option<Color32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match color {
            Some(c) => [c.r(), c.g(), c.b(), c.a()].serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rgba: [u8; 4] = Deserialize::deserialize(deserializer)?;
        Ok(Some(Color32::from_rgba_premultiplied(
            rgba[0], rgba[1], rgba[2], rgba[3],
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        date::parse_date(s).unwrap()
    }

    #[test]
    fn auto_range_rolls_up_from_sub_packages() {
        let mut wp = WorkPackage::new("Build", date("2023-05-01"), date("2023-05-02"));
        wp.sub_packages.push(SubPackage::new("Frame", date("2023-04-10"), date("2023-04-20")));
        wp.sub_packages.push(SubPackage::new("Roof", date("2023-04-15"), date("2023-05-10")));

        assert_eq!(wp.effective_range(), (date("2023-04-10"), date("2023-05-10")));
        // Derived on read only; the stored dates stay put.
        assert_eq!(wp.start, date("2023-05-01"));
        assert_eq!(wp.end, date("2023-05-02"));
    }

    #[test]
    fn childless_auto_package_falls_back_to_stored_dates() {
        let wp = WorkPackage::new("Empty", date("2023-05-01"), date("2023-05-20"));
        assert_eq!(wp.mode, ScheduleMode::Auto);
        assert_eq!(wp.effective_range(), (date("2023-05-01"), date("2023-05-20")));
    }

    #[test]
    fn manual_range_ignores_sub_packages() {
        let mut wp = WorkPackage::new("Fixed", date("2023-05-01"), date("2023-05-31"));
        wp.mode = ScheduleMode::Manual;
        wp.sub_packages.push(SubPackage::new("Stray", date("2023-01-01"), date("2023-12-31")));

        assert_eq!(wp.effective_range(), (date("2023-05-01"), date("2023-05-31")));
    }
}
