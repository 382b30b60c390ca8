/// User-facing timeline resolution. `Auto` picks a preset from the span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    #[default]
    Auto,
    Week,
    Month,
    Quarter,
    Year,
}

/// Granularity of the axis tick labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Week,
    Month,
    Quarter,
    Year,
}

/// Concrete drawing parameters for one resolution preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleConfig {
    /// Days between axis ticks.
    pub tick_days: i64,
    /// Minimum horizontal density; the layout stretches this to fill the
    /// container when there is room.
    pub pixels_per_day: f32,
    pub label: LabelKind,
}

pub const WEEK: ScaleConfig = ScaleConfig {
    tick_days: 7,
    pixels_per_day: 24.0,
    label: LabelKind::Week,
};

pub const MONTH: ScaleConfig = ScaleConfig {
    tick_days: 30,
    pixels_per_day: 18.0,
    label: LabelKind::Month,
};

pub const QUARTER: ScaleConfig = ScaleConfig {
    tick_days: 90,
    pixels_per_day: 12.0,
    label: LabelKind::Quarter,
};

pub const YEAR: ScaleConfig = ScaleConfig {
    tick_days: 365,
    pixels_per_day: 8.0,
    label: LabelKind::Year,
};

impl Resolution {
    pub const ALL: [Resolution; 5] = [
        Resolution::Auto,
        Resolution::Week,
        Resolution::Month,
        Resolution::Quarter,
        Resolution::Year,
    ];

    /// Resolve to a concrete preset for a timeline spanning `span_days`.
    ///
    /// Pure function of the selection and the span: `Auto` answers month up
    /// to 160 days, quarter up to 320, year beyond that.
    pub fn resolve(self, span_days: i64) -> ScaleConfig {
        match self {
            Resolution::Week => WEEK,
            Resolution::Month => MONTH,
            Resolution::Quarter => QUARTER,
            Resolution::Year => YEAR,
            Resolution::Auto => {
                if span_days <= 160 {
                    MONTH
                } else if span_days <= 320 {
                    QUARTER
                } else {
                    YEAR
                }
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Resolution::Auto => "Auto",
            Resolution::Week => "Week",
            Resolution::Month => "Month",
            Resolution::Quarter => "Quarter",
            Resolution::Year => "Year",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_picks_preset_from_span() {
        assert_eq!(Resolution::Auto.resolve(1), MONTH);
        assert_eq!(Resolution::Auto.resolve(160), MONTH);
        assert_eq!(Resolution::Auto.resolve(161), QUARTER);
        assert_eq!(Resolution::Auto.resolve(320), QUARTER);
        assert_eq!(Resolution::Auto.resolve(321), YEAR);
        assert_eq!(Resolution::Auto.resolve(5_000), YEAR);
    }

    #[test]
    fn explicit_selection_ignores_span() {
        assert_eq!(Resolution::Week.resolve(5_000), WEEK);
        assert_eq!(Resolution::Month.resolve(5_000), MONTH);
        assert_eq!(Resolution::Quarter.resolve(1), QUARTER);
        assert_eq!(Resolution::Year.resolve(1), YEAR);
    }

    #[test]
    fn presets_keep_density_and_tick_pairing() {
        for config in [WEEK, MONTH, QUARTER, YEAR] {
            assert!(config.tick_days > 0);
            assert!(config.pixels_per_day > 0.0);
        }
        assert!(WEEK.pixels_per_day > MONTH.pixels_per_day);
        assert!(MONTH.pixels_per_day > QUARTER.pixels_per_day);
        assert!(QUARTER.pixels_per_day > YEAR.pixels_per_day);
    }
}
