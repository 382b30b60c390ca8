/// Whether geometry targets the interactive screen view or a print-style
/// export rendition with tighter spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Screen,
    Export,
}

/// Layout constants for one render mode, all in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Axis band at the top of the chart.
    pub header_height: f32,
    pub padding_left: f32,
    pub padding_right: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
    /// Height of one sub-package bar.
    pub sub_bar_height: f32,
    /// Vertical gap between stacked sub-package bars.
    pub sub_stack_gap: f32,
    /// Padding above and below a sub-package stack.
    pub stack_padding: f32,
    /// Height of the thin work-package summary bar.
    pub package_bar_height: f32,
    /// Title line above the summary bar.
    pub label_height: f32,
    /// Gap between title, summary bar and the stack below.
    pub label_gap: f32,
    /// Extra space closing off each work-package row.
    pub row_padding: f32,
    /// Milestone diamonds sit this far above the bottom edge.
    pub milestone_offset: f32,
    /// Room below the rows for milestone labels.
    pub footer_height: f32,
    /// The drawing never gets narrower than this in export mode.
    pub min_width: f32,
}

impl Metrics {
    pub fn screen() -> Self {
        let sub_bar_height = 28.0;
        Self {
            header_height: 90.0,
            padding_left: 40.0,
            padding_right: 40.0,
            padding_top: 20.0,
            padding_bottom: 20.0,
            sub_bar_height,
            sub_stack_gap: 16.0,
            stack_padding: 8.0,
            package_bar_height: (sub_bar_height * 0.6).max(10.0),
            label_height: 24.0,
            label_gap: 12.0,
            row_padding: 35.0,
            milestone_offset: 60.0,
            footer_height: 60.0,
            min_width: 0.0,
        }
    }

    /// Export constants: smaller bars and header so dense plans fit a page.
    pub fn export() -> Self {
        let sub_bar_height = 22.0;
        Self {
            header_height: 50.0,
            sub_bar_height,
            sub_stack_gap: 12.0,
            package_bar_height: (sub_bar_height * 0.45).max(6.0),
            min_width: 640.0,
            ..Self::screen()
        }
    }

    pub fn for_mode(mode: RenderMode) -> Self {
        match mode {
            RenderMode::Screen => Self::screen(),
            RenderMode::Export => Self::export(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_metrics_are_tighter_than_screen() {
        let screen = Metrics::screen();
        let export = Metrics::export();
        assert!(export.header_height < screen.header_height);
        assert!(export.sub_bar_height < screen.sub_bar_height);
        assert!(export.sub_stack_gap < screen.sub_stack_gap);
        assert!(export.package_bar_height < screen.package_bar_height);
        assert_eq!(export.min_width, 640.0);
        // Horizontal margins stay identical so dates line up across modes.
        assert_eq!(export.padding_left, screen.padding_left);
        assert_eq!(export.padding_right, screen.padding_right);
    }
}
