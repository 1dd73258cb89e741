//! Projection of a nutrition snapshot into chart bars and alerts.

use crate::models::NutritionSnapshot;

/// Percentage drawn at full chart height
pub const AXIS_CEILING: f64 = 200.0;

#[derive(Debug, Clone, PartialEq)]
pub struct NutrientBar {
    pub nutrient: String,
    pub percentage: f64,
    /// Share of the chart height, 0 to 100
    pub height: f64,
}

impl NutrientBar {
    pub fn label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Warning,
}

impl AlertKind {
    pub fn class(self) -> &'static str {
        match self {
            AlertKind::Info => "alert alert-info",
            AlertKind::Warning => "alert alert-warning",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutritionReport {
    pub bars: Vec<NutrientBar>,
    pub infos: Vec<String>,
    pub warnings: Vec<String>,
}

impl NutritionReport {
    pub fn project(snapshot: &NutritionSnapshot) -> Self {
        let bars = snapshot
            .nutrient_percentages
            .iter()
            .map(|(nutrient, &percentage)| NutrientBar {
                nutrient: display_name(nutrient),
                percentage,
                height: (percentage / AXIS_CEILING * 100.0).clamp(0.0, 100.0),
            })
            .collect();

        let warnings = snapshot
            .potential_deficiencies
            .iter()
            .filter(|(_, flagged)| **flagged)
            .map(|(nutrient, _)| {
                let percentage = snapshot
                    .nutrient_percentages
                    .get(nutrient)
                    .copied()
                    .unwrap_or(0.0);
                format!(
                    "Low {} intake: {:.1}% of daily recommended value",
                    display_name(nutrient),
                    percentage
                )
            })
            .collect();

        Self {
            bars,
            infos: snapshot.recommendations.clone(),
            warnings,
        }
    }

    /// Recommendations first, then deficiency warnings
    pub fn alerts(&self) -> Vec<(AlertKind, String)> {
        let infos = self.infos.iter().map(|text| (AlertKind::Info, text.clone()));
        let warnings = self.warnings.iter().map(|text| (AlertKind::Warning, text.clone()));
        infos.chain(warnings).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty() && self.infos.is_empty() && self.warnings.is_empty()
    }
}

fn display_name(nutrient: &str) -> String {
    nutrient.replacen('_', " ", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(json: &str) -> NutritionSnapshot {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_iron_deficiency_projection() {
        let report = NutritionReport::project(&snapshot(
            r#"{"nutrientPercentages":{"iron":45},"potentialDeficiencies":{"iron":true},
                "recommendations":["Eat more leafy greens"]}"#,
        ));

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("iron"));
        assert!(report.warnings[0].contains("45.0%"));
        assert_eq!(report.infos, vec!["Eat more leafy greens".to_string()]);
    }

    #[test]
    fn test_recommendations_come_before_warnings() {
        let report = NutritionReport::project(&snapshot(
            r#"{"nutrientPercentages":{"iron":45},"potentialDeficiencies":{"iron":true},
                "recommendations":["Eat more leafy greens","Add lentils"]}"#,
        ));

        let kinds: Vec<AlertKind> = report.alerts().into_iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec![AlertKind::Info, AlertKind::Info, AlertKind::Warning]);
        assert_eq!(report.alerts()[0].1, "Eat more leafy greens");
    }

    #[test]
    fn test_bars_are_capped_but_keep_labels() {
        let report = NutritionReport::project(&snapshot(
            r#"{"nutrientPercentages":{"vitamin_c":350,"protein":100}}"#,
        ));

        let protein = &report.bars[0];
        let vitamin = &report.bars[1];
        assert_eq!(protein.height, 50.0);
        assert_eq!(vitamin.nutrient, "vitamin c");
        assert_eq!(vitamin.height, 100.0);
        assert_eq!(vitamin.label(), "350.0%");
    }

    #[test]
    fn test_unflagged_and_missing_percentages() {
        let report = NutritionReport::project(&snapshot(
            r#"{"potentialDeficiencies":{"vitamin_b_12":true,"zinc":false}}"#,
        ));

        assert_eq!(
            report.warnings,
            vec!["Low vitamin b_12 intake: 0.0% of daily recommended value".to_string()]
        );
        assert!(report.bars.is_empty());
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(NutritionReport::project(&NutritionSnapshot::default()).is_empty());
    }
}
