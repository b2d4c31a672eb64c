//! Deterministic heuristic analysis model.
//!
//! The default `IAnalysisModel`: keyword and corroboration signals instead
//! of a remote generative engine. Always available, deterministic for
//! identical input, which keeps the pipeline testable and air-gapped.
//! A generative backend plugs in behind the same trait.

use vigil_core::errors::VigilResult;
use vigil_core::models::{
    ExtractedEvent, ExtractedEvents, Forecast, OptimisticBranch, PessimisticBranch, Scenario,
    ScoredEvent, TrendAnalysis, TrendClassification,
};
use vigil_core::traits::IAnalysisModel;

/// Words that push the trend toward escalation.
const ESCALATORY: &[&str] = &[
    "clash", "attack", "shelling", "offensive", "raid", "ambush", "bombardment",
];

/// Words that push the trend toward de-escalation.
const DE_ESCALATORY: &[&str] = &[
    "ceasefire", "truce", "withdrawal", "agreement", "negotiation", "mediation",
];

/// Deterministic keyword-and-corroboration model.
pub struct HeuristicModel;

impl HeuristicModel {
    pub fn new() -> Self {
        Self
    }

    /// Count keyword occurrences in lowercase text.
    fn count_keywords(text: &str, keywords: &[&str]) -> usize {
        keywords.iter().filter(|k| text.contains(*k)).count()
    }

    /// Label one sentence with the first matching keyword, else a
    /// truncated copy of the sentence itself.
    fn label_action(sentence: &str) -> String {
        let lower = sentence.to_lowercase();
        for kw in ESCALATORY.iter().chain(DE_ESCALATORY.iter()) {
            if lower.contains(kw) {
                return kw.to_string();
            }
        }
        let mut label: String = sentence.chars().take(60).collect();
        if sentence.chars().count() > 60 {
            label.push('…');
        }
        label
    }

    /// Escalation lean across extracted events: positive leans escalating,
    /// negative leans de-escalating.
    fn keyword_lean(extracted: Option<&ExtractedEvents>) -> i64 {
        let Some(extracted) = extracted else { return 0 };
        let joined = extracted
            .events
            .iter()
            .map(|e| e.action.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        let esc = Self::count_keywords(&joined, ESCALATORY) as i64;
        let de = Self::count_keywords(&joined, DE_ESCALATORY) as i64;
        esc - de
    }

    /// Retrieval pressure in [0, 1]: average similarity damped by how few
    /// corroborating events exist.
    fn retrieval_pressure(retrieved: &[ScoredEvent]) -> f64 {
        if retrieved.is_empty() {
            return 0.0;
        }
        let avg: f64 =
            retrieved.iter().map(|e| e.score.clamp(0.0, 1.0)).sum::<f64>() / retrieved.len() as f64;
        let volume = retrieved.len() as f64 / (retrieved.len() as f64 + 5.0);
        avg * volume
    }
}

impl Default for HeuristicModel {
    fn default() -> Self {
        Self::new()
    }
}

impl IAnalysisModel for HeuristicModel {
    fn extract_events(&self, region: &str, raw_text: &str) -> VigilResult<ExtractedEvents> {
        let events: Vec<ExtractedEvent> = raw_text
            .split(['.', ';', '\n'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|sentence| ExtractedEvent {
                actor: None,
                action: Self::label_action(sentence),
                location: Some(region.to_string()),
                date: None,
            })
            .collect();

        let summary = format!(
            "extracted {} event candidate(s) from raw text for {region}",
            events.len()
        );
        Ok(ExtractedEvents { events, summary })
    }

    fn analyze_trend(
        &self,
        region: &str,
        retrieved: &[ScoredEvent],
        extracted: Option<&ExtractedEvents>,
    ) -> VigilResult<TrendAnalysis> {
        let hits = retrieved.len();
        let pressure = Self::retrieval_pressure(retrieved);
        let lean = Self::keyword_lean(extracted);

        let classification = if lean > 0 || pressure > 0.6 {
            TrendClassification::Escalating
        } else if lean < 0 {
            TrendClassification::DeEscalating
        } else {
            TrendClassification::Stable
        };

        let base = (pressure * 100.0) as i64;
        let armed_clash = (base + 15 * lean).clamp(5, 95) as u8;
        let civilian_targeting = ((armed_clash as f64) * 0.8).round().clamp(5.0, 95.0) as u8;

        let confidence_label = match hits {
            n if n >= 8 => "high",
            n if n >= 3 => "medium",
            _ => "low",
        };

        let mut drivers = vec![format!("{hits} corroborating event(s) retrieved for {region}")];
        if lean > 0 {
            drivers.push("escalatory language dominates extracted events".to_string());
        } else if lean < 0 {
            drivers.push("de-escalatory language dominates extracted events".to_string());
        }

        Ok(TrendAnalysis {
            classification,
            confidence_label: confidence_label.to_string(),
            drivers,
            forecast_7_days: Forecast {
                armed_clash_likelihood: armed_clash,
                civilian_targeting_likelihood: civilian_targeting,
            },
        })
    }

    fn generate_scenario(
        &self,
        region: &str,
        trend: &TrendAnalysis,
        intervention: &str,
    ) -> VigilResult<Scenario> {
        let recommendation = match trend.classification {
            TrendClassification::Escalating => "Deploy de-escalation support",
            TrendClassification::Stable => "Maintain monitoring posture",
            TrendClassification::DeEscalating => "Consolidate peace gains",
        };

        let risk = trend.forecast_7_days.armed_clash_likelihood.clamp(10, 95);
        let success = (100u8.saturating_sub(risk)).clamp(25, 90);

        Ok(Scenario {
            intervention: intervention.to_string(),
            recommendation: recommendation.to_string(),
            optimistic: OptimisticBranch {
                success_probability: success,
                narrative: format!(
                    "'{intervention}' gains traction in {region} and conditions improve within the forecast window"
                ),
            },
            pessimistic: PessimisticBranch {
                risk_probability: risk,
                narrative: format!(
                    "'{intervention}' stalls in {region} and armed activity continues at the forecast level"
                ),
            },
        })
    }

    fn name(&self) -> &str {
        "heuristic-v1"
    }
}
