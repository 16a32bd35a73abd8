use crate::core::{ActivityVector, Mood, MoodScores};

/// One guard in the mood decision list. Returns a mood when the guard
/// matches; rules are evaluated in order and the first match wins.
pub trait MoodRule {
    fn name(&self) -> &str;
    fn evaluate(&self, vector: &ActivityVector, scores: &MoodScores) -> Option<Mood>;
}

/// The decision list in priority order. Ordering is semantic: ties between
/// scores resolve to whichever rule runs first, so this is not an argmax.
pub fn default_rules() -> Vec<Box<dyn MoodRule + Send + Sync>> {
    vec![
        Box::new(DormantRule),
        Box::new(BridgeTouristRule),
        Box::new(DegenRule),
        Box::new(CollectorRule),
        Box::new(BuilderRule),
        Box::new(LowActivityRule),
        Box::new(ActiveFallbackRule),
    ]
}

/// No activity at all overrides everything else.
struct DormantRule;
impl MoodRule for DormantRule {
    fn name(&self) -> &str { "dormant" }
    fn evaluate(&self, v: &ActivityVector, _s: &MoodScores) -> Option<Mood> {
        (v.tx_count == 0 && v.unique_contracts == 0).then_some(Mood::Quiet)
    }
}

/// Bridge usage above 30% of all transactions.
struct BridgeTouristRule;
impl MoodRule for BridgeTouristRule {
    fn name(&self) -> &str { "bridge_tourist" }
    fn evaluate(&self, v: &ActivityVector, _s: &MoodScores) -> Option<Mood> {
        let ratio = v.bridge_count as f64 / v.tx_count.max(1) as f64;
        (v.bridge_count > 0 && ratio > 0.3).then_some(Mood::BridgeTourist)
    }
}

/// Risk score dominates (ties favor risk).
struct DegenRule;
impl MoodRule for DegenRule {
    fn name(&self) -> &str { "degen" }
    fn evaluate(&self, _v: &ActivityVector, s: &MoodScores) -> Option<Mood> {
        (s.risk > 0 && s.risk >= s.activity.max(s.defi).max(s.collector)).then_some(Mood::Degen)
    }
}

/// Collector score dominates among the remaining scores.
struct CollectorRule;
impl MoodRule for CollectorRule {
    fn name(&self) -> &str { "collector" }
    fn evaluate(&self, _v: &ActivityVector, s: &MoodScores) -> Option<Mood> {
        (s.collector > 0 && s.collector >= s.activity.max(s.defi).max(s.risk))
            .then_some(Mood::Collector)
    }
}

/// Broad contract usage with moderate risk.
struct BuilderRule;
impl MoodRule for BuilderRule {
    fn name(&self) -> &str { "builder" }
    fn evaluate(&self, v: &ActivityVector, s: &MoodScores) -> Option<Mood> {
        (v.unique_contracts >= 5 && s.risk < 70).then_some(Mood::Builder)
    }
}

/// Barely-active wallets stay quiet.
struct LowActivityRule;
impl MoodRule for LowActivityRule {
    fn name(&self) -> &str { "low_activity" }
    fn evaluate(&self, v: &ActivityVector, _s: &MoodScores) -> Option<Mood> {
        (v.tx_count < 5 && v.unique_contracts < 3).then_some(Mood::Quiet)
    }
}

/// Remaining mid-activity wallets default to Builder.
struct ActiveFallbackRule;
impl MoodRule for ActiveFallbackRule {
    fn name(&self) -> &str { "active_fallback" }
    fn evaluate(&self, v: &ActivityVector, _s: &MoodScores) -> Option<Mood> {
        (v.tx_count >= 5).then_some(Mood::Builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_names_unique() {
        let rules = default_rules();
        let mut names: Vec<String> = rules.iter().map(|r| r.name().to_string()).collect();
        let len = names.len();
        names.sort();
        names.dedup();
        assert_eq!(len, names.len());
    }

    #[test]
    fn dormant_matches_only_fully_inactive() {
        let rule = DormantRule;
        let zero = ActivityVector::default();
        assert_eq!(rule.evaluate(&zero, &MoodScores::default()), Some(Mood::Quiet));

        let some = ActivityVector { tx_count: 1, ..Default::default() };
        assert_eq!(rule.evaluate(&some, &MoodScores::default()), None);
    }

    #[test]
    fn bridge_tourist_requires_nonzero_bridges() {
        let rule = BridgeTouristRule;
        let no_bridges = ActivityVector { tx_count: 0, bridge_count: 0, ..Default::default() };
        assert_eq!(rule.evaluate(&no_bridges, &MoodScores::default()), None);

        // 4/10 = 40% > 30%
        let heavy = ActivityVector { tx_count: 10, bridge_count: 4, ..Default::default() };
        assert_eq!(rule.evaluate(&heavy, &MoodScores::default()), Some(Mood::BridgeTourist));

        // 3/10 = 30% is not strictly above the threshold.
        let edge = ActivityVector { tx_count: 10, bridge_count: 3, ..Default::default() };
        assert_eq!(rule.evaluate(&edge, &MoodScores::default()), None);
    }

    #[test]
    fn degen_wins_score_ties() {
        let rule = DegenRule;
        let scores = MoodScores { activity: 50, defi: 20, collector: 50, risk: 50 };
        assert_eq!(rule.evaluate(&ActivityVector::default(), &scores), Some(Mood::Degen));

        let zero_risk = MoodScores { activity: 0, defi: 0, collector: 0, risk: 0 };
        assert_eq!(rule.evaluate(&ActivityVector::default(), &zero_risk), None);
    }

    #[test]
    fn builder_blocked_by_high_risk() {
        let rule = BuilderRule;
        let vector = ActivityVector { unique_contracts: 6, ..Default::default() };
        let risky = MoodScores { risk: 70, ..Default::default() };
        assert_eq!(rule.evaluate(&vector, &risky), None);

        let calm = MoodScores { risk: 69, ..Default::default() };
        assert_eq!(rule.evaluate(&vector, &calm), Some(Mood::Builder));
    }
}
