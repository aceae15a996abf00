use chrono::Local;

use pathway_ai::advisory::{AlertTone, PathwayOption, ResultSet, StrategyBuckets};
use pathway_ai::session::{AdvisorSession, ProfileDraft, SessionEffect};

const EMPTY_BUCKET_MARKER: &str = "No countries match your criteria in this category.";

/// Renders whatever the session currently holds: the failure notice, the
/// waiting hint, or the result report.
pub(crate) fn render_outcome(session: &mut AdvisorSession) {
    for effect in session.take_effects() {
        match effect {
            // The browser scrolls the result card into view; on a terminal
            // the equivalent is a fresh block below the prompt.
            SessionEffect::ScrollToResults => println!(),
        }
    }

    if let Some(error) = session.last_error() {
        println!("Service unavailable: {error}");
        println!("The previous results, if any, are untouched. Submit again to retry.");
        return;
    }

    if !session.show_result() {
        println!("No results yet. Submit a profile first.");
        return;
    }

    let Some(advisory) = session.advisory() else {
        return;
    };

    println!("Pathway discovery report ({})", Local::now().date_naive());
    if !advisory.consultant_note.is_empty() {
        println!("Advisor note: \"{}\"", advisory.consultant_note);
    }
    if let Some(risk) = &advisory.risk_advisory {
        println!("Risk advisory: {risk}");
    }
    if let Some(annotation) = session.annotation() {
        println!("Note: {annotation}");
    }

    match &advisory.result {
        ResultSet::Ranked(options) => render_ranked(session, options),
        ResultSet::Buckets(buckets) => render_buckets(session, buckets),
    }
}

fn render_ranked(session: &AdvisorSession, options: &[PathwayOption]) {
    let Some(top) = options.first() else {
        println!("No pathways matched your profile.");
        return;
    };

    println!();
    println!(
        "Top recommendation: {} {} (match {}%)",
        top.flag, top.country, top.match_score
    );
    if !top.tagline.is_empty() {
        println!("  {}", top.tagline);
    }
    println!("  {}", financial_summary(top));
    if let Some(step) = top.timeline_steps.last() {
        println!("  PR timeline: {step}");
    }
    for reason in &top.reasoning {
        println!("  - {reason}");
    }
    if session.is_expanded(top.key()) {
        render_details(top);
    }

    if options.len() > 1 {
        println!();
        println!("Alternatives (promote one to make it the primary recommendation):");
        for (rank, option) in options.iter().enumerate().skip(1) {
            println!(
                "  {rank}. {} (match {}%) - {}",
                option.country,
                option.match_score,
                financial_summary(option)
            );
            if session.is_expanded(option.key()) {
                render_details(option);
            }
        }
    }
}

fn render_buckets(session: &AdvisorSession, buckets: &StrategyBuckets) {
    let columns = [
        ("SAFE BETS", &buckets.safe_bets),
        ("FAST TRACK", &buckets.fast_track),
        ("MOONSHOTS", &buckets.moonshots),
    ];
    for (title, options) in columns {
        println!();
        println!("{title}");
        if options.is_empty() {
            println!("  {EMPTY_BUCKET_MARKER}");
            continue;
        }
        for option in options {
            println!(
                "  {} {} ({}%): {}",
                option.flag, option.country, option.match_score, option.tagline
            );
            println!("    {}", financial_summary(option));
            if let Some(step) = option.timeline_steps.last() {
                println!("    PR timeline: {step}");
            }
            if session.is_expanded(option.key()) {
                render_details(option);
            }
        }
    }
}

fn render_details(option: &PathwayOption) {
    if let Some(costs) = &option.costs {
        println!(
            "    Costs: tuition ₹{}L, living ₹{}L, visa ₹{}L, insurance ₹{}L",
            costs.tuition, costs.living, costs.visa_fees, costs.insurance
        );
    }
    if option.total_cost > 0.0 {
        println!("    Total cost: ₹{}L", option.total_cost);
    }
    if !option.timeline_steps.is_empty() {
        println!("    Steps: {}", option.timeline_steps.join(" -> "));
    }
    for branch in &option.pr_branches {
        println!(
            "    PR branch: {} in {} ({})",
            branch.path, branch.timeline, branch.success
        );
    }
    for alert in &option.policy_alerts {
        println!("    {} {}", tone_marker(alert.kind), alert.text);
    }
    for deadline in &option.deadlines {
        println!("    Deadline: {} by {}", deadline.task, deadline.date);
    }
    if let Some(insight) = &option.insider_insight {
        println!("    Insight: {insight}");
    }
}

pub(crate) fn print_profile(draft: &ProfileDraft) {
    println!("Current profile");
    println!("  degree:    {}", or_unset(draft.degree.label()));
    println!("  gpa:       {}", or_unset(&draft.gpa));
    println!("  major:     {}", or_unset(&draft.major));
    println!("  budget:    {}", format_budget(draft.budget_max));
    println!("  priority:  {}", draft.priority_goal.label());
    println!("  funding:   {}", or_unset(draft.funding_source.label()));
    println!(
        "  countries: {}",
        if draft.preferred_countries.is_empty() {
            "(none)".to_string()
        } else {
            draft.preferred_countries.join(", ")
        }
    );
    println!(
        "  intake:    {}",
        draft
            .target_intake
            .map(|term| term.label())
            .unwrap_or("(unset)")
    );
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        "(unset)"
    } else {
        value
    }
}

/// Indian-system currency label, matching the budget slider readout.
pub(crate) fn format_budget(rupees: u64) -> String {
    if rupees >= 10_000_000 {
        format!("₹ {:.2} Cr", rupees as f64 / 10_000_000.0)
    } else {
        format!("₹ {:.0} Lakhs", rupees as f64 / 100_000.0)
    }
}

fn financial_summary(option: &PathwayOption) -> String {
    match option.financial_gap {
        Some(gap) if gap <= 0.0 => "Fully Covered".to_string(),
        Some(gap) if gap < 10.0 => format!("Gap: ₹{gap}L (Manageable)"),
        Some(gap) => format!("High Gap: ₹{gap}L"),
        None => match (&option.financial_health, &option.financial_status) {
            (Some(health), Some(status)) => format!("{health} ({status})"),
            (Some(health), None) => health.clone(),
            (None, Some(status)) => status.clone(),
            (None, None) => format!("Total cost ₹{}L", option.total_cost),
        },
    }
}

fn tone_marker(tone: AlertTone) -> &'static str {
    match tone {
        AlertTone::Positive => "[+]",
        AlertTone::Negative => "[-]",
        AlertTone::Neutral => "[i]",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathway_ai::advisory::RiskColor;

    fn option(gap: Option<f64>) -> PathwayOption {
        PathwayOption {
            country: "Germany".to_string(),
            flag: String::new(),
            tagline: String::new(),
            match_score: 92,
            total_cost: 12.0,
            financial_gap: gap,
            financial_health: None,
            financial_status: None,
            pr_timeline: None,
            pr_risk_color: RiskColor::Green,
            timeline_steps: Vec::new(),
            costs: None,
            pr_branches: Vec::new(),
            policy_alerts: Vec::new(),
            deadlines: Vec::new(),
            insider_insight: None,
            reasoning: Vec::new(),
            roi_verdict: None,
            archetype: None,
        }
    }

    #[test]
    fn budget_formats_in_lakhs_below_one_crore() {
        assert_eq!(format_budget(500_000), "₹ 5 Lakhs");
        assert_eq!(format_budget(2_500_000), "₹ 25 Lakhs");
    }

    #[test]
    fn budget_formats_in_crores_from_one_crore_up() {
        assert_eq!(format_budget(10_000_000), "₹ 1.00 Cr");
    }

    #[test]
    fn financial_summary_uses_the_gap_thresholds() {
        assert_eq!(financial_summary(&option(Some(0.0))), "Fully Covered");
        assert_eq!(
            financial_summary(&option(Some(6.0))),
            "Gap: ₹6L (Manageable)"
        );
        assert_eq!(financial_summary(&option(Some(15.0))), "High Gap: ₹15L");
    }

    #[test]
    fn financial_summary_falls_back_to_health_fields() {
        let mut sparse = option(None);
        sparse.financial_health = Some("Comfortable".to_string());
        sparse.financial_status = Some("covered".to_string());
        assert_eq!(financial_summary(&sparse), "Comfortable (covered)");

        assert_eq!(financial_summary(&option(None)), "Total cost ₹12L");
    }

    #[test]
    fn tone_markers_cover_all_tones() {
        assert_eq!(tone_marker(AlertTone::Positive), "[+]");
        assert_eq!(tone_marker(AlertTone::Negative), "[-]");
        assert_eq!(tone_marker(AlertTone::Neutral), "[i]");
    }
}
