use crate::{
    analysis::{DerivedMetricRecord, RiskCategory, stats},
    announcements::ApprovedAnnouncement,
    dividends::model::{
        DividendPicks, DividendProfile, DividendReport, DividendSummary, RiskDividends,
    },
};

/// Length of the top payer list.
pub const TOP_PAYERS: usize = 10;
/// Length of each pick list.
pub const PICKS: usize = 5;

/// Joins each company with the announcements whose company name contains its ticker
/// root (the symbol up to the first `.`).
#[must_use]
pub fn profile(
    records: &[DerivedMetricRecord],
    announcements: &[ApprovedAnnouncement],
) -> Vec<DividendProfile> {
    let upper: Vec<String> = announcements
        .iter()
        .map(|a| a.company.as_deref().unwrap_or_default().to_uppercase())
        .collect();

    records
        .iter()
        .map(|r| {
            let root = r.symbol.split('.').next().unwrap_or_default().trim().to_uppercase();
            let matched: Vec<&ApprovedAnnouncement> = if root.is_empty() {
                Vec::new()
            } else {
                announcements
                    .iter()
                    .zip(&upper)
                    .filter(|(_, company)| company.contains(&root))
                    .map(|(a, _)| a)
                    .collect()
            };
            DividendProfile {
                company: r.clone(),
                recent_dividends: matched.len(),
                last_dividend_date: matched.first().and_then(|a| a.date_of_announcement.clone()),
                dividend_announcements: matched.into_iter().take(3).cloned().collect(),
            }
        })
        .collect()
}

/// Summary, payer lists and picks over `profiles`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn report(profiles: &[DividendProfile]) -> DividendReport {
    let paying: Vec<&DividendProfile> = profiles.iter().filter(|p| p.pays_dividends()).collect();
    let total = profiles.len();

    let summary = DividendSummary {
        total_companies: total,
        companies_with_dividends: paying.len(),
        companies_without_dividends: total - paying.len(),
        dividend_percentage: if total == 0 {
            0.0
        } else {
            paying.len() as f64 / total as f64 * 100.0
        },
    };

    let median_cap = stats::median(
        &paying
            .iter()
            .filter_map(|p| p.company.market_cap)
            .collect::<Vec<_>>(),
    );
    let high_value = median_cap.map_or_else(Vec::new, |median| {
        paying
            .iter()
            .filter(|p| p.company.market_cap.is_some_and(|c| c > median))
            .map(|p| (*p).clone())
            .collect()
    });

    DividendReport {
        summary,
        top_dividend_payers: by_count(&paying, |_| true, TOP_PAYERS),
        dividend_by_risk: by_risk(&paying),
        high_value_dividend_stocks: high_value,
        investment_recommendations: picks(profiles),
    }
}

/// Aristocrats, value plays and growth stocks among the paying companies.
#[must_use]
pub fn picks(profiles: &[DividendProfile]) -> DividendPicks {
    let paying: Vec<&DividendProfile> = profiles.iter().filter(|p| p.pays_dividends()).collect();

    let aristocrats = by_count(
        &paying,
        |p| {
            p.recent_dividends >= 2
                && matches!(
                    p.company.risk_category,
                    Some(RiskCategory::VeryLowRisk | RiskCategory::LowRisk)
                )
        },
        PICKS,
    );

    // lower 40% of the year-to-date range, lowest first
    let mut value: Vec<(f64, &DividendProfile)> = paying
        .iter()
        .filter_map(|p| {
            p.company
                .position_in_ytd_range_pct
                .filter(|pos| *pos < 40.0)
                .map(|pos| (pos, *p))
        })
        .collect();
    value.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut growth: Vec<(f64, &DividendProfile)> = paying
        .iter()
        .filter_map(|p| p.company.change_pct.filter(|c| *c > 0.0).map(|c| (c, *p)))
        .collect();
    growth.sort_by(|a, b| b.0.total_cmp(&a.0));

    DividendPicks {
        dividend_aristocrats: aristocrats,
        value_dividend_plays: value.into_iter().take(PICKS).map(|(_, p)| p.clone()).collect(),
        growth_with_dividends: growth.into_iter().take(PICKS).map(|(_, p)| p.clone()).collect(),
    }
}

/// Most announcements first; ties keep input order.
fn by_count(
    paying: &[&DividendProfile],
    keep: impl Fn(&DividendProfile) -> bool,
    n: usize,
) -> Vec<DividendProfile> {
    let mut kept: Vec<&DividendProfile> = paying.iter().copied().filter(|p| keep(p)).collect();
    kept.sort_by_key(|p| std::cmp::Reverse(p.recent_dividends));
    kept.into_iter().take(n).cloned().collect()
}

#[allow(clippy::cast_precision_loss)]
fn by_risk(paying: &[&DividendProfile]) -> Vec<RiskDividends> {
    [
        Some(RiskCategory::HighRisk),
        Some(RiskCategory::MediumRisk),
        Some(RiskCategory::LowRisk),
        Some(RiskCategory::VeryLowRisk),
        None,
    ]
    .into_iter()
    .filter_map(|risk| {
        let counts: Vec<usize> = paying
            .iter()
            .filter(|p| p.company.risk_category == risk)
            .map(|p| p.recent_dividends)
            .collect();
        if counts.is_empty() {
            return None;
        }
        let sum: usize = counts.iter().sum();
        Some(RiskDividends {
            risk_category: risk,
            companies: counts.len(),
            mean: sum as f64 / counts.len() as f64,
            sum,
        })
    })
    .collect()
}
