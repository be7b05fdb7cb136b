use crate::analysis::{
    model::{
        AnalysisReport, CapDistribution, DerivedMetricRecord, InvestmentStyle, LiquidityAnalysis,
        MarketOverview, Opportunities, PerformanceAnalysis, ReportSummary, RiskAnalysis,
        RiskCategory, RiskDistribution, ValuationAnalysis, VolatilityBands, YtdPositionBands,
    },
    stats::{self, Distribution},
};

/// Length of every ranked list.
pub const TOP_N: usize = 10;

/// Builds the cross-sectional report over `records`.
///
/// Pure: the same records always give the same report. Only active records (positive
/// last price) contribute to statistics and rankings.
#[must_use]
pub fn aggregate(records: &[DerivedMetricRecord]) -> AnalysisReport {
    let active: Vec<&DerivedMetricRecord> = records.iter().filter(|r| r.is_active()).collect();

    let summary = ReportSummary {
        total_companies: records.len(),
        active_companies: active.len(),
        inactive_companies: records.len() - active.len(),
    };

    if active.is_empty() {
        return AnalysisReport {
            summary,
            ..AnalysisReport::default()
        };
    }

    AnalysisReport {
        summary,
        market_overview: Some(market_overview(&active)),
        valuation: Some(valuation(&active)),
        risk: Some(risk(&active)),
        performance: Some(performance(&active)),
        liquidity: liquidity(&active),
        opportunities: opportunities(&active),
    }
}

/// Top picks for an investment style, drawn from the active records.
#[must_use]
pub fn recommend(records: &[DerivedMetricRecord], style: InvestmentStyle) -> Vec<DerivedMetricRecord> {
    let active: Vec<&DerivedMetricRecord> = records.iter().filter(|r| r.is_active()).collect();

    match style {
        InvestmentStyle::Conservative => stable(&active),
        InvestmentStyle::Aggressive => rank(
            &active,
            |r| r.beta.is_some_and(|b| b > 1.2),
            |r| r.change_pct,
            Order::Descending,
        ),
        InvestmentStyle::Value => rank(
            &active,
            |r| r.market_cap.is_some_and(|c| c > 0.0),
            |r| r.position_in_ytd_range_pct.filter(|p| *p < 30.0),
            Order::Ascending,
        ),
        InvestmentStyle::Balanced => rank(
            &active,
            |r| r.beta.is_some_and(|b| (0.5..=1.5).contains(&b)),
            |r| r.market_cap,
            Order::Descending,
        ),
    }
}

fn values(active: &[&DerivedMetricRecord], f: impl Fn(&DerivedMetricRecord) -> Option<f64>) -> Vec<f64> {
    active.iter().filter_map(|&r| f(r)).collect()
}

fn market_overview(active: &[&DerivedMetricRecord]) -> MarketOverview {
    let caps = values(active, |r| r.market_cap);
    let prices = values(active, |r| r.last_price);

    let mut cap_distribution = CapDistribution::default();
    if let (Some(p30), Some(p90)) = (stats::quantile(&caps, 0.3), stats::quantile(&caps, 0.9)) {
        for &cap in &caps {
            if cap > p90 {
                cap_distribution.large_cap += 1;
            } else if cap <= p30 {
                cap_distribution.small_cap += 1;
            } else {
                cap_distribution.mid_cap += 1;
            }
        }
    }

    MarketOverview {
        total_market_cap: stats::sum(&caps),
        average_market_cap: stats::mean(&caps),
        median_market_cap: stats::median(&caps),
        cap_distribution,
        prices: Distribution::of(&prices),
    }
}

fn valuation(active: &[&DerivedMetricRecord]) -> ValuationAnalysis {
    let positions = values(active, |r| r.position_in_ytd_range_pct);
    let ytd_position = stats::mean(&positions).map(|average_position| YtdPositionBands {
        near_highs: positions.iter().filter(|p| **p > 80.0).count(),
        mid_range: positions.iter().filter(|p| (20.0..=80.0).contains(*p)).count(),
        near_lows: positions.iter().filter(|p| **p < 20.0).count(),
        average_position,
    });

    let mut volatility = VolatilityBands::default();
    for v in values(active, |r| r.ytd_volatility_pct) {
        if v > 100.0 {
            volatility.high += 1;
        } else if v >= 50.0 {
            volatility.medium += 1;
        } else {
            volatility.low += 1;
        }
    }

    ValuationAnalysis {
        ytd_position,
        volatility,
    }
}

fn risk(active: &[&DerivedMetricRecord]) -> RiskAnalysis {
    let betas = values(active, |r| r.beta);
    let mut distribution = RiskDistribution::default();
    betas
        .iter()
        .filter_map(|b| RiskCategory::from_beta(*b))
        .for_each(|c| distribution.add(c));

    RiskAnalysis {
        distribution,
        beta: Distribution::of(&betas),
    }
}

fn performance(active: &[&DerivedMetricRecord]) -> PerformanceAnalysis {
    let changes = values(active, |r| r.change_pct);
    let dist = Distribution::of(&changes);

    PerformanceAnalysis {
        gainers: changes.iter().filter(|c| **c > 0.0).count(),
        losers: changes.iter().filter(|c| **c < 0.0).count(),
        unchanged: changes.iter().filter(|c| **c == 0.0).count(),
        average_change: dist.map(|d| d.mean),
        best_performer: dist.map(|d| d.max),
        worst_performer: dist.map(|d| d.min),
    }
}

fn liquidity(active: &[&DerivedMetricRecord]) -> Option<LiquidityAnalysis> {
    let traded: Vec<&DerivedMetricRecord> = active
        .iter()
        .copied()
        .filter(|r| r.volume.is_some_and(|v| v > 0.0))
        .collect();
    let volumes = values(&traded, |r| r.volume);

    let p80 = stats::quantile(&volumes, 0.8)?;
    let p20 = stats::quantile(&volumes, 0.2)?;
    let turnovers = values(&traded, |r| r.turnover);

    Some(LiquidityAnalysis {
        total_volume: stats::sum(&volumes),
        average_volume: stats::mean(&volumes)?,
        high_volume_stocks: volumes.iter().filter(|v| **v > p80).count(),
        low_volume_stocks: volumes.iter().filter(|v| **v < p20).count(),
        total_turnover: stats::sum(&turnovers),
        companies_with_turnover: turnovers.iter().filter(|t| **t > 0.0).count(),
    })
}

fn opportunities(active: &[&DerivedMetricRecord]) -> Opportunities {
    Opportunities {
        value: rank(
            active,
            |_| true,
            |r| r.position_in_ytd_range_pct.filter(|p| *p < 25.0),
            Order::Ascending,
        ),
        growth: rank(
            active,
            |r| r.volume.is_some_and(|v| v > 0.0),
            |r| r.change_pct.filter(|c| *c > 5.0),
            Order::Descending,
        ),
        stable: stable(active),
    }
}

/// Beta below 1.0 and capitalization above the median, lowest beta first.
fn stable(active: &[&DerivedMetricRecord]) -> Vec<DerivedMetricRecord> {
    let Some(median_cap) = stats::median(&values(active, |r| r.market_cap)) else {
        return Vec::new();
    };
    rank(
        active,
        |r| r.market_cap.is_some_and(|c| c > median_cap),
        |r| r.beta.filter(|b| *b < 1.0),
        Order::Ascending,
    )
}

#[derive(Clone, Copy)]
enum Order {
    Ascending,
    Descending,
}

/// Filter, sort by `key` and keep the top [`TOP_N`]. Records without a key never rank.
///
/// The sort is stable, so ties keep fetch order.
fn rank(
    active: &[&DerivedMetricRecord],
    keep: impl Fn(&DerivedMetricRecord) -> bool,
    key: impl Fn(&DerivedMetricRecord) -> Option<f64>,
    order: Order,
) -> Vec<DerivedMetricRecord> {
    let mut keyed: Vec<(f64, &DerivedMetricRecord)> = active
        .iter()
        .copied()
        .filter(|r| keep(r))
        .filter_map(|r| key(r).filter(|k| k.is_finite()).map(|k| (k, r)))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match order {
        Order::Ascending => a.total_cmp(b),
        Order::Descending => b.total_cmp(a),
    });

    keyed
        .into_iter()
        .take(TOP_N)
        .map(|(_, r)| r.clone())
        .collect()
}
