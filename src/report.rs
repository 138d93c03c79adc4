//! Outward-facing sizing report for a single generation mix.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

use crate::cost::BudgetAllocation;
use crate::generation::{GenerationMix, ProductionProfile};
use crate::series::HourlySeries;
use crate::sim::kpi::DispatchSummary;
use crate::sim::types::DispatchResult;

/// Length of a seasonal plotting window (one week).
pub const WEEK_HOURS: usize = 168;

/// One representative week per season, for slicing hourly traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    /// First hour of the season's window.
    pub fn start_hour(self) -> usize {
        match self {
            Season::Winter => 0,
            Season::Spring => 2190,
            Season::Summer => 4380,
            Season::Fall => 6570,
        }
    }

    /// Hour indices of the season's one-week window.
    pub fn week_window(self) -> Range<usize> {
        let start = self.start_hour();
        start..start + WEEK_HOURS
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        };
        f.write_str(name)
    }
}

/// Annual energy totals (kWh) for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyTotals {
    pub demand_kwh: f64,
    pub generation_kwh: f64,
    pub wind_kwh: f64,
    pub solar_kwh: f64,
    pub nuclear_kwh: f64,
    pub hydro_kwh: f64,
    pub backup_kwh: f64,
}

impl EnergyTotals {
    pub fn new(production: &ProductionProfile, demand: &HourlySeries, backup_kwh: f64) -> Self {
        let wind_kwh = production.wind.sum();
        let solar_kwh = production.solar.sum();
        let nuclear_kwh = production.nuclear.sum();
        let hydro_kwh = production.hydro.sum();
        Self {
            demand_kwh: demand.sum(),
            generation_kwh: wind_kwh + solar_kwh + nuclear_kwh + hydro_kwh,
            wind_kwh,
            solar_kwh,
            nuclear_kwh,
            hydro_kwh,
            backup_kwh,
        }
    }

    /// Share of annual generation from `kwh`, in percent (0 when nothing was generated).
    pub fn generation_share_pct(&self, kwh: f64) -> f64 {
        if self.generation_kwh > 0.0 {
            100.0 * kwh / self.generation_kwh
        } else {
            0.0
        }
    }

    /// Energy supplied by all sources including backup (kWh).
    pub fn supplied_kwh(&self) -> f64 {
        self.generation_kwh + self.backup_kwh
    }

    /// Share of the final supply mix (wind, solar, nuclear, hydro and
    /// backup together) from `kwh`, in percent.
    pub fn mix_share_pct(&self, kwh: f64) -> f64 {
        let supplied = self.supplied_kwh();
        if supplied > 0.0 {
            100.0 * kwh / supplied
        } else {
            0.0
        }
    }

    /// Share of annual demand met by backup, in percent.
    pub fn backup_share_pct(&self) -> f64 {
        if self.demand_kwh > 0.0 {
            100.0 * self.backup_kwh / self.demand_kwh
        } else {
            0.0
        }
    }
}

/// Everything an external plotter or reporter needs about one mix.
///
/// Holds the per-source production, backup and storage traces, the cost
/// breakdown and the derived totals, so nothing has to be re-simulated.
#[derive(Debug, Clone, Serialize)]
pub struct SizingReport {
    pub mix: GenerationMix,
    pub allocation: BudgetAllocation,
    pub production: ProductionProfile,
    pub dispatch: DispatchResult,
    pub summary: DispatchSummary,
    pub totals: EnergyTotals,
}

impl SizingReport {
    /// Slices `trace` to the week window of `season`.
    pub fn season_slice(trace: &HourlySeries, season: Season) -> &[f64] {
        &trace.as_slice()[season.week_window()]
    }
}

impl fmt::Display for SizingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = &self.allocation;
        let t = &self.totals;

        writeln!(f, "--- Generation Mix ---")?;
        writeln!(f, "Wind turbines:         {:.0}", self.mix.wind_turbines)?;
        writeln!(f, "Solar panels:          {:.0}", self.mix.solar_panels)?;
        writeln!(f, "Nuclear units:         {:.0}", self.mix.nuclear_units)?;
        writeln!(f)?;
        writeln!(f, "--- Investment Breakdown (EUR) ---")?;
        writeln!(f, "Total budget:          {:.2}", a.budget_eur)?;
        writeln!(f, "Wind:                  {:.2}", a.wind_eur)?;
        writeln!(f, "Solar:                 {:.2}", a.solar_eur)?;
        writeln!(f, "Nuclear:               {:.2}", a.nuclear_eur)?;
        writeln!(f, "Storage:               {:.2}", a.storage_eur)?;
        writeln!(f, "Storage capacity:      {:.2} kWh", a.storage_capacity_kwh)?;
        writeln!(f)?;
        writeln!(f, "--- Energy Statistics ---")?;
        writeln!(f, "Total demand:          {:.2} kWh", t.demand_kwh)?;
        writeln!(f, "Total generation:      {:.2} kWh", t.generation_kwh)?;
        writeln!(
            f,
            "Backup (gas):          {:.2} kWh ({:.2}% of demand)",
            t.backup_kwh,
            t.backup_share_pct()
        )?;
        writeln!(f)?;
        writeln!(f, "--- Final Generation Mix ---")?;
        for (name, kwh) in [
            ("Wind", t.wind_kwh),
            ("Solar", t.solar_kwh),
            ("Nuclear", t.nuclear_kwh),
            ("Hydro", t.hydro_kwh),
            ("Gas", t.backup_kwh),
        ] {
            writeln!(f, "{name:<23}{:.1}%", t.mix_share_pct(kwh))?;
        }
        writeln!(f)?;
        write!(f, "{}", self.summary)
    }
}
