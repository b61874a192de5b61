//! Per-period endurance metrics and the numeric matrix built from them.

use chrono::TimeDelta;
use serde::Serialize;

use crate::discharge::DischargePeriod;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Derived figures for one discharge period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    /// Time spent discharging, in hours.
    pub elapsed_hours: f64,
    /// Percentage points lost.
    pub charge_delta: u8,
    /// How long a full charge would last at the observed rate, in hours.
    pub estimated_full_discharge_hours: f64,
}

impl DischargePeriod {
    pub fn elapsed(&self) -> TimeDelta {
        self.end().timestamp - self.start().timestamp
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "millisecond counts stay far below 2^52"
    )]
    pub fn elapsed_hours(&self) -> f64 {
        self.elapsed().num_milliseconds() as f64 / MS_PER_HOUR
    }

    /// Always positive; periods without charge loss cannot be built.
    pub fn charge_delta(&self) -> u8 {
        self.start().charge.value() - self.end().charge.value()
    }

    /// Linear extrapolation of the observed rate to a 0–100% discharge.
    pub fn estimated_full_discharge_hours(&self) -> f64 {
        100.0 * self.elapsed_hours() / f64::from(self.charge_delta())
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            elapsed_hours: self.elapsed_hours(),
            charge_delta: self.charge_delta(),
            estimated_full_discharge_hours: self.estimated_full_discharge_hours(),
        }
    }
}

/// Column selector for [`MetricsMatrix::column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsColumn {
    ElapsedHours,
    ChargeDelta,
    EstimatedFullDischargeHours,
}

impl MetricsColumn {
    pub const ALL: [Self; 3] = [
        Self::ElapsedHours,
        Self::ChargeDelta,
        Self::EstimatedFullDischargeHours,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ElapsedHours => "elapsed_hours",
            Self::ChargeDelta => "charge_delta",
            Self::EstimatedFullDischargeHours => "estimated_full_discharge_hours",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::ElapsedHours => 0,
            Self::ChargeDelta => 1,
            Self::EstimatedFullDischargeHours => 2,
        }
    }
}

/// An `(n, 3)` table of metrics, one row per period in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricsMatrix {
    rows: Vec<Metrics>,
}

impl MetricsMatrix {
    pub fn rows(&self) -> &[Metrics] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of one column, as floats.
    pub fn column(&self, column: MetricsColumn) -> Vec<f64> {
        self.to_array()
            .into_iter()
            .map(|row| row[column.index()])
            .collect()
    }

    /// The matrix as plain float rows, in [`MetricsColumn::ALL`] order.
    pub fn to_array(&self) -> Vec<[f64; 3]> {
        self.rows
            .iter()
            .map(|m| {
                [
                    m.elapsed_hours,
                    f64::from(m.charge_delta),
                    m.estimated_full_discharge_hours,
                ]
            })
            .collect()
    }
}

/// Computes one metrics row per period.
pub fn compute(periods: &[DischargePeriod]) -> MetricsMatrix {
    MetricsMatrix {
        rows: periods.iter().map(DischargePeriod::metrics).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discharge::discharge_periods;
    use crate::stream::parse_log;

    const EPS: f64 = 1e-9;

    fn periods_from(log: &str) -> Vec<DischargePeriod> {
        discharge_periods(parse_log(log))
    }

    #[test]
    fn test_single_period_metrics() {
        let periods = periods_from(
            "\
2016-12-14 01:36:31 -0500 Wake                \tWake from Normal Sleep [CDNVA] due to EC.LidOpen/Lid Open: Using BATT (Charge:30%)
2016-12-14 01:56:29 -0500 Assertions          \tSummary- [System: PrevIdle PrevDisp DeclUser kDisp] Using AC(Charge: 26)
",
        );

        assert_eq!(periods.len(), 1);
        let m = periods[0].metrics();
        assert!((m.elapsed_hours - 1198.0 / 3600.0).abs() < EPS);
        assert_eq!(m.charge_delta, 4);
        assert!((m.estimated_full_discharge_hours - 8.319_444_444_444_443).abs() < EPS);
    }

    #[test]
    fn test_no_loss_yields_empty_matrix() {
        let periods = periods_from(
            "\
2016-12-14 01:36:31 -0500 Wake                \tWake from Normal Sleep [CDNVA] due to EC.LidOpen/Lid Open: Using BATT (Charge:30%)
2016-12-14 01:56:29 -0500 Assertions          \tSummary- [System: PrevIdle PrevDisp DeclUser kDisp] Using AC(Charge: 30)
",
        );

        let matrix = compute(&periods);
        assert!(matrix.is_empty());
        assert!(matrix.to_array().is_empty());
    }

    #[test]
    fn test_two_periods_keep_order() {
        let periods = periods_from(
            "\
2016-12-14 01:36:31 -0500 Wake                \tWake from Normal Sleep [CDNVA] due to EC.LidOpen/Lid Open: Using BATT (Charge:30%)
2016-12-14 01:56:29 -0500 Assertions          \tSummary- [System: PrevIdle PrevDisp DeclUser kDisp] Using AC(Charge: 26)
2016-12-15 01:38:46 -0500 Assertions          \tSummary- [System: DeclUser kDisp] Using Batt(Charge: 40)
2016-12-15 03:10:05 -0500 Sleep               \tEntering Sleep state due to 'Clamshell Sleep':TCPKeepAlive=inactive Using Batt (Charge:20%) 10805 secs
",
        );

        let matrix = compute(&periods);
        assert_eq!(matrix.len(), 2);

        let expected = [
            [0.332_777_777_778, 4.0, 8.319_444_444_44],
            [1.521_944_444_44, 20.0, 7.609_722_222_22],
        ];
        for (row, want) in matrix.to_array().iter().zip(expected) {
            for (got, want) in row.iter().zip(want) {
                assert!((got - want).abs() < 1e-8, "{got} != {want}");
            }
        }
        for (period, row) in periods.iter().zip(matrix.rows()) {
            assert_eq!(&period.metrics(), row);
        }
    }

    #[test]
    fn test_elapsed_counts_whole_days() {
        let periods = periods_from(
            "\
2016-12-14 10:00:00 -0500 Wake \tWake: Using BATT (Charge:90%)
2016-12-15 12:00:00 -0500 Sleep \tEntering Sleep: Using BATT (Charge:40%)
",
        );

        let m = periods[0].metrics();
        assert!((m.elapsed_hours - 26.0).abs() < EPS);
        assert!((m.estimated_full_discharge_hours - 52.0).abs() < EPS);
    }

    #[test]
    fn test_elapsed_across_dst_change() {
        let periods = periods_from(
            "\
2016-11-06 01:30:00 -0400 Wake \tWake: Using BATT (Charge:80%)
2016-11-06 01:10:00 -0500 Assertions \tSummary: Using AC (Charge:70%)
",
        );

        assert_eq!(periods.len(), 1);
        assert!((periods[0].elapsed_hours() - 40.0 / 60.0).abs() < EPS);
    }

    #[test]
    fn test_column_extraction() {
        let periods = periods_from(
            "\
2016-12-14 10:00:00 -0500 Wake \tWake: Using BATT (Charge:90%)
2016-12-14 12:00:00 -0500 Sleep \tEntering Sleep: Using BATT (Charge:80%)
2016-12-14 13:00:00 -0500 Wake \tWake: Using BATT (Charge:80%)
2016-12-14 14:00:00 -0500 Wake \tWake: Using AC (Charge:75%)
",
        );

        let matrix = compute(&periods);
        assert_eq!(matrix.column(MetricsColumn::ChargeDelta), vec![10.0, 5.0]);
        assert_eq!(matrix.column(MetricsColumn::ElapsedHours), vec![2.0, 1.0]);
        assert_eq!(
            matrix.column(MetricsColumn::EstimatedFullDischargeHours),
            vec![20.0, 20.0]
        );
    }

    #[test]
    fn test_matrix_serializes_as_row_list() {
        let periods = periods_from(
            "\
2016-12-14 10:00:00 -0500 Wake \tWake: Using BATT (Charge:90%)
2016-12-14 12:00:00 -0500 Sleep \tEntering Sleep: Using BATT (Charge:80%)
",
        );

        let json = serde_json::to_string(&compute(&periods)).unwrap();
        assert_eq!(
            json,
            r#"[{"elapsed_hours":2.0,"charge_delta":10,"estimated_full_discharge_hours":20.0}]"#
        );
    }
}
