use csv::{QuoteStyle, WriterBuilder};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::info;

use crate::config::ExportSettings;
use crate::error::AppError;
use crate::models::{ExchangeRates, RewardRecord};
use crate::utils::math::{round_money, to_decimal};
use crate::utils::time::format_rfc3339;

pub const CSV_HEADER: [&str; 8] = [
    "Timestamp",
    "Asset",
    "Protocol",
    "RewardAmount",
    "ValueLocal",
    "ExchangeRate",
    "TaxLiability",
    "RiskScoreAtTime",
];

/// One reward converted into the local currency, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub timestamp: String,
    pub asset: String,
    pub protocol: String,
    pub reward_amount: Decimal,
    pub value_local: Decimal,
    pub exchange_rate: Decimal,
    pub tax_liability: Decimal,
    pub risk_score_at_time: u8,
}

impl ExportRow {
    fn fields(&self) -> [String; 8] {
        [
            self.timestamp.clone(),
            self.asset.clone(),
            self.protocol.clone(),
            self.reward_amount.to_string(),
            format!("{:.2}", self.value_local),
            self.exchange_rate.normalize().to_string(),
            format!("{:.2}", self.tax_liability),
            self.risk_score_at_time.to_string(),
        ]
    }
}

/// Tax-report CSV of reward records in the configured local currency
pub struct CsvExporter {
    settings: ExportSettings,
    rates: ExchangeRates,
}

impl CsvExporter {
    pub fn new(settings: ExportSettings, rates: ExchangeRates) -> Self {
        Self { settings, rates }
    }

    pub fn row(&self, record: &RewardRecord) -> Result<ExportRow, AppError> {
        let exchange_rate = self
            .rates
            .rate(record.reward_currency, self.settings.local_currency)?;
        let tax_rate = to_decimal(self.settings.tax_rate).ok_or_else(|| {
            AppError::ValidationError(format!("Invalid tax rate: {}", self.settings.tax_rate))
        })?;

        let value_local = round_money(record.reward_amount * exchange_rate);
        let tax_liability = round_money(value_local * tax_rate);

        Ok(ExportRow {
            timestamp: format_rfc3339(record.timestamp),
            asset: record.asset.clone(),
            protocol: record.protocol.to_string(),
            reward_amount: record.reward_amount,
            value_local,
            exchange_rate,
            tax_liability,
            risk_score_at_time: record.risk_score_at_time.value(),
        })
    }

    /// Write the header and one row per record. Returns the number of rows.
    pub fn export<W: io::Write>(&self, records: &[RewardRecord], writer: W) -> Result<usize, AppError> {
        let mut wtr = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Necessary)
            .from_writer(writer);

        wtr.write_record(CSV_HEADER)?;
        for record in records {
            wtr.write_record(self.row(record)?.fields())?;
        }
        wtr.flush()?;

        Ok(records.len())
    }

    pub fn export_to_path(&self, records: &[RewardRecord], path: impl AsRef<Path>) -> Result<usize, AppError> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| AppError::ExportError(format!("Cannot create {}: {}", path.display(), e)))?;
        let rows = self.export(records, file)?;

        info!(path = %path.display(), rows, currency = %self.settings.local_currency, "Exported reward ledger");
        Ok(rows)
    }
}
