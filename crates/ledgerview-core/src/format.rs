//! Pure formatting of dates, sums and transaction rows

use chrono::{Datelike, NaiveDateTime};
use ledgerview_config::{Config, CurrencyConfig, Language};
use ledgerview_utils::{escape_html, format_amount};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ViewError, ViewResult};
use crate::models::{timestamp, RenderedRow, TransactionRecord};

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

// Genitive forms, as used after a day number
const MONTHS_RU: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня",
    "июля", "августа", "сентября", "октября", "ноября", "декабря",
];

/// Stateless formatter configured once from `Config`
#[derive(Debug, Clone)]
pub struct Formatter {
    language: Language,
    currency: CurrencyConfig,
    remove_transaction_class: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Formatter {
    pub fn from_config(config: &Config) -> Self {
        Self {
            language: config.locale.language,
            currency: config.currency.clone(),
            remove_transaction_class: config.view.remove_transaction_class.clone(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Long date, separator, then 24-hour HH:MM
    pub fn format_date(&self, at: &NaiveDateTime) -> String {
        let month = at.month0() as usize;
        match self.language {
            Language::En => format!(
                "{} {} {} at {}",
                at.day(),
                MONTHS_EN[month],
                at.year(),
                at.format("%H:%M")
            ),
            Language::Ru => format!(
                "{} {} {} г. в {}",
                at.day(),
                MONTHS_RU[month],
                at.year(),
                at.format("%H:%M")
            ),
        }
    }

    /// Same as `format_date` for a raw timestamp string
    pub fn format_raw_date(&self, raw: &str) -> ViewResult<String> {
        timestamp::parse(raw)
            .map(|at| self.format_date(&at))
            .ok_or_else(|| ViewError::InvalidTimestamp {
                value: raw.to_string(),
            })
    }

    /// Sum rounded to the configured precision, without currency
    pub fn format_sum(&self, sum: &Decimal) -> String {
        let rounded = sum.round_dp_with_strategy(
            self.currency.decimal_places,
            RoundingStrategy::MidpointAwayFromZero,
        );
        format_amount(
            &format!("{:.*}", self.currency.decimal_places as usize, rounded),
            &self.currency.thousands_separator,
            &self.currency.decimal_separator,
        )
    }

    pub fn project(&self, record: &TransactionRecord) -> RenderedRow {
        RenderedRow {
            id: record.id.clone(),
            kind: record.kind,
            name: record.name.clone(),
            date: self.format_date(&record.created_at),
            sum: self.format_sum(&record.sum),
        }
    }

    /// Markup of one transaction row; every interpolated value is escaped
    pub fn build_row_markup(&self, row: &RenderedRow) -> String {
        let id = escape_html(row.id.as_str());
        format!(
            r#"<div class="transaction transaction_{kind} row">
  <div class="col-md-7 transaction__details">
    <div class="transaction__icon">
      <span class="fa fa-money fa-2x"></span>
    </div>
    <div class="transaction__info">
      <h4 class="transaction__title">{name}</h4>
      <div class="transaction__date">{date}</div>
    </div>
  </div>
  <div class="col-md-3">
    <div class="transaction__summ">
      {sum} <span class="currency">{currency}</span>
    </div>
  </div>
  <div class="col-md-2 transaction__controls">
    <button class="btn btn-danger {remove_class}" data-action="remove-transaction" data-id="{id}">
      <i class="fa fa-trash"></i>
    </button>
  </div>
</div>"#,
            kind = row.kind,
            name = escape_html(&row.name),
            date = escape_html(&row.date),
            sum = escape_html(&row.sum),
            currency = escape_html(&self.currency.symbol),
            remove_class = escape_html(&self.remove_transaction_class),
            id = id,
        )
    }

    /// Full content region for a list; empty list gives the empty string
    pub fn render_rows(&self, records: &[TransactionRecord]) -> String {
        records
            .iter()
            .map(|record| self.build_row_markup(&self.project(record)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
