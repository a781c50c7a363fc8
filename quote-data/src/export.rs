use std::io::Write;

use quote_core::Lead;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when exporting leads.
#[derive(Debug, Error)]
pub enum LeadExportError {
    #[error("CSV write error: {0}")]
    CsvWrite(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for LeadExportError {
    fn from(err: csv::Error) -> Self {
        LeadExportError::CsvWrite(err.to_string())
    }
}

/// A single row of the lead export.
///
/// Estimate-only columns are empty for contact-form leads.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LeadCsvRecord {
    pub id: String,
    pub created_at: String,
    pub form_type: &'static str,
    pub status: &'static str,
    pub connected: bool,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project_type: String,
    pub complexity: String,
    pub total_project_value: Option<Decimal>,
    pub monthly_subscription: Option<Decimal>,
    pub delivery_time: String,
}

impl From<&Lead> for LeadCsvRecord {
    fn from(lead: &Lead) -> Self {
        let selection = lead.selection.as_ref();
        let quotation = lead.quotation.as_ref();
        Self {
            id: lead.id.clone(),
            created_at: lead
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            form_type: lead.form_type.as_str(),
            status: lead.status().as_str(),
            connected: lead.is_customer_connected,
            name: lead.lead_info.name.clone(),
            email: lead.lead_info.email.clone(),
            phone: lead.lead_info.phone.clone(),
            project_type: selection.map(|s| s.project_type.clone()).unwrap_or_default(),
            complexity: selection.map(|s| s.complexity.clone()).unwrap_or_default(),
            total_project_value: quotation.map(|q| q.total_project_value),
            monthly_subscription: quotation.map(|q| q.monthly_subscription),
            delivery_time: quotation.map(|q| q.delivery_time.clone()).unwrap_or_default(),
        }
    }
}

/// Writes leads as CSV with a header row.
pub struct LeadCsvExporter;

impl LeadCsvExporter {
    /// Write `leads` to `writer` and return the number of rows written.
    pub fn write<'a, W, I>(
        writer: W,
        leads: I,
    ) -> Result<usize, LeadExportError>
    where
        W: Write,
        I: IntoIterator<Item = &'a Lead>,
    {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let mut written = 0;

        for lead in leads {
            csv_writer.serialize(LeadCsvRecord::from(lead))?;
            written += 1;
        }

        csv_writer.flush()?;
        Ok(written)
    }
}
