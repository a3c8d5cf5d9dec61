//! Client dashboard - one client's payments, link creation and exports.
//!
//! The working collection is persisted under `clientPayments`. New payments
//! are prepended; nothing is ever deleted.

use chrono::Utc;
use std::path::PathBuf;
use tracing::{info, instrument};

use crate::{
    config::DashboardConfig,
    core::{
        export::{self, ExportFormat},
        payment::{Payment, PaymentStatus},
        payment_link::{LinkModal, NewPayment, SimulatedOutcome},
        persisted::Persisted,
        stats::{self, PaymentFilter, PaymentTotals},
        storage::KeyValueStore,
    },
    errors::{Error, Result},
};

use super::views;

/// Storage key of the client's working payment collection.
pub const CLIENT_PAYMENTS_KEY: &str = "clientPayments";
/// File stem of the client's exports.
pub const CLIENT_EXPORT_FILENAME: &str = "mis-pagos";

/// Result of generating a payment link.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedLink {
    /// The recorded payment, status `pending`
    pub payment: Payment,
    /// The decorative link shown to the user
    pub link: String,
}

/// Page controller of the client view.
#[derive(Debug)]
pub struct ClientDashboard<S> {
    client_id: String,
    payments: Persisted<Vec<Payment>, S>,
    modal: LinkModal,
    export_dir: PathBuf,
}

impl<S: KeyValueStore> ClientDashboard<S> {
    /// Restores the persisted collection, or starts from the seed payments of
    /// the configured client. A stored collection holding an invalid amount
    /// counts as corrupted.
    pub async fn load(store: S, config: &DashboardConfig, seed: &[Payment]) -> Self {
        let default = stats::filter_by_client(seed, &config.client_id);
        let payments = Persisted::load_validated(store, CLIENT_PAYMENTS_KEY, default, |list| {
            list.iter().all(Payment::has_valid_amount)
        })
        .await;
        info!(
            "Client dashboard for client {} with {} payments",
            config.client_id,
            payments.get().len()
        );

        Self {
            client_id: config.client_id.clone(),
            payments,
            modal: LinkModal::new(config.link_base_url.clone(), config.simulation_delay()),
            export_dir: PathBuf::from(&config.export_dir),
        }
    }

    /// Working collection, newest first.
    #[must_use]
    pub fn payments(&self) -> &[Payment] {
        self.payments.get()
    }

    /// True if the local store failed and changes only live in memory.
    #[must_use]
    pub const fn is_storage_degraded(&self) -> bool {
        self.payments.is_degraded()
    }

    /// Amount totals over the working collection.
    #[must_use]
    pub fn totals(&self) -> PaymentTotals {
        stats::compute_totals(self.payments())
    }

    /// Number of approved payments.
    #[must_use]
    pub fn approved_count(&self) -> usize {
        stats::count_by_status(self.payments(), PaymentStatus::Approved)
    }

    /// Number of failed payments.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        stats::count_by_status(self.payments(), PaymentStatus::Failed)
    }

    /// Rows of the payments table after applying `filter`.
    #[must_use]
    pub fn filtered(&self, filter: &PaymentFilter) -> Vec<&Payment> {
        stats::filter_payments(self.payments(), filter)
    }

    /// The link-creation modal.
    #[must_use]
    pub const fn modal(&self) -> &LinkModal {
        &self.modal
    }

    /// Mutable access to the modal, for filling in fields.
    pub const fn modal_mut(&mut self) -> &mut LinkModal {
        &mut self.modal
    }

    /// Submits the modal and records the resulting payment.
    ///
    /// Validation failures leave both the modal and the collection untouched.
    #[instrument(skip(self))]
    pub async fn submit_modal(&mut self) -> Result<CreatedLink> {
        let (draft, link) = self.modal.submit()?;
        let payment = self.record_payment(draft).await;
        self.modal.attach_payment(payment.id.clone());
        Ok(CreatedLink { payment, link })
    }

    /// Fills the modal with the given values and submits it.
    pub async fn create_payment(
        &mut self,
        contact: &str,
        description: &str,
        amount: &str,
    ) -> Result<CreatedLink> {
        self.modal.set_contact(contact);
        self.modal.set_description(description);
        self.modal.set_amount(amount);
        self.submit_modal().await
    }

    async fn record_payment(&mut self, draft: NewPayment) -> Payment {
        let id = next_payment_id(self.payments(), Utc::now().timestamp_millis());
        let payment = Payment {
            id,
            date: Utc::now().date_naive(),
            contact: draft.contact,
            description: draft.description,
            amount: draft.amount,
            status: PaymentStatus::Pending,
            client_id: Some(self.client_id.clone()),
        };

        let recorded = payment.clone();
        self.payments.update(|list| list.insert(0, payment)).await;
        info!("Recorded payment {} for {}", recorded.id, recorded.contact);
        recorded
    }

    /// Plays a demonstration outcome for the current link and applies the
    /// resulting status to its payment.
    pub async fn simulate(&mut self, outcome: SimulatedOutcome) -> Result<Payment> {
        let (payment_id, status) = self.modal.simulate(outcome).await?;
        let id = payment_id.ok_or_else(|| Error::InvalidTransition {
            message: "the generated link has no recorded payment".to_string(),
        })?;

        if !self.payments().iter().any(|p| p.id == id) {
            return Err(Error::PaymentNotFound { id });
        }

        let updated = self
            .payments
            .update(|list| {
                list.iter_mut().find(|p| p.id == id).map(|p| {
                    p.status = status;
                    p.clone()
                })
            })
            .await;

        updated.ok_or(Error::PaymentNotFound { id })
    }

    /// One-line detail of a payment (the table's "view" action).
    pub fn payment_details(&self, id: &str) -> Result<String> {
        self.payments()
            .iter()
            .find(|p| p.id == id)
            .map(|p| format!("{} - {}", p.contact, views::format_amount(p.amount)))
            .ok_or_else(|| Error::PaymentNotFound { id: id.to_string() })
    }

    /// Writes the working collection as `mis-pagos.csv`.
    pub fn export_csv(&self) -> Result<PathBuf> {
        let contents = export::to_csv(self.payments())?;
        export::save_export(
            &self.export_dir,
            CLIENT_EXPORT_FILENAME,
            ExportFormat::Csv,
            &contents,
        )
    }

    /// Writes the working collection as `mis-pagos.json`.
    pub fn export_json(&self) -> Result<PathBuf> {
        let contents = export::to_json(self.payments())?;
        export::save_export(
            &self.export_dir,
            CLIENT_EXPORT_FILENAME,
            ExportFormat::Json,
            &contents,
        )
    }

    /// Full text of the client view: stat cards, status chart and payments table.
    #[must_use]
    pub fn render(&self, filter: &PaymentFilter) -> String {
        let totals = self.totals();
        let cards = [
            views::render_card(
                "Total Cobrado",
                &views::format_amount(totals.approved),
                Some("+12% este mes"),
            ),
            views::render_card("Pendientes", &views::format_amount(totals.pending), None),
            views::render_card("Aprobados", &self.approved_count().to_string(), None),
            views::render_card("Fallidos", &self.failed_count().to_string(), None),
        ];

        let mut out = String::from("Panel de Cliente\n\n");
        out.push_str(&cards.join("\n"));
        out.push_str("\n\n");
        out.push_str(&views::render_status_chart(&stats::status_distribution(&totals)));
        out.push('\n');
        out.push_str(&views::render_payments_table(&self.filtered(filter)));
        if self.is_storage_degraded() {
            out.push_str("\n(almacenamiento local no disponible, los cambios no se guardarán)\n");
        }
        out
    }
}

/// `PAY-<millis>`, bumped forward until it does not collide with an existing id.
fn next_payment_id(existing: &[Payment], now_millis: i64) -> String {
    let mut millis = now_millis;
    loop {
        let candidate = format!("PAY-{millis}");
        if !existing.iter().any(|p| p.id == candidate) {
            return candidate;
        }
        millis += 1;
    }
}
