//! Payment-link creation modal.
//!
//! The modal moves between two states: collecting the form, and showing a
//! generated link. The link is a random token with no gateway behind it, and
//! the "simulate" actions only exist for demonstrations.

use crate::errors::{Error, Result};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info};

use super::payment::PaymentStatus;

/// Message shown when a required field is empty.
pub const MISSING_FIELDS_MESSAGE: &str = "Por favor completa todos los campos";

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TOKEN_LENGTH: usize = 9;

/// Random lowercase base-36 token used in generated links.
#[must_use]
pub fn random_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LENGTH)
        .map(|_| char::from(TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())]))
        .collect()
}

/// Joins a base URL and a fresh random token.
#[must_use]
pub fn generate_link(base_url: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), random_token())
}

/// Invite link handed out from the admin settings tab.
#[must_use]
pub fn generate_invite_link(base_url: &str) -> String {
    generate_link(base_url)
}

/// Validated form input, ready to become a payment.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    /// Name of the payer
    pub contact: String,
    /// Free-text concept
    pub description: String,
    /// Finite, non-negative amount
    pub amount: f64,
}

/// Demonstration outcome a generated link can be "paid" with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatedOutcome {
    /// Pretend the payer paid
    Approved,
    /// Pretend the link was cancelled
    Cancelled,
}

impl SimulatedOutcome {
    /// Status the simulated payment ends up in.
    #[must_use]
    pub const fn status(self) -> PaymentStatus {
        match self {
            Self::Approved => PaymentStatus::Approved,
            Self::Cancelled => PaymentStatus::Cancelled,
        }
    }
}

/// Where the modal currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    /// Collecting contact, description and amount
    Form,
    /// A link was generated for `payment_id`
    LinkGenerated {
        /// The decorative payment link
        link: String,
        /// Payment created together with the link, if the caller recorded one
        payment_id: Option<String>,
    },
}

/// The "create payment link" modal.
#[derive(Debug, Clone)]
pub struct LinkModal {
    contact: String,
    description: String,
    amount: String,
    state: ModalState,
    link_base_url: String,
    simulation_delay: Duration,
}

impl LinkModal {
    /// Creates an empty modal in the form state.
    #[must_use]
    pub fn new(link_base_url: impl Into<String>, simulation_delay: Duration) -> Self {
        Self {
            contact: String::new(),
            description: String::new(),
            amount: String::new(),
            state: ModalState::Form,
            link_base_url: link_base_url.into(),
            simulation_delay,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &ModalState {
        &self.state
    }

    /// Raw field values as (contact, description, amount).
    #[must_use]
    pub fn fields(&self) -> (&str, &str, &str) {
        (&self.contact, &self.description, &self.amount)
    }

    /// Sets the contact field.
    pub fn set_contact(&mut self, contact: impl Into<String>) {
        self.contact = contact.into();
    }

    /// Sets the description field.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Sets the amount field (raw text, parsed on submit).
    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    /// Validates the form and generates a link.
    ///
    /// On error the modal is left exactly as it was.
    pub fn submit(&mut self) -> Result<(NewPayment, String)> {
        if self.state != ModalState::Form {
            return Err(Error::InvalidTransition {
                message: "a link was already generated; reset the modal first".to_string(),
            });
        }

        let contact = self.contact.trim();
        let description = self.description.trim();
        let amount_text = self.amount.trim();
        if contact.is_empty() || description.is_empty() || amount_text.is_empty() {
            return Err(Error::Validation {
                message: MISSING_FIELDS_MESSAGE.to_string(),
            });
        }

        let amount = amount_text
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a >= 0.0)
            .ok_or_else(|| Error::InvalidAmount {
                input: amount_text.to_string(),
            })?;

        let draft = NewPayment {
            contact: contact.to_string(),
            description: description.to_string(),
            amount,
        };
        let link = generate_link(&self.link_base_url);
        info!("Generated payment link {link}");

        self.state = ModalState::LinkGenerated {
            link: link.clone(),
            payment_id: None,
        };
        Ok((draft, link))
    }

    /// Associates the payment recorded for the current link with it.
    pub fn attach_payment(&mut self, id: impl Into<String>) {
        if let ModalState::LinkGenerated { payment_id, .. } = &mut self.state {
            *payment_id = Some(id.into());
        }
    }

    /// Clears every field and returns to the form ("create another" or dismiss).
    pub fn reset(&mut self) {
        self.contact.clear();
        self.description.clear();
        self.amount.clear();
        self.state = ModalState::Form;
        debug!("Payment-link modal reset");
    }

    /// Plays out a demonstration outcome for the generated link.
    ///
    /// Waits the cosmetic delay, then resets the modal. Returns the payment the
    /// link was attached to (if any) and the status it should take.
    pub async fn simulate(
        &mut self,
        outcome: SimulatedOutcome,
    ) -> Result<(Option<String>, PaymentStatus)> {
        let ModalState::LinkGenerated { payment_id, .. } = &self.state else {
            return Err(Error::InvalidTransition {
                message: "no payment link has been generated yet".to_string(),
            });
        };
        let payment_id = payment_id.clone();

        info!("Simulating {outcome:?} for {payment_id:?}");
        tokio::time::sleep(self.simulation_delay).await;
        self.reset();

        Ok((payment_id, outcome.status()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn filled_modal() -> LinkModal {
        let mut modal = LinkModal::new("https://mpago.la", Duration::ZERO);
        modal.set_contact("Juan Pérez");
        modal.set_description("Curso Online");
        modal.set_amount("12000.50");
        modal
    }

    #[test]
    fn test_random_token_shape() {
        let token = random_token();
        assert_eq!(token.len(), 9);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[test]
    fn test_generate_link_joins_base() {
        let link = generate_link("https://mpago.la/");
        assert!(link.starts_with("https://mpago.la/"));
        assert_eq!(link.len(), "https://mpago.la/".len() + 9);
    }

    #[test]
    fn test_submit_generates_link() {
        let mut modal = filled_modal();
        let (draft, link) = modal.submit().unwrap();

        assert_eq!(draft.contact, "Juan Pérez");
        assert_eq!(draft.amount, 12000.5);
        assert_eq!(
            modal.state(),
            &ModalState::LinkGenerated {
                link,
                payment_id: None
            }
        );
    }

    #[test]
    fn test_submit_with_any_empty_field_changes_nothing() {
        for field in 0..3 {
            let mut modal = filled_modal();
            match field {
                0 => modal.set_contact(""),
                1 => modal.set_description("   "),
                _ => modal.set_amount(""),
            }
            let before = {
                let (contact, description, amount) = modal.fields();
                (contact.to_string(), description.to_string(), amount.to_string())
            };

            let err = modal.submit().unwrap_err();
            assert!(
                matches!(err, Error::Validation { ref message } if message == MISSING_FIELDS_MESSAGE)
            );
            assert_eq!(modal.state(), &ModalState::Form);
            assert_eq!(
                modal.fields(),
                (before.0.as_str(), before.1.as_str(), before.2.as_str())
            );
        }
    }

    #[test]
    fn test_submit_rejects_bad_amounts() {
        for input in ["abc", "-5", "NaN", "inf"] {
            let mut modal = filled_modal();
            modal.set_amount(input);
            assert!(matches!(
                modal.submit(),
                Err(Error::InvalidAmount { .. })
            ));
            assert_eq!(modal.state(), &ModalState::Form);
        }
    }

    #[test]
    fn test_submit_twice_is_rejected() {
        let mut modal = filled_modal();
        modal.submit().unwrap();
        assert!(matches!(
            modal.submit(),
            Err(Error::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_reset_clears_fields() {
        let mut modal = filled_modal();
        modal.submit().unwrap();
        modal.reset();
        assert_eq!(modal.state(), &ModalState::Form);
        assert_eq!(modal.fields(), ("", "", ""));
    }

    #[tokio::test]
    async fn test_simulate_returns_to_form() {
        let mut modal = filled_modal();
        modal.submit().unwrap();
        modal.attach_payment("PAY-42");

        let (id, status) = modal.simulate(SimulatedOutcome::Cancelled).await.unwrap();
        assert_eq!(id.as_deref(), Some("PAY-42"));
        assert_eq!(status, PaymentStatus::Cancelled);
        assert_eq!(modal.state(), &ModalState::Form);
        assert_eq!(modal.fields(), ("", "", ""));
    }

    #[tokio::test]
    async fn test_simulate_from_form_is_rejected() {
        let mut modal = filled_modal();
        let result = modal.simulate(SimulatedOutcome::Approved).await;
        assert!(matches!(result, Err(Error::InvalidTransition { .. })));
        assert_eq!(modal.fields().0, "Juan Pérez");
    }
}
