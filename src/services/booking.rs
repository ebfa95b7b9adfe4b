//! Booking service
//!
//! Builds an immutable, fully-priced booking from the current cart and the
//! requester form, renders the PDF through the collaborator and emails the
//! equipment manager. The requester gets a copy on a best-effort basis. A
//! separate confirmation flow, reached through the link embedded in the
//! manager email, re-sends the approved booking to the requester.

use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use validator::Validate;

use crate::config::BookingConfig;
use crate::error::{AppError, AppResult};
use crate::models::{BookingLine, BookingRequest, Cart, CheckoutInfo};
use crate::pricing;
use crate::providers::{mail::EmailAttachment, MailTransport, OutgoingEmail, PdfRenderer};

use super::token;

#[derive(Clone)]
pub struct BookingService {
    pdf: Arc<dyn PdfRenderer>,
    mailer: Arc<dyn MailTransport>,
    config: BookingConfig,
}

impl BookingService {
    pub fn new(
        pdf: Arc<dyn PdfRenderer>,
        mailer: Arc<dyn MailTransport>,
        config: BookingConfig,
    ) -> Self {
        Self { pdf, mailer, config }
    }

    /// Build a booking payload from the current cart and requester fields.
    ///
    /// Checkout is blocked until a rental period is chosen and the cart
    /// has at least one line.
    pub fn build_request(cart: &Cart, info: &CheckoutInfo) -> AppResult<BookingRequest> {
        info.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let period = cart.rental_period.ok_or_else(|| {
            AppError::Validation("A rental period must be chosen before checkout".to_string())
        })?;
        if cart.is_empty() {
            return Err(AppError::Validation("The cart is empty".to_string()));
        }

        let day_count = period.day_count();
        let lines: Vec<BookingLine> = cart
            .lines
            .iter()
            .map(|line| BookingLine {
                name: line.equipment.name.clone(),
                category: line.equipment.category,
                quantity: line.quantity,
                day_rate: line.equipment.day_rate,
                line_price: pricing::price(line.equipment.day_rate, day_count)
                    * Decimal::from(line.quantity),
            })
            .collect();
        let total_price = lines.iter().map(|line| line.line_price).sum();

        Ok(BookingRequest {
            name: info.name.trim().to_string(),
            email: info.email.trim().to_string(),
            class_name: info.class_name.trim().to_string(),
            project: info.project.clone().filter(|p| !p.trim().is_empty()),
            date_from: period.date_from,
            date_to: period.date_to,
            day_count,
            lines,
            total_price,
        })
    }

    /// Render the booking PDF for manual download
    pub async fn render_pdf(&self, booking: &BookingRequest) -> AppResult<Vec<u8>> {
        self.pdf.render(booking).await
    }

    /// Submit a booking: PDF to the manager with a confirmation link, then
    /// a best-effort copy to the requester. Returns the confirmation token.
    ///
    /// Mail failure is surfaced to the caller; the cart must not be
    /// cleared in that case.
    pub async fn submit(&self, booking: &BookingRequest) -> AppResult<String> {
        let document = self.pdf.render(booking).await?;
        let confirmation_token = token::encode(booking)?;

        let manager_email = OutgoingEmail {
            to: self.config.manager_email.clone(),
            subject: format!(
                "Equipment Booking Inquiry - {} ({}) - {}",
                booking.name, booking.class_name, booking.date_from
            ),
            html_body: self.inquiry_html(booking, &confirmation_token),
            attachment: Some(EmailAttachment {
                filename: inquiry_filename(booking),
                content: document.clone(),
            }),
        };
        self.mailer.send(manager_email).await?;

        let requester_copy = OutgoingEmail {
            to: booking.email.clone(),
            subject: format!(
                "Booking Request Received - {} ({}) - {}",
                booking.name, booking.class_name, booking.date_from
            ),
            html_body: received_html(booking),
            attachment: Some(EmailAttachment {
                filename: inquiry_filename(booking),
                content: document,
            }),
        };
        if let Err(e) = self.mailer.send(requester_copy).await {
            // the inquiry went through; the copy is best-effort
            tracing::warn!("Failed to send requester copy: {}", e);
        }

        Ok(confirmation_token)
    }

    /// Send the approved confirmation (with a fresh PDF) to the requester
    pub async fn send_confirmation(&self, booking: &BookingRequest) -> AppResult<()> {
        let document = self.pdf.render(booking).await?;

        let email = OutgoingEmail {
            to: booking.email.clone(),
            subject: format!(
                "Booking Confirmed - {} ({}) - {}",
                booking.name, booking.class_name, booking.date_from
            ),
            html_body: confirmed_html(booking),
            attachment: Some(EmailAttachment {
                filename: confirmed_filename(booking),
                content: document,
            }),
        };
        self.mailer.send(email).await
    }

    fn inquiry_html(&self, booking: &BookingRequest, confirmation_token: &str) -> String {
        let confirm_url = format!(
            "{}/confirm?data={}",
            self.config.public_base_url.trim_end_matches('/'),
            confirmation_token
        );
        format!(
            r#"<h2>New Equipment Booking Inquiry</h2>
<p><strong>Name:</strong> {name}</p>
<p><strong>Email:</strong> {email}</p>
<p><strong>Class:</strong> {class}</p>
<p><strong>Project:</strong> {project}</p>
<p><strong>Rental Period:</strong> {from} to {to} ({days} days)</p>
<h3>Equipment List</h3>
<ul>{items}</ul>
<p><strong>Total (excl. VAT):</strong> {total} kr</p>
<p><a href="{confirm_url}">Review and confirm this booking</a></p>
<p><em>The booking PDF is attached.</em></p>"#,
            name = booking.name,
            email = booking.email,
            class = booking.class_name,
            project = booking.project.as_deref().unwrap_or("N/A"),
            from = booking.date_from,
            to = booking.date_to,
            days = booking.day_count,
            items = items_list_html(booking),
            total = booking.total_price,
            confirm_url = confirm_url,
        )
    }
}

fn price_label(line: &BookingLine) -> String {
    if line.day_rate > Decimal::ZERO {
        format!("{} kr", line.line_price)
    } else {
        "Price TBD".to_string()
    }
}

fn items_list_html(booking: &BookingRequest) -> String {
    booking
        .lines
        .iter()
        .map(|line| {
            format!(
                "<li>{} ({}) x{} - {} days - {}</li>",
                line.name,
                line.category,
                line.quantity,
                booking.day_count,
                price_label(line)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn received_html(booking: &BookingRequest) -> String {
    format!(
        r#"<h2>Booking Request Received</h2>
<p>Hi {name},</p>
<p>Your equipment booking request has been sent to the equipment manager.
You will receive a confirmation once it is approved.</p>
<p><strong>Rental Period:</strong> {from} to {to}</p>
<ul>{items}</ul>
<p><strong>Total (excl. VAT):</strong> {total} kr</p>
<p><em>A copy of the booking PDF is attached.</em></p>"#,
        name = booking.name,
        from = booking.date_from,
        to = booking.date_to,
        items = items_list_html(booking),
        total = booking.total_price,
    )
}

fn confirmed_html(booking: &BookingRequest) -> String {
    format!(
        r#"<h2>Booking Confirmed!</h2>
<p>Hi {name},</p>
<p>Your equipment booking has been <strong>approved</strong>.</p>
<h3>Booking Details</h3>
<p><strong>Class:</strong> {class}</p>
<p><strong>Project:</strong> {project}</p>
<p><strong>Rental Period:</strong> {from} to {to}</p>
<p><strong>Items Confirmed:</strong> {count}</p>
<p><strong>Total (excl. VAT):</strong> {total} kr</p>
<h3>Equipment List</h3>
<ul>{items}</ul>
<p>Please pick up the equipment at the scheduled time.</p>
<p><em>A booking confirmation PDF is attached for your records.</em></p>"#,
        name = booking.name,
        class = booking.class_name,
        project = booking.project.as_deref().unwrap_or("N/A"),
        from = booking.date_from,
        to = booking.date_to,
        count = booking.lines.len(),
        total = booking.total_price,
        items = items_list_html(booking),
    )
}

/// Filename used for the inquiry PDF, both attached and downloaded
pub fn inquiry_filename(booking: &BookingRequest) -> String {
    format!(
        "equipment-booking-{}-{}.pdf",
        booking.name.split_whitespace().collect::<Vec<_>>().join("-"),
        booking.date_from
    )
}

fn confirmed_filename(booking: &BookingRequest) -> String {
    format!(
        "{}_Booking_Confirmed_{}.pdf",
        booking.name.split_whitespace().collect::<String>(),
        Utc::now().date_naive()
    )
}
