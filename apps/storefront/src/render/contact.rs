//! Contact page: bakery details and the contact form.

use crumbs_core::error::FormField;
use crumbs_core::seo::{BusinessProfile, PageMeta};
use crumbs_core::validation::{ContactForm, FieldErrors};
use maud::{html, Markup};

use crate::contact::SubmitOutcome;
use crate::render::layout::{page, page_intro, Nav, PageContext};

/// What the form shows: the values, their errors and the last outcome.
#[derive(Debug, Clone, Default)]
pub struct ContactView {
    pub form: ContactForm,
    pub errors: FieldErrors,
    pub outcome: Option<SubmitOutcome>,
}

impl ContactView {
    /// A blank form.
    pub fn blank() -> Self {
        ContactView::default()
    }

    /// Validation failed: keep the values, show the errors.
    pub fn invalid(form: ContactForm, errors: FieldErrors) -> Self {
        ContactView {
            form,
            errors,
            outcome: None,
        }
    }

    /// After a submission. The form clears only on success.
    pub fn submitted(form: ContactForm, outcome: SubmitOutcome) -> Self {
        let form = if outcome.is_success() {
            ContactForm::default()
        } else {
            form
        };
        ContactView {
            form,
            errors: FieldErrors::default(),
            outcome: Some(outcome),
        }
    }
}

/// Renders `/contact`.
pub fn render(ctx: &PageContext<'_>, view: &ContactView) -> Markup {
    let meta = PageMeta::new("Contact Us", "/contact")
        .with_description("Questions or custom orders? Get in touch with Sweet Crumbs.");

    let body = html! {
        div.container {
            (page_intro(
                "Contact Us",
                Some("Have a question or want to place a custom order? We'd love to hear from you!"),
            ))
            div.contact-grid {
                (details(ctx.business))
                (form(view))
            }
        }
    };
    page(ctx, &meta, Nav::Contact, &[], body)
}

fn details(business: &BusinessProfile) -> Markup {
    html! {
        section.contact-details {
            h2 { "Get in Touch" }
            div.detail {
                h3 { "Visit Our Bakery" }
                p { (business.street) br; (business.city_line()) }
            }
            div.detail {
                h3 { "Call Us" }
                p { a href=(format!("tel:{}", business.telephone)) { (business.telephone) } }
            }
            div.detail {
                h3 { "Email Us" }
                p { a href=(format!("mailto:{}", business.email)) { (business.email) } }
            }
            div.detail {
                h3 { "Hours" }
                @for hours in &business.hours {
                    p { (hours.display()) }
                }
            }
        }
    }
}

fn form(view: &ContactView) -> Markup {
    html! {
        section.contact-form {
            @if let Some(outcome) = &view.outcome {
                div class=(if outcome.is_success() { "banner success" } else { "banner error" }) role="status" {
                    (outcome.message())
                }
            }
            form method="post" action="/contact" novalidate {
                (field(view, FormField::Name, "text", "Your full name", &view.form.name))
                (field(view, FormField::Email, "email", "your.email@example.com", &view.form.email))
                (message_field(view))
                button.button type="submit" { "Send Message" }
            }
        }
    }
}

fn field(view: &ContactView, which: FormField, kind: &str, placeholder: &str, value: &str) -> Markup {
    let name = field_name(which);
    let error = view.errors.get(which);
    html! {
        div.field {
            label for=(name) { (which) " *" }
            input type=(kind)
                id=(name)
                name=(name)
                value=(value)
                placeholder=(placeholder)
                aria-invalid=[error.map(|_| "true")];
            @if let Some(error) = error {
                p.field-error { (error) }
            }
        }
    }
}

fn message_field(view: &ContactView) -> Markup {
    let error = view.errors.get(FormField::Message);
    html! {
        div.field {
            label for="message" { "Message *" }
            textarea id="message"
                name="message"
                rows="6"
                placeholder="Tell us about your inquiry or custom order..."
                aria-invalid=[error.map(|_| "true")] { (view.form.message) }
            @if let Some(error) = error {
                p.field-error { (error) }
            }
        }
    }
}

fn field_name(field: FormField) -> &'static str {
    match field {
        FormField::Name => "name",
        FormField::Email => "email",
        FormField::Message => "message",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteSettings;
    use crumbs_core::validation::validate_contact_form;

    fn render_contact(view: &ContactView) -> String {
        let site = SiteSettings::default();
        let business = BusinessProfile::sweet_crumbs();
        let ctx = PageContext::new(&site, &business);
        render(&ctx, view).into_string()
    }

    #[test]
    fn test_blank_form_and_details() {
        let html = render_contact(&ContactView::blank());
        assert!(html.contains("Get in Touch"));
        assert!(html.contains("123 Baker Street"));
        assert!(html.contains("Monday - Friday: 7:00 AM - 7:00 PM"));
        assert!(html.contains(r#"placeholder="Your full name""#));
        assert!(html.contains("Send Message"));
        assert!(!html.contains("banner"));
        assert!(!html.contains("field-error"));
    }

    #[test]
    fn test_invalid_form_keeps_values_and_shows_errors() {
        let form = ContactForm::new("Ada", "not-an-email", "short");
        let errors = validate_contact_form(&form).unwrap_err();
        let html = render_contact(&ContactView::invalid(form, errors));
        assert!(html.contains(r#"value="not-an-email""#));
        assert!(html.contains(">short</textarea>"));
        assert_eq!(html.matches(r#"class="field-error""#).count(), 2);
        assert_eq!(html.matches(r#"aria-invalid="true""#).count(), 2);
    }

    #[test]
    fn test_success_clears_form() {
        let form = ContactForm::new("Ada", "ada@example.com", "Two dozen croissants please");
        let view = ContactView::submitted(form, SubmitOutcome::Sent("Thanks!".into()));
        let html = render_contact(&view);
        assert!(html.contains(r#"class="banner success""#));
        assert!(html.contains("Thanks!"));
        assert!(!html.contains("ada@example.com"));
    }

    #[test]
    fn test_failure_keeps_form() {
        let form = ContactForm::new("Ada", "ada@example.com", "Two dozen croissants please");
        let view = ContactView::submitted(form, SubmitOutcome::Failed("Failed to send".into()));
        let html = render_contact(&view);
        assert!(html.contains(r#"class="banner error""#));
        assert!(html.contains(r#"value="ada@example.com""#));
    }
}
