//! Options for submitting a mailing for processing

use crate::types::PaymentMethod;

/// Options for `ProcessMailing`
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOptions {
    /// Submit for printing, rather than only pricing and proofing
    pub submit: bool,
    /// Process the mailing even if some addresses fail validation
    pub partial_process: bool,
    /// Reject the mailing above this price; 0 means no limit
    pub max_price_ex_vat: f64,
    pub po_reference: String,
    pub payment_method: PaymentMethod,
    pub skip_preview_image_generation: bool,
    /// Comma-separated addresses notified on success
    pub email_success_list: String,
    /// Comma-separated addresses notified on error
    pub email_error_list: String,
    pub http_post_on_success: String,
    pub http_post_on_error: String,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            submit: false,
            partial_process: true,
            max_price_ex_vat: 0.0,
            po_reference: String::new(),
            payment_method: PaymentMethod::Topup,
            skip_preview_image_generation: false,
            email_success_list: String::new(),
            email_error_list: String::new(),
            http_post_on_success: String::new(),
            http_post_on_error: String::new(),
        }
    }
}

impl ProcessOptions {
    /// Create the default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit the mailing for printing
    #[must_use]
    pub fn submit(mut self, submit: bool) -> Self {
        self.submit = submit;
        self
    }

    /// Allow or refuse partial processing
    #[must_use]
    pub fn partial_process(mut self, partial: bool) -> Self {
        self.partial_process = partial;
        self
    }

    /// Cap the price of the mailing
    #[must_use]
    pub fn max_price_ex_vat(mut self, price: f64) -> Self {
        self.max_price_ex_vat = price;
        self
    }

    /// Set the purchase order reference
    #[must_use]
    pub fn po_reference(mut self, reference: impl Into<String>) -> Self {
        self.po_reference = reference.into();
        self
    }

    /// Set the payment method
    #[must_use]
    pub fn payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }
}
