//! Docmail client
//!
//! Each method maps to one remote operation:
//! - builds the positional argument list the service expects
//! - invokes it through the configured [`SoapService`]
//! - decodes the XML result, surfacing faults as [`Error::Fault`]

use crate::config::ClientConfig;
use crate::decode::{DecodedRecord, FieldValue, ResponseDecoder, TargetKind};
use crate::error::{Error, Result};
use crate::model::{Mailing, MailingListFile, ProcessOptions, TemplateFile};
use crate::soap::{SoapArg, SoapService};
use crate::types::BalanceAccount;
use tracing::{debug, warn};

/// Correction method used when none is given
pub const DEFAULT_CORRECTION_METHOD: &str = "Cost";

/// Client for the Docmail service
pub struct DocmailClient<S> {
    service: S,
    config: ClientConfig,
    decoder: ResponseDecoder,
}

impl<S: SoapService> DocmailClient<S> {
    /// Create a client over a transport
    pub fn new(config: ClientConfig, service: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            service,
            config,
            decoder: ResponseDecoder::new(),
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the underlying transport
    pub fn service(&self) -> &S {
        &self.service
    }

    // ========================================================================
    // Mailings
    // ========================================================================

    /// Fetch a mailing by GUID
    pub async fn get_mailing(&self, guid: &str) -> Result<Mailing> {
        let mut mailing: Mailing = self
            .invoke("GetMailingDetails", vec![guid.into()])
            .await?;
        mailing.guid = Some(guid.to_string());
        Ok(mailing)
    }

    /// Create a mailing, storing and returning the GUID the service assigns
    pub async fn create_mailing(&self, mailing: &mut Mailing) -> Result<String> {
        let record: DecodedRecord = self
            .invoke(
                "CreateMailing",
                vec![
                    self.config.source.as_str().into(),
                    mailing.product_type.as_str().into(),
                    mailing.name.clone().into(),
                    mailing.mailing_description.clone().into(),
                    mailing.is_mono().into(),
                    mailing.is_duplex.into(),
                    mailing.delivery_type.as_str().into(),
                    mailing.courier_delivery_to_self.into(),
                    mailing.despatch_asap.into(),
                    mailing.despatch_date.into(),
                    mailing.address_name_prefix.clone().into(),
                    mailing.address_name_format.as_str().into(),
                    mailing.discount_code.clone().into(),
                    mailing.min_envelope_size.as_str().into(),
                ],
            )
            .await?;

        let guid = required_text(&record, "mailing_guid")?;
        mailing.guid = Some(guid.clone());
        Ok(guid)
    }

    /// Update the options of an existing mailing
    pub async fn update_mailing(&self, mailing: &Mailing) -> Result<bool> {
        let guid = mailing
            .guid
            .as_deref()
            .ok_or_else(|| Error::invalid_value("guid", "mailing has not been created yet"))?;

        let record: DecodedRecord = self
            .invoke(
                "UpdateMailingOptions",
                vec![
                    guid.into(),
                    mailing.name.clone().into(),
                    mailing.mailing_description.clone().into(),
                    mailing.is_mono().into(),
                    mailing.is_duplex.into(),
                    mailing.delivery_type.as_str().into(),
                    mailing.despatch_asap.into(),
                    mailing.despatch_date.into(),
                    mailing.address_name_prefix.clone().into(),
                    mailing.address_name_format.as_str().into(),
                    mailing.discount_code.clone().into(),
                    mailing.min_envelope_size.as_str().into(),
                ],
            )
            .await?;
        success(&record)
    }

    /// Upload a template to a mailing, storing and returning its GUID
    pub async fn add_template_file(
        &self,
        mailing_guid: &str,
        template: &mut TemplateFile,
    ) -> Result<String> {
        let record: DecodedRecord = self
            .invoke(
                "AddTemplateFile",
                vec![
                    mailing_guid.into(),
                    template.template_name.as_str().into(),
                    template.file_name.as_str().into(),
                    template.encoded_data().into(),
                    template.document_type.as_str().into(),
                    template.addressed_document.into(),
                    template.address_font_code.as_str().into(),
                    template.template_type.as_str().into(),
                    template.background_name.as_str().into(),
                    template.can_begin_on_back.into(),
                    template.next_template_can_begin_on_back.into(),
                    template.protected_area_password.as_str().into(),
                    template.encryption_password.as_str().into(),
                    template.bleed_supplied.into(),
                    template.copies.into(),
                    template.instances.into(),
                    template.instance_page_numbers.as_str().into(),
                    template.cycle_instances_on_copies.into(),
                ],
            )
            .await?;

        let guid = required_text(&record, "template_guid")?;
        template.guid = Some(guid.clone());
        Ok(guid)
    }

    /// Upload a mailing list to a mailing, storing and returning its GUID
    pub async fn add_mailing_list_file(
        &self,
        mailing_guid: &str,
        list: &mut MailingListFile,
    ) -> Result<String> {
        let record: DecodedRecord = self
            .invoke(
                "AddMailingListFile",
                vec![
                    mailing_guid.into(),
                    list.file_name.as_str().into(),
                    list.encoded_data().into(),
                    list.data_format.as_str().into(),
                    list.headers.into(),
                    list.sheet_name.as_str().into(),
                    list.mapping_delimiter.as_str().into(),
                    list.mapping_fixed_width_chars.as_str().into(),
                    list.mapping_name.as_str().into(),
                ],
            )
            .await?;

        let guid = required_text(&record, "mailing_list_guid")?;
        list.guid = Some(guid.clone());
        Ok(guid)
    }

    /// Submit a mailing for pricing or printing
    pub async fn process_mailing(
        &self,
        mailing_guid: &str,
        options: &ProcessOptions,
    ) -> Result<bool> {
        let record: DecodedRecord = self
            .invoke(
                "ProcessMailing",
                vec![
                    mailing_guid.into(),
                    self.config.source.as_str().into(),
                    options.submit.into(),
                    options.partial_process.into(),
                    options.max_price_ex_vat.into(),
                    options.po_reference.as_str().into(),
                    options.payment_method.as_str().into(),
                    options.skip_preview_image_generation.into(),
                    options.email_success_list.as_str().into(),
                    options.email_error_list.as_str().into(),
                    options.http_post_on_success.as_str().into(),
                    options.http_post_on_error.as_str().into(),
                ],
            )
            .await?;
        success(&record)
    }

    /// Current processing status of a mailing
    pub async fn get_process_status(&self, mailing_guid: &str) -> Result<String> {
        let record: DecodedRecord = self.invoke("GetStatus", vec![mailing_guid.into()]).await?;
        required_text(&record, "status")
    }

    // ========================================================================
    // Account
    // ========================================================================

    /// Current balance of an account
    pub async fn get_balance(&self, account: BalanceAccount) -> Result<f64> {
        let record: DecodedRecord = self
            .invoke("GetBalance", vec![account.as_str().into()])
            .await?;

        let raw = required_text(&record, "current_balance")?;
        raw.trim().parse::<f64>().map_err(|e| {
            Error::invalid_value("current_balance", format!("'{raw}' is not a number: {e}"))
        })
    }

    /// Current balance of the top-up account
    pub async fn get_topup_balance(&self) -> Result<f64> {
        self.get_balance(BalanceAccount::Topup).await
    }

    /// Current balance of the invoice account
    pub async fn get_invoice_balance(&self) -> Result<f64> {
        self.get_balance(BalanceAccount::Invoice).await
    }

    // ========================================================================
    // Mailing Maintenance
    // ========================================================================

    /// Delete the generated mail pack of a mailing
    pub async fn delete_mail_pack(&self, mailing_guid: &str) -> Result<bool> {
        self.invoke_success("DeleteMailPack", mailing_guid).await
    }

    /// Delete the mailing list of a mailing
    pub async fn delete_mailing_list(&self, mailing_guid: &str) -> Result<bool> {
        self.invoke_success("DeleteMailingList", mailing_guid).await
    }

    /// Add the account holder to the mailing as a recipient
    pub async fn add_self(&self, mailing_guid: &str) -> Result<bool> {
        self.invoke_success("AddSelf", mailing_guid).await
    }

    /// Let the service correct invalid addresses in the mailing list
    pub async fn auto_correct_addresses(
        &self,
        mailing_guid: &str,
        correction_method: &str,
    ) -> Result<bool> {
        let record: DecodedRecord = self
            .invoke(
                "AutoCorrectAddresses",
                vec![mailing_guid.into(), correction_method.into()],
            )
            .await?;
        success(&record)
    }

    /// Withdraw a mailing from approval
    pub async fn cancel_mailing_approval(&self, mailing_guid: &str) -> Result<bool> {
        self.invoke_success("CancelMailingApproval", mailing_guid)
            .await
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Invoke a method that takes a mailing GUID and reports success
    async fn invoke_success(&self, method: &str, mailing_guid: &str) -> Result<bool> {
        let record: DecodedRecord = self.invoke(method, vec![mailing_guid.into()]).await?;
        success(&record)
    }

    /// Invoke a method and decode its result.
    ///
    /// Credentials are prepended and the return format appended to `args`.
    async fn invoke<K: TargetKind>(&self, method: &str, args: Vec<SoapArg>) -> Result<K> {
        let mut full_args = Vec::with_capacity(args.len() + 3);
        full_args.push(self.config.username.as_str().into());
        full_args.push(self.config.password.as_str().into());
        full_args.extend(args);
        full_args.push(self.config.return_format.as_str().into());

        debug!("Invoking {} with {} argument(s)", method, full_args.len());
        let xml = self.service.invoke(method, &full_args).await?;

        self.decoder.decode_as(&xml).inspect_err(|e| {
            if let Some(fault) = e.as_fault() {
                warn!("{} returned fault {}", method, fault);
            } else {
                debug!("{} response could not be decoded: {}", method, e);
            }
        })
    }
}

impl<S> std::fmt::Debug for DocmailClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocmailClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Read a required field as text
fn required_text(record: &DecodedRecord, field: &str) -> Result<String> {
    match record.get(field) {
        None | Some(FieldValue::Null) => Err(Error::missing_field(field)),
        Some(value) => Ok(value.to_string()),
    }
}

/// Read the `success` flag of a response
fn success(record: &DecodedRecord) -> Result<bool> {
    match record.get("success") {
        None | Some(FieldValue::Null) => Err(Error::missing_field("success")),
        Some(FieldValue::Bool(b)) => Ok(*b),
        Some(other) => Err(Error::invalid_value(
            "success",
            format!("expected Yes or No, got '{other}'"),
        )),
    }
}
