//! Tests for the client module

use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::model::{Mailing, MailingListFile, MailingListOptions, ProcessOptions, TemplateFile};
use crate::soap::{CannedService, SoapArg};
use crate::types::PaymentMethod;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

const MAILING_GUID: &str = "6b1e2f7a-93c4-4d1e-8a55-0f2b9c3d4e5f";

fn response(fields: &[(&str, &str)]) -> String {
    let nodes: String = fields
        .iter()
        .map(|(label, value)| format!("<Field><Key>{label}</Key><Value>{value}</Value></Field>"))
        .collect();
    format!("<Result>{nodes}</Result>")
}

fn fault(code: &str, error: &str, description: &str) -> String {
    format!(
        "<Result><Field><Key>Error code</Key><Value>{code}</Value>\
         <Key>Error code string</Key><Value>{error}</Value>\
         <Key>Error message</Key><Value>{description}</Value></Field></Result>"
    )
}

fn client(service: CannedService) -> DocmailClient<CannedService> {
    let config = ClientConfig::builder("acme", "s3cret")
        .source("tests")
        .build()
        .unwrap();
    DocmailClient::new(config, service).unwrap()
}

fn text(arg: &SoapArg) -> &str {
    arg.as_text().unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_validates_config() {
    let config = ClientConfig::new("", "s3cret");
    let err = DocmailClient::new(config, CannedService::new()).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_client_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DocmailClient<CannedService>>();
}

#[test]
fn test_debug_hides_password() {
    let client = client(CannedService::new());
    let debug = format!("{client:?}");
    assert!(debug.contains("acme"));
    assert!(!debug.contains("s3cret"));
}

// ============================================================================
// Argument Layout
// ============================================================================

#[tokio::test]
async fn test_arguments_wrapped_in_credentials_and_format() {
    let service = CannedService::new().respond("DeleteMailPack", response(&[("Success", "Yes")]));
    let client = client(service);

    assert!(client.delete_mail_pack(MAILING_GUID).await.unwrap());

    let call = client.service().last_call().unwrap();
    assert_eq!(call.method, "DeleteMailPack");
    assert_eq!(
        call.args,
        vec![
            SoapArg::from("acme"),
            SoapArg::from("s3cret"),
            SoapArg::from(MAILING_GUID),
            SoapArg::from("XML"),
        ]
    );
}

#[tokio::test]
async fn test_create_mailing_sends_options_and_stores_guid() {
    let service =
        CannedService::new().respond("CreateMailing", response(&[("MailingGUID", MAILING_GUID)]));
    let client = client(service);

    let mut mailing = Mailing::named("Spring campaign");
    mailing.is_colour = false;
    mailing.despatch_date = NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0);

    let guid = client.create_mailing(&mut mailing).await.unwrap();
    assert_eq!(guid, MAILING_GUID);
    assert_eq!(mailing.guid.as_deref(), Some(MAILING_GUID));

    let call = client.service().last_call().unwrap();
    assert_eq!(call.method, "CreateMailing");
    assert_eq!(call.args.len(), 17);
    assert_eq!(text(&call.args[2]), "tests");
    assert_eq!(text(&call.args[3]), "A4Letter");
    assert_eq!(text(&call.args[4]), "Spring campaign");
    assert_eq!(call.args[5], SoapArg::Null);
    // IsMono
    assert_eq!(call.args[6].as_bool(), Some(true));
    assert_eq!(
        call.args[11].to_string(),
        "2025-03-01T08:00:00".to_string()
    );
    assert_eq!(text(&call.args[16]), "XML");
}

#[tokio::test]
async fn test_create_mailing_requires_guid_in_response() {
    let service = CannedService::new().respond("CreateMailing", response(&[("Success", "Yes")]));
    let client = client(service);

    let mut mailing = Mailing::named("Spring campaign");
    let err = client.create_mailing(&mut mailing).await.unwrap_err();
    assert!(matches!(err, Error::MissingField { ref field } if field == "mailing_guid"));
    assert!(mailing.guid.is_none());
}

#[tokio::test]
async fn test_update_mailing_requires_created_mailing() {
    let client = client(CannedService::new());

    let err = client
        .update_mailing(&Mailing::named("Draft"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidValue { ref field, .. } if field == "guid"));
    assert!(client.service().calls().is_empty());
}

#[tokio::test]
async fn test_update_mailing() {
    let service =
        CannedService::new().respond("UpdateMailingOptions", response(&[("Success", "Yes")]));
    let client = client(service);

    let mut mailing = Mailing::named("Renamed");
    mailing.guid = Some(MAILING_GUID.to_string());

    assert!(client.update_mailing(&mailing).await.unwrap());
    let call = client.service().last_call().unwrap();
    assert_eq!(text(&call.args[2]), MAILING_GUID);
    assert_eq!(text(&call.args[3]), "Renamed");
}

// ============================================================================
// Mailing Details
// ============================================================================

#[tokio::test]
async fn test_get_mailing() {
    let service = CannedService::new().respond(
        "GetMailingDetails",
        response(&[
            ("Mailing name", "Spring campaign"),
            ("Is Mono", "No"),
            ("Despatch Date", "ASAP"),
            ("MailingListGUID", crate::model::EMPTY_GUID),
        ]),
    );
    let client = client(service);

    let mailing = client.get_mailing(MAILING_GUID).await.unwrap();
    assert_eq!(mailing.guid.as_deref(), Some(MAILING_GUID));
    assert_eq!(mailing.name.as_deref(), Some("Spring campaign"));
    assert!(mailing.is_colour);
    assert!(mailing.despatch_asap);
    assert_eq!(mailing.despatch_date, None);
    assert_eq!(mailing.mailing_list_guid, None);
}

#[tokio::test]
async fn test_fault_surfaces_as_error() {
    let service =
        CannedService::new().respond("GetMailingDetails", fault("42", "Bad", "Invalid mailing"));
    let client = client(service);

    let err = client.get_mailing(MAILING_GUID).await.unwrap_err();
    let fault = err.as_fault().unwrap();
    assert_eq!(fault.code(), "42");
    assert_eq!(fault.error(), "Bad");
    assert_eq!(fault.description(), "Invalid mailing");
}

#[tokio::test]
async fn test_transport_error_passes_through() {
    let client = client(CannedService::new());

    let err = client.get_process_status(MAILING_GUID).await.unwrap_err();
    assert!(matches!(err, Error::Transport { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_response() {
    let service = CannedService::new().respond("GetStatus", "<Result></Result>");
    let client = client(service);

    let err = client.get_process_status(MAILING_GUID).await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

// ============================================================================
// Uploads
// ============================================================================

#[tokio::test]
async fn test_add_template_file() {
    let service =
        CannedService::new().respond("AddTemplateFile", response(&[("TemplateGUID", "tmpl-1")]));
    let client = client(service);

    let mut template = TemplateFile::from_bytes("letter.docx", b"PK\x03\x04".to_vec()).unwrap();
    let guid = client
        .add_template_file(MAILING_GUID, &mut template)
        .await
        .unwrap();

    assert_eq!(guid, "tmpl-1");
    assert_eq!(template.guid.as_deref(), Some("tmpl-1"));

    let call = client.service().last_call().unwrap();
    assert_eq!(call.method, "AddTemplateFile");
    assert_eq!(text(&call.args[2]), MAILING_GUID);
    assert_eq!(text(&call.args[4]), "letter.docx");
    assert_eq!(text(&call.args[5]), "UEsDBA==");
    assert_eq!(text(&call.args[9]), "Document");
}

#[tokio::test]
async fn test_add_mailing_list_file() {
    let service = CannedService::new().respond(
        "AddMailingListFile",
        response(&[("MailingListGUID", "list-1")]),
    );
    let client = client(service);

    let mut list =
        MailingListFile::from_bytes("list.csv", b"name".to_vec(), MailingListOptions::new())
            .unwrap();
    let guid = client
        .add_mailing_list_file(MAILING_GUID, &mut list)
        .await
        .unwrap();

    assert_eq!(guid, "list-1");
    assert_eq!(list.guid.as_deref(), Some("list-1"));

    let call = client.service().last_call().unwrap();
    assert_eq!(text(&call.args[3]), "list.csv");
    assert_eq!(text(&call.args[4]), "bmFtZQ==");
    assert_eq!(text(&call.args[5]), "CSV");
    assert_eq!(call.args[6].as_bool(), Some(true));
}

// ============================================================================
// Processing
// ============================================================================

#[tokio::test]
async fn test_process_mailing() {
    let service = CannedService::new().respond("ProcessMailing", response(&[("Success", "Yes")]));
    let client = client(service);

    let options = ProcessOptions::new()
        .submit(true)
        .payment_method(PaymentMethod::Invoice)
        .po_reference("PO-42");
    assert!(client.process_mailing(MAILING_GUID, &options).await.unwrap());

    let call = client.service().last_call().unwrap();
    assert_eq!(text(&call.args[2]), MAILING_GUID);
    assert_eq!(text(&call.args[3]), "tests");
    assert_eq!(call.args[4].as_bool(), Some(true));
    assert_eq!(text(&call.args[7]), "PO-42");
    assert_eq!(text(&call.args[8]), "Invoice");
}

#[tokio::test]
async fn test_get_process_status() {
    let service = CannedService::new().respond("GetStatus", response(&[("Status", "Processed")]));
    let client = client(service);

    assert_eq!(
        client.get_process_status(MAILING_GUID).await.unwrap(),
        "Processed"
    );
}

#[tokio::test]
async fn test_success_flag_must_be_present() {
    let service = CannedService::new().respond("AddSelf", response(&[("Status", "Done")]));
    let client = client(service);

    let err = client.add_self(MAILING_GUID).await.unwrap_err();
    assert!(matches!(err, Error::MissingField { ref field } if field == "success"));
    assert_eq!(client.service().last_call().unwrap().method, "AddSelf");
}

#[tokio::test]
async fn test_success_flag_must_be_boolean() {
    let service =
        CannedService::new().respond("CancelMailingApproval", response(&[("Success", "Sure")]));
    let client = client(service);

    let err = client
        .cancel_mailing_approval(MAILING_GUID)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidValue { ref field, .. } if field == "success"));
}

#[tokio::test]
async fn test_auto_correct_addresses() {
    let service =
        CannedService::new().respond("AutoCorrectAddresses", response(&[("Success", "No")]));
    let client = client(service);

    assert!(!client
        .auto_correct_addresses(MAILING_GUID, DEFAULT_CORRECTION_METHOD)
        .await
        .unwrap());

    let call = client.service().last_call().unwrap();
    assert_eq!(text(&call.args[3]), "Cost");
}

#[tokio::test]
async fn test_delete_mailing_list() {
    let service =
        CannedService::new().respond("DeleteMailingList", response(&[("Success", "yes")]));
    let client = client(service);

    assert!(client.delete_mailing_list(MAILING_GUID).await.unwrap());
}

// ============================================================================
// Balances
// ============================================================================

#[tokio::test]
async fn test_balances() {
    let service = CannedService::new()
        .respond("GetBalance", response(&[("Current balance", "125.50")]))
        .respond("GetBalance", response(&[("Current balance", "-3")]));
    let client = client(service);

    assert!((client.get_topup_balance().await.unwrap() - 125.5).abs() < f64::EPSILON);
    assert!((client.get_invoice_balance().await.unwrap() + 3.0).abs() < f64::EPSILON);

    let calls = client.service().calls();
    assert_eq!(text(&calls[0].args[2]), "Topup");
    assert_eq!(text(&calls[1].args[2]), "Invoice");
}

#[tokio::test]
async fn test_balance_must_be_numeric() {
    let service =
        CannedService::new().respond("GetBalance", response(&[("Current balance", "lots")]));
    let client = client(service);

    let err = client.get_topup_balance().await.unwrap_err();
    assert!(matches!(err, Error::InvalidValue { ref field, .. } if field == "current_balance"));
}
